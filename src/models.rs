pub mod models {
    use std::fmt;
    use std::str::FromStr;

    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use tokio_pg_mapper_derive::PostgresMapper;
    use uuid::Uuid;

    use crate::CatalogError;

    /// Audience of a book: general readership or a specific group.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
    pub enum BookType {
        #[serde(rename = "عام")]
        General,
        #[serde(rename = "مخصص")]
        Custom,
    }

    impl BookType {
        pub const ALL: [BookType; 2] = [BookType::General, BookType::Custom];

        pub fn as_str(&self) -> &'static str {
            match self {
                BookType::General => "عام",
                BookType::Custom => "مخصص",
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
    pub enum Category {
        #[serde(rename = "ترفيهي")]
        Entertainment,
        #[serde(rename = "ثقافي")]
        Cultural,
        #[serde(rename = "ديني")]
        Religious,
        #[serde(rename = "تقني")]
        Technical,
        #[serde(rename = "صحي")]
        Health,
        #[serde(rename = "رياضي")]
        Sports,
    }

    impl Category {
        pub const ALL: [Category; 6] = [
            Category::Entertainment,
            Category::Cultural,
            Category::Religious,
            Category::Technical,
            Category::Health,
            Category::Sports,
        ];

        pub fn as_str(&self) -> &'static str {
            match self {
                Category::Entertainment => "ترفيهي",
                Category::Cultural => "ثقافي",
                Category::Religious => "ديني",
                Category::Technical => "تقني",
                Category::Health => "صحي",
                Category::Sports => "رياضي",
            }
        }
    }

    /// Returned when a wire value is outside a fixed enumeration.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct UnknownVariant(pub String);

    impl fmt::Display for UnknownVariant {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "unknown value '{}'", self.0)
        }
    }

    impl FromStr for BookType {
        type Err = UnknownVariant;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            BookType::ALL
                .into_iter()
                .find(|t| t.as_str() == s)
                .ok_or_else(|| UnknownVariant(s.to_string()))
        }
    }

    impl FromStr for Category {
        type Err = UnknownVariant;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Category::ALL
                .into_iter()
                .find(|c| c.as_str() == s)
                .ok_or_else(|| UnknownVariant(s.to_string()))
        }
    }

    impl fmt::Display for BookType {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    impl fmt::Display for Category {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// A persisted book as it travels over the wire.
    #[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Book {
        pub id: String,
        pub name: String,
        #[serde(rename = "type")]
        pub book_type: BookType,
        pub category: Category,
        pub description: String,
        pub image: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    /// Row shape of `catalog.book`; enum columns are plain text.
    #[derive(Debug, PostgresMapper)]
    #[pg_mapper(table = "book")]
    pub struct BookRow {
        pub id: Uuid,
        pub name: String,
        pub book_type: String,
        pub category: String,
        pub description: String,
        pub image: String,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    impl TryFrom<BookRow> for Book {
        type Error = CatalogError;

        fn try_from(row: BookRow) -> Result<Self, Self::Error> {
            let book_type = row.book_type.parse::<BookType>().map_err(|e| {
                CatalogError::Storage(format!("book {}: type {}", row.id, e))
            })?;
            let category = row.category.parse::<Category>().map_err(|e| {
                CatalogError::Storage(format!("book {}: category {}", row.id, e))
            })?;

            Ok(Book {
                id: row.id.to_string(),
                name: row.name,
                book_type,
                category,
                description: row.description,
                image: row.image,
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
        }
    }

    /// Validated fields of a book about to be created.
    #[derive(Debug, Clone, PartialEq)]
    pub struct NewBook {
        pub name: String,
        pub book_type: BookType,
        pub category: Category,
        pub description: String,
        pub image: String,
    }

    /// Partial update; `None` leaves the stored value untouched.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct BookPatch {
        pub name: Option<String>,
        pub book_type: Option<BookType>,
        pub category: Option<Category>,
        pub description: Option<String>,
        pub image: Option<String>,
    }

    impl BookPatch {
        /// Applies the supplied fields onto `book` in place.
        pub fn apply_to(self, book: &mut Book) {
            if let Some(name) = self.name {
                book.name = name;
            }
            if let Some(book_type) = self.book_type {
                book.book_type = book_type;
            }
            if let Some(category) = self.category {
                book.category = category;
            }
            if let Some(description) = self.description {
                book.description = description;
            }
            if let Some(image) = self.image {
                book.image = image;
            }
        }
    }

    #[derive(Serialize)]
    pub struct Status {
        pub status: String,
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn sample() -> Book {
            let now = Utc::now();
            Book {
                id: "b1".to_string(),
                name: "Atlas".to_string(),
                book_type: BookType::General,
                category: Category::Cultural,
                description: "A long enough description".to_string(),
                image: "book-1-2.png".to_string(),
                created_at: now,
                updated_at: now,
            }
        }

        #[test]
        fn enums_parse_only_their_fixed_values() {
            assert_eq!("عام".parse::<BookType>(), Ok(BookType::General));
            assert_eq!("مخصص".parse::<BookType>(), Ok(BookType::Custom));
            assert!("general".parse::<BookType>().is_err());

            for category in Category::ALL {
                assert_eq!(category.as_str().parse::<Category>(), Ok(category));
            }
            assert!("خيالي".parse::<Category>().is_err());
        }

        #[test]
        fn book_serializes_with_wire_field_names() {
            let json = serde_json::to_value(sample()).unwrap();

            assert_eq!(json["type"], "عام");
            assert_eq!(json["category"], "ثقافي");
            assert!(json.get("createdAt").is_some());
            assert!(json.get("updatedAt").is_some());
            assert!(json.get("book_type").is_none());
        }

        #[test]
        fn patch_without_image_keeps_image() {
            let mut book = sample();
            BookPatch {
                name: Some("Atlas II".to_string()),
                ..BookPatch::default()
            }
            .apply_to(&mut book);

            assert_eq!(book.name, "Atlas II");
            assert_eq!(book.image, "book-1-2.png");
        }

        #[test]
        fn row_with_unknown_category_is_a_storage_error() {
            let now = Utc::now();
            let row = BookRow {
                id: Uuid::new_v4(),
                name: "n".to_string(),
                book_type: "عام".to_string(),
                category: "other".to_string(),
                description: "d".to_string(),
                image: "i.png".to_string(),
                created_at: now,
                updated_at: now,
            };

            assert!(matches!(Book::try_from(row), Err(CatalogError::Storage(_))));
        }
    }
}
