pub mod validation {
    //! Field rules for book payloads.
    //!
    //! Creation checks every rule and reports all failures at once; updates
    //! only check the fields that were actually sent.

    use std::str::FromStr;

    use crate::multipart::multipart::BookForm;
    use crate::{BookPatch, BookType, CatalogError, Category, FieldError, NewBook};

    pub const NAME_REQUIRED: &str = "اسم الكتاب مطلوب";
    pub const TYPE_REQUIRED: &str = "نوع الكتاب مطلوب";
    pub const TYPE_INVALID: &str = "نوع الكتاب يجب أن يكون عام أو مخصص";
    pub const CATEGORY_REQUIRED: &str = "تصنيف الكتاب مطلوب";
    pub const CATEGORY_INVALID: &str = "يجب اختيار تصنيف صحيح للكتاب";
    pub const DESCRIPTION_REQUIRED: &str = "وصف الكتاب مطلوب";
    pub const IMAGE_REQUIRED: &str = "صورة الكتاب مطلوبة";

    const KNOWN_FIELDS: [&str; 4] = ["name", "type", "category", "description"];

    /// Text fields of a create request that passed validation.
    #[derive(Debug, Clone, PartialEq)]
    pub struct BookFields {
        pub name: String,
        pub book_type: BookType,
        pub category: Category,
        pub description: String,
    }

    impl BookFields {
        pub fn with_image(self, image: String) -> NewBook {
            NewBook {
                name: self.name,
                book_type: self.book_type,
                category: self.category,
                description: self.description,
                image,
            }
        }
    }

    pub fn validate_create(form: &BookForm) -> Result<BookFields, CatalogError> {
        let mut errors = Vec::new();

        let name = required(form, "name", NAME_REQUIRED, &mut errors);
        let book_type = required(form, "type", TYPE_REQUIRED, &mut errors)
            .and_then(|v| parse_enum::<BookType>("type", &v, TYPE_INVALID, &mut errors));
        let category = required(form, "category", CATEGORY_REQUIRED, &mut errors)
            .and_then(|v| parse_enum::<Category>("category", &v, CATEGORY_INVALID, &mut errors));
        let description = required(form, "description", DESCRIPTION_REQUIRED, &mut errors);

        for (key, _) in &form.fields {
            if !KNOWN_FIELDS.contains(&key.as_str()) {
                errors.push(FieldError::new(
                    key.as_str(),
                    format!("property {} should not exist", key),
                ));
            }
        }

        if form.image.is_none() {
            errors.push(FieldError::new("image", IMAGE_REQUIRED));
        }

        match (name, book_type, category, description) {
            (Some(name), Some(book_type), Some(category), Some(description))
                if errors.is_empty() =>
            {
                Ok(BookFields {
                    name,
                    book_type,
                    category,
                    description,
                })
            }
            _ => Err(CatalogError::Validation(errors)),
        }
    }

    /// Builds a patch from the fields present in `form`.
    ///
    /// Unknown fields are dropped, and so is a text `image` field: only an
    /// uploaded file may replace the stored image.
    pub fn validate_update(form: &BookForm) -> Result<BookPatch, CatalogError> {
        let mut errors = Vec::new();
        let mut patch = BookPatch::default();

        if let Some(name) = form.field("name") {
            patch.name = non_empty("name", name, NAME_REQUIRED, &mut errors);
        }
        if let Some(value) = form.field("type") {
            patch.book_type = non_empty("type", value, TYPE_REQUIRED, &mut errors)
                .and_then(|v| parse_enum::<BookType>("type", &v, TYPE_INVALID, &mut errors));
        }
        if let Some(value) = form.field("category") {
            patch.category = non_empty("category", value, CATEGORY_REQUIRED, &mut errors)
                .and_then(|v| parse_enum::<Category>("category", &v, CATEGORY_INVALID, &mut errors));
        }
        if let Some(description) = form.field("description") {
            patch.description =
                non_empty("description", description, DESCRIPTION_REQUIRED, &mut errors);
        }

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(CatalogError::Validation(errors))
        }
    }

    fn required(
        form: &BookForm,
        field: &str,
        message: &str,
        errors: &mut Vec<FieldError>,
    ) -> Option<String> {
        match form.field(field) {
            Some(value) => non_empty(field, value, message, errors),
            None => {
                errors.push(FieldError::new(field, message));
                None
            }
        }
    }

    fn non_empty(
        field: &str,
        value: &str,
        message: &str,
        errors: &mut Vec<FieldError>,
    ) -> Option<String> {
        if value.trim().is_empty() {
            errors.push(FieldError::new(field, message));
            None
        } else {
            Some(value.to_string())
        }
    }

    fn parse_enum<T: FromStr>(
        field: &str,
        value: &str,
        message: &str,
        errors: &mut Vec<FieldError>,
    ) -> Option<T> {
        match value.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                errors.push(FieldError::new(field, message));
                None
            }
        }
    }

}
