pub mod memory {
    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use crate::store::store::BookStore;
    use crate::{Book, BookPatch, CatalogError, NewBook};

    /// Process-local `BookStore`, selected with `CATALOG_STORE=memory`.
    #[derive(Debug, Default)]
    pub struct MemoryBookStore {
        books: RwLock<Vec<Book>>,
    }

    impl MemoryBookStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl BookStore for MemoryBookStore {
        async fn insert(&self, book: NewBook) -> Result<Book, CatalogError> {
            let now = Utc::now();
            let book = Book {
                id: Uuid::new_v4().to_string(),
                name: book.name,
                book_type: book.book_type,
                category: book.category,
                description: book.description,
                image: book.image,
                created_at: now,
                updated_at: now,
            };

            self.books.write().await.push(book.clone());
            Ok(book)
        }

        async fn list(&self) -> Result<Vec<Book>, CatalogError> {
            Ok(self.books.read().await.clone())
        }

        async fn get(&self, id: &str) -> Result<Book, CatalogError> {
            self.books
                .read()
                .await
                .iter()
                .find(|b| b.id == id)
                .cloned()
                .ok_or_else(CatalogError::book_not_found)
        }

        async fn update(&self, id: &str, patch: BookPatch) -> Result<Book, CatalogError> {
            let mut books = self.books.write().await;
            let book = books
                .iter_mut()
                .find(|b| b.id == id)
                .ok_or_else(CatalogError::book_not_found)?;

            patch.apply_to(book);
            book.updated_at = Utc::now();
            Ok(book.clone())
        }

        async fn delete(&self, id: &str) -> Result<(), CatalogError> {
            let mut books = self.books.write().await;
            match books.iter().position(|b| b.id == id) {
                Some(index) => {
                    books.remove(index);
                    Ok(())
                }
                None => Err(CatalogError::NotFound(
                    "فشلت عملية الحذف، الكتاب غير موجود".to_string(),
                )),
            }
        }
    }

}
