pub mod store {
    use async_trait::async_trait;

    use crate::{Book, BookPatch, CatalogError, NewBook};

    /// Persistence seam for books. Ids are assigned by the implementation
    /// and timestamps are set on every write.
    ///
    /// Lookups of an id that does not resolve (including malformed ids)
    /// return `CatalogError::NotFound`.
    #[async_trait]
    pub trait BookStore: Send + Sync {
        async fn insert(&self, book: NewBook) -> Result<Book, CatalogError>;

        /// All books in insertion order.
        async fn list(&self) -> Result<Vec<Book>, CatalogError>;

        async fn get(&self, id: &str) -> Result<Book, CatalogError>;

        async fn update(&self, id: &str, patch: BookPatch) -> Result<Book, CatalogError>;

        async fn delete(&self, id: &str) -> Result<(), CatalogError>;
    }
}
