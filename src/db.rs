pub mod db {
    use async_trait::async_trait;
    use deadpool_postgres::{Client, Pool};
    use log::{debug, info};
    use tokio_pg_mapper::FromTokioPostgresRow;
    use uuid::Uuid;

    use crate::store::store::BookStore;
    use crate::{Book, BookPatch, BookRow, CatalogError, NewBook};

    fn statement(template: &str) -> String {
        template.replace("$table_fields", &BookRow::sql_table_fields())
    }

    fn parse_id(id: &str) -> Result<Uuid, CatalogError> {
        Uuid::parse_str(id).map_err(|_| CatalogError::book_not_found())
    }

    fn to_books(rows: &[tokio_postgres::Row]) -> Result<Vec<Book>, CatalogError> {
        rows.iter()
            .map(|row| BookRow::from_row_ref(row).map_err(CatalogError::from))
            .map(|row| row.and_then(Book::try_from))
            .collect()
    }

    pub async fn create_schema(client: &Client) -> Result<(), CatalogError> {
        client.batch_execute(include_str!("../sql/schema.sql")).await?;
        Ok(())
    }

    pub async fn add_book(client: &Client, book: &NewBook) -> Result<Book, CatalogError> {
        let stmt = client.prepare(&statement(include_str!("../sql/add_book.sql"))).await?;
        let book_type = book.book_type.as_str();
        let category = book.category.as_str();

        let rows = client
            .query(
                &stmt,
                &[&book.name, &book_type, &category, &book.description, &book.image],
            )
            .await?;

        to_books(&rows)?
            .pop()
            .ok_or_else(|| CatalogError::Storage("insert returned no row".to_string()))
    }

    pub async fn get_books(client: &Client) -> Result<Vec<Book>, CatalogError> {
        let stmt = client.prepare(&statement(include_str!("../sql/get_books.sql"))).await?;
        let rows = client.query(&stmt, &[]).await?;

        debug!("loaded {} books", rows.len());
        to_books(&rows)
    }

    pub async fn get_book_id(client: &Client, book_id: &str) -> Result<Book, CatalogError> {
        let id = parse_id(book_id)?;
        let stmt = client.prepare(&statement(include_str!("../sql/get_book_id.sql"))).await?;
        let rows = client.query(&stmt, &[&id]).await?;

        to_books(&rows)?.pop().ok_or_else(CatalogError::book_not_found)
    }

    pub async fn update_book(
        client: &Client,
        book_id: &str,
        patch: &BookPatch,
    ) -> Result<Book, CatalogError> {
        let id = parse_id(book_id)?;
        let stmt = client.prepare(&statement(include_str!("../sql/update_book.sql"))).await?;
        let book_type = patch.book_type.map(|t| t.as_str());
        let category = patch.category.map(|c| c.as_str());

        let rows = client
            .query(
                &stmt,
                &[
                    &id,
                    &patch.name,
                    &book_type,
                    &category,
                    &patch.description,
                    &patch.image,
                ],
            )
            .await?;

        to_books(&rows)?.pop().ok_or_else(CatalogError::book_not_found)
    }

    pub async fn delete_book(client: &Client, book_id: &str) -> Result<(), CatalogError> {
        let id = parse_id(book_id)?;
        let stmt = client.prepare(include_str!("../sql/delete_book.sql")).await?;

        match client.execute(&stmt, &[&id]).await? {
            0 => Err(CatalogError::NotFound(
                "فشلت عملية الحذف، الكتاب غير موجود".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// `BookStore` over a deadpool Postgres pool; one pooled client per call.
    pub struct PgBookStore {
        pool: Pool,
    }

    impl PgBookStore {
        pub fn new(pool: Pool) -> Self {
            PgBookStore { pool }
        }

        /// Creates the `catalog` schema and table if they are missing.
        pub async fn migrate(&self) -> Result<(), CatalogError> {
            let client: Client = self.pool.get().await?;
            create_schema(&client).await?;
            info!("catalog schema ready");
            Ok(())
        }
    }

    #[async_trait]
    impl BookStore for PgBookStore {
        async fn insert(&self, book: NewBook) -> Result<Book, CatalogError> {
            let client: Client = self.pool.get().await?;
            add_book(&client, &book).await
        }

        async fn list(&self) -> Result<Vec<Book>, CatalogError> {
            let client: Client = self.pool.get().await?;
            get_books(&client).await
        }

        async fn get(&self, id: &str) -> Result<Book, CatalogError> {
            let client: Client = self.pool.get().await?;
            get_book_id(&client, id).await
        }

        async fn update(&self, id: &str, patch: BookPatch) -> Result<Book, CatalogError> {
            let client: Client = self.pool.get().await?;
            update_book(&client, id, &patch).await
        }

        async fn delete(&self, id: &str) -> Result<(), CatalogError> {
            let client: Client = self.pool.get().await?;
            delete_book(&client, id).await
        }
    }

}
