//! Headless view models for the catalog UI.
//!
//! Both views talk to the service only through [`CatalogApi`]; rendering is
//! left to whatever front end drives them.
//!
//! [`CatalogApi`]: crate::client::client::CatalogApi

pub mod form;
pub mod list;

pub use form::form::{BookFormView, FormIssue, FormMode, IssueKind, Preview, SubmitOutcome};
pub use list::list::{BookListView, ListState};

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::Mutex;

    use crate::client::client::{BookSubmission, CatalogApi, ClientError};
    use crate::{Book, BookType, Category};

    /// In-memory stand-in for the HTTP API.
    #[derive(Default)]
    pub struct FakeApi {
        pub books: Mutex<Vec<Book>>,
        pub submissions: Mutex<Vec<(Option<String>, BookSubmission)>>,
        pub fail_requests: AtomicBool,
        pub list_calls: AtomicUsize,
        pub delete_calls: AtomicUsize,
    }

    pub fn book(id: &str, name: &str, category: Category, description: &str) -> Book {
        let now = Utc::now();
        Book {
            id: id.to_string(),
            name: name.to_string(),
            book_type: BookType::General,
            category,
            description: description.to_string(),
            image: format!("{}.png", id),
            created_at: now,
            updated_at: now,
        }
    }

    impl FakeApi {
        pub fn with_books(books: Vec<Book>) -> Self {
            FakeApi {
                books: Mutex::new(books),
                ..FakeApi::default()
            }
        }

        pub fn set_failing(&self, failing: bool) {
            self.fail_requests.store(failing, Ordering::SeqCst);
        }

        fn guard(&self) -> Result<(), ClientError> {
            if self.fail_requests.load(Ordering::SeqCst) {
                Err(ClientError::Api {
                    status: 500,
                    message: "Internal server error".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl CatalogApi for FakeApi {
        async fn get_books(&self) -> Result<Vec<Book>, ClientError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.guard()?;
            Ok(self.books.lock().await.clone())
        }

        async fn get_book_by_id(&self, id: &str) -> Result<Book, ClientError> {
            self.guard()?;
            self.books
                .lock()
                .await
                .iter()
                .find(|b| b.id == id)
                .cloned()
                .ok_or(ClientError::Api {
                    status: 404,
                    message: "not found".to_string(),
                })
        }

        async fn create_book(&self, submission: BookSubmission) -> Result<Book, ClientError> {
            self.guard()?;
            let mut books = self.books.lock().await;
            let mut created = book(
                &format!("b{}", books.len() + 1),
                &submission.name,
                submission.category.parse().unwrap_or(Category::Cultural),
                &submission.description,
            );
            if let Some(image) = &submission.image {
                created.image = image.file_name.clone();
            }
            books.push(created.clone());
            self.submissions.lock().await.push((None, submission));
            Ok(created)
        }

        async fn update_book(&self, id: &str, submission: BookSubmission) -> Result<Book, ClientError> {
            self.guard()?;
            let mut books = self.books.lock().await;
            let existing = books.iter_mut().find(|b| b.id == id).ok_or(ClientError::Api {
                status: 404,
                message: "not found".to_string(),
            })?;
            existing.name = submission.name.clone();
            existing.description = submission.description.clone();
            if let Some(image) = &submission.image {
                existing.image = image.file_name.clone();
            }
            let updated = existing.clone();
            self.submissions.lock().await.push((Some(id.to_string()), submission));
            Ok(updated)
        }

        async fn delete_book(&self, id: &str) -> Result<(), ClientError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            self.guard()?;
            self.books.lock().await.retain(|b| b.id != id);
            Ok(())
        }

        fn image_url(&self, image: &str) -> String {
            format!("http://catalog.test/uploads/{}", image)
        }
    }
}
