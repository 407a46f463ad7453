pub mod list {
    use std::sync::Arc;

    use log::{debug, error};

    use crate::client::client::{CatalogApi, ClientError};
    use crate::Book;

    pub const CONNECTIVITY_ERROR: &str = "تعذر الاتصال بالخادم، يرجى المحاولة لاحقاً";
    pub const DELETE_CONFIRMATION: &str = "هل أنت متأكد من حذف هذا الكتاب نهائياً؟";

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ListState {
        Loading,
        Ready,
        /// The last fetch failed; stays until a later fetch succeeds.
        Failed(String),
    }

    /// The book list screen: a cached copy of the collection, a search box
    /// filtering it locally, and a two-step delete.
    pub struct BookListView {
        api: Arc<dyn CatalogApi>,
        books: Vec<Book>,
        filtered: Vec<Book>,
        search_term: String,
        state: ListState,
        pending_delete: Option<String>,
    }

    impl BookListView {
        pub fn new(api: Arc<dyn CatalogApi>) -> Self {
            BookListView {
                api,
                books: Vec::new(),
                filtered: Vec::new(),
                search_term: String::new(),
                state: ListState::Loading,
                pending_delete: None,
            }
        }

        /// Builds the view and performs the initial fetch.
        pub async fn mount(api: Arc<dyn CatalogApi>) -> Self {
            let mut view = Self::new(api);
            view.load().await;
            view
        }

        pub async fn load(&mut self) {
            self.state = ListState::Loading;

            match self.api.get_books().await {
                Ok(books) => {
                    debug!("loaded {} books", books.len());
                    self.books = books;
                    self.state = ListState::Ready;
                    self.apply_filter();
                }
                Err(err) => {
                    error!("failed to load books: {}", err);
                    self.books.clear();
                    self.filtered.clear();
                    self.state = ListState::Failed(CONNECTIVITY_ERROR.to_string());
                }
            }
        }

        pub fn state(&self) -> &ListState {
            &self.state
        }

        pub fn is_loading(&self) -> bool {
            self.state == ListState::Loading
        }

        pub fn error(&self) -> Option<&str> {
            match &self.state {
                ListState::Failed(message) => Some(message),
                _ => None,
            }
        }

        pub fn books(&self) -> &[Book] {
            &self.books
        }

        /// Books matching the current search term.
        pub fn visible(&self) -> &[Book] {
            &self.filtered
        }

        pub fn search_term(&self) -> &str {
            &self.search_term
        }

        /// Filters the cached books; never goes back to the server.
        pub fn set_search_term(&mut self, term: impl Into<String>) {
            self.search_term = term.into();
            self.apply_filter();
        }

        fn apply_filter(&mut self) {
            let term = self.search_term.trim().to_lowercase();
            if term.is_empty() {
                self.filtered = self.books.clone();
                return;
            }

            self.filtered = self
                .books
                .iter()
                .filter(|book| {
                    book.name.to_lowercase().contains(&term)
                        || book.category.as_str().to_lowercase().contains(&term)
                        || book.description.to_lowercase().contains(&term)
                })
                .cloned()
                .collect();
        }

        pub fn image_url(&self, book: &Book) -> String {
            self.api.image_url(&book.image)
        }

        /// First step of a delete; returns the prompt to show the user.
        pub fn request_delete(&mut self, id: impl Into<String>) -> &'static str {
            self.pending_delete = Some(id.into());
            DELETE_CONFIRMATION
        }

        pub fn pending_delete(&self) -> Option<&str> {
            self.pending_delete.as_deref()
        }

        pub fn cancel_delete(&mut self) {
            self.pending_delete = None;
        }

        /// Issues the pending delete and reloads the list from the server.
        ///
        /// Returns `Ok(false)` when nothing was awaiting confirmation.
        pub async fn confirm_delete(&mut self) -> Result<bool, ClientError> {
            let id = match self.pending_delete.take() {
                Some(id) => id,
                None => return Ok(false),
            };

            if let Err(err) = self.api.delete_book(&id).await {
                error!("failed to delete book {}: {}", id, err);
                return Err(err);
            }

            self.load().await;
            Ok(true)
        }
    }

}
