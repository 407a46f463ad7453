pub mod form {
    use std::sync::Arc;
    use std::time::Duration;

    use log::{error, info, warn};

    use crate::client::client::{BookSubmission, CatalogApi, ImageFile};
    use crate::{Book, BookType, Category};

    pub const NAME_MIN_LEN: usize = 3;
    pub const DESCRIPTION_MIN_LEN: usize = 10;
    pub const EDIT_REDIRECT_DELAY: Duration = Duration::from_secs(2);
    pub const CREATED_MESSAGE: &str = "تم حفظ الكتاب بنجاح!";
    pub const UPDATED_MESSAGE: &str = "تم تحديث البيانات بنجاح!";

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum FormMode {
        Create,
        Edit(String),
    }

    /// What the image slot of the form currently shows.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Preview {
        /// A freshly picked file, shown from its bytes before any upload.
        Local(ImageFile),
        /// The image already stored for the book being edited.
        Stored(String),
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum IssueKind {
        Required,
        TooShort { min: usize },
        Invalid,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FormIssue {
        pub field: &'static str,
        pub kind: IssueKind,
    }

    #[derive(Debug)]
    pub enum SubmitOutcome {
        /// Blocked client-side; nothing was sent.
        Invalid(Vec<FormIssue>),
        /// The form has been cleared for the next entry.
        Created(Book),
        /// The caller should return to the list once `navigate_after` elapses.
        Updated { book: Book, navigate_after: Duration },
        /// The request failed; the form keeps its values.
        Failed(String),
    }

    /// One form for both adding and editing a book.
    pub struct BookFormView {
        api: Arc<dyn CatalogApi>,
        mode: FormMode,
        pub name: String,
        pub book_type: String,
        pub category: String,
        pub description: String,
        selected_file: Option<ImageFile>,
        preview: Option<Preview>,
        submitted: bool,
        loading: bool,
        success_message: Option<String>,
    }

    impl BookFormView {
        /// Opens the form in edit mode when `book_id` is set, pre-filled from
        /// the server; otherwise in create mode.
        pub async fn open(api: Arc<dyn CatalogApi>, book_id: Option<String>) -> Self {
            let mode = match book_id {
                Some(id) => FormMode::Edit(id),
                None => FormMode::Create,
            };
            let mut view = BookFormView {
                api,
                mode,
                name: String::new(),
                book_type: String::new(),
                category: String::new(),
                description: String::new(),
                selected_file: None,
                preview: None,
                submitted: false,
                loading: false,
                success_message: None,
            };

            if let FormMode::Edit(id) = view.mode.clone() {
                view.load_book(&id).await;
            }
            view
        }

        async fn load_book(&mut self, id: &str) {
            match self.api.get_book_by_id(id).await {
                Ok(book) => {
                    self.name = book.name;
                    self.book_type = book.book_type.to_string();
                    self.category = book.category.to_string();
                    self.description = book.description;
                    self.preview = Some(Preview::Stored(self.api.image_url(&book.image)));
                }
                Err(err) if err.is_not_found() => warn!("book {} no longer exists", id),
                Err(err) => warn!("could not load book {} for editing: {}", id, err),
            }
        }

        pub fn types() -> Vec<&'static str> {
            BookType::ALL.iter().map(BookType::as_str).collect()
        }

        pub fn categories() -> Vec<&'static str> {
            Category::ALL.iter().map(Category::as_str).collect()
        }

        pub fn mode(&self) -> &FormMode {
            &self.mode
        }

        pub fn is_edit(&self) -> bool {
            matches!(self.mode, FormMode::Edit(_))
        }

        pub fn preview(&self) -> Option<&Preview> {
            self.preview.as_ref()
        }

        pub fn selected_file(&self) -> Option<&ImageFile> {
            self.selected_file.as_ref()
        }

        pub fn submitted(&self) -> bool {
            self.submitted
        }

        pub fn is_loading(&self) -> bool {
            self.loading
        }

        pub fn success_message(&self) -> Option<&str> {
            self.success_message.as_deref()
        }

        /// Takes the picked file and previews it immediately.
        pub fn select_file(&mut self, file: ImageFile) {
            self.preview = Some(Preview::Local(file.clone()));
            self.selected_file = Some(file);
        }

        pub fn validate(&self) -> Vec<FormIssue> {
            let mut issues = Vec::new();

            check_text(&mut issues, "name", &self.name, NAME_MIN_LEN);
            check_choice(&mut issues, "type", &self.book_type, |v| v.parse::<BookType>().is_ok());
            check_choice(&mut issues, "category", &self.category, |v| {
                v.parse::<Category>().is_ok()
            });
            check_text(&mut issues, "description", &self.description, DESCRIPTION_MIN_LEN);

            if !self.is_edit() && self.selected_file.is_none() {
                issues.push(FormIssue {
                    field: "image",
                    kind: IssueKind::Required,
                });
            }
            issues
        }

        pub async fn submit(&mut self) -> SubmitOutcome {
            self.submitted = true;
            self.success_message = None;

            let issues = self.validate();
            if !issues.is_empty() {
                return SubmitOutcome::Invalid(issues);
            }

            self.loading = true;
            let submission = BookSubmission {
                name: self.name.clone(),
                book_type: self.book_type.clone(),
                category: self.category.clone(),
                description: self.description.clone(),
                image: self.selected_file.clone(),
            };

            let result = match &self.mode {
                FormMode::Edit(id) => self.api.update_book(id, submission).await,
                FormMode::Create => self.api.create_book(submission).await,
            };
            self.loading = false;

            match result {
                Ok(book) if self.is_edit() => {
                    info!("updated book {}", book.id);
                    self.success_message = Some(UPDATED_MESSAGE.to_string());
                    SubmitOutcome::Updated {
                        book,
                        navigate_after: EDIT_REDIRECT_DELAY,
                    }
                }
                Ok(book) => {
                    info!("created book {}", book.id);
                    self.reset();
                    self.success_message = Some(CREATED_MESSAGE.to_string());
                    SubmitOutcome::Created(book)
                }
                Err(err) => {
                    error!("failed to save book: {}", err);
                    SubmitOutcome::Failed(err.to_string())
                }
            }
        }

        /// Clears every field, the picked file and its preview.
        pub fn reset(&mut self) {
            self.name.clear();
            self.book_type.clear();
            self.category.clear();
            self.description.clear();
            self.selected_file = None;
            self.preview = None;
            self.submitted = false;
        }
    }

    fn check_text(issues: &mut Vec<FormIssue>, field: &'static str, value: &str, min: usize) {
        if value.trim().is_empty() {
            issues.push(FormIssue {
                field,
                kind: IssueKind::Required,
            });
        } else if value.chars().count() < min {
            issues.push(FormIssue {
                field,
                kind: IssueKind::TooShort { min },
            });
        }
    }

    fn check_choice(
        issues: &mut Vec<FormIssue>,
        field: &'static str,
        value: &str,
        is_valid: impl Fn(&str) -> bool,
    ) {
        if value.is_empty() {
            issues.push(FormIssue {
                field,
                kind: IssueKind::Required,
            });
        } else if !is_valid(value) {
            issues.push(FormIssue {
                field,
                kind: IssueKind::Invalid,
            });
        }
    }

}
