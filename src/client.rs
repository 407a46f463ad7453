pub mod client {
    //! Typed HTTP client for the catalog API, used by the UI view models.

    use async_trait::async_trait;
    use log::debug;
    use reqwest::multipart::{Form, Part};
    use reqwest::StatusCode;
    use serde_json::Value;
    use thiserror::Error;

    use crate::Book;

    #[derive(Debug, Error)]
    pub enum ClientError {
        #[error("could not reach the catalog service: {0}")]
        Connectivity(#[source] reqwest::Error),

        #[error("catalog service answered {status}: {message}")]
        Api { status: u16, message: String },

        #[error("unexpected response body: {0}")]
        Decode(#[source] reqwest::Error),

        #[error("could not build request: {0}")]
        Request(#[source] reqwest::Error),
    }

    impl ClientError {
        pub fn is_not_found(&self) -> bool {
            matches!(self, ClientError::Api { status: 404, .. })
        }
    }

    /// An image picked on the client, as raw bytes.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ImageFile {
        pub file_name: String,
        pub content_type: String,
        pub bytes: Vec<u8>,
    }

    /// Form values sent on create or update. `image: None` on update keeps
    /// the stored image.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct BookSubmission {
        pub name: String,
        pub book_type: String,
        pub category: String,
        pub description: String,
        pub image: Option<ImageFile>,
    }

    impl BookSubmission {
        fn into_form(self) -> Result<Form, ClientError> {
            let form = Form::new()
                .text("name", self.name)
                .text("type", self.book_type)
                .text("category", self.category)
                .text("description", self.description);

            match self.image {
                Some(image) => {
                    let part = Part::bytes(image.bytes)
                        .file_name(image.file_name)
                        .mime_str(&image.content_type)
                        .map_err(ClientError::Request)?;
                    Ok(form.part("image", part))
                }
                None => Ok(form),
            }
        }
    }

    #[async_trait]
    pub trait CatalogApi: Send + Sync {
        async fn get_books(&self) -> Result<Vec<Book>, ClientError>;
        async fn get_book_by_id(&self, id: &str) -> Result<Book, ClientError>;
        async fn create_book(&self, submission: BookSubmission) -> Result<Book, ClientError>;
        async fn update_book(&self, id: &str, submission: BookSubmission) -> Result<Book, ClientError>;
        async fn delete_book(&self, id: &str) -> Result<(), ClientError>;

        /// Public URL of a stored cover image.
        fn image_url(&self, image: &str) -> String;
    }

    #[derive(Debug, Clone)]
    pub struct CatalogClient {
        http: reqwest::Client,
        base_url: String,
    }

    impl CatalogClient {
        pub fn new(base_url: impl Into<String>) -> Self {
            CatalogClient {
                http: reqwest::Client::new(),
                base_url: base_url.into().trim_end_matches('/').to_string(),
            }
        }

        fn books_url(&self) -> String {
            format!("{}/books", self.base_url)
        }

        fn book_url(&self, id: &str) -> String {
            format!("{}/books/{}", self.base_url, id)
        }

        async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            })
        }

        async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
            let response = request.send().await.map_err(ClientError::Connectivity)?;
            Self::check(response).await
        }
    }

    /// Joins the `message` of an API error body, falling back to the status.
    fn error_message(status: StatusCode, body: &str) -> String {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        match parsed.as_ref().and_then(|v| v.get("message")) {
            Some(Value::Array(messages)) => messages
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("; "),
            Some(Value::String(message)) => message.clone(),
            _ => status.canonical_reason().unwrap_or("request failed").to_string(),
        }
    }

    #[async_trait]
    impl CatalogApi for CatalogClient {
        async fn get_books(&self) -> Result<Vec<Book>, ClientError> {
            let response = Self::send(self.http.get(self.books_url())).await?;
            response.json().await.map_err(ClientError::Decode)
        }

        async fn get_book_by_id(&self, id: &str) -> Result<Book, ClientError> {
            let response = Self::send(self.http.get(self.book_url(id))).await?;
            response.json().await.map_err(ClientError::Decode)
        }

        async fn create_book(&self, submission: BookSubmission) -> Result<Book, ClientError> {
            let form = submission.into_form()?;
            let response = Self::send(self.http.post(self.books_url()).multipart(form)).await?;
            response.json().await.map_err(ClientError::Decode)
        }

        async fn update_book(&self, id: &str, submission: BookSubmission) -> Result<Book, ClientError> {
            let form = submission.into_form()?;
            let response = Self::send(self.http.put(self.book_url(id)).multipart(form)).await?;
            response.json().await.map_err(ClientError::Decode)
        }

        async fn delete_book(&self, id: &str) -> Result<(), ClientError> {
            Self::send(self.http.delete(self.book_url(id))).await?;
            debug!("deleted book {}", id);
            Ok(())
        }

        fn image_url(&self, image: &str) -> String {
            format!("{}/uploads/{}", self.base_url, image)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn urls_are_built_from_the_base() {
            let client = CatalogClient::new("http://localhost:3000/");

            assert_eq!(client.books_url(), "http://localhost:3000/books");
            assert_eq!(client.book_url("42"), "http://localhost:3000/books/42");
            assert_eq!(
                client.image_url("book-1-2.png"),
                "http://localhost:3000/uploads/book-1-2.png"
            );
        }

        #[test]
        fn api_error_messages_are_joined() {
            let body = r#"{"statusCode":400,"message":["a","b"],"error":"Bad Request"}"#;
            assert_eq!(error_message(StatusCode::BAD_REQUEST, body), "a; b");

            let body = r#"{"statusCode":404,"message":["missing"]}"#;
            assert_eq!(error_message(StatusCode::NOT_FOUND, body), "missing");

            assert_eq!(error_message(StatusCode::BAD_GATEWAY, "<html>"), "Bad Gateway");
        }

        #[test]
        fn only_a_404_counts_as_not_found() {
            let missing = ClientError::Api {
                status: 404,
                message: "missing".to_string(),
            };
            let invalid = ClientError::Api {
                status: 400,
                message: "bad".to_string(),
            };

            assert!(missing.is_not_found());
            assert!(!invalid.is_not_found());
        }

        #[tokio::test]
        async fn unreachable_server_is_a_connectivity_error() {
            // port 9 (discard) is closed on test hosts
            let client = CatalogClient::new("http://127.0.0.1:9");

            let err = client.get_books().await.unwrap_err();
            assert!(matches!(err, ClientError::Connectivity(_)));
        }
    }
}
