pub mod errors {
    use actix_web::{http::StatusCode, HttpResponse, ResponseError};
    use deadpool_postgres::PoolError;
    use log::error;
    use serde::Serialize;
    use serde_json::json;
    use thiserror::Error;

    /// A single rejected input field and the message shown to the client.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
    pub struct FieldError {
        pub field: String,
        pub message: String,
    }

    impl FieldError {
        pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
            FieldError {
                field: field.into(),
                message: message.into(),
            }
        }
    }

    #[derive(Debug, Error)]
    pub enum CatalogError {
        #[error("validation failed: {0:?}")]
        Validation(Vec<FieldError>),

        #[error("{0}")]
        NotFound(String),

        #[error("malformed multipart body: {0}")]
        Multipart(String),

        #[error("connection pool error: {0}")]
        Pool(#[from] PoolError),

        #[error("postgres error: {0}")]
        Pg(#[from] tokio_postgres::Error),

        #[error("row mapping error: {0}")]
        PgMapper(#[from] tokio_pg_mapper::Error),

        #[error("io error: {0}")]
        Io(#[from] std::io::Error),

        #[error("storage error: {0}")]
        Storage(String),
    }

    impl CatalogError {
        pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
            CatalogError::Validation(vec![FieldError::new(field, message)])
        }

        pub fn book_not_found() -> Self {
            CatalogError::NotFound("عذراً، الكتاب المطلوب غير موجود".to_string())
        }

        /// Field errors carried by a validation failure, empty otherwise.
        pub fn field_errors(&self) -> &[FieldError] {
            match self {
                CatalogError::Validation(errors) => errors,
                _ => &[],
            }
        }

        fn messages(&self) -> Vec<String> {
            match self {
                CatalogError::Validation(errors) => {
                    errors.iter().map(|e| e.message.clone()).collect()
                }
                CatalogError::NotFound(message) | CatalogError::Multipart(message) => {
                    vec![message.clone()]
                }
                _ => vec!["Internal server error".to_string()],
            }
        }
    }

    impl From<actix_multipart::MultipartError> for CatalogError {
        fn from(err: actix_multipart::MultipartError) -> Self {
            CatalogError::Multipart(err.to_string())
        }
    }

    impl ResponseError for CatalogError {
        fn status_code(&self) -> StatusCode {
            match self {
                CatalogError::Validation(_) | CatalogError::Multipart(_) => StatusCode::BAD_REQUEST,
                CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }

        fn error_response(&self) -> HttpResponse {
            let status = self.status_code();
            if status.is_server_error() {
                error!("{}", self);
            }

            HttpResponse::build(status).json(json!({
                "statusCode": status.as_u16(),
                "message": self.messages(),
                "error": status.canonical_reason().unwrap_or("Error"),
                "fields": self.field_errors(),
            }))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use actix_web::body::to_bytes;

        #[actix_web::test]
        async fn validation_error_lists_every_field() {
            let err = CatalogError::Validation(vec![
                FieldError::new("name", "اسم الكتاب مطلوب"),
                FieldError::new("category", "يجب اختيار تصنيف صحيح للكتاب"),
            ]);
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

            let body = to_bytes(err.error_response().into_body()).await.unwrap();
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

            assert_eq!(json["statusCode"], 400);
            assert_eq!(json["error"], "Bad Request");
            assert_eq!(json["message"].as_array().unwrap().len(), 2);
            assert_eq!(json["fields"][1]["field"], "category");
        }

        #[actix_web::test]
        async fn storage_errors_hide_their_detail() {
            let err = CatalogError::Storage("disk on fire".to_string());
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

            let body = to_bytes(err.error_response().into_body()).await.unwrap();
            let text = String::from_utf8(body.to_vec()).unwrap();

            assert!(!text.contains("disk on fire"));
        }

        #[test]
        fn not_found_maps_to_404() {
            assert_eq!(
                CatalogError::book_not_found().status_code(),
                StatusCode::NOT_FOUND
            );
        }
    }
}
