pub mod multipart {
    use actix_multipart::Multipart;
    use futures_util::StreamExt;
    use log::{debug, warn};

    use crate::uploads::uploads::{
        is_allowed_content_type, UploadedImage, IMAGE_TOO_LARGE, INVALID_IMAGE_TYPE,
        MAX_IMAGE_BYTES,
    };
    use crate::CatalogError;

    const IMAGE_FIELD: &str = "image";
    const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

    /// Decoded `multipart/form-data` body of a create or update request.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct BookForm {
        pub fields: Vec<(String, String)>,
        pub image: Option<UploadedImage>,
    }

    impl BookForm {
        /// First value sent for `name`.
        pub fn field(&self, name: &str) -> Option<&str> {
            self.fields
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        }
    }

    /// Drains the request body.
    ///
    /// The image part is checked against the type allow-list before any of
    /// its bytes are read, and reading stops as soon as it passes the size
    /// cap.
    pub async fn read_book_form(mut payload: Multipart) -> Result<BookForm, CatalogError> {
        let mut form = BookForm::default();

        while let Some(item) = payload.next().await {
            let mut field = item?;
            let disposition = field.content_disposition();
            let name = disposition.get_name().unwrap_or_default().to_string();
            let filename = disposition.get_filename().map(str::to_string);

            match filename {
                // an empty file input still sends a part, with `filename=""`
                Some(original_name) if original_name.is_empty() => {
                    while let Some(chunk) = field.next().await {
                        chunk?;
                    }
                    debug!("skipped empty file part {:?}", name);
                    continue;
                }
                Some(original_name) => {
                    if name != IMAGE_FIELD {
                        return Err(CatalogError::invalid(name, "Unexpected field"));
                    }
                    let content_type = field
                        .content_type()
                        .map(|m| m.essence_str().to_string())
                        .unwrap_or_default();
                    if !is_allowed_content_type(&content_type) {
                        warn!("rejected upload {} of type {:?}", original_name, content_type);
                        return Err(CatalogError::invalid(IMAGE_FIELD, INVALID_IMAGE_TYPE));
                    }

                    let mut bytes = Vec::new();
                    while let Some(chunk) = field.next().await {
                        let chunk = chunk?;
                        if bytes.len() + chunk.len() > MAX_IMAGE_BYTES {
                            warn!("rejected upload {}: over {} bytes", original_name, MAX_IMAGE_BYTES);
                            return Err(CatalogError::invalid(IMAGE_FIELD, IMAGE_TOO_LARGE));
                        }
                        bytes.extend_from_slice(&chunk);
                    }

                    form.image = Some(UploadedImage {
                        original_name,
                        content_type,
                        bytes,
                    });
                }
                None => {
                    let mut bytes = Vec::new();
                    while let Some(chunk) = field.next().await {
                        let chunk = chunk?;
                        if bytes.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
                            return Err(CatalogError::invalid(name, "Field value too long"));
                        }
                        bytes.extend_from_slice(&chunk);
                    }
                    let value = String::from_utf8(bytes)
                        .map_err(|_| CatalogError::invalid(name.as_str(), "Field is not valid UTF-8"))?;
                    form.fields.push((name, value));
                }
            }
        }

        Ok(form)
    }
}
