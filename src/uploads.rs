pub mod uploads {
    use std::path::{Path, PathBuf};

    use actix_files::Files;
    use chrono::Utc;
    use log::{debug, info};
    use rand::Rng;

    use crate::CatalogError;

    pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
    pub const ALLOWED_SUBTYPES: [&str; 4] = ["jpg", "jpeg", "png", "gif"];
    pub const INVALID_IMAGE_TYPE: &str = "يجب أن تكون الصورة بصيغة صحيحة";
    pub const IMAGE_TOO_LARGE: &str = "File too large";

    /// A cover image received in a request, held in memory until stored.
    #[derive(Debug, Clone, PartialEq)]
    pub struct UploadedImage {
        pub original_name: String,
        pub content_type: String,
        pub bytes: Vec<u8>,
    }

    /// `image/png`, `image/jpeg` and friends; matched on the subtype only.
    pub fn is_allowed_content_type(content_type: &str) -> bool {
        content_type
            .rsplit_once('/')
            .map(|(_, subtype)| ALLOWED_SUBTYPES.contains(&subtype.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// `book-<unix millis>-<random>` plus the original extension, if any.
    pub fn generate_filename(original_name: &str) -> String {
        let suffix: u32 = rand::thread_rng().gen_range(0..=1_000_000_000);
        let ext = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();

        format!("book-{}-{}{}", Utc::now().timestamp_millis(), suffix, ext)
    }

    /// Flat directory of stored cover images.
    ///
    /// Files are never removed: replacing or deleting a book leaves its old
    /// image on disk.
    #[derive(Debug, Clone)]
    pub struct ImageStore {
        dir: PathBuf,
    }

    impl ImageStore {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            ImageStore { dir: dir.into() }
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        pub fn path_of(&self, filename: &str) -> PathBuf {
            self.dir.join(filename)
        }

        pub async fn ensure_dir(&self) -> Result<(), CatalogError> {
            tokio::fs::create_dir_all(&self.dir).await?;
            debug!("upload directory ready at {}", self.dir.display());
            Ok(())
        }

        /// Writes the image under a fresh name and returns that name.
        pub async fn save(&self, image: &UploadedImage) -> Result<String, CatalogError> {
            let filename = generate_filename(&image.original_name);
            tokio::fs::write(self.path_of(&filename), &image.bytes).await?;

            info!(
                "stored image {} ({} bytes, from {})",
                filename,
                image.bytes.len(),
                image.original_name
            );
            Ok(filename)
        }

        /// Static file service mounted at `/uploads`.
        pub fn static_files(&self) -> Files {
            Files::new("/uploads", &self.dir)
        }
    }

}
