//! Book catalog service: CRUD over books with cover image uploads, a typed
//! client for the HTTP API, and the view models of the catalog UI.

mod config;
mod errors;
mod models;

pub mod client;
pub mod db;
pub mod handlers;
pub mod memory;
pub mod multipart;
pub mod store;
pub mod ui;
pub mod uploads;
pub mod validation;

pub use crate::config::config::{Config, StoreKind};
pub use crate::db::db::PgBookStore;
pub use crate::errors::errors::{CatalogError, FieldError};
pub use crate::handlers::handlers::configure;
pub use crate::memory::memory::MemoryBookStore;
pub use crate::models::models::{
    Book, BookPatch, BookRow, BookType, Category, NewBook, Status, UnknownVariant,
};
pub use crate::store::store::BookStore;
pub use crate::uploads::uploads::{ImageStore, UploadedImage};
