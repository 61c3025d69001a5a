//! Business services shared across route handlers.

pub mod settings;
pub mod upload_store;

pub use settings::SettingsService;
pub use upload_store::{StoredFile, UploadError, UploadSink, UploadStore};
