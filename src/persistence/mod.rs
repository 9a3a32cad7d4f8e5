pub mod blob;
pub mod error;
pub mod files;

pub use blob::{load, load_settled, save, AppData, LoadSource};
pub use files::{blob_file, ensure_dir, init_local_dir, log_file, resolve_data_dir};
