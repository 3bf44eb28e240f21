pub mod files;

pub use files::{open_log_file, validate_file_size};
