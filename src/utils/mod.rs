pub mod format;
pub mod logging;

pub use format::{format_file_size, format_megabytes, parse_file_size};
