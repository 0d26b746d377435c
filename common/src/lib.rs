pub mod buffer2;
pub mod file_format;
pub mod parallel;
pub mod serde;

pub use self::file_format::{FileExtensionError, SerdeFormat};
pub use self::serde::SerdeFormatError;
