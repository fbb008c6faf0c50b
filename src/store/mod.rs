pub mod config;
pub mod error;
pub mod reader;
pub mod writer;

pub use config::*;
pub use error::*;
pub use reader::*;
pub use writer::*;

/// Timestamp format used in order records.
pub const ORDER_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
