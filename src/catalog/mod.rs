pub mod bundle_calculator;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use bundle_calculator::*;
pub use error::*;
pub use models::*;
pub use repository::*;
pub use service::*;
