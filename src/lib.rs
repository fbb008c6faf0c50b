// Pharmacy point-of-sale core
//
// Customers in two loyalty tiers, a product catalog with derived bundles,
// and a pricing engine that combines discounts, reward redemption, and
// reward accrual into atomic purchase commits. State loads from and saves
// to flat record files; rendering and the interactive loop are the
// caller's concern.

pub mod app;
pub mod catalog;
pub mod customers;
pub mod error;
pub mod orders;
pub mod store;
pub mod validation;

pub use app::Pharmacy;
pub use error::PharmacyError;
pub use store::StorePaths;

/// Initialize the tracing subscriber for logging.
/// This enables the error!, warn!, info!, debug!, and trace! macros.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_level(true)
        .init();
}
