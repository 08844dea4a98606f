pub mod account_service;
pub mod listing_service;

pub use account_service::*;
pub use listing_service::*;
