pub mod upload;
pub mod user;

pub use upload::*;
pub use user::*;
