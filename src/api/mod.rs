pub mod assets;
pub mod auth;
pub mod health;
pub mod swagger;
pub mod uploads;
