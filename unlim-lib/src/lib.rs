pub mod client;
pub mod config;
pub mod duration;
pub mod models;
pub mod navigation;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use models::release::UpdateError;
pub use models::status::{UpdateStatus, UserAction};
