pub mod changelog;
pub mod encoding;
pub mod version;
