pub mod release;
pub mod status;
