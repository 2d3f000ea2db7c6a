pub mod database;
pub mod snooze;
