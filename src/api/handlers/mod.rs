pub mod listing;
pub mod system;
