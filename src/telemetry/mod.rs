pub mod health;
pub mod parser;
pub mod snapshot;
pub mod stats;
pub mod status;
pub mod summary;
pub mod types;
