mod components;
mod create_dashboard;

pub use components::{Analytics, Dashboard};
pub use create_dashboard::create_dashboard;
