mod components;
mod timeline;

pub use components::Workflow;
