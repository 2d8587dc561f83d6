mod builder;
mod canvas;
mod components;
mod create_chart;
pub mod types;
mod use_canvas;

pub use builder::build_chart;
pub use components::Chart;
