pub mod core;
pub mod interpret_effect;
pub mod main;
pub mod presentation;
pub mod render;
pub mod results_panel;
