pub mod panel;
pub mod state;
pub mod style;
