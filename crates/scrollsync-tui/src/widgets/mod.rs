mod document;
mod status_bar;

pub use document::DocumentWidget;
pub use status_bar::StatusBarWidget;
