pub mod app;
pub mod event;
pub mod input;
pub mod pager;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use pager::PagerSurface;
pub use theme::Theme;
