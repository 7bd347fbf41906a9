pub mod config;
pub mod error;
pub mod listener;
pub mod progress;
pub mod smoothing;
pub mod surface;
pub mod tracker;

pub use config::{AppConfig, EasingType, PagerConfig, ProgressConfig, SyncMode};
pub use error::{Error, Result};
pub use listener::{ListenerOptions, ListenerRegistry, Subscription};
pub use progress::{compute_progress, progress_percent, scrollable_range, ScrollMetrics, ScrollState};
pub use surface::{ScrollSurface, SurfaceEvent, VirtualSurface};
pub use tracker::{Observation, ProgressTracker};
