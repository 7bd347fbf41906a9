//! Progress smoothing
//!
//! Optional easing of the reported progress value so that consumers see a
//! decelerating approach instead of the raw instantaneous position.
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing functions (cubic, quintic, exponential)
//! - `timing` - Time calculation utilities (progress, interpolation)
//!
//! ## L3 Molecular Layer
//! - `animation` - Animator combining atoms
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//! use scrollsync_core::smoothing::{EasingType, ProgressAnimator};
//!
//! let mut animator = ProgressAnimator::new(Duration::from_millis(150), EasingType::Cubic);
//! let start = Instant::now();
//! animator.retarget(0.5, start);
//!
//! // Once per frame
//! let value = animator.sample(start + Duration::from_millis(150));
//! assert_eq!(value, 0.5);
//! ```

// L4 Atomic Layer
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod animation;

pub use animation::ProgressAnimator;
pub use easing::{EasingType, EasingTypeExt};
