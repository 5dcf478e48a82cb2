//! Frame machinery.
//!
//! Input events arrive in bursts (scroll, resize, pointer-move); the display
//! only refreshes once per cycle. This module owns the two throttling
//! primitives and the delayed-transition queue that the controllers share:
//!
//! - [`FrameScheduler`] - at most one recomputation per refresh cycle
//! - [`Debouncer`] - short fixed-delay settling for cheap bookkeeping
//! - [`TimerQueue`] - fire-and-forget delays for staggered reveals

pub mod scheduler;
pub mod timers;

pub use scheduler::{Debouncer, FrameScheduler, DEBOUNCE_DELAY};
pub use timers::TimerQueue;
