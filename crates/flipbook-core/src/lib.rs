pub mod cache;
pub mod context;
pub mod gesture;
pub mod link;
pub mod navigation;
mod options;
pub mod preload;
mod types;

pub use cache::{CachePolicy, PageCache};
pub use context::{Key, ViewerAction, ViewerContext};
pub use gesture::{FlipVisual, GestureOutcome, GestureTracker, PressOutcome, SwipeIntent};
pub use link::ShareLink;
pub use navigation::{Flip, FlipDirection, IgnoreReason, NavOutcome, NavState, Navigator};
pub use options::*;
pub use preload::{preload_targets, preload_window};
pub use types::*;
