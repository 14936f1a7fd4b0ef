//! Game kernel: owns the scene and view state and advances them one frame at
//! a time.
//!
//! # Invariants
//! - Every tick applies the same fixed increments; elapsed wall-clock time is
//!   never consulted, so animation speed follows the display refresh rate.
//! - All mutable state lives in `Game`; nothing is global.
//! - Frames are driven by a `FrameScheduler`, never by a hidden loop.

pub mod config;
pub mod game;
pub mod scheduler;

pub use config::{AnimationConfig, ConfigError, GameConfig, LightsConfig, WindowConfig};
pub use game::{Game, GameError, RunOutcome};
pub use scheduler::{CancelToken, FixedTicks, FrameScheduler};
