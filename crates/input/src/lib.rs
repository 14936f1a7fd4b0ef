//! Input: pointer position normalized to device units, plus the small set of
//! window events the game reacts to.
//!
//! # Invariants
//! - `ViewState::pointer` is always inside `[-1, 1]` on both axes.
//! - The game consumes `InputEvent`s, never raw windowing events.

pub mod pointer;

pub use pointer::{InputEvent, ViewState, pointer_from_client};
