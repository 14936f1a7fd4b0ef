//! Developer Tooling: the debug control panel model.
//!
//! The panel is described as data (folders of bound controls) so any UI
//! toolkit can draw it. Edits come back as `LightCommand`s.
//!
//! # Invariants
//! - Controls never touch light fields directly.
//! - Slider values are clamped to the slider range before a command is built.

pub mod panel;

pub use panel::{Binding, Control, ControlPanel, ControlValue, Folder, Widget};
