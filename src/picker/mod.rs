// src/picker/mod.rs
// =============================================================================
// The path autocomplete widget, without any terminal code.
//
// Submodules:
// - input: A text buffer with a caret that refuses to lose its base path
// - filter: Case-insensitive prefix matching of repository names
// - state: PathPicker, the state machine driven by keys and clicks
//
// Keeping this free of crossterm/ratatui means every transition can be
// tested with plain #[test] functions.
// =============================================================================

mod filter;
mod input;
mod state;

pub use state::{KeyOutcome, PathPicker, PickerKey, PickerView};
