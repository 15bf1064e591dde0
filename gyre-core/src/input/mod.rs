//! Operator input handling

pub mod debounce;

pub use debounce::{ButtonEdge, ToggleButton, DEFAULT_DEBOUNCE_MS};
