//! Decision providers plugged into agents at construction.
pub mod ai;
