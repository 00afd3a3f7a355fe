//! Storage layer (process-local, non-persistent).

pub mod memory;

pub use memory::{DateBound, ExerciseStore, LogFilter, UserStore};
