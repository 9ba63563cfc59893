//! Lookup tables consulted by the engine and the renderer.

pub mod categories;

pub use categories::{Category, CategoryId, CategoryIndex};
