//! End-to-end verification flows across the workspace crates.

pub mod documents;
pub mod flows;
