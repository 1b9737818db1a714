//! Unit tests for the scene-graph crate.

mod support;
mod traversal_tests;
