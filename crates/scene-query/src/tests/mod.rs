//! Unit tests for the scene-query crate.

mod engine_tests;
mod support;
