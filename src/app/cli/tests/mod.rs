//! Tests for the CLI module
//!
//! Argument parsing and TOML merging tests, kept apart from the modules
//! they exercise.
