//! Command line interface: argument parsing and configuration merging

pub mod args;
pub mod config;

#[cfg(test)]
mod tests;
