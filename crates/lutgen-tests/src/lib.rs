//! Integration test crate for the LUT generator.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on the core, color and export crates to verify they work
//! together.

#[cfg(test)]
mod pipeline;

#[cfg(test)]
mod export;
