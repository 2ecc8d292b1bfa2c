//! Navscan library exports for the CLI binary and the test suite.

pub mod core;
pub mod inference;

#[cfg(test)]
pub mod test_support;
