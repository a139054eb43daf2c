//! Reading YAML input from disk or stdin.

pub mod loader;
