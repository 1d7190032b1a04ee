// Library target exists to expose internal modules for integration tests
// and the xtask generators. The binary entry point is in main.rs.

pub mod cli;
pub mod error;
pub mod fetch;
