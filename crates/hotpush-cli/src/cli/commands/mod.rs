//! CLI subcommand implementations.

mod checksum;
mod fetch;
mod verify;

pub use checksum::run_checksum;
pub use fetch::run_fetch;
pub use verify::run_verify;
