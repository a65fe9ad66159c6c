//! xtask subcommands.

mod check_content;
mod read_snapshot;
mod simulate;

pub use check_content::CheckContent;
pub use read_snapshot::ReadSnapshot;
pub use simulate::Simulate;
