//! One module per subcommand.

pub mod add;
#[cfg(feature = "audit-log")]
pub mod audit_cmd;
pub mod clear;
pub mod completions;
pub mod folders;
pub mod generate;
pub mod hash;
pub mod init;
pub mod list;
pub mod remove;
pub mod show;
