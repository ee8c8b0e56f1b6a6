//! CLI command implementations for partmap operations.
//!
//! Available commands:
//! - **partition**: Partition a system dependency graph and write the results
//! - **init**: Initialize a new partmap configuration file

pub mod init;
pub mod partition;

pub use init::init_config;
pub use partition::handle_partition;
