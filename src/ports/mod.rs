//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the scan core and an external
//! system (directory service, breach intelligence, time, filesystem, shell).
//! Implementations live in `src/adapters/`.

pub mod breach;
pub mod clock;
pub mod directory;
pub mod filesystem;
pub mod shell;

use std::future::Future;
use std::pin::Pin;

use crate::error::PortError;

pub use breach::BreachLookup;
pub use clock::{Clock, SleepFuture};
pub use directory::Directory;
pub use filesystem::FileSystem;
pub use shell::{ShellExecutor, ShellOutput};

/// Boxed future returned by the network ports, keeping the traits dyn-compatible.
pub type PortFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, PortError>> + Send + 'a>>;
