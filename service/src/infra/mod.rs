//! Infrastructure layer.

pub mod memory;

use derive_more::{Display, Error as StdError, From};

pub use self::memory::Memory;

/// Store operation.
pub use common::Handler as Store;

/// [`Store`] error.
#[derive(Clone, Copy, Debug, Display, From, StdError)]
pub enum Error {
    /// [`Memory`] store error.
    Memory(memory::Error),
}
