//! [`Database`]-related implementations.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

use derive_more::{Display, Error as StdError, From};
use futures::stream::BoxStream;

use crate::domain::Collection;

pub use self::memory::Memory;
#[cfg(feature = "postgres")]
pub use self::postgres::Postgres;

/// Database operation.
pub use common::Handler as Database;

/// Announcement of a remote change to a [`Collection`].
///
/// Carries no row data: it's an invalidation hint only, answered by
/// re-reading the whole [`Collection`]. Every origin announces, including
/// other sessions of the same [`Database`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Change {
    /// [`Collection`] a record changed in.
    pub collection: Collection,
}

/// Stream of [`Change`]s announced by a [`Database`].
///
/// Ends once the announcing connection is gone.
pub type Changes = BoxStream<'static, Change>;

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Memory`] error.
    Memory(memory::Error),

    #[cfg(feature = "postgres")]
    /// [`Postgres`] error.
    Postgres(postgres::Error),
}
