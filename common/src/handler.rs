//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// A single [`Handler`] implementor may handle many kinds of arguments, each
/// with its own success and error types. Commands, queries and database
/// operations are all expressed as [`Handler`] implementations.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
