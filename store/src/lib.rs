//! Shared data store of the SIPEMA housing-estate portal.
//!
//! One [`Store`] serves one signed-in session: it loads every remote
//! collection into an in-memory [`Snapshot`], applies mutations through its
//! [`Command`] surface, and keeps watched collections in sync with remote
//! changes through its background [`Task`]s.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod seed;
pub mod snapshot;
pub mod task;

use std::error::Error;

use common::operations::{By, Start};

#[cfg(doc)]
use infra::Database;

pub use self::{
    command::Command,
    snapshot::{Loaded, Snapshot},
    task::Task,
};

/// [`Store`] configuration.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// [`task::WatchLiveUpdates`] configuration.
    pub watch_live_updates: task::watch_live_updates::Config,
}

/// Shared data store of one portal session.
#[derive(Clone, Debug)]
pub struct Store<Db> {
    /// Configuration of this [`Store`].
    config: Config,

    /// [`Database`] of this [`Store`].
    database: Db,

    /// [`Snapshot`] published by this [`Store`].
    snapshot: Snapshot,
}

impl<Db> Store<Db> {
    /// Creates a new [`Store`] with the provided parameters.
    ///
    /// The [`Snapshot`] starts empty: run [`command::Refresh`] to load it.
    /// The returned [`task::Background`] drives the live-update watcher and
    /// has to be awaited for remote changes to reach the [`Snapshot`].
    pub fn new(config: Config, database: Db) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::WatchLiveUpdates<Self>,
                        task::watch_live_updates::Config,
                    >,
                >,
                Ok = (),
                Err: Error + 'static,
            > + Clone
            + 'static,
    {
        let this = Store {
            config,
            database,
            snapshot: Snapshot::default(),
        };

        let mut bg = task::Background::default();
        let store = this.clone();
        bg.spawn(async move {
            let watch = store.config().watch_live_updates.clone();
            store.execute(Start(By::new(watch))).await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Store`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Store`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns the [`Snapshot`] of this [`Store`].
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

