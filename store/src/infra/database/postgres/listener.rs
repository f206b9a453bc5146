//! Live [`Change`] announcements over `LISTEN`/`NOTIFY`.

use std::str::FromStr as _;

use common::operations::Listen;
use futures::{channel::mpsc, future, stream, StreamExt as _};
use tokio_postgres::{
    tls::NoTlsStream, AsyncMessage, Connection, NoTls, Notification, Socket,
};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::Collection,
    infra::database::{self, postgres, Change, Changes, Database},
};

use super::Postgres;

/// Postgres channel all record changes are announced on.
///
/// Migrations install triggers announcing every write to a [`Collection`]'s
/// table on this channel, with the table name as the payload.
pub const CHANNEL: &str = "record_changes";

impl Database<Listen> for Postgres {
    type Ok = Changes;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Listen) -> Result<Self::Ok, Self::Err> {
        // A dedicated connection, since pooled ones have their notifications
        // discarded by the pool's internal driver.
        let (client, connection) = self
            .0
            .config
            .connect(NoTls)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)?;

        let (tx, rx) = mpsc::unbounded();
        drop(tokio::spawn(forward(connection, tx)));

        client
            .batch_execute(&format!("LISTEN {CHANNEL}"))
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)?;

        Ok(rx
            .filter_map(move |notification| {
                // Holds the `client` alive: dropping the returned stream
                // ends the `LISTEN` session.
                _ = &client;
                future::ready(
                    match Collection::from_str(notification.payload()) {
                        Ok(collection) => Some(Change { collection }),
                        Err(_) => {
                            log::warn!(
                                "unknown collection `{}` announced",
                                notification.payload(),
                            );
                            None
                        }
                    },
                )
            })
            .boxed())
    }
}

/// Drives the `connection`, forwarding its [`Notification`]s into `tx`.
///
/// [`Notification`]s are only yielded while the [`Connection`] is polled,
/// so this runs as a detached task for as long as both sides are alive.
#[expect(
    clippy::wildcard_enum_match_arm,
    reason = "`AsyncMessage` is `#[non_exhaustive]`"
)]
async fn forward(
    mut connection: Connection<Socket, NoTlsStream>,
    tx: mpsc::UnboundedSender<Notification>,
) {
    let mut messages = stream::poll_fn(move |cx| connection.poll_message(cx));
    while let Some(message) = messages.next().await {
        match message {
            Ok(AsyncMessage::Notification(notification)) => {
                if tx.unbounded_send(notification).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("`LISTEN` connection failed: {e}");
                break;
            }
        }
    }
}
