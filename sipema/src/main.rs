use std::{convert::Infallible, io, sync::OnceLock};

use sipema::{Args, Config};
use store::{
    command::{refresh::Report, Authenticate, Refresh},
    domain::{user, User},
    infra::{database, postgres, Memory, Postgres},
    task, Command, Store,
};
use tracerr::Traced;
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

postgres::embed_migrations!("../migrations");

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args { config, demo, user } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        store,
        postgres,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let user = user
        .map(|id| {
            id.parse::<user::Id>().map_err(|e| {
                log::error!("`{id}` is not a valid user ID: {e}");
            })
        })
        .transpose()?;

    if demo {
        let (store, background) =
            Store::new(store.into(), Memory::seeded().await);
        run(store, user, background).await
    } else {
        let postgres_config = postgres.into();
        let mut postgres = Postgres::new(&postgres_config).map_err(|e| {
            log::error!("failed to initialize `Postgres` client: {e}");
        })?;

        migrations::runner()
            .run_async(&mut postgres)
            .await
            .map_err(|e| {
                log::error!("failed to run database migrations: {e}");
            })?;

        let (store, background) = Store::new(store.into(), postgres);
        run(store, user, background).await
    }
}

/// Loads the session and supervises its background tasks until shutdown.
async fn run<Db>(
    store: Store<Db>,
    user: Option<user::Id>,
    background: task::Background,
) -> Result<(), ()>
where
    Store<Db>: Command<Refresh, Ok = Report, Err = Infallible>
        + Command<
            Authenticate,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        >,
{
    let report = store
        .execute(Refresh)
        .await
        .unwrap_or_else(|never| match never {});
    if report.is_complete() {
        log::info!("all collections loaded");
    } else {
        log::warn!("{} collection(s) failed to load", report.failed.len());
    }

    if let Some(id) = user {
        let signed = store
            .execute(Authenticate(Some(id.clone())))
            .await
            .map_err(|e| {
                log::error!("failed to authenticate `{id}`: {e}");
            })?;
        match signed {
            Some(user) => log::info!("session signed in as `{}`", user.name),
            None => log::warn!("no profile `{id}` to sign in as"),
        }
    }

    background.await.map_err(|e| {
        log::error!("background task failed: {e}");
    })
}
