//! [`Command`] for resolving the session's current [`User`].

use common::operations::{By, Select};
use derive_more::From;
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{database, Database},
    Store,
};

use super::Command;

/// [`Command`] for publishing which [`User`] this session belongs to.
///
/// [`None`] signs the session out. An ID is resolved against the already
/// loaded profiles first, then against the remote service; an ID matching no
/// profile publishes no user at all.
#[derive(Clone, Debug, From)]
pub struct Authenticate(pub Option<user::Id>);

impl<Db> Command<Authenticate> for Store<Db>
where
    Db: Database<
        Select<By<Option<User>, user::Id>>,
        Ok = Option<User>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<User>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: Authenticate,
    ) -> Result<Self::Ok, Self::Err> {
        let Authenticate(user_id) = cmd;

        let Some(id) = user_id else {
            self.snapshot().set_current_user(None);
            return Ok(None);
        };

        let known =
            self.snapshot().all::<User>().iter().find(|u| u.id == id).cloned();
        let user = if known.is_some() {
            known
        } else {
            self.database()
                .execute(Select(By::new(id)))
                .await
                .map_err(tracerr::wrap!())?
        };

        self.snapshot().set_current_user(user.clone());
        Ok(user)
    }
}

/// Error of [`Authenticate`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use crate::{
        command::Refresh,
        domain::Collection,
        infra::Memory,
        Config, Store,
    };

    use super::{Authenticate, Command as _};

    fn store(db: &Memory) -> Store<Memory> {
        Store::new(Config::default(), db.clone()).0
    }

    #[tokio::test]
    async fn resolves_loaded_profiles_without_a_round_trip() {
        let db = Memory::seeded().await;
        let store = store(&db);
        _ = store.execute(Refresh).await.unwrap();

        // Loaded profiles must answer even when the service is down.
        db.poison(Collection::Profiles).await;

        let user = store
            .execute(Authenticate(Some("resident_01".parse().unwrap())))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.name, "Budi Santoso".parse().unwrap());

        let current = store.snapshot().current_user().unwrap();
        assert_eq!(current.id, user.id);
    }

    #[tokio::test]
    async fn falls_back_to_the_remote_service() {
        let db = Memory::seeded().await;
        let store = store(&db);

        let user = store
            .execute(Authenticate(Some("resident_01".parse().unwrap())))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, "resident_01".parse().unwrap());
        assert!(store.snapshot().current_user().is_some());
    }

    #[tokio::test]
    async fn unknown_id_publishes_no_user() {
        let db = Memory::seeded().await;
        let store = store(&db);

        let user = store
            .execute(Authenticate(Some("ghost".parse().unwrap())))
            .await
            .unwrap();
        assert!(user.is_none());
        assert!(store.snapshot().current_user().is_none());
    }

    #[tokio::test]
    async fn none_signs_the_session_out() {
        let db = Memory::seeded().await;
        let store = store(&db);
        _ = store
            .execute(Authenticate(Some("resident_01".parse().unwrap())))
            .await
            .unwrap();
        assert!(store.snapshot().current_user().is_some());

        let user = store.execute(Authenticate(None)).await.unwrap();
        assert!(user.is_none());
        assert!(store.snapshot().current_user().is_none());
    }
}
