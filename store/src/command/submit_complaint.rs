//! [`SubmitComplaint`] [`Command`] definition.

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        complaint::{self, Complaint},
        unit::Unit,
    },
    infra::{database, Database},
    snapshot::Keeps as _,
    Store,
};
#[cfg(doc)]
use crate::{domain::User, Snapshot};

use super::Command;

/// [`Command`] for filing a new [`Complaint`] on behalf of the signed-in
/// resident.
///
/// Everything beyond the form fields is derived here: the ticket gets a
/// random ID, a [`Pending`] status, today's date and zero upvotes, while its
/// warranty flag comes from the author's handover date rather than from the
/// form.
///
/// [`Pending`]: complaint::Status::Pending
#[derive(Clone, Debug)]
pub struct SubmitComplaint {
    /// [`complaint::Category`] the ticket is filed under.
    pub category: complaint::Category,

    /// Sub-category refining the [`complaint::Category`].
    pub sub_category: Option<complaint::SubCategory>,

    /// Description of the issue.
    pub description: complaint::Description,

    /// Photo evidence attached by the resident.
    pub photo_url: Option<complaint::PhotoUrl>,
}

impl<Db> Command<SubmitComplaint> for Store<Db>
where
    Db: Database<Insert<Complaint>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Complaint;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SubmitComplaint,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitComplaint {
            category,
            sub_category,
            description,
            photo_url,
        } = cmd;

        let author = self
            .snapshot()
            .current_user()
            .ok_or(E::NotSignedIn)
            .map_err(tracerr::wrap!())?;

        let created_at = complaint::CreationDate::today();
        let in_warranty = (0..=Unit::WARRANTY_DAYS)
            .contains(&created_at.days_since(author.bast_date));
        let complaint = Complaint {
            id: complaint::Id::random(),
            user_id: author.id,
            category,
            sub_category,
            description,
            photo_url,
            status: complaint::Status::Pending,
            is_warranty: category == complaint::Category::Retensi
                && in_warranty,
            created_at,
            upvotes: 0,
        };

        self.database()
            .execute(Insert(complaint.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.snapshot().cell().upsert(complaint.clone());
        Ok(complaint)
    }
}

/// Error of [`SubmitComplaint`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// No [`User`] is published as the [`Snapshot`]'s current one.
    #[display("no signed-in `User` to author the `Complaint`")]
    NotSignedIn,
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::DateTime;
    use serde_json::json;

    use crate::{
        command::Authenticate,
        domain::{complaint, Complaint, User},
        infra::Memory,
        Config, Store,
    };

    use super::{Command as _, ExecutionError, SubmitComplaint};

    fn store(db: &Memory) -> Store<Memory> {
        Store::new(Config::default(), db.clone()).0
    }

    fn resident(bast_days_ago: u64) -> User {
        let bast_date = (DateTime::now()
            - Duration::from_secs(bast_days_ago * 24 * 60 * 60))
        .date()
        .to_iso8601();
        serde_json::from_value(json!({
            "id": "resident_01",
            "name": "Budi Santoso",
            "role": "RESIDENT",
            "cluster": "Cluster Ruby",
            "unit": "RB-12",
            "bast_date": bast_date,
        }))
        .unwrap()
    }

    async fn signed_in(db: &Memory, author: User) -> Store<Memory> {
        let store = store(db);
        db.load([author]).await;
        _ = store
            .execute(Authenticate(Some("resident_01".parse().unwrap())))
            .await
            .unwrap();
        store
    }

    fn form(category: &str) -> SubmitComplaint {
        SubmitComplaint {
            category: category.parse().unwrap(),
            sub_category: None,
            description: "Plafon kamar utama rembes.".parse().unwrap(),
            photo_url: None,
        }
    }

    #[tokio::test]
    async fn derives_everything_beyond_the_form() {
        let db = Memory::new();
        let store = signed_in(&db, resident(10)).await;

        let filed = store.execute(form("Retensi")).await.unwrap();

        assert_eq!(filed.status, complaint::Status::Pending);
        assert_eq!(filed.upvotes, 0);
        assert_eq!(filed.user_id, "resident_01".parse().unwrap());
        assert_eq!(filed.created_at, complaint::CreationDate::today());
        assert!(filed.is_warranty);

        let loaded = store.snapshot().all::<Complaint>();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, filed.id);
    }

    #[tokio::test]
    async fn warranty_needs_both_retensi_and_an_open_window() {
        let db = Memory::new();
        let store = signed_in(&db, resident(120)).await;
        let filed = store.execute(form("Retensi")).await.unwrap();
        assert!(!filed.is_warranty, "handover window is long closed");

        let db = Memory::new();
        let store = signed_in(&db, resident(10)).await;
        let filed = store.execute(form("Fasum")).await.unwrap();
        assert!(!filed.is_warranty, "only `Retensi` tickets carry warranty");
    }

    #[tokio::test]
    async fn every_submission_gets_a_fresh_id() {
        let db = Memory::new();
        let store = signed_in(&db, resident(10)).await;

        let first = store.execute(form("Fasum")).await.unwrap();
        let second = store.execute(form("Fasum")).await.unwrap();
        assert_ne!(first.id, second.id);

        // Fresh tickets go on top, like the remote would order them.
        let loaded = store.snapshot().all::<Complaint>();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, second.id);
    }

    #[tokio::test]
    async fn refuses_unsigned_sessions() {
        let db = Memory::new();
        let store = store(&db);

        let (err, _) = store
            .execute(form("Fasum"))
            .await
            .unwrap_err()
            .split();
        assert!(matches!(err, ExecutionError::NotSignedIn));
        assert!(store.snapshot().all::<Complaint>().is_empty());
    }
}
