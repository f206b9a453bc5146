//! [`UpdateComplaintStatus`] [`Command`] definition.

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        complaint::{self, Complaint},
        Violation,
    },
    infra::{database, Database},
    snapshot::Keeps as _,
    Store,
};

use super::Command;

/// [`Command`] for moving a [`Complaint`] along its status flow.
///
/// Only the edges of the flow are accepted: `Pending` to `Proses` or
/// `Ditolak`, and `Proses` to `Selesai`. Re-applying the current status is a
/// no-op success, so a double-click doesn't surface an error to the operator.
#[derive(Clone, Debug)]
pub struct UpdateComplaintStatus {
    /// ID of the [`Complaint`] to move.
    pub id: complaint::Id,

    /// Status to move the [`Complaint`] to.
    pub status: complaint::Status,
}

impl<Db> Command<UpdateComplaintStatus> for Store<Db>
where
    Db: Database<Update<Complaint>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Complaint;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateComplaintStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateComplaintStatus { id, status } = cmd;

        let mut complaint = self
            .snapshot()
            .all::<Complaint>()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(E::ComplaintNotExists(id))
            .map_err(tracerr::wrap!())?;
        if complaint.status == status {
            return Ok(complaint);
        }
        if !complaint.status.allows(status) {
            return Err(tracerr::new!(E::Invalid(
                Violation::IllegalTransition {
                    from: complaint.status,
                    to: status,
                },
            )));
        }
        complaint.status = status;

        self.database()
            .execute(Update(complaint.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.snapshot().cell().upsert(complaint.clone());
        Ok(complaint)
    }
}

/// Error of [`UpdateComplaintStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Requested move is not an edge of the status flow.
    #[display("invalid entity: {_0}")]
    Invalid(Violation),

    /// [`Complaint`] doesn't exist.
    #[display("`Complaint(id: {_0})` does not exist")]
    #[from(ignore)]
    ComplaintNotExists(#[error(not(source))] complaint::Id),
}

#[cfg(test)]
mod spec {
    use common::operations::{All, Listen, Select};
    use futures::{FutureExt as _, StreamExt as _};
    use serde_json::json;

    use crate::{
        command::Reload,
        domain::{complaint, Complaint, Violation},
        infra::Memory,
        Config, Store,
    };

    use super::{Command as _, ExecutionError, UpdateComplaintStatus};

    fn complaint(id: &str, status: &str) -> Complaint {
        serde_json::from_value(json!({
            "id": id,
            "user_id": "resident_01",
            "category": "Fasum",
            "description": "Lampu jalan mati total.",
            "status": status,
            "created_at": "2023-11-21",
        }))
        .unwrap()
    }

    async fn staged(db: &Memory, rows: Vec<Complaint>) -> Store<Memory> {
        let store = Store::new(Config::default(), db.clone()).0;
        db.load(rows).await;
        store.execute(Reload::<Complaint>::new()).await.unwrap();
        store
    }

    fn move_to(id: &str, status: &str) -> UpdateComplaintStatus {
        UpdateComplaintStatus {
            id: id.parse().unwrap(),
            status: status.parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn follows_the_status_flow() {
        let db = Memory::new();
        let store = staged(&db, vec![complaint("C-1", "Pending")]).await;

        let moved = store.execute(move_to("C-1", "Proses")).await.unwrap();
        assert_eq!(moved.status, complaint::Status::Proses);
        let moved = store.execute(move_to("C-1", "Selesai")).await.unwrap();
        assert_eq!(moved.status, complaint::Status::Selesai);

        let loaded = store.snapshot().all::<Complaint>();
        assert_eq!(loaded[0].status, complaint::Status::Selesai);
        let remote: Vec<Complaint> =
            db.execute(Select(All::new())).await.unwrap();
        assert_eq!(remote[0].status, complaint::Status::Selesai);
    }

    #[tokio::test]
    async fn refuses_moves_off_the_flow() {
        let db = Memory::new();
        let store = staged(
            &db,
            vec![complaint("C-1", "Pending"), complaint("C-2", "Ditolak")],
        )
        .await;

        // Skipping `Proses` entirely.
        let (err, _) = store
            .execute(move_to("C-1", "Selesai"))
            .await
            .unwrap_err()
            .split();
        assert!(matches!(
            err,
            ExecutionError::Invalid(Violation::IllegalTransition { .. }),
        ));

        // Reopening a terminal ticket.
        let (err, _) = store
            .execute(move_to("C-2", "Proses"))
            .await
            .unwrap_err()
            .split();
        assert!(matches!(
            err,
            ExecutionError::Invalid(Violation::IllegalTransition { .. }),
        ));

        let loaded = store.snapshot().all::<Complaint>();
        assert!(loaded.iter().any(|c| {
            c.id == "C-1".parse().unwrap()
                && c.status == complaint::Status::Pending
        }));
    }

    #[tokio::test]
    async fn reapplying_the_current_status_writes_nothing() {
        let db = Memory::new();
        let store = staged(&db, vec![complaint("C-1", "Proses")]).await;
        let mut changes = db.execute(Listen).await.unwrap();

        let kept = store.execute(move_to("C-1", "Proses")).await.unwrap();
        assert_eq!(kept.status, complaint::Status::Proses);
        assert!(changes.next().now_or_never().is_none());
    }

    #[tokio::test]
    async fn refuses_an_unknown_complaint() {
        let db = Memory::new();
        let store = staged(&db, vec![complaint("C-1", "Pending")]).await;

        let (err, _) = store
            .execute(move_to("C-404", "Proses"))
            .await
            .unwrap_err()
            .split();
        assert!(matches!(err, ExecutionError::ComplaintNotExists(_)));
    }
}
