//! [`Lead`]-related [`Database`] implementations.

use common::operations::{All, By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{lead, Lead},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C: Connection> Database<Select<All<Lead>>> for Postgres<C> {
    type Ok = Vec<Lead>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<All<Lead>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, phone, interest, budget, \
                   source, status, notes, assigned_agent, created_at \
            FROM leads \
            ORDER BY created_at DESC";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Lead {
                id: row.get("id"),
                name: row.get("name"),
                phone: row.get("phone"),
                interest: row.get("interest"),
                budget: row.get("budget"),
                source: row.get("source"),
                status: row.get("status"),
                notes: row.get("notes"),
                assigned_agent: row.get("assigned_agent"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}

impl<C: Connection> Database<Insert<Lead>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(lead): Insert<Lead>,
    ) -> Result<Self::Ok, Self::Err> {
        let Lead {
            id,
            name,
            phone,
            interest,
            budget,
            source,
            status,
            notes,
            assigned_agent,
            created_at,
        } = lead;

        const SQL: &str = "\
            INSERT INTO leads (\
                id, name, phone, interest, budget, \
                source, status, notes, assigned_agent, created_at\
            ) \
            VALUES (\
                $1::TEXT, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::VARCHAR, $7::VARCHAR, $8::VARCHAR, \
                $9::VARCHAR, $10::DATE\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                phone = EXCLUDED.phone, \
                interest = EXCLUDED.interest, \
                budget = EXCLUDED.budget, \
                source = EXCLUDED.source, \
                status = EXCLUDED.status, \
                notes = EXCLUDED.notes, \
                assigned_agent = EXCLUDED.assigned_agent, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &phone,
                &interest,
                &budget,
                &source,
                &status,
                &notes,
                &assigned_agent,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C: Connection> Database<Update<Lead>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(lead): Update<Lead>,
    ) -> Result<Self::Ok, Self::Err> {
        let Lead {
            id,
            name,
            phone,
            interest,
            budget,
            source,
            status,
            notes,
            assigned_agent,
            created_at,
        } = lead;

        const SQL: &str = "\
            UPDATE leads \
            SET name = $2::VARCHAR, \
                phone = $3::VARCHAR, \
                interest = $4::VARCHAR, \
                budget = $5::VARCHAR, \
                source = $6::VARCHAR, \
                status = $7::VARCHAR, \
                notes = $8::VARCHAR, \
                assigned_agent = $9::VARCHAR, \
                created_at = $10::DATE \
            WHERE id = $1::TEXT";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &phone,
                &interest,
                &budget,
                &source,
                &status,
                &notes,
                &assigned_agent,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C: Connection> Database<Delete<By<Lead, lead::Id>>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Lead, lead::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM leads \
            WHERE id = $1::TEXT";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
