//! [`Expense`]-related [`Database`] implementations.

use common::operations::{All, By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{expense, Expense},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C: Connection> Database<Select<All<Expense>>> for Postgres<C> {
    type Ok = Vec<Expense>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<All<Expense>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, cluster_id, date, category, \
                   description, amount, proof_url \
            FROM ledger_entries \
            ORDER BY date DESC";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Expense {
                id: row.get("id"),
                cluster_id: row.get("cluster_id"),
                date: row.get("date"),
                category: row.get("category"),
                description: row.get("description"),
                amount: row.get("amount"),
                proof_url: row.get("proof_url"),
            })
            .collect())
    }
}

impl<C: Connection> Database<Insert<Expense>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(expense): Insert<Expense>,
    ) -> Result<Self::Ok, Self::Err> {
        let Expense {
            id,
            cluster_id,
            date,
            category,
            description,
            amount,
            proof_url,
        } = expense;

        const SQL: &str = "\
            INSERT INTO ledger_entries (\
                id, cluster_id, date, category, \
                description, amount, proof_url\
            ) \
            VALUES (\
                $1::TEXT, $2::TEXT, $3::DATE, $4::VARCHAR, \
                $5::VARCHAR, $6::NUMERIC, $7::VARCHAR\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET cluster_id = EXCLUDED.cluster_id, \
                date = EXCLUDED.date, \
                category = EXCLUDED.category, \
                description = EXCLUDED.description, \
                amount = EXCLUDED.amount, \
                proof_url = EXCLUDED.proof_url";
        self.exec(
            SQL,
            &[
                &id,
                &cluster_id,
                &date,
                &category,
                &description,
                &amount,
                &proof_url,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C: Connection> Database<Update<Expense>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(expense): Update<Expense>,
    ) -> Result<Self::Ok, Self::Err> {
        let Expense {
            id,
            cluster_id,
            date,
            category,
            description,
            amount,
            proof_url,
        } = expense;

        const SQL: &str = "\
            UPDATE ledger_entries \
            SET cluster_id = $2::TEXT, \
                date = $3::DATE, \
                category = $4::VARCHAR, \
                description = $5::VARCHAR, \
                amount = $6::NUMERIC, \
                proof_url = $7::VARCHAR \
            WHERE id = $1::TEXT";
        self.exec(
            SQL,
            &[
                &id,
                &cluster_id,
                &date,
                &category,
                &description,
                &amount,
                &proof_url,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C: Connection> Database<Delete<By<Expense, expense::Id>>>
    for Postgres<C>
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Expense, expense::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM ledger_entries \
            WHERE id = $1::TEXT";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
