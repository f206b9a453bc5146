//! [`Invoice`]-related [`Database`] implementations.

use common::operations::{All, By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{invoice, Invoice},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C: Connection> Database<Select<All<Invoice>>> for Postgres<C> {
    type Ok = Vec<Invoice>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<All<Invoice>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, unit_id, month, year, \
                   amount, status, due_date, category \
            FROM invoices \
            ORDER BY year DESC";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Invoice {
                id: row.get("id"),
                unit_id: row.get("unit_id"),
                month: row.get("month"),
                year: u16::try_from(row.get::<_, i32>("year"))
                    .expect("`year` overflow"),
                amount: row.get("amount"),
                status: row.get("status"),
                due_date: row.get("due_date"),
                category: row.get("category"),
            })
            .collect())
    }
}

impl<C: Connection> Database<Insert<Invoice>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(invoice): Insert<Invoice>,
    ) -> Result<Self::Ok, Self::Err> {
        let Invoice {
            id,
            unit_id,
            month,
            year,
            amount,
            status,
            due_date,
            category,
        } = invoice;
        let year = i32::from(year);

        const SQL: &str = "\
            INSERT INTO invoices (\
                id, unit_id, month, year, \
                amount, status, due_date, category\
            ) \
            VALUES (\
                $1::TEXT, $2::TEXT, $3::VARCHAR, $4::INT4, \
                $5::NUMERIC, $6::VARCHAR, $7::DATE, $8::VARCHAR\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET unit_id = EXCLUDED.unit_id, \
                month = EXCLUDED.month, \
                year = EXCLUDED.year, \
                amount = EXCLUDED.amount, \
                status = EXCLUDED.status, \
                due_date = EXCLUDED.due_date, \
                category = EXCLUDED.category";
        self.exec(
            SQL,
            &[
                &id, &unit_id, &month, &year, &amount, &status, &due_date,
                &category,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C: Connection> Database<Update<Invoice>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(invoice): Update<Invoice>,
    ) -> Result<Self::Ok, Self::Err> {
        let Invoice {
            id,
            unit_id,
            month,
            year,
            amount,
            status,
            due_date,
            category,
        } = invoice;
        let year = i32::from(year);

        const SQL: &str = "\
            UPDATE invoices \
            SET unit_id = $2::TEXT, \
                month = $3::VARCHAR, \
                year = $4::INT4, \
                amount = $5::NUMERIC, \
                status = $6::VARCHAR, \
                due_date = $7::DATE, \
                category = $8::VARCHAR \
            WHERE id = $1::TEXT";
        self.exec(
            SQL,
            &[
                &id, &unit_id, &month, &year, &amount, &status, &due_date,
                &category,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C: Connection> Database<Delete<By<Invoice, invoice::Id>>>
    for Postgres<C>
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Invoice, invoice::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM invoices \
            WHERE id = $1::TEXT";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
