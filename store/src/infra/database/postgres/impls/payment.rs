//! [`Payment`]-related [`Database`] implementations.

use common::operations::{All, By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{payment, Payment},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C: Connection> Database<Select<All<Payment>>> for Postgres<C> {
    type Ok = Vec<Payment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<All<Payment>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, user_id, rekening_ipl, nominal, referensi, \
                   nama, blok, nomor_rumah, status, created_at \
            FROM payments \
            ORDER BY created_at DESC";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Payment {
                id: row.get("id"),
                user_id: row.get("user_id"),
                rekening_ipl: row.get("rekening_ipl"),
                nominal: row.get("nominal"),
                referensi: row.get("referensi"),
                nama: row.get("nama"),
                blok: row.get("blok"),
                nomor_rumah: row.get("nomor_rumah"),
                status: row.get("status"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}

impl<C: Connection> Database<Insert<Payment>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(payment): Insert<Payment>,
    ) -> Result<Self::Ok, Self::Err> {
        let Payment {
            id,
            user_id,
            rekening_ipl,
            nominal,
            referensi,
            nama,
            blok,
            nomor_rumah,
            status,
            created_at,
        } = payment;

        const SQL: &str = "\
            INSERT INTO payments (\
                id, user_id, rekening_ipl, nominal, referensi, \
                nama, blok, nomor_rumah, status, created_at\
            ) \
            VALUES (\
                $1::TEXT, $2::TEXT, $3::VARCHAR, $4::NUMERIC, \
                $5::VARCHAR, $6::VARCHAR, $7::VARCHAR, $8::VARCHAR, \
                $9::VARCHAR, $10::DATE\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET user_id = EXCLUDED.user_id, \
                rekening_ipl = EXCLUDED.rekening_ipl, \
                nominal = EXCLUDED.nominal, \
                referensi = EXCLUDED.referensi, \
                nama = EXCLUDED.nama, \
                blok = EXCLUDED.blok, \
                nomor_rumah = EXCLUDED.nomor_rumah, \
                status = EXCLUDED.status, \
                created_at = EXCLUDED.created_at";
        self.exec(
            SQL,
            &[
                &id,
                &user_id,
                &rekening_ipl,
                &nominal,
                &referensi,
                &nama,
                &blok,
                &nomor_rumah,
                &status,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C: Connection> Database<Update<Payment>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(payment): Update<Payment>,
    ) -> Result<Self::Ok, Self::Err> {
        let Payment {
            id,
            user_id,
            rekening_ipl,
            nominal,
            referensi,
            nama,
            blok,
            nomor_rumah,
            status,
            created_at,
        } = payment;

        const SQL: &str = "\
            UPDATE payments \
            SET user_id = $2::TEXT, \
                rekening_ipl = $3::VARCHAR, \
                nominal = $4::NUMERIC, \
                referensi = $5::VARCHAR, \
                nama = $6::VARCHAR, \
                blok = $7::VARCHAR, \
                nomor_rumah = $8::VARCHAR, \
                status = $9::VARCHAR, \
                created_at = $10::DATE \
            WHERE id = $1::TEXT";
        self.exec(
            SQL,
            &[
                &id,
                &user_id,
                &rekening_ipl,
                &nominal,
                &referensi,
                &nama,
                &blok,
                &nomor_rumah,
                &status,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C: Connection> Database<Delete<By<Payment, payment::Id>>>
    for Postgres<C>
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Payment, payment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM payments \
            WHERE id = $1::TEXT";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
