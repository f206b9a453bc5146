//! [`Complaint`]-related [`Database`] implementations.

use common::operations::{All, By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{complaint, Complaint},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C: Connection> Database<Select<All<Complaint>>> for Postgres<C> {
    type Ok = Vec<Complaint>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<All<Complaint>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, user_id, \
                   category, sub_category, description, photo_url, \
                   status, is_warranty, \
                   created_at, upvotes \
            FROM complaints \
            ORDER BY created_at DESC";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Complaint {
                id: row.get("id"),
                user_id: row.get("user_id"),
                category: row.get("category"),
                sub_category: row.get("sub_category"),
                description: row.get("description"),
                photo_url: row.get("photo_url"),
                status: row.get("status"),
                is_warranty: row.get("is_warranty"),
                created_at: row.get("created_at"),
                upvotes: u32::try_from(row.get::<_, i64>("upvotes"))
                    .expect("`upvotes` overflow"),
            })
            .collect())
    }
}

impl<C: Connection> Database<Insert<Complaint>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(complaint): Insert<Complaint>,
    ) -> Result<Self::Ok, Self::Err> {
        let Complaint {
            id,
            user_id,
            category,
            sub_category,
            description,
            photo_url,
            status,
            is_warranty,
            created_at,
            upvotes,
        } = complaint;

        let upvotes = i64::from(upvotes);

        const SQL: &str = "\
            INSERT INTO complaints (\
                id, user_id, \
                category, sub_category, description, photo_url, \
                status, is_warranty, \
                created_at, upvotes \
            ) VALUES (\
                $1::TEXT, $2::TEXT, \
                $3::VARCHAR, $4::VARCHAR, $5::VARCHAR, $6::VARCHAR, \
                $7::VARCHAR, $8::BOOL, \
                $9::DATE, $10::INT8 \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET user_id = EXCLUDED.user_id, \
                category = EXCLUDED.category, \
                sub_category = EXCLUDED.sub_category, \
                description = EXCLUDED.description, \
                photo_url = EXCLUDED.photo_url, \
                status = EXCLUDED.status, \
                is_warranty = EXCLUDED.is_warranty, \
                created_at = EXCLUDED.created_at, \
                upvotes = EXCLUDED.upvotes";
        self.exec(
            SQL,
            &[
                &id,
                &user_id,
                &category,
                &sub_category,
                &description,
                &photo_url,
                &status,
                &is_warranty,
                &created_at,
                &upvotes,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C: Connection> Database<Update<Complaint>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(complaint): Update<Complaint>,
    ) -> Result<Self::Ok, Self::Err> {
        let Complaint {
            id,
            user_id,
            category,
            sub_category,
            description,
            photo_url,
            status,
            is_warranty,
            created_at,
            upvotes,
        } = complaint;

        let upvotes = i64::from(upvotes);

        const SQL: &str = "\
            UPDATE complaints \
            SET user_id = $2::TEXT, \
                category = $3::VARCHAR, \
                sub_category = $4::VARCHAR, \
                description = $5::VARCHAR, \
                photo_url = $6::VARCHAR, \
                status = $7::VARCHAR, \
                is_warranty = $8::BOOL, \
                created_at = $9::DATE, \
                upvotes = $10::INT8 \
            WHERE id = $1::TEXT";
        self.exec(
            SQL,
            &[
                &id,
                &user_id,
                &category,
                &sub_category,
                &description,
                &photo_url,
                &status,
                &is_warranty,
                &created_at,
                &upvotes,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C: Connection> Database<Delete<By<Complaint, complaint::Id>>>
    for Postgres<C>
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Complaint, complaint::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM complaints \
            WHERE id = $1::TEXT";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
