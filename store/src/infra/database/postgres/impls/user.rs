//! [`User`]-related [`Database`] implementations.

use common::operations::{All, By, Delete, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Builds a [`User`] out of the provided profile [`Row`].
fn from_row(row: &Row) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        role: row.get("role"),
        cluster: row.get("cluster"),
        unit: row.get("unit"),
        bast_date: row.get("bast_date"),
    }
}

impl<C: Connection> Database<Select<All<User>>> for Postgres<C> {
    type Ok = Vec<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<All<User>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, role, cluster, unit, bast_date \
            FROM profiles";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C: Connection> Database<Select<By<Option<User>, user::Id>>>
    for Postgres<C>
{
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, role, cluster, unit, bast_date \
            FROM profiles \
            WHERE id = $1::TEXT \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C: Connection> Database<Insert<User>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(user): Insert<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let User {
            id,
            name,
            role,
            cluster,
            unit,
            bast_date,
        } = user;

        const SQL: &str = "\
            INSERT INTO profiles (\
                id, name, role, cluster, unit, bast_date\
            ) \
            VALUES (\
                $1::TEXT, $2::VARCHAR, $3::VARCHAR, \
                $4::VARCHAR, $5::VARCHAR, $6::DATE\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                role = EXCLUDED.role, \
                cluster = EXCLUDED.cluster, \
                unit = EXCLUDED.unit, \
                bast_date = EXCLUDED.bast_date";
        self.exec(SQL, &[&id, &name, &role, &cluster, &unit, &bast_date])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C: Connection> Database<Update<User>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(user): Update<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let User {
            id,
            name,
            role,
            cluster,
            unit,
            bast_date,
        } = user;

        const SQL: &str = "\
            UPDATE profiles \
            SET name = $2::VARCHAR, \
                role = $3::VARCHAR, \
                cluster = $4::VARCHAR, \
                unit = $5::VARCHAR, \
                bast_date = $6::DATE \
            WHERE id = $1::TEXT";
        self.exec(SQL, &[&id, &name, &role, &cluster, &unit, &bast_date])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C: Connection> Database<Delete<By<User, user::Id>>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<User, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM profiles \
            WHERE id = $1::TEXT";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
