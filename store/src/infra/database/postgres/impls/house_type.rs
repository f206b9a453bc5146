//! [`HouseType`]-related [`Database`] implementations.

use common::operations::{All, By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{house_type, HouseType},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C: Connection> Database<Select<All<HouseType>>> for Postgres<C> {
    type Ok = Vec<HouseType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<All<HouseType>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, description \
            FROM house_types";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| HouseType {
                id: row.get("id"),
                name: row.get("name"),
                description: row.get("description"),
            })
            .collect())
    }
}

impl<C: Connection> Database<Insert<HouseType>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(house_type): Insert<HouseType>,
    ) -> Result<Self::Ok, Self::Err> {
        let HouseType {
            id,
            name,
            description,
        } = house_type;

        const SQL: &str = "\
            INSERT INTO house_types (id, name, description) \
            VALUES ($1::TEXT, $2::VARCHAR, $3::VARCHAR) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                description = EXCLUDED.description";
        self.exec(SQL, &[&id, &name, &description])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C: Connection> Database<Update<HouseType>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(house_type): Update<HouseType>,
    ) -> Result<Self::Ok, Self::Err> {
        let HouseType {
            id,
            name,
            description,
        } = house_type;

        const SQL: &str = "\
            UPDATE house_types \
            SET name = $2::VARCHAR, \
                description = $3::VARCHAR \
            WHERE id = $1::TEXT";
        self.exec(SQL, &[&id, &name, &description])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C: Connection> Database<Delete<By<HouseType, house_type::Id>>>
    for Postgres<C>
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<HouseType, house_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM house_types \
            WHERE id = $1::TEXT";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
