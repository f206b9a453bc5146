//! [`Unit`]-related [`Database`] implementations.

use common::operations::{All, By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{unit, Unit},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C: Connection> Database<Select<All<Unit>>> for Postgres<C> {
    type Ok = Vec<Unit>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<All<Unit>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, cluster, block, number, type, \
                   land_area, owner_name, resident_status, \
                   phone_number, family_members, bast_date \
            FROM units";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Unit {
                id: row.get("id"),
                cluster: row.get("cluster"),
                block: row.get("block"),
                number: row.get("number"),
                kind: row.get("type"),
                land_area: u32::try_from(row.get::<_, i64>("land_area"))
                    .expect("`land_area` overflow"),
                owner_name: row.get("owner_name"),
                resident_status: row.get("resident_status"),
                phone_number: row.get("phone_number"),
                family_members: u32::try_from(
                    row.get::<_, i64>("family_members"),
                )
                .expect("`family_members` overflow"),
                bast_date: row.get("bast_date"),
            })
            .collect())
    }
}

impl<C: Connection> Database<Insert<Unit>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(unit): Insert<Unit>,
    ) -> Result<Self::Ok, Self::Err> {
        let Unit {
            id,
            cluster,
            block,
            number,
            kind,
            land_area,
            owner_name,
            resident_status,
            phone_number,
            family_members,
            bast_date,
        } = unit;
        let land_area = i64::from(land_area);
        let family_members = i64::from(family_members);

        const SQL: &str = "\
            INSERT INTO units (\
                id, cluster, block, number, type, \
                land_area, owner_name, resident_status, \
                phone_number, family_members, bast_date\
            ) \
            VALUES (\
                $1::TEXT, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::INT8, $7::VARCHAR, $8::VARCHAR, \
                $9::VARCHAR, $10::INT8, $11::DATE\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET cluster = EXCLUDED.cluster, \
                block = EXCLUDED.block, \
                number = EXCLUDED.number, \
                type = EXCLUDED.type, \
                land_area = EXCLUDED.land_area, \
                owner_name = EXCLUDED.owner_name, \
                resident_status = EXCLUDED.resident_status, \
                phone_number = EXCLUDED.phone_number, \
                family_members = EXCLUDED.family_members, \
                bast_date = EXCLUDED.bast_date";
        self.exec(
            SQL,
            &[
                &id,
                &cluster,
                &block,
                &number,
                &kind,
                &land_area,
                &owner_name,
                &resident_status,
                &phone_number,
                &family_members,
                &bast_date,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C: Connection> Database<Update<Unit>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(unit): Update<Unit>,
    ) -> Result<Self::Ok, Self::Err> {
        let Unit {
            id,
            cluster,
            block,
            number,
            kind,
            land_area,
            owner_name,
            resident_status,
            phone_number,
            family_members,
            bast_date,
        } = unit;
        let land_area = i64::from(land_area);
        let family_members = i64::from(family_members);

        const SQL: &str = "\
            UPDATE units \
            SET cluster = $2::VARCHAR, \
                block = $3::VARCHAR, \
                number = $4::VARCHAR, \
                type = $5::VARCHAR, \
                land_area = $6::INT8, \
                owner_name = $7::VARCHAR, \
                resident_status = $8::VARCHAR, \
                phone_number = $9::VARCHAR, \
                family_members = $10::INT8, \
                bast_date = $11::DATE \
            WHERE id = $1::TEXT";
        self.exec(
            SQL,
            &[
                &id,
                &cluster,
                &block,
                &number,
                &kind,
                &land_area,
                &owner_name,
                &resident_status,
                &phone_number,
                &family_members,
                &bast_date,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C: Connection> Database<Delete<By<Unit, unit::Id>>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Unit, unit::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM units \
            WHERE id = $1::TEXT";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
