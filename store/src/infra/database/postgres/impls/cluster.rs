//! [`Cluster`]-related [`Database`] implementations.

use common::operations::{All, By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{cluster, Cluster},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C: Connection> Database<Select<All<Cluster>>> for Postgres<C> {
    type Ok = Vec<Cluster>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<All<Cluster>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, manager_name, \
                   total_units, occupied_units, cash_balance, \
                   security_status, last_audit_date \
            FROM clusters";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Cluster {
                id: row.get("id"),
                name: row.get("name"),
                manager_name: row.get("manager_name"),
                total_units: u32::try_from(
                    row.get::<_, i64>("total_units"),
                )
                .expect("`total_units` overflow"),
                occupied_units: u32::try_from(
                    row.get::<_, i64>("occupied_units"),
                )
                .expect("`occupied_units` overflow"),
                cash_balance: row.get("cash_balance"),
                security_status: row.get("security_status"),
                last_audit_date: row.get("last_audit_date"),
            })
            .collect())
    }
}

impl<C: Connection> Database<Insert<Cluster>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(cluster): Insert<Cluster>,
    ) -> Result<Self::Ok, Self::Err> {
        let Cluster {
            id,
            name,
            manager_name,
            total_units,
            occupied_units,
            cash_balance,
            security_status,
            last_audit_date,
        } = cluster;
        let total_units = i64::from(total_units);
        let occupied_units = i64::from(occupied_units);

        const SQL: &str = "\
            INSERT INTO clusters (\
                id, name, manager_name, \
                total_units, occupied_units, cash_balance, \
                security_status, last_audit_date\
            ) \
            VALUES (\
                $1::TEXT, $2::VARCHAR, $3::VARCHAR, \
                $4::INT8, $5::INT8, $6::NUMERIC, \
                $7::VARCHAR, $8::DATE\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                manager_name = EXCLUDED.manager_name, \
                total_units = EXCLUDED.total_units, \
                occupied_units = EXCLUDED.occupied_units, \
                cash_balance = EXCLUDED.cash_balance, \
                security_status = EXCLUDED.security_status, \
                last_audit_date = EXCLUDED.last_audit_date";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &manager_name,
                &total_units,
                &occupied_units,
                &cash_balance,
                &security_status,
                &last_audit_date,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C: Connection> Database<Update<Cluster>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(cluster): Update<Cluster>,
    ) -> Result<Self::Ok, Self::Err> {
        let Cluster {
            id,
            name,
            manager_name,
            total_units,
            occupied_units,
            cash_balance,
            security_status,
            last_audit_date,
        } = cluster;
        let total_units = i64::from(total_units);
        let occupied_units = i64::from(occupied_units);

        const SQL: &str = "\
            UPDATE clusters \
            SET name = $2::VARCHAR, \
                manager_name = $3::VARCHAR, \
                total_units = $4::INT8, \
                occupied_units = $5::INT8, \
                cash_balance = $6::NUMERIC, \
                security_status = $7::VARCHAR, \
                last_audit_date = $8::DATE \
            WHERE id = $1::TEXT";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &manager_name,
                &total_units,
                &occupied_units,
                &cash_balance,
                &security_status,
                &last_audit_date,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C: Connection> Database<Delete<By<Cluster, cluster::Id>>>
    for Postgres<C>
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Cluster, cluster::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM clusters \
            WHERE id = $1::TEXT";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
