//! [`Vendor`]-related [`Database`] implementations.

use common::operations::{All, By, Delete, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{vendor, Vendor},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C: Connection> Database<Select<All<Vendor>>> for Postgres<C> {
    type Ok = Vec<Vendor>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<All<Vendor>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, service_type, contact_person, \
                   phone, email, status, \
                   contract_start, contract_end, monthly_cost \
            FROM vendors";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| Vendor {
                id: row.get("id"),
                name: row.get("name"),
                service_type: row.get("service_type"),
                contact_person: row.get("contact_person"),
                phone: row.get("phone"),
                email: row.get("email"),
                status: row.get("status"),
                contract_start: row.get("contract_start"),
                contract_end: row.get("contract_end"),
                monthly_cost: row.get("monthly_cost"),
            })
            .collect())
    }
}

impl<C: Connection> Database<Insert<Vendor>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(vendor): Insert<Vendor>,
    ) -> Result<Self::Ok, Self::Err> {
        let Vendor {
            id,
            name,
            service_type,
            contact_person,
            phone,
            email,
            status,
            contract_start,
            contract_end,
            monthly_cost,
        } = vendor;

        const SQL: &str = "\
            INSERT INTO vendors (\
                id, name, service_type, contact_person, \
                phone, email, status, \
                contract_start, contract_end, monthly_cost\
            ) \
            VALUES (\
                $1::TEXT, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, $6::VARCHAR, $7::VARCHAR, \
                $8::DATE, $9::DATE, $10::NUMERIC\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                service_type = EXCLUDED.service_type, \
                contact_person = EXCLUDED.contact_person, \
                phone = EXCLUDED.phone, \
                email = EXCLUDED.email, \
                status = EXCLUDED.status, \
                contract_start = EXCLUDED.contract_start, \
                contract_end = EXCLUDED.contract_end, \
                monthly_cost = EXCLUDED.monthly_cost";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &service_type,
                &contact_person,
                &phone,
                &email,
                &status,
                &contract_start,
                &contract_end,
                &monthly_cost,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C: Connection> Database<Update<Vendor>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(vendor): Update<Vendor>,
    ) -> Result<Self::Ok, Self::Err> {
        let Vendor {
            id,
            name,
            service_type,
            contact_person,
            phone,
            email,
            status,
            contract_start,
            contract_end,
            monthly_cost,
        } = vendor;

        const SQL: &str = "\
            UPDATE vendors \
            SET name = $2::VARCHAR, \
                service_type = $3::VARCHAR, \
                contact_person = $4::VARCHAR, \
                phone = $5::VARCHAR, \
                email = $6::VARCHAR, \
                status = $7::VARCHAR, \
                contract_start = $8::DATE, \
                contract_end = $9::DATE, \
                monthly_cost = $10::NUMERIC \
            WHERE id = $1::TEXT";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &service_type,
                &contact_person,
                &phone,
                &email,
                &status,
                &contract_start,
                &contract_end,
                &monthly_cost,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C: Connection> Database<Delete<By<Vendor, vendor::Id>>> for Postgres<C> {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Vendor, vendor::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM vendors \
            WHERE id = $1::TEXT";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
