// src/db/agenda_repo.rs

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::agenda::{
        Appointment, AppointmentDetail, AppointmentKind, AppointmentStatus, BusySlot, ServiceInfo,
    },
};

#[derive(Clone)]
pub struct AgendaRepository {
    pool: PgPool,
}

impl AgendaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn client_exists<'e, E>(&self, executor: E, client_id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM clients WHERE id = $1)",
        )
        .bind(client_id)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }

    pub async fn collaborator_exists<'e, E>(
        &self,
        executor: E,
        collaborator_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM collaborators WHERE id = $1 AND active)",
        )
        .bind(collaborator_id)
        .fetch_one(executor)
        .await?;

        Ok(exists)
    }

    pub async fn find_services<'e, E>(
        &self,
        executor: E,
        service_ids: &[Uuid],
    ) -> Result<Vec<ServiceInfo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let services = sqlx::query_as::<_, ServiceInfo>(
            "SELECT id, price, duration_minutes FROM services WHERE id = ANY($1)",
        )
        .bind(service_ids)
        .fetch_all(executor)
        .await?;

        Ok(services)
    }

    /// Intervalos ocupados do colaborador na data, com as linhas travadas
    /// (`FOR UPDATE`) para serializar criações concorrentes no mesmo dia.
    /// Cancelados ficam fora do conjunto de comparação.
    pub async fn busy_slots_for_update(
        &self,
        tx: &mut sqlx::PgConnection,
        collaborator_id: Uuid,
        appointment_date: NaiveDate,
    ) -> Result<Vec<BusySlot>, AppError> {
        let slots = sqlx::query_as::<_, BusySlot>(
            r#"
            SELECT start_time, end_time
            FROM appointments
            WHERE collaborator_id = $1
              AND appointment_date = $2
              AND status <> 'CANCELLED'
            FOR UPDATE
            "#,
        )
        .bind(collaborator_id)
        .bind(appointment_date)
        .fetch_all(&mut *tx)
        .await?;

        Ok(slots)
    }

    pub async fn create_appointment<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        collaborator_id: Uuid,
        kind: AppointmentKind,
        appointment_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        status: AppointmentStatus,
        total_amount: Decimal,
        paid_amount: Decimal,
        notes: Option<&str>,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            INSERT INTO appointments (
                client_id, collaborator_id, kind, appointment_date,
                start_time, end_time, status, total_amount, paid_amount, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(collaborator_id)
        .bind(kind)
        .bind(appointment_date)
        .bind(start_time)
        .bind(end_time)
        .bind(status)
        .bind(total_amount)
        .bind(paid_amount)
        .bind(notes)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // A exclusion constraint é o backstop do guard: se duas criações
            // concorrentes passarem pela checagem, a segunda cai aqui e o
            // erro sobe uniforme como conflito de horário.
            if let Some(db_err) = e.as_database_error() {
                if db_err.code().as_deref() == Some("23P01") {
                    return AppError::SchedulingConflict {
                        collaborator_id,
                        start_time,
                        end_time,
                    };
                }
            }
            AppError::DatabaseError(e)
        })?;

        Ok(appointment)
    }

    pub async fn attach_services(
        &self,
        tx: &mut sqlx::PgConnection,
        appointment_id: Uuid,
        services: &[ServiceInfo],
    ) -> Result<(), AppError> {
        for service in services {
            sqlx::query(
                r#"
                INSERT INTO appointment_services
                    (appointment_id, service_id, quantity, unit_price, discount)
                VALUES ($1, $2, 1, $3, 0)
                "#,
            )
            .bind(appointment_id)
            .bind(service.id)
            .bind(service.price)
            .execute(&mut *tx)
            .await?;
        }

        Ok(())
    }

    pub async fn find_all(&self) -> Result<Vec<AppointmentDetail>, AppError> {
        let appointments = sqlx::query_as::<_, AppointmentDetail>(
            r#"
            SELECT a.id, a.client_id, c.name AS client_name,
                   a.collaborator_id, co.name AS collaborator_name,
                   a.kind, a.status, a.appointment_date,
                   a.start_time, a.end_time,
                   a.total_amount, a.paid_amount, a.notes
            FROM appointments a
            JOIN clients c ON c.id = a.client_id
            JOIN collaborators co ON co.id = a.collaborator_id
            ORDER BY a.appointment_date DESC, a.start_time DESC
            LIMIT 100
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AppointmentDetail>, AppError> {
        let appointment = sqlx::query_as::<_, AppointmentDetail>(
            r#"
            SELECT a.id, a.client_id, c.name AS client_name,
                   a.collaborator_id, co.name AS collaborator_name,
                   a.kind, a.status, a.appointment_date,
                   a.start_time, a.end_time,
                   a.total_amount, a.paid_amount, a.notes
            FROM appointments a
            JOIN clients c ON c.id = a.client_id
            JOIN collaborators co ON co.id = a.collaborator_id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(appointment)
    }

    pub async fn cancel<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            UPDATE appointments
            SET status = 'CANCELLED', updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(appointment)
    }
}
