// src/services/agenda_service.rs

use chrono::{Duration, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AgendaRepository,
    models::agenda::{
        Appointment, AppointmentDetail, AppointmentKind, AppointmentStatus, BusySlot, ServiceInfo,
    },
};

/// Dois intervalos semiabertos `[s1, e1)` e `[s2, e2)` colidem sse
/// `s1 < e2 && s2 < e1`. Um atendimento que termina exatamente quando o
/// outro começa não conflita.
pub fn intervals_overlap(s1: NaiveTime, e1: NaiveTime, s2: NaiveTime, e2: NaiveTime) -> bool {
    s1 < e2 && s2 < e1
}

/// Guard de conflito: rejeita o horário proposto se ele colidir com
/// qualquer intervalo já ocupado do colaborador na mesma data. O conjunto
/// `existing` já vem sem atendimentos cancelados.
pub fn check_slot_conflict(
    collaborator_id: Uuid,
    start_time: NaiveTime,
    end_time: NaiveTime,
    existing: &[BusySlot],
) -> Result<(), AppError> {
    for slot in existing {
        if intervals_overlap(start_time, end_time, slot.start_time, slot.end_time) {
            return Err(AppError::SchedulingConflict {
                collaborator_id,
                start_time: slot.start_time,
                end_time: slot.end_time,
            });
        }
    }
    Ok(())
}

/// Horário de fim derivado: início mais a soma das durações dos serviços
/// selecionados. Agenda não atravessa a meia-noite.
pub fn derive_end_time(
    start_time: NaiveTime,
    services: &[ServiceInfo],
) -> Result<NaiveTime, AppError> {
    let total_minutes: i64 = services.iter().map(|s| s.duration_minutes as i64).sum();
    let (end_time, wrapped) = start_time.overflowing_add_signed(Duration::minutes(total_minutes));
    if wrapped != 0 {
        return Err(AppError::InvalidArgument(
            "Atendimento ultrapassaria a meia-noite.".to_string(),
        ));
    }
    Ok(end_time)
}

#[derive(Clone)]
pub struct AgendaService {
    repo: AgendaRepository,
}

impl AgendaService {
    pub fn new(repo: AgendaRepository) -> Self {
        Self { repo }
    }

    /// Cria um atendimento. A checagem de conflito e a inserção rodam na
    /// mesma transação, com os horários do colaborador travados
    /// (`FOR UPDATE`); a exclusion constraint do banco fica de backstop
    /// para criações concorrentes e também vira `SchedulingConflict`.
    pub async fn create_appointment<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        collaborator_id: Uuid,
        kind: AppointmentKind,
        appointment_date: NaiveDate,
        start_time: NaiveTime,
        end_time: Option<NaiveTime>,
        status: AppointmentStatus,
        total_amount: Option<Decimal>,
        paid_amount: Decimal,
        notes: Option<&str>,
        service_ids: &[Uuid],
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        if service_ids.is_empty() {
            return Err(AppError::InvalidArgument(
                "Pelo menos um serviço deve ser selecionado.".to_string(),
            ));
        }

        let mut tx = executor.begin().await?;

        if !self.repo.client_exists(&mut *tx, client_id).await? {
            return Err(AppError::NotFound("Cliente".to_string()));
        }
        if !self.repo.collaborator_exists(&mut *tx, collaborator_id).await? {
            return Err(AppError::NotFound("Colaborador".to_string()));
        }

        let services = self.repo.find_services(&mut *tx, service_ids).await?;
        if services.len() != service_ids.len() {
            return Err(AppError::NotFound("Um ou mais serviços".to_string()));
        }

        // Fim explícito ou derivado da soma das durações.
        let end_time = match end_time {
            Some(t) => t,
            None => derive_end_time(start_time, &services)?,
        };
        if end_time <= start_time {
            return Err(AppError::InvalidArgument(
                "Horário de fim deve ser posterior ao de início.".to_string(),
            ));
        }

        // Valor total explícito ou somado do catálogo.
        let total_amount =
            total_amount.unwrap_or_else(|| services.iter().map(|s| s.price).sum());
        if paid_amount > total_amount {
            return Err(AppError::InvalidArgument(
                "Valor pago não pode exceder o valor total.".to_string(),
            ));
        }

        // Trava e lê a agenda do colaborador antes de checar o conflito.
        let busy = self
            .repo
            .busy_slots_for_update(&mut *tx, collaborator_id, appointment_date)
            .await?;
        check_slot_conflict(collaborator_id, start_time, end_time, &busy)?;

        let appointment = self
            .repo
            .create_appointment(
                &mut *tx,
                client_id,
                collaborator_id,
                kind,
                appointment_date,
                start_time,
                end_time,
                status,
                total_amount,
                paid_amount,
                notes,
            )
            .await?;

        self.repo
            .attach_services(&mut *tx, appointment.id, &services)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Atendimento {} criado para colaborador {} em {} ({} - {})",
            appointment.id,
            collaborator_id,
            appointment_date,
            start_time,
            end_time
        );

        Ok(appointment)
    }

    pub async fn list_appointments(&self) -> Result<Vec<AppointmentDetail>, AppError> {
        self.repo.find_all().await
    }

    pub async fn get_appointment(&self, id: Uuid) -> Result<AppointmentDetail, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Atendimento".to_string()))
    }

    /// Cancelamento é terminal: o atendimento sai da previsão de
    /// recebíveis e deixa de ocupar horário na agenda.
    pub async fn cancel_appointment<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .cancel(executor, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Atendimento".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn slot(s: NaiveTime, e: NaiveTime) -> BusySlot {
        BusySlot {
            start_time: s,
            end_time: e,
        }
    }

    fn service(minutes: i32, price: &str) -> ServiceInfo {
        ServiceInfo {
            id: Uuid::new_v4(),
            price: price.parse().unwrap(),
            duration_minutes: minutes,
        }
    }

    #[test]
    fn contained_interval_conflicts() {
        // Colaborador ocupado das 14h às 16h; proposta 15:00-15:30.
        let collaborator = Uuid::new_v4();
        let busy = [slot(time(14, 0), time(16, 0))];

        let err = check_slot_conflict(collaborator, time(15, 0), time(15, 30), &busy)
            .unwrap_err();
        match err {
            AppError::SchedulingConflict {
                collaborator_id,
                start_time,
                end_time,
            } => {
                assert_eq!(collaborator_id, collaborator);
                assert_eq!(start_time, time(14, 0));
                assert_eq!(end_time, time(16, 0));
            }
            other => panic!("esperava SchedulingConflict, veio {other:?}"),
        }
    }

    #[test]
    fn adjacent_intervals_do_not_conflict() {
        // Intervalos semiabertos: terminar às 16h libera as 16h.
        let collaborator = Uuid::new_v4();
        let busy = [slot(time(14, 0), time(16, 0))];

        assert!(check_slot_conflict(collaborator, time(16, 0), time(17, 0), &busy).is_ok());
        assert!(check_slot_conflict(collaborator, time(13, 0), time(14, 0), &busy).is_ok());
    }

    #[test]
    fn partial_overlaps_conflict_on_both_sides() {
        let collaborator = Uuid::new_v4();
        let busy = [slot(time(10, 0), time(11, 0))];

        assert!(check_slot_conflict(collaborator, time(10, 30), time(11, 30), &busy).is_err());
        assert!(check_slot_conflict(collaborator, time(9, 30), time(10, 30), &busy).is_err());
        // Proposta que engloba o intervalo inteiro também colide.
        assert!(check_slot_conflict(collaborator, time(9, 0), time(12, 0), &busy).is_err());
    }

    #[test]
    fn empty_schedule_accepts_any_slot() {
        let collaborator = Uuid::new_v4();
        assert!(check_slot_conflict(collaborator, time(8, 0), time(18, 0), &[]).is_ok());
    }

    #[test]
    fn first_conflicting_slot_is_reported() {
        let collaborator = Uuid::new_v4();
        let busy = [
            slot(time(9, 0), time(10, 0)),
            slot(time(10, 30), time(11, 30)),
        ];

        let err = check_slot_conflict(collaborator, time(9, 30), time(11, 0), &busy)
            .unwrap_err();
        match err {
            AppError::SchedulingConflict { start_time, .. } => {
                assert_eq!(start_time, time(9, 0));
            }
            other => panic!("esperava SchedulingConflict, veio {other:?}"),
        }
    }

    #[test]
    fn end_time_derives_from_service_durations() {
        let services = [service(30, "50.00"), service(45, "80.00")];
        let end = derive_end_time(time(14, 0), &services).unwrap();
        assert_eq!(end, time(15, 15));
    }

    #[test]
    fn end_time_past_midnight_is_rejected() {
        let services = [service(120, "50.00")];
        let err = derive_end_time(time(23, 0), &services).unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }
}
