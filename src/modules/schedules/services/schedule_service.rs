// Business logic layer for payment schedules
//
// Every operation looks the schedule up, applies the state guard on the
// model, then writes the single row back. Concurrent pay/delete on the
// same id are not serialized here.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::schedules::{
    models::{CreateScheduleRequest, PaymentSchedule, ScheduleStatus},
    repositories::ScheduleRepository,
};

/// Service for payment schedule business rules
pub struct ScheduleService {
    repository: Arc<dyn ScheduleRepository>,
}

impl ScheduleService {
    pub fn new(repository: Arc<dyn ScheduleRepository>) -> Self {
        Self { repository }
    }

    /// Store connectivity, used by the readiness probe
    pub async fn ping(&self) -> Result<()> {
        self.repository.ping().await
    }

    pub async fn list_all(&self) -> Result<Vec<PaymentSchedule>> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<PaymentSchedule> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Schedule {} not found", id)))
    }

    pub async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<PaymentSchedule>> {
        self.repository.find_by_customer(customer_id).await
    }

    /// List schedules in a given status
    ///
    /// The raw filter is parsed before the store is touched, so an unknown
    /// status is reported as a validation error.
    pub async fn list_by_status(&self, status: &str) -> Result<Vec<PaymentSchedule>> {
        let status: ScheduleStatus = status.parse()?;
        self.repository.find_by_status(status).await
    }

    /// Create a new Pending schedule and return it with its assigned id
    pub async fn create(&self, request: CreateScheduleRequest) -> Result<PaymentSchedule> {
        let schedule = PaymentSchedule::new(request)?;
        let created = self.repository.insert(&schedule).await?;

        info!(
            schedule_id = created.id,
            customer_id = created.customer_id,
            amount = %created.amount,
            "Payment schedule created"
        );

        Ok(created)
    }

    /// Record payment for a Pending schedule
    ///
    /// # Business Rules
    /// - Unknown id is NotFound
    /// - A Paid schedule is a Conflict and is left untouched
    pub async fn pay(&self, id: i64, payment_method: String) -> Result<PaymentSchedule> {
        let mut schedule = self.get_by_id(id).await?;

        if let Err(e) = schedule.mark_as_paid(payment_method) {
            warn!(schedule_id = id, error = %e, "Payment rejected");
            return Err(e);
        }

        self.repository.update(&schedule).await?;

        info!(
            schedule_id = id,
            payment_method = schedule.payment_method.as_deref().unwrap_or_default(),
            "Payment schedule marked as paid"
        );

        Ok(schedule)
    }

    /// Move the payment date of a Pending schedule
    ///
    /// Re-stamps `scheduled_at` and stores the supplied `paid_at`.
    pub async fn reschedule(&self, id: i64, paid_at: NaiveDateTime) -> Result<PaymentSchedule> {
        let mut schedule = self.get_by_id(id).await?;

        if let Err(e) = schedule.reschedule(paid_at) {
            warn!(schedule_id = id, error = %e, "Reschedule rejected");
            return Err(e);
        }

        self.repository.update(&schedule).await?;

        info!(schedule_id = id, paid_at = %paid_at, "Payment schedule rescheduled");

        Ok(schedule)
    }

    /// Permanently remove a Pending schedule
    pub async fn delete(&self, id: i64) -> Result<()> {
        let schedule = self.get_by_id(id).await?;

        if let Err(e) = schedule.ensure_deletable() {
            warn!(schedule_id = id, error = %e, "Delete rejected");
            return Err(e);
        }

        self.repository.delete(id).await?;

        info!(schedule_id = id, "Payment schedule deleted");

        Ok(())
    }
}
