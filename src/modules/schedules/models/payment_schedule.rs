// Payment schedule model and its state machine
//
// A schedule starts Pending and moves once to Paid. Paid is terminal:
// pay, reschedule and delete are all refused with a Conflict that carries
// the stored payment details.

use chrono::{NaiveDateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schedule_request::CreateScheduleRequest;
use crate::core::{AppError, Result};

/// Schedule status lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleStatus {
    /// Created, payment not yet recorded
    Pending,
    /// Payment recorded; the schedule is read-only from here on
    Paid,
}

impl ScheduleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
        }
    }
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ScheduleStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            _ => Err(AppError::validation(format!(
                "Invalid schedule status '{}': expected Pending or Paid",
                s
            ))),
        }
    }
}

impl TryFrom<String> for ScheduleStatus {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self> {
        match value.as_str() {
            "Pending" => Ok(Self::Pending),
            "Paid" => Ok(Self::Paid),
            _ => Err(AppError::internal(format!(
                "Invalid stored schedule status: {}",
                value
            ))),
        }
    }
}

/// Digits kept after the decimal point by the `amount` column
pub const AMOUNT_SCALE: u32 = 4;

/// Width of the `payment_method` column
pub const MAX_PAYMENT_METHOD_LEN: usize = 64;

/// Amounts must stay below 10^15 to fit `DECIMAL(19,4)`
fn amount_limit() -> Decimal {
    Decimal::from(1_000_000_000_000_000_i64)
}

/// Current time at the microsecond precision of `DATETIME(6)`
fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

/// A single scheduled payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSchedule {
    /// Assigned by the store on insert, 0 before that
    pub id: i64,
    pub customer_id: i64,
    pub account_id: Option<i64>,
    pub amount: Decimal,
    /// Server-assigned, re-stamped on every reschedule
    pub scheduled_at: NaiveDateTime,
    pub paid_at: Option<NaiveDateTime>,
    pub status: ScheduleStatus,
    pub payment_method: Option<String>,
    pub description: Option<String>,
}

impl PaymentSchedule {
    /// Build a new Pending schedule from a create request
    ///
    /// Status, payment method and payment date are never taken from the
    /// caller: a fresh schedule is always Pending with neither set.
    pub fn new(request: CreateScheduleRequest) -> Result<Self> {
        if request.amount < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Amount cannot be negative, got {}",
                request.amount
            )));
        }

        if request.amount.normalize().scale() > AMOUNT_SCALE {
            return Err(AppError::validation(format!(
                "Amount supports at most {} decimal places, got {}",
                AMOUNT_SCALE, request.amount
            )));
        }

        if request.amount >= amount_limit() {
            return Err(AppError::validation(format!(
                "Amount must be less than {}, got {}",
                amount_limit(),
                request.amount
            )));
        }

        Ok(Self {
            id: 0,
            customer_id: request.customer_id,
            account_id: request.account_id,
            amount: request.amount,
            scheduled_at: now(),
            paid_at: None,
            status: ScheduleStatus::Pending,
            payment_method: None,
            description: request.description,
        })
    }

    pub fn is_paid(&self) -> bool {
        self.status == ScheduleStatus::Paid
    }

    /// Record payment and move the schedule to Paid
    pub fn mark_as_paid(&mut self, payment_method: String) -> Result<()> {
        if self.is_paid() {
            return Err(self.already_paid("Payment already completed"));
        }

        let payment_method = payment_method.trim();
        if payment_method.is_empty() {
            return Err(AppError::validation("Payment method is required"));
        }

        if payment_method.chars().count() > MAX_PAYMENT_METHOD_LEN {
            return Err(AppError::validation(format!(
                "Payment method must be at most {} characters",
                MAX_PAYMENT_METHOD_LEN
            )));
        }

        self.payment_method = Some(payment_method.to_string());
        self.paid_at = Some(now());
        self.status = ScheduleStatus::Paid;

        Ok(())
    }

    /// Move the payment date of a Pending schedule
    pub fn reschedule(&mut self, paid_at: NaiveDateTime) -> Result<()> {
        if self.is_paid() {
            return Err(self.already_paid(
                "Payment already completed: the payment date cannot be changed",
            ));
        }

        self.scheduled_at = now();
        self.paid_at = Some(paid_at.trunc_subsecs(6));

        Ok(())
    }

    /// Only Pending schedules may be removed
    pub fn ensure_deletable(&self) -> Result<()> {
        if self.is_paid() {
            return Err(self.already_paid("Cannot delete a completed payment"));
        }

        Ok(())
    }

    /// Stored payment details reported alongside a Conflict
    pub fn conflict_details(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "paid_at": self.paid_at,
            "status": self.status,
            "amount": self.amount,
            "payment_method": self.payment_method,
        })
    }

    fn already_paid(&self, message: &str) -> AppError {
        AppError::conflict(message, self.conflict_details())
    }
}
