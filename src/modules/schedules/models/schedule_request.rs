use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for POST /schedules
///
/// Unknown fields (status, scheduled_at, paid_at, payment_method) are
/// accepted and dropped: the server owns those.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub customer_id: i64,
    #[serde(default)]
    pub account_id: Option<i64>,
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for PUT /schedules/{id}/pay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayScheduleRequest {
    pub payment_method: String,
}

/// Request body for PUT /schedules/{id}/schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleRequest {
    pub paid_at: NaiveDateTime,
}

/// Response for PUT /schedules/{id}/schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleResponse {
    pub id: i64,
    pub scheduled_at: NaiveDateTime,
    pub paid_at: NaiveDateTime,
    pub message: String,
}

/// Response for DELETE /schedules/{id}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteScheduleResponse {
    pub id: i64,
    pub message: String,
}
