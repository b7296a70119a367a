// Schedule store contract and its MySQL implementation
//
// Every operation touches a single row. Rows come back ordered by id.
// Any sqlx failure surfaces as AppError::Database.

use async_trait::async_trait;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::schedules::models::{PaymentSchedule, ScheduleStatus};

/// Durable mapping from schedule id to PaymentSchedule
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// All schedules
    async fn find_all(&self) -> Result<Vec<PaymentSchedule>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<PaymentSchedule>>;

    async fn find_by_customer(&self, customer_id: i64) -> Result<Vec<PaymentSchedule>>;

    async fn find_by_status(&self, status: ScheduleStatus) -> Result<Vec<PaymentSchedule>>;

    /// Persist a new schedule and return it with its assigned id
    async fn insert(&self, schedule: &PaymentSchedule) -> Result<PaymentSchedule>;

    /// Overwrite every mutable column of an existing row
    async fn update(&self, schedule: &PaymentSchedule) -> Result<()>;

    async fn delete(&self, id: i64) -> Result<()>;

    /// Connectivity check for the readiness probe
    async fn ping(&self) -> Result<()>;
}

/// Repository for payment schedule database operations
#[derive(Clone)]
pub struct MySqlScheduleRepository {
    pool: MySqlPool,
}

impl MySqlScheduleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT
        id, customer_id, account_id, amount, scheduled_at,
        paid_at, status, payment_method, description
    FROM payment_schedules
"#;

#[async_trait]
impl ScheduleRepository for MySqlScheduleRepository {
    async fn find_all(&self) -> Result<Vec<PaymentSchedule>> {
        let rows = sqlx::query_as::<_, PaymentScheduleRow>(&format!(
            "{} ORDER BY id ASC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PaymentSchedule::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PaymentSchedule>> {
        let row = sqlx::query_as::<_, PaymentScheduleRow>(&format!(
            "{} WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PaymentSchedule::try_from).transpose()
    }

    async fn find_by_customer(&self, customer_id: i64) -> Result<Vec<PaymentSchedule>> {
        let rows = sqlx::query_as::<_, PaymentScheduleRow>(&format!(
            "{} WHERE customer_id = ? ORDER BY id ASC",
            SELECT_COLUMNS
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PaymentSchedule::try_from).collect()
    }

    async fn find_by_status(&self, status: ScheduleStatus) -> Result<Vec<PaymentSchedule>> {
        let rows = sqlx::query_as::<_, PaymentScheduleRow>(&format!(
            "{} WHERE status = ? ORDER BY id ASC",
            SELECT_COLUMNS
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PaymentSchedule::try_from).collect()
    }

    async fn insert(&self, schedule: &PaymentSchedule) -> Result<PaymentSchedule> {
        let result = sqlx::query(
            r#"
            INSERT INTO payment_schedules (
                customer_id, account_id, amount, scheduled_at,
                paid_at, status, payment_method, description
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(schedule.customer_id)
        .bind(schedule.account_id)
        .bind(schedule.amount)
        .bind(schedule.scheduled_at)
        .bind(schedule.paid_at)
        .bind(schedule.status.as_str())
        .bind(&schedule.payment_method)
        .bind(&schedule.description)
        .execute(&self.pool)
        .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| AppError::internal("Generated schedule id out of range"))?;

        // Return the row as stored, with column rounding applied
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Inserted schedule {} not readable", id)))
    }

    async fn update(&self, schedule: &PaymentSchedule) -> Result<()> {
        let rows_affected = sqlx::query(
            r#"
            UPDATE payment_schedules
            SET
                customer_id = ?,
                account_id = ?,
                amount = ?,
                scheduled_at = ?,
                paid_at = ?,
                status = ?,
                payment_method = ?,
                description = ?
            WHERE id = ?
            "#,
        )
        .bind(schedule.customer_id)
        .bind(schedule.account_id)
        .bind(schedule.amount)
        .bind(schedule.scheduled_at)
        .bind(schedule.paid_at)
        .bind(schedule.status.as_str())
        .bind(&schedule.payment_method)
        .bind(&schedule.description)
        .bind(schedule.id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        // MySQL reports 0 for an unchanged row too, so confirm it exists
        if rows_affected == 0 && self.find_by_id(schedule.id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Schedule {} not found",
                schedule.id
            )));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = sqlx::query("DELETE FROM payment_schedules WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::not_found(format!("Schedule {} not found", id)));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Database row representation for payment_schedules table
#[derive(sqlx::FromRow)]
struct PaymentScheduleRow {
    id: i64,
    customer_id: i64,
    account_id: Option<i64>,
    amount: rust_decimal::Decimal,
    scheduled_at: chrono::NaiveDateTime,
    paid_at: Option<chrono::NaiveDateTime>,
    status: String,
    payment_method: Option<String>,
    description: Option<String>,
}

impl TryFrom<PaymentScheduleRow> for PaymentSchedule {
    type Error = AppError;

    fn try_from(row: PaymentScheduleRow) -> Result<Self> {
        Ok(PaymentSchedule {
            id: row.id,
            customer_id: row.customer_id,
            account_id: row.account_id,
            amount: row.amount,
            scheduled_at: row.scheduled_at,
            paid_at: row.paid_at,
            status: ScheduleStatus::try_from(row.status)?,
            payment_method: row.payment_method,
            description: row.description,
        })
    }
}
