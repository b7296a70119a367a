// In-process schedule store
//
// Backs the service when SCHEDULE_STORE=memory and in tests. Ids start at
// 1 and are never reused, matching AUTO_INCREMENT.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::schedule_repository::ScheduleRepository;
use crate::core::{AppError, Result};
use crate::modules::schedules::models::{PaymentSchedule, ScheduleStatus};

#[derive(Debug, Default)]
struct MemoryState {
    next_id: i64,
    rows: BTreeMap<i64, PaymentSchedule>,
}

#[derive(Debug, Default)]
pub struct InMemoryScheduleRepository {
    state: RwLock<MemoryState>,
}

impl InMemoryScheduleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn select<F>(&self, predicate: F) -> Vec<PaymentSchedule>
    where
        F: Fn(&PaymentSchedule) -> bool,
    {
        self.state
            .read()
            .rows
            .values()
            .filter(|schedule| predicate(schedule))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryScheduleRepository {
    async fn find_all(&self) -> Result<Vec<PaymentSchedule>> {
        Ok(self.select(|_| true))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PaymentSchedule>> {
        Ok(self.state.read().rows.get(&id).cloned())
    }

    async fn find_by_customer(&self, customer_id: i64) -> Result<Vec<PaymentSchedule>> {
        Ok(self.select(|schedule| schedule.customer_id == customer_id))
    }

    async fn find_by_status(&self, status: ScheduleStatus) -> Result<Vec<PaymentSchedule>> {
        Ok(self.select(|schedule| schedule.status == status))
    }

    async fn insert(&self, schedule: &PaymentSchedule) -> Result<PaymentSchedule> {
        let mut state = self.state.write();
        state.next_id += 1;

        let stored = PaymentSchedule {
            id: state.next_id,
            ..schedule.clone()
        };
        state.rows.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn update(&self, schedule: &PaymentSchedule) -> Result<()> {
        let mut state = self.state.write();

        match state.rows.get_mut(&schedule.id) {
            Some(existing) => {
                *existing = schedule.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!(
                "Schedule {} not found",
                schedule.id
            ))),
        }
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.state
            .write()
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Schedule {} not found", id)))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
