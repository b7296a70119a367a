pub mod health;
pub mod schedules;

pub use schedules::ScheduleService;
