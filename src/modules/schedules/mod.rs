// Payment schedules module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::configure;
pub use models::{PaymentSchedule, ScheduleStatus};
pub use repositories::{InMemoryScheduleRepository, MySqlScheduleRepository, ScheduleRepository};
pub use services::ScheduleService;
