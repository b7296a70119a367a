pub mod memory_repository;
pub mod schedule_repository;

pub use memory_repository::InMemoryScheduleRepository;
pub use schedule_repository::{MySqlScheduleRepository, ScheduleRepository};
