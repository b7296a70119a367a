//! Payment Scheduler Library
//!
//! Record keeping for scheduled payments: create, query, mark as paid,
//! reschedule and delete, with paid schedules kept read-only.

pub mod app;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::schedules;
