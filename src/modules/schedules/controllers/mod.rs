pub mod schedule_controller;

pub use schedule_controller::{
    configure, create_schedule, delete_schedule, get_schedule, list_by_customer,
    list_by_status, list_schedules, pay_schedule, reschedule,
};
