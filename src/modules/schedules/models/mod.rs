mod payment_schedule;
mod schedule_request;

pub use payment_schedule::{PaymentSchedule, ScheduleStatus};
pub use schedule_request::{
    CreateScheduleRequest, DeleteScheduleResponse, PayScheduleRequest, RescheduleRequest,
    RescheduleResponse,
};
