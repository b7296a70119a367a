// HTTP handlers for payment schedule endpoints
//
// Endpoints:
// - GET    /schedules                           - List all schedules
// - GET    /schedules/{id}                      - Get one schedule
// - GET    /schedules/by-customer/{customer_id} - List a customer's schedules
// - GET    /schedules/by-status/{status}        - List schedules by status
// - POST   /schedules                           - Create a Pending schedule
// - PUT    /schedules/{id}/pay                  - Mark a schedule as paid
// - PUT    /schedules/{id}/schedule             - Change the payment date
// - DELETE /schedules/{id}                      - Delete a Pending schedule

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::Result;
use crate::modules::schedules::{
    models::{
        CreateScheduleRequest, DeleteScheduleResponse, PayScheduleRequest, RescheduleRequest,
        RescheduleResponse,
    },
    services::ScheduleService,
};

/// GET /schedules
pub async fn list_schedules(service: web::Data<Arc<ScheduleService>>) -> Result<HttpResponse> {
    let schedules = service.list_all().await?;

    Ok(HttpResponse::Ok().json(schedules))
}

/// GET /schedules/{id}
///
/// # Returns
/// - 200: The schedule
/// - 404: No schedule with this id
pub async fn get_schedule(
    service: web::Data<Arc<ScheduleService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let schedule = service.get_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(schedule))
}

/// GET /schedules/by-customer/{customer_id}
pub async fn list_by_customer(
    service: web::Data<Arc<ScheduleService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let schedules = service.list_by_customer(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(schedules))
}

/// GET /schedules/by-status/{status}
///
/// `status` is `Pending` or `Paid` (case-insensitive); anything else is a 400.
pub async fn list_by_status(
    service: web::Data<Arc<ScheduleService>>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let schedules = service.list_by_status(&path).await?;

    Ok(HttpResponse::Ok().json(schedules))
}

/// POST /schedules
///
/// # Request Body
/// ```json
/// {
///   "customer_id": 7,
///   "account_id": 3,
///   "amount": "100.00",
///   "description": "electricity bill"
/// }
/// ```
///
/// # Returns
/// - 201: Created schedule, always Pending
/// - 400: Malformed body or negative amount
pub async fn create_schedule(
    service: web::Data<Arc<ScheduleService>>,
    request: web::Json<CreateScheduleRequest>,
) -> Result<HttpResponse> {
    let schedule = service.create(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(schedule))
}

/// PUT /schedules/{id}/pay
///
/// # Returns
/// - 200: Updated schedule, now Paid
/// - 400: Already paid (details of the stored payment in the error body)
/// - 404: No schedule with this id
pub async fn pay_schedule(
    service: web::Data<Arc<ScheduleService>>,
    path: web::Path<i64>,
    request: web::Json<PayScheduleRequest>,
) -> Result<HttpResponse> {
    let schedule = service
        .pay(path.into_inner(), request.into_inner().payment_method)
        .await?;

    Ok(HttpResponse::Ok().json(schedule))
}

/// PUT /schedules/{id}/schedule
///
/// # Returns
/// - 200: New payment date
/// - 400: Already paid
/// - 404: No schedule with this id
pub async fn reschedule(
    service: web::Data<Arc<ScheduleService>>,
    path: web::Path<i64>,
    request: web::Json<RescheduleRequest>,
) -> Result<HttpResponse> {
    let paid_at = request.into_inner().paid_at;
    let schedule = service.reschedule(path.into_inner(), paid_at).await?;

    Ok(HttpResponse::Ok().json(RescheduleResponse {
        id: schedule.id,
        scheduled_at: schedule.scheduled_at,
        paid_at,
        message: format!("Payment date changed to: {}", paid_at),
    }))
}

/// DELETE /schedules/{id}
///
/// # Returns
/// - 200: Schedule removed
/// - 400: Schedule already paid
/// - 404: No schedule with this id
pub async fn delete_schedule(
    service: web::Data<Arc<ScheduleService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    service.delete(id).await?;

    Ok(HttpResponse::Ok().json(DeleteScheduleResponse {
        id,
        message: "Schedule deleted successfully".to_string(),
    }))
}

/// Configure schedule routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/schedules")
            .route("", web::get().to(list_schedules))
            .route("", web::post().to(create_schedule))
            .route("/by-customer/{customer_id}", web::get().to(list_by_customer))
            .route("/by-status/{status}", web::get().to(list_by_status))
            .route("/{id}", web::get().to(get_schedule))
            .route("/{id}", web::delete().to(delete_schedule))
            .route("/{id}/pay", web::put().to(pay_schedule))
            .route("/{id}/schedule", web::put().to(reschedule)),
    );
}
