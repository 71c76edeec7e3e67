//! # API REST
//!
//! REST API for testreg.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, query filters, CORS)
//!
//! Wire types come from `api-shared`; all domain behaviour lives in
//! `testreg-core`. The only endpoint with behaviour beyond pass-through
//! persistence is `POST /test-appointments`, which books through
//! [`AppointmentService`].

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    CountRes, CreateHealthCenterReq, CreateTestAppointmentReq, CreateTestResultReq,
    HealthCenterRes, HealthRes, HealthService, ReplaceTestAppointmentReq, SuccessRes,
    TestAppointmentFilterReq, TestAppointmentRes, TestAppointmentWhereReq, TestResultRes,
    UpdateTestAppointmentReq,
};
use testreg_core::{
    appointment_type_from_env_value, lead_hours_from_env_value, AppointmentFilter,
    AppointmentService, AppointmentType, AppointmentWhere, CoreConfig, HealthCenter,
    InMemoryHealthCenterDirectory, InMemoryTestAppointmentStore, InMemoryTestResultStore,
    LeadTimeDateResolver, NewTestAppointment, NewTestResult, PatientId, StoreError,
    TestAppointment, TestAppointmentDraft, TestAppointmentPatch, TestAppointmentStore,
    TestResult, DEFAULT_HEALTH_CENTER_LEAD_HOURS, DEFAULT_HOME_LEAD_HOURS,
};

/// Application state shared across REST API handlers.
///
/// Holds the booking service plus the document stores backing the
/// pass-through CRUD endpoints.
#[derive(Clone)]
pub struct AppState {
    scheduler: AppointmentService,
    appointments: Arc<InMemoryTestAppointmentStore>,
    results: Arc<InMemoryTestResultStore>,
    centers: Arc<InMemoryHealthCenterDirectory>,
}

impl AppState {
    /// Builds the stores and wires the booking service from configuration.
    pub fn new(cfg: &CoreConfig) -> Self {
        let appointments = Arc::new(InMemoryTestAppointmentStore::new());
        let results = Arc::new(InMemoryTestResultStore::new());
        let centers = Arc::new(InMemoryHealthCenterDirectory::new());
        let dates = Arc::new(LeadTimeDateResolver::from_config(cfg));

        let scheduler = AppointmentService::new(
            results.clone(),
            centers.clone(),
            dates,
            appointments.clone(),
            cfg.default_appointment_type(),
        );

        Self {
            scheduler,
            appointments,
            results,
            centers,
        }
    }
}

/// Builds `AppState` from `TESTREG_*` environment variables.
///
/// # Environment Variables
/// - `TESTREG_DEFAULT_APPOINTMENT_TYPE`: classification fallback
///   (default: "AT_HEALTH_CENTER")
/// - `TESTREG_HEALTH_CENTER_LEAD_HOURS`: center-visit lead time (default: 24)
/// - `TESTREG_HOME_LEAD_HOURS`: home-visit lead time (default: 48)
pub fn state_from_env() -> anyhow::Result<AppState> {
    let default_type = appointment_type_from_env_value(
        std::env::var("TESTREG_DEFAULT_APPOINTMENT_TYPE").ok(),
    )?;
    let health_center_lead_hours = lead_hours_from_env_value(
        "health_center_lead_hours",
        std::env::var("TESTREG_HEALTH_CENTER_LEAD_HOURS").ok(),
        DEFAULT_HEALTH_CENTER_LEAD_HOURS,
    )?;
    let home_lead_hours = lead_hours_from_env_value(
        "home_lead_hours",
        std::env::var("TESTREG_HOME_LEAD_HOURS").ok(),
        DEFAULT_HOME_LEAD_HOURS,
    )?;

    let cfg = CoreConfig::new(default_type, health_center_lead_hours, home_lead_hours)?;
    Ok(AppState::new(&cfg))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        create_test_appointment,
        count_test_appointments,
        find_test_appointments,
        find_test_appointment_by_id,
        find_latest_test_appointment_by_patient,
        update_all_test_appointments,
        update_test_appointment_by_id,
        replace_test_appointment_by_id,
        delete_test_appointment_by_id,
        create_test_result,
        find_test_results,
        count_test_results,
        create_health_center,
        list_health_centers,
        assign_patient,
    ),
    components(schemas(
        HealthRes,
        CountRes,
        SuccessRes,
        CreateTestAppointmentReq,
        TestAppointmentRes,
        UpdateTestAppointmentReq,
        ReplaceTestAppointmentReq,
        TestAppointmentWhereReq,
        TestAppointmentFilterReq,
        CreateTestResultReq,
        TestResultRes,
        CreateHealthCenterReq,
        HealthCenterRes,
    ))
)]
struct ApiDoc;

/// Builds the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/test-appointments",
            post(create_test_appointment)
                .get(find_test_appointments)
                .patch(update_all_test_appointments),
        )
        .route("/test-appointments/count", get(count_test_appointments))
        .route(
            "/test-appointments/patient-id/:patient_id",
            get(find_latest_test_appointment_by_patient),
        )
        .route(
            "/test-appointments/:id",
            get(find_test_appointment_by_id)
                .patch(update_test_appointment_by_id)
                .put(replace_test_appointment_by_id)
                .delete(delete_test_appointment_by_id),
        )
        .route(
            "/test-results",
            post(create_test_result).get(find_test_results),
        )
        .route("/test-results/count", get(count_test_results))
        .route(
            "/health-centers",
            post(create_health_center).get(list_health_centers),
        )
        .route(
            "/health-centers/:id/patients/:patient_id",
            put(assign_patient),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

type HandlerError = (StatusCode, &'static str);

#[derive(Debug, Deserialize)]
struct WhereQuery {
    /// JSON-encoded where clause.
    r#where: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FilterQuery {
    /// JSON-encoded filter.
    filter: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PatientQuery {
    #[serde(rename = "patientId")]
    patient_id: Option<String>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used by monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/test-appointments",
    request_body = CreateTestAppointmentReq,
    responses(
        (status = 200, description = "Booked test appointment", body = TestAppointmentRes),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Book a test appointment for a patient
///
/// Classifies the appointment from the patient's latest test-result action,
/// resolves the health center and the appointment date, persists the record,
/// and returns it. Classification and health-center lookup failures fall
/// back to defaults; date-resolution and persistence failures fail the
/// request.
///
/// # Errors
/// Returns `400 Bad Request` when the patient id is empty and
/// `500 Internal Server Error` when date resolution or persistence fails.
#[axum::debug_handler]
async fn create_test_appointment(
    State(state): State<AppState>,
    Json(req): Json<CreateTestAppointmentReq>,
) -> Result<Json<TestAppointmentRes>, HandlerError> {
    let patient_id = match PatientId::new(&req.patient_id) {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Invalid patient id: {:?}", e);
            return Err((StatusCode::BAD_REQUEST, "Invalid patient id"));
        }
    };

    match state.scheduler.create(TestAppointmentDraft { patient_id }) {
        Ok(appointment) => Ok(Json(appointment_res(appointment))),
        Err(e) => {
            tracing::error!("Book appointment error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/test-appointments/count",
    params(
        ("where" = Option<String>, Query, description = "JSON-encoded where clause")
    ),
    responses(
        (status = 200, description = "Test appointment count", body = CountRes),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Count test appointments matching an optional where clause.
#[axum::debug_handler]
async fn count_test_appointments(
    State(state): State<AppState>,
    Query(query): Query<WhereQuery>,
) -> Result<Json<CountRes>, HandlerError> {
    let constraints = parse_where_param(query.r#where.as_deref())?;
    match state.appointments.count(&constraints) {
        Ok(count) => Ok(Json(CountRes { count })),
        Err(e) => {
            tracing::error!("Count appointments error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/test-appointments",
    params(
        ("filter" = Option<String>, Query, description = "JSON-encoded filter (where/skip/limit)")
    ),
    responses(
        (status = 200, description = "Matching test appointments", body = [TestAppointmentRes]),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// List test appointments, newest first.
#[axum::debug_handler]
async fn find_test_appointments(
    State(state): State<AppState>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<TestAppointmentRes>>, HandlerError> {
    let filter = parse_filter_param(query.filter.as_deref())?;
    match state.appointments.find(&filter) {
        Ok(appointments) => Ok(Json(
            appointments.into_iter().map(appointment_res).collect(),
        )),
        Err(e) => {
            tracing::error!("Find appointments error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/test-appointments/{id}",
    params(
        ("id" = String, Path, description = "Appointment id")
    ),
    responses(
        (status = 200, description = "Test appointment", body = TestAppointmentRes),
        (status = 404, description = "Not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Fetch one test appointment by id.
#[axum::debug_handler]
async fn find_test_appointment_by_id(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<TestAppointmentRes>, HandlerError> {
    match state.appointments.find_by_id(&id) {
        Ok(appointment) => Ok(Json(appointment_res(appointment))),
        Err(StoreError::NotFound(_)) => Err((StatusCode::NOT_FOUND, "Not found")),
        Err(e) => {
            tracing::error!("Find appointment error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/test-appointments/patient-id/{patient_id}",
    params(
        ("patient_id" = String, Path, description = "Patient id")
    ),
    responses(
        (status = 200, description = "Latest test appointment for the patient, or null when none exists", body = TestAppointmentRes),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Latest appointment for a patient, or null when none exists.
#[axum::debug_handler]
async fn find_latest_test_appointment_by_patient(
    State(state): State<AppState>,
    AxumPath(patient_id): AxumPath<String>,
) -> Result<Json<Option<TestAppointmentRes>>, HandlerError> {
    let patient_id = match PatientId::new(&patient_id) {
        Ok(id) => id,
        Err(_) => return Err((StatusCode::BAD_REQUEST, "Invalid patient id")),
    };

    match state.appointments.find_latest_by_patient(&patient_id) {
        Ok(appointment) => Ok(Json(appointment.map(appointment_res))),
        Err(e) => {
            tracing::error!("Find latest appointment error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    patch,
    path = "/test-appointments",
    request_body = UpdateTestAppointmentReq,
    params(
        ("where" = Option<String>, Query, description = "JSON-encoded where clause")
    ),
    responses(
        (status = 200, description = "Updated appointment count", body = CountRes),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Patch every appointment matching the where clause.
#[axum::debug_handler]
async fn update_all_test_appointments(
    State(state): State<AppState>,
    Query(query): Query<WhereQuery>,
    Json(req): Json<UpdateTestAppointmentReq>,
) -> Result<Json<CountRes>, HandlerError> {
    let constraints = parse_where_param(query.r#where.as_deref())?;
    let patch = parse_patch(req)?;
    match state.appointments.update_all(&patch, &constraints) {
        Ok(count) => Ok(Json(CountRes { count })),
        Err(e) => {
            tracing::error!("Update appointments error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    patch,
    path = "/test-appointments/{id}",
    request_body = UpdateTestAppointmentReq,
    params(
        ("id" = String, Path, description = "Appointment id")
    ),
    responses(
        (status = 204, description = "Appointment updated"),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Patch one appointment by id.
#[axum::debug_handler]
async fn update_test_appointment_by_id(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<UpdateTestAppointmentReq>,
) -> Result<StatusCode, HandlerError> {
    let patch = parse_patch(req)?;
    match state.appointments.update_by_id(&id, &patch) {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err((StatusCode::NOT_FOUND, "Not found")),
        Err(e) => {
            tracing::error!("Update appointment error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    put,
    path = "/test-appointments/{id}",
    request_body = ReplaceTestAppointmentReq,
    params(
        ("id" = String, Path, description = "Appointment id")
    ),
    responses(
        (status = 204, description = "Appointment replaced"),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Replace one appointment by id.
#[axum::debug_handler]
async fn replace_test_appointment_by_id(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(req): Json<ReplaceTestAppointmentReq>,
) -> Result<StatusCode, HandlerError> {
    let record = parse_replacement(req)?;
    match state.appointments.replace_by_id(&id, record) {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err((StatusCode::NOT_FOUND, "Not found")),
        Err(e) => {
            tracing::error!("Replace appointment error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/test-appointments/{id}",
    params(
        ("id" = String, Path, description = "Appointment id")
    ),
    responses(
        (status = 204, description = "Appointment deleted"),
        (status = 404, description = "Not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Delete one appointment by id.
#[axum::debug_handler]
async fn delete_test_appointment_by_id(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<StatusCode, HandlerError> {
    match state.appointments.delete_by_id(&id) {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(StoreError::NotFound(_)) => Err((StatusCode::NOT_FOUND, "Not found")),
        Err(e) => {
            tracing::error!("Delete appointment error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/test-results",
    request_body = CreateTestResultReq,
    responses(
        (status = 200, description = "Recorded test result", body = TestResultRes),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Record a test result for a patient.
#[axum::debug_handler]
async fn create_test_result(
    State(state): State<AppState>,
    Json(req): Json<CreateTestResultReq>,
) -> Result<Json<TestResultRes>, HandlerError> {
    let patient_id = match PatientId::new(&req.patient_id) {
        Ok(id) => id,
        Err(_) => return Err((StatusCode::BAD_REQUEST, "Invalid patient id")),
    };
    let created = req
        .created
        .as_deref()
        .map(parse_rfc3339)
        .transpose()?;

    // The recorded action is stored verbatim; classification interprets it
    // when an appointment is booked.
    let record = NewTestResult {
        patient_id,
        action: req.action,
        created,
    };

    match state.results.create(record) {
        Ok(result) => Ok(Json(result_res(result))),
        Err(e) => {
            tracing::error!("Create test result error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/test-results",
    params(
        ("patientId" = Option<String>, Query, description = "Constrain to one patient")
    ),
    responses(
        (status = 200, description = "Recorded test results, newest first", body = [TestResultRes]),
        (status = 500, description = "Internal server error")
    )
)]
/// List recorded test results, newest first.
#[axum::debug_handler]
async fn find_test_results(
    State(state): State<AppState>,
    Query(query): Query<PatientQuery>,
) -> Result<Json<Vec<TestResultRes>>, HandlerError> {
    match state.results.find(query.patient_id.as_deref()) {
        Ok(results) => Ok(Json(results.into_iter().map(result_res).collect())),
        Err(e) => {
            tracing::error!("Find test results error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/test-results/count",
    params(
        ("patientId" = Option<String>, Query, description = "Constrain to one patient")
    ),
    responses(
        (status = 200, description = "Test result count", body = CountRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Count recorded test results.
#[axum::debug_handler]
async fn count_test_results(
    State(state): State<AppState>,
    Query(query): Query<PatientQuery>,
) -> Result<Json<CountRes>, HandlerError> {
    match state.results.count(query.patient_id.as_deref()) {
        Ok(count) => Ok(Json(CountRes { count })),
        Err(e) => {
            tracing::error!("Count test results error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    post,
    path = "/health-centers",
    request_body = CreateHealthCenterReq,
    responses(
        (status = 200, description = "Registered health center", body = HealthCenterRes),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Register a health center.
#[axum::debug_handler]
async fn create_health_center(
    State(state): State<AppState>,
    Json(req): Json<CreateHealthCenterReq>,
) -> Result<Json<HealthCenterRes>, HandlerError> {
    if req.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Name is required"));
    }
    match state.centers.create(req.name, req.address) {
        Ok(center) => Ok(Json(center_res(center))),
        Err(e) => {
            tracing::error!("Create health center error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/health-centers",
    responses(
        (status = 200, description = "Registered health centers", body = [HealthCenterRes]),
        (status = 500, description = "Internal server error")
    )
)]
/// List registered health centers.
#[axum::debug_handler]
async fn list_health_centers(
    State(state): State<AppState>,
) -> Result<Json<Vec<HealthCenterRes>>, HandlerError> {
    match state.centers.list() {
        Ok(centers) => Ok(Json(centers.into_iter().map(center_res).collect())),
        Err(e) => {
            tracing::error!("List health centers error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    put,
    path = "/health-centers/{id}/patients/{patient_id}",
    params(
        ("id" = String, Path, description = "Health center id"),
        ("patient_id" = String, Path, description = "Patient id")
    ),
    responses(
        (status = 200, description = "Patient assigned", body = SuccessRes),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Assign a patient to a health center.
#[axum::debug_handler]
async fn assign_patient(
    State(state): State<AppState>,
    AxumPath((id, patient_id)): AxumPath<(String, String)>,
) -> Result<Json<SuccessRes>, HandlerError> {
    let patient_id = match PatientId::new(&patient_id) {
        Ok(id) => id,
        Err(_) => return Err((StatusCode::BAD_REQUEST, "Invalid patient id")),
    };

    match state.centers.assign_patient(&id, &patient_id) {
        Ok(()) => Ok(Json(SuccessRes { success: true })),
        Err(StoreError::NotFound(_)) => Err((StatusCode::NOT_FOUND, "Not found")),
        Err(e) => {
            tracing::error!("Assign patient error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

// Wire mapping helpers

fn appointment_res(appointment: TestAppointment) -> TestAppointmentRes {
    TestAppointmentRes {
        id: appointment.id,
        patient_id: appointment.patient_id.as_str().to_owned(),
        kind: appointment.kind.to_string(),
        health_center_id: appointment.health_center_id,
        appointment_date: appointment.appointment_date.to_rfc3339(),
        created: appointment.created.to_rfc3339(),
    }
}

fn result_res(result: TestResult) -> TestResultRes {
    TestResultRes {
        id: result.id,
        patient_id: result.patient_id.as_str().to_owned(),
        action: result.action,
        created: result.created.to_rfc3339(),
    }
}

fn center_res(center: HealthCenter) -> HealthCenterRes {
    HealthCenterRes {
        id: center.id,
        name: center.name,
        address: center.address,
    }
}

fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>, HandlerError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid RFC 3339 timestamp"))
}

fn parse_kind(value: &str) -> Result<AppointmentType, HandlerError> {
    value
        .parse::<AppointmentType>()
        .map_err(|_| (StatusCode::BAD_REQUEST, "Unknown appointment type"))
}

fn build_where(req: TestAppointmentWhereReq) -> Result<AppointmentWhere, HandlerError> {
    Ok(AppointmentWhere {
        patient_id: req.patient_id,
        kind: req.kind.as_deref().map(parse_kind).transpose()?,
        health_center_id: req.health_center_id,
    })
}

fn parse_where_param(raw: Option<&str>) -> Result<AppointmentWhere, HandlerError> {
    let Some(raw) = raw else {
        return Ok(AppointmentWhere::default());
    };
    let req: TestAppointmentWhereReq = serde_json::from_str(raw)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid where clause"))?;
    build_where(req)
}

fn parse_filter_param(raw: Option<&str>) -> Result<AppointmentFilter, HandlerError> {
    let Some(raw) = raw else {
        return Ok(AppointmentFilter::default());
    };
    let req: TestAppointmentFilterReq =
        serde_json::from_str(raw).map_err(|_| (StatusCode::BAD_REQUEST, "Invalid filter"))?;
    Ok(AppointmentFilter {
        constraints: build_where(req.constraints.unwrap_or_default())?,
        skip: req.skip,
        limit: req.limit,
    })
}

fn parse_patch(req: UpdateTestAppointmentReq) -> Result<TestAppointmentPatch, HandlerError> {
    Ok(TestAppointmentPatch {
        kind: req.kind.as_deref().map(parse_kind).transpose()?,
        health_center_id: req.health_center_id,
        appointment_date: req
            .appointment_date
            .as_deref()
            .map(parse_rfc3339)
            .transpose()?,
    })
}

fn parse_replacement(req: ReplaceTestAppointmentReq) -> Result<NewTestAppointment, HandlerError> {
    let patient_id = PatientId::new(&req.patient_id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid patient id"))?;
    Ok(NewTestAppointment {
        patient_id,
        kind: parse_kind(&req.kind)?,
        health_center_id: req.health_center_id,
        appointment_date: parse_rfc3339(&req.appointment_date)?,
        created: parse_rfc3339(&req.created)?,
    })
}
