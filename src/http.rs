use crate::backend::SlotBackend;
use crate::configuration::Configuration;
use crate::error::BookingError;
use crate::simulation::DemandSimulator;
use crate::types::{Booking, SimulationStatus, Slot};
use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState<T: SlotBackend> {
    backend: T,
    simulator: DemandSimulator<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlotsQuery {
    venue_id: Option<u32>,
    date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingRequest {
    venue_id: Option<u32>,
    date: Option<String>,
    time: Option<String>,
    user_name: Option<String>,
    sport: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ControlSimulationRequest {
    action: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResetSlotsRequest {
    venue_id: Option<u32>,
    date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResetSlotsResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
}

pub fn create_app<T: SlotBackend>(backend: T, configuration: impl Configuration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            configuration
                .cors_origin()
                .parse::<HeaderValue>()
                .unwrap(),
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let simulator = DemandSimulator::new(backend.clone());
    let state = AppState { backend, simulator };

    Router::new()
        .route("/venues", get(get_venues))
        .route("/sports", get(get_sports))
        .route("/slots", get(get_slots))
        .route("/book", post(book_slot))
        .route("/control-simulation", post(control_simulation))
        .route("/simulation-status", get(simulation_status))
        .route("/reset-slots", post(reset_slots))
        .with_state(state)
        .layer(cors)
}

async fn get_venues<T: SlotBackend>(State(state): State<AppState<T>>) -> impl IntoResponse {
    state.simulator.record_activity();
    Json(state.backend.venues())
}

async fn get_sports<T: SlotBackend>(State(state): State<AppState<T>>) -> impl IntoResponse {
    state.simulator.record_activity();
    Json(state.backend.sports())
}

async fn get_slots<T: SlotBackend>(
    State(state): State<AppState<T>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Vec<Slot>>, BookingError> {
    state.simulator.record_activity();
    let venue_id = query
        .venue_id
        .ok_or_else(|| BookingError::invalid_request("Invalid venue ID or date"))?;
    let date = query
        .date
        .filter(|date| !date.is_empty())
        .ok_or_else(|| BookingError::invalid_request("Invalid venue ID or date"))?;
    Ok(Json(state.backend.slots(venue_id, &date)?))
}

fn required(field: Option<String>) -> Result<String, BookingError> {
    field
        .filter(|value| !value.is_empty())
        .ok_or(BookingError::MissingFields)
}

async fn book_slot<T: SlotBackend>(
    State(state): State<AppState<T>>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Booking>), BookingError> {
    state.simulator.record_activity();

    let venue_id = request.venue_id.ok_or(BookingError::MissingFields)?;
    let date = required(request.date)?;
    let time = required(request.time)?;
    let user_name = required(request.user_name)?;
    let sport = required(request.sport)?;

    let booking = state
        .backend
        .book_slot(venue_id, &date, &time, &user_name, &sport)?;
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn control_simulation<T: SlotBackend>(
    State(state): State<AppState<T>>,
    Json(request): Json<ControlSimulationRequest>,
) -> Result<Json<Value>, BookingError> {
    match request.action.as_deref() {
        Some("start") => {
            state.simulator.record_activity();
            Ok(Json(
                json!({ "status": "Simulation started", "active": true }),
            ))
        }
        Some("stop") => {
            state.simulator.stop();
            Ok(Json(
                json!({ "status": "Simulation stopped", "active": false }),
            ))
        }
        _ => Err(BookingError::invalid_request(
            "Invalid action. Use \"start\" or \"stop\".",
        )),
    }
}

async fn simulation_status<T: SlotBackend>(
    State(state): State<AppState<T>>,
) -> Json<SimulationStatus> {
    Json(state.simulator.status())
}

async fn reset_slots<T: SlotBackend>(
    State(state): State<AppState<T>>,
    Json(request): Json<ResetSlotsRequest>,
) -> Result<Json<ResetSlotsResponse>, BookingError> {
    match (request.venue_id, request.date) {
        (Some(venue_id), Some(date)) if !date.is_empty() => {
            state.backend.reset_bucket(venue_id, &date)?;
            Ok(Json(ResetSlotsResponse {
                message: format!("All slots for venue {venue_id} on {date} have been reset."),
                date: None,
            }))
        }
        _ => {
            let (today, count) = state.backend.reset_today();
            Ok(Json(ResetSlotsResponse {
                message: format!("Reset {count} slots for today ({today})."),
                date: Some(today),
            }))
        }
    }
}
