// --------------------------------------------------
// Handles API endpoints related to trips.
//
// Responsibilities:
// - Create a trip and generate its first day's log sheet
// - Read trips as the nested trip -> log sheets -> entries structure
// - Delete trips
// --------------------------------------------------

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use uuid::Uuid;

use crate::logic;
use crate::models::{Db, Trip};
use crate::store;

fn now_fixed_offset() -> DateTime<FixedOffset> {
    let local = chrono::Local::now();
    let offset_seconds = local.offset().local_minus_utc();
    let fixed = FixedOffset::east_opt(offset_seconds).unwrap();
    local.with_timezone(&fixed)
}

// -----------------------------
// GET /api/trips
// Returns all trips with their log sheets and entries nested
// -----------------------------
pub async fn get_trips() -> impl IntoResponse {
    let db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("failed to load db: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };
    Json(db.trips).into_response()
}

#[derive(Debug, Deserialize)]
pub struct CreateTripInput {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    #[serde(default)]
    pub current_cycle_used: f64,
    pub carrier_name: Option<String>,
    pub main_office_address: Option<String>,
    pub home_terminal_address: Option<String>,
    pub tractor_number: Option<String>,
    pub trailer_number: Option<String>,
    pub license_plate: Option<String>,
}

// -----------------------------
// POST /api/trips
// Creates a trip, seeds its first log sheet, and saves to db.json
// -----------------------------
pub async fn create_trip(Json(input): Json<CreateTripInput>) -> impl IntoResponse {
    if input.current_location.trim().is_empty()
        || input.pickup_location.trim().is_empty()
        || input.dropoff_location.trim().is_empty()
    {
        return (StatusCode::BAD_REQUEST, "locations required").into_response();
    }

    let now = now_fixed_offset();

    let mut db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("failed to load db: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    let mut trip = Trip {
        id: Uuid::new_v4(),
        current_location: input.current_location,
        pickup_location: input.pickup_location,
        dropoff_location: input.dropoff_location,
        current_cycle_used: input.current_cycle_used,
        created_at: now,
        carrier_name: input.carrier_name.unwrap_or_else(|| "Unknown Carrier".to_string()),
        main_office_address: input.main_office_address.unwrap_or_default(),
        home_terminal_address: input.home_terminal_address.unwrap_or_default(),
        tractor_number: input.tractor_number.unwrap_or_default(),
        trailer_number: input.trailer_number.unwrap_or_default(),
        license_plate: input.license_plate.unwrap_or_default(),
        logsheets: Vec::new(),
    };

    let sheet = match logic::generate_logs(&trip, now.date_naive(), *now.offset()) {
        Ok(sheet) => sheet,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };
    trip.logsheets.push(sheet);

    db.trips.push(trip.clone());

    if let Err(e) = store::save_db(&db) {
        log::error!("failed to save db: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(trip).into_response()
}

// -----------------------------
// GET /api/trips/:id
// Returns a single trip with its log sheets and entries
// -----------------------------
pub async fn get_trip(Path(id): Path<String>) -> impl IntoResponse {
    let id = match Uuid::parse_str(&id) {
        Ok(u) => u,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid id").into_response(),
    };

    let db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("failed to load db: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    let Some(trip) = db.trips.into_iter().find(|t| t.id == id) else {
        return (StatusCode::NOT_FOUND, "trip not found").into_response();
    };

    Json(trip).into_response()
}

// -----------------------------
// DELETE /api/trips/:id
// Removes a trip and all of its log sheets
// -----------------------------
pub async fn delete_trip(Path(id): Path<String>) -> impl IntoResponse {
    let id = match Uuid::parse_str(&id) {
        Ok(u) => u,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid id").into_response(),
    };

    let mut db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("failed to load db: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    let before = db.trips.len();
    db.trips.retain(|t| t.id != id);

    if db.trips.len() == before {
        return (StatusCode::NOT_FOUND, "trip not found").into_response();
    }

    if let Err(e) = store::save_db(&db) {
        log::error!("failed to save db: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(serde_json::json!({ "ok": true })).into_response()
}
