// --------------------------------------------------
// Handles API endpoints for log sheets and duty entries.
//
// Responsibilities:
// - Add a log sheet to a trip (one per calendar day)
// - Create / read / update / delete duty entries
//
// Entry writes always go through the LogSheet mutation API, so the
// sheet's hour totals are recomputed before anything is saved or
// returned.
// --------------------------------------------------

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{Db, DutyStatus, Entry, LogSheet};
use crate::store;

// -----------------------------
// GET /api/logsheets
// Returns all log sheets across trips
// -----------------------------
pub async fn get_logsheets() -> impl IntoResponse {
    let db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("failed to load db: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    let sheets: Vec<LogSheet> = db.trips.into_iter().flat_map(|t| t.logsheets).collect();
    Json(sheets).into_response()
}

// -----------------------------
// GET /api/logsheets/:id
// Returns a single log sheet with entries and hour totals
// -----------------------------
pub async fn get_logsheet(Path(id): Path<String>) -> impl IntoResponse {
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

    let Some(sheet) = db
        .trips
        .into_iter()
        .flat_map(|t| t.logsheets)
        .find(|s| s.id == id)
    else {
        return (StatusCode::NOT_FOUND, "log sheet not found").into_response();
    };

    Json(sheet).into_response()
}

#[derive(Debug, Deserialize)]
pub struct CreateLogSheetInput {
    pub trip_id: Uuid,
    pub date: String, // "YYYY-MM-DD"
    pub remarks: Option<String>,
    pub bol_number: Option<String>,
    pub shipper: Option<String>,
    pub commodity: Option<String>,
}

// -----------------------------
// POST /api/logsheets
// Adds an empty log sheet to a trip for the given date
// -----------------------------
pub async fn create_logsheet(Json(input): Json<CreateLogSheetInput>) -> impl IntoResponse {
    let date = match NaiveDate::parse_from_str(&input.date, "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid date").into_response(),
    };

    let mut db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("failed to load db: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    let Some(trip) = db.trips.iter_mut().find(|t| t.id == input.trip_id) else {
        return (StatusCode::NOT_FOUND, "trip not found").into_response();
    };

    // One sheet per calendar day per trip.
    if trip.logsheets.iter().any(|s| s.date == date) {
        return (StatusCode::BAD_REQUEST, "log sheet already exists for this date")
            .into_response();
    }

    let mut sheet = match LogSheet::new(date, trip.current_cycle_used) {
        Ok(sheet) => sheet,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };
    sheet.remarks = input.remarks;
    sheet.bol_number = input.bol_number;
    sheet.shipper = input.shipper;
    sheet.commodity = input.commodity;

    trip.logsheets.push(sheet.clone());

    if let Err(e) = store::save_db(&db) {
        log::error!("failed to save db: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(sheet).into_response()
}

// -----------------------------
// GET /api/entries
// Returns all duty entries across log sheets
// -----------------------------
pub async fn get_entries() -> impl IntoResponse {
    let db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("failed to load db: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    let entries: Vec<Entry> = db
        .trips
        .iter()
        .flat_map(|t| t.logsheets.iter())
        .flat_map(|s| s.entries().iter().cloned())
        .collect();
    Json(entries).into_response()
}

// -----------------------------
// GET /api/entries/:id
// Returns a single duty entry
// -----------------------------
pub async fn get_entry(Path(id): Path<String>) -> impl IntoResponse {
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

    let Some(entry) = db
        .trips
        .iter()
        .flat_map(|t| t.logsheets.iter())
        .flat_map(|s| s.entries().iter())
        .find(|e| e.id == id)
    else {
        return (StatusCode::NOT_FOUND, "entry not found").into_response();
    };

    Json(entry.clone()).into_response()
}

#[derive(Debug, Deserialize)]
pub struct CreateEntryInput {
    pub logsheet_id: Uuid,
    pub status: DutyStatus,
    pub start_time: String, // RFC3339
    pub end_time: String,   // RFC3339
    pub note: Option<String>,
    pub location: Option<String>,
    pub remarks: Option<String>,
}

// -----------------------------
// POST /api/entries
// Appends a duty entry to a log sheet
// -----------------------------
pub async fn create_entry(Json(input): Json<CreateEntryInput>) -> impl IntoResponse {
    let start_time = match DateTime::parse_from_rfc3339(&input.start_time) {
        Ok(dt) => dt,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid start_time").into_response(),
    };
    let end_time = match DateTime::parse_from_rfc3339(&input.end_time) {
        Ok(dt) => dt,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid end_time").into_response(),
    };

    let mut db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("failed to load db: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    let Some(sheet) = db
        .trips
        .iter_mut()
        .flat_map(|t| t.logsheets.iter_mut())
        .find(|s| s.id == input.logsheet_id)
    else {
        return (StatusCode::NOT_FOUND, "log sheet not found").into_response();
    };

    let entry = Entry {
        id: Uuid::new_v4(),
        status: input.status,
        start_time,
        end_time,
        note: input.note,
        location: input.location,
        remarks: input.remarks,
    };

    if let Err(e) = sheet.add_entry(entry.clone()) {
        return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
    }

    log::info!(
        "log sheet {}: {:.1}h driving, {:.1}h on duty, {:.1}h off duty, {:.1}h sleeper, {:.1}h left in cycle",
        sheet.id,
        sheet.driving_hours(),
        sheet.on_duty_hours(),
        sheet.off_duty_hours(),
        sheet.sleeper_hours(),
        sheet.hours_left_in_cycle(),
    );

    if let Err(e) = store::save_db(&db) {
        log::error!("failed to save db: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(entry).into_response()
}

#[derive(Debug, Deserialize)]
pub struct UpdateEntryInput {
    pub status: DutyStatus,
    pub start_time: String, // RFC3339
    pub end_time: String,   // RFC3339
    pub note: Option<String>,
    pub location: Option<String>,
    pub remarks: Option<String>,
}

// -----------------------------
// PUT /api/entries/:id
// Replaces an existing duty entry whole-record
// -----------------------------
pub async fn update_entry(
    Path(id): Path<String>,
    Json(input): Json<UpdateEntryInput>,
) -> impl IntoResponse {
    let id = match Uuid::parse_str(&id) {
        Ok(u) => u,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid id").into_response(),
    };

    let start_time = match DateTime::parse_from_rfc3339(&input.start_time) {
        Ok(dt) => dt,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid start_time").into_response(),
    };
    let end_time = match DateTime::parse_from_rfc3339(&input.end_time) {
        Ok(dt) => dt,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid end_time").into_response(),
    };

    let mut db: Db = match store::load_db() {
        Ok(db) => db,
        Err(e) => {
            log::error!("failed to load db: {e}");
            return (StatusCode::INTERNAL_SERVER_ERROR, "failed to load db").into_response();
        }
    };

    let Some(sheet) = db
        .trips
        .iter_mut()
        .flat_map(|t| t.logsheets.iter_mut())
        .find(|s| s.entries().iter().any(|e| e.id == id))
    else {
        return (StatusCode::NOT_FOUND, "entry not found").into_response();
    };

    let entry = Entry {
        id,
        status: input.status,
        start_time,
        end_time,
        note: input.note,
        location: input.location,
        remarks: input.remarks,
    };

    match sheet.replace_entry(entry.clone()) {
        Ok(true) => {}
        Ok(false) => return (StatusCode::NOT_FOUND, "entry not found").into_response(),
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }

    log::info!(
        "log sheet {}: {:.1}h driving, {:.1}h on duty, {:.1}h off duty, {:.1}h sleeper, {:.1}h left in cycle",
        sheet.id,
        sheet.driving_hours(),
        sheet.on_duty_hours(),
        sheet.off_duty_hours(),
        sheet.sleeper_hours(),
        sheet.hours_left_in_cycle(),
    );

    if let Err(e) = store::save_db(&db) {
        log::error!("failed to save db: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(entry).into_response()
}

// -----------------------------
// DELETE /api/entries/:id
// Removes a duty entry permanently
// -----------------------------
pub async fn delete_entry(Path(id): Path<String>) -> impl IntoResponse {
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

    let Some(sheet) = db
        .trips
        .iter_mut()
        .flat_map(|t| t.logsheets.iter_mut())
        .find(|s| s.entries().iter().any(|e| e.id == id))
    else {
        return (StatusCode::NOT_FOUND, "entry not found").into_response();
    };

    if sheet.remove_entry(id).is_none() {
        return (StatusCode::NOT_FOUND, "entry not found").into_response();
    }

    if let Err(e) = store::save_db(&db) {
        log::error!("failed to save db: {e}");
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to save db").into_response();
    }

    Json(serde_json::json!({ "ok": true })).into_response()
}
