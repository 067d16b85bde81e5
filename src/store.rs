use std::{fs, io, path::Path};

use crate::models::Db;

pub const DB_PATH: &str = "data/db.json";

pub fn load_db() -> io::Result<Db> {
    load_db_from(Path::new(DB_PATH))
}

pub fn save_db(db: &Db) -> io::Result<()> {
    save_db_to(Path::new(DB_PATH), db)
}

// A missing file is a fresh install: start with no trips.
pub fn load_db_from(path: &Path) -> io::Result<Db> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Db { trips: Vec::new() }),
        Err(e) => return Err(e),
    };
    let db: Db =
        serde_json::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(db)
}

pub fn save_db_to(path: &Path, db: &Db) -> io::Result<()> {
    let text = serde_json::to_string_pretty(db)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write-then-rename so a crash mid-save never truncates the log data.
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, text)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{FixedOffset, NaiveDate, TimeZone};
    use tempfile::TempDir;
    use uuid::Uuid;

    use crate::models::{DutyStatus, Entry, LogSheet, Trip};

    fn sample_db() -> Db {
        let offset = FixedOffset::east_opt(0).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let mut sheet = LogSheet::new(date, 20.0).unwrap();
        sheet
            .add_entry(Entry {
                id: Uuid::new_v4(),
                status: DutyStatus::Driving,
                start_time: offset.with_ymd_and_hms(2025, 3, 10, 6, 0, 0).unwrap(),
                end_time: offset.with_ymd_and_hms(2025, 3, 10, 16, 0, 0).unwrap(),
                note: None,
                location: None,
                remarks: None,
            })
            .unwrap();

        Db {
            trips: vec![Trip {
                id: Uuid::new_v4(),
                current_location: "Chicago, IL".into(),
                pickup_location: "Des Moines, IA".into(),
                dropoff_location: "Denver, CO".into(),
                current_cycle_used: 20.0,
                created_at: offset.with_ymd_and_hms(2025, 3, 10, 5, 0, 0).unwrap(),
                carrier_name: "Unknown Carrier".into(),
                main_office_address: String::new(),
                home_terminal_address: String::new(),
                tractor_number: "T-204".into(),
                trailer_number: String::new(),
                license_plate: String::new(),
                logsheets: vec![sheet],
            }],
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("db.json");
        let db = sample_db();

        save_db_to(&path, &db).unwrap();
        let loaded = load_db_from(&path).unwrap();

        assert_eq!(loaded.trips.len(), 1);
        let trip = &loaded.trips[0];
        assert_eq!(trip.id, db.trips[0].id);
        assert_eq!(trip.logsheets.len(), 1);
        assert_eq!(trip.logsheets[0].driving_hours(), 10.0);
        assert_eq!(trip.logsheets[0].hours_left_in_cycle(), 40.0);
    }

    #[test]
    fn missing_file_loads_as_empty_db() {
        let dir = TempDir::new().unwrap();
        let loaded = load_db_from(&dir.path().join("db.json")).unwrap();
        assert!(loaded.trips.is_empty());
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");

        save_db_to(&path, &sample_db()).unwrap();
        save_db_to(&path, &Db { trips: Vec::new() }).unwrap();

        let loaded = load_db_from(&path).unwrap();
        assert!(loaded.trips.is_empty());
    }
}
