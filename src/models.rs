use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Maximum combined driving + on-duty hours in the rolling cycle.
pub const CYCLE_CAP_HOURS: f64 = 70.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DutyStatus {
    #[serde(rename = "Off Duty")]
    OffDuty,
    #[serde(rename = "Sleeper Berth")]
    SleeperBerth,
    Driving,
    #[serde(rename = "On Duty")]
    OnDuty,
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("entry end time must be after its start time")]
    EndNotAfterStart,

    #[error("current cycle used must be within 0..=70 hours, got {0}")]
    CycleOutOfRange(f64),
}

// One contiguous block of a single duty status on a log sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub status: DutyStatus,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub note: Option<String>,
    pub location: Option<String>,
    pub remarks: Option<String>,
}

impl Entry {
    pub fn duration_hours(&self) -> f64 {
        (self.end_time - self.start_time).num_seconds() as f64 / 3600.0
    }
}

/// One day's duty log for a trip.
///
/// The entry list and the five derived hour fields are private: every
/// mutation goes through [`LogSheet::add_entry`], [`LogSheet::replace_entry`]
/// or [`LogSheet::remove_entry`], and each of those recomputes the totals
/// before returning. A reader can never observe totals that predate the
/// latest entry change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSheet {
    pub id: Uuid,
    pub date: NaiveDate,
    cycle_used: f64,
    entries: Vec<Entry>,
    driving_hours: f64,
    on_duty_hours: f64,
    off_duty_hours: f64,
    sleeper_hours: f64,
    hours_left_in_cycle: f64,
    pub remarks: Option<String>,
    pub bol_number: Option<String>,
    pub shipper: Option<String>,
    pub commodity: Option<String>,
}

impl LogSheet {
    /// Creates an empty log sheet for one calendar day.
    ///
    /// `cycle_used` is the trip's declared rolling-cycle usage in hours and
    /// must be within `0..=70`.
    pub fn new(date: NaiveDate, cycle_used: f64) -> Result<Self, ValidationError> {
        if !(0.0..=CYCLE_CAP_HOURS).contains(&cycle_used) {
            return Err(ValidationError::CycleOutOfRange(cycle_used));
        }
        let mut sheet = Self {
            id: Uuid::new_v4(),
            date,
            cycle_used,
            entries: Vec::new(),
            driving_hours: 0.0,
            on_duty_hours: 0.0,
            off_duty_hours: 0.0,
            sleeper_hours: 0.0,
            hours_left_in_cycle: 0.0,
            remarks: None,
            bol_number: None,
            shipper: None,
            commodity: None,
        };
        sheet.recompute();
        Ok(sheet)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn driving_hours(&self) -> f64 {
        self.driving_hours
    }

    pub fn on_duty_hours(&self) -> f64 {
        self.on_duty_hours
    }

    pub fn off_duty_hours(&self) -> f64 {
        self.off_duty_hours
    }

    pub fn sleeper_hours(&self) -> f64 {
        self.sleeper_hours
    }

    pub fn hours_left_in_cycle(&self) -> f64 {
        self.hours_left_in_cycle
    }

    /// Appends an entry and recomputes the hour totals.
    ///
    /// Fails if the entry ends at or before its start; the sheet is left
    /// untouched in that case. Entries may overlap in time. All of them
    /// are summed, so a day's totals can exceed 24 hours.
    pub fn add_entry(&mut self, entry: Entry) -> Result<(), ValidationError> {
        validate_times(&entry)?;
        self.entries.push(entry);
        self.recompute();
        Ok(())
    }

    /// Replaces the entry with the same id wholesale and recomputes.
    ///
    /// Returns `Ok(false)` when no entry has that id. Editing an entry is
    /// always a whole-record replace; there is no field-level mutation.
    pub fn replace_entry(&mut self, replacement: Entry) -> Result<bool, ValidationError> {
        validate_times(&replacement)?;
        let Some(slot) = self.entries.iter_mut().find(|e| e.id == replacement.id) else {
            return Ok(false);
        };
        *slot = replacement;
        self.recompute();
        Ok(true)
    }

    /// Removes the entry with the given id, recomputes, and returns it.
    pub fn remove_entry(&mut self, id: Uuid) -> Option<Entry> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        let removed = self.entries.remove(pos);
        self.recompute();
        Some(removed)
    }

    // Re-derives all five hour fields from the entry list. The only place
    // these fields are written; runs inside every mutating method above.
    fn recompute(&mut self) {
        let mut driving = 0.0;
        let mut on_duty = 0.0;
        let mut off_duty = 0.0;
        let mut sleeper = 0.0;

        for entry in &self.entries {
            let hours = entry.duration_hours();
            match entry.status {
                DutyStatus::Driving => driving += hours,
                DutyStatus::OnDuty => on_duty += hours,
                DutyStatus::OffDuty => off_duty += hours,
                DutyStatus::SleeperBerth => sleeper += hours,
            }
        }

        self.driving_hours = driving;
        self.on_duty_hours = on_duty;
        self.off_duty_hours = off_duty;
        self.sleeper_hours = sleeper;
        // Off-duty and sleeper-berth time never counts against the cycle.
        self.hours_left_in_cycle =
            f64::max(0.0, CYCLE_CAP_HOURS - self.cycle_used - driving - on_duty);
    }
}

fn validate_times(entry: &Entry) -> Result<(), ValidationError> {
    if entry.end_time <= entry.start_time {
        return Err(ValidationError::EndNotAfterStart);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub current_cycle_used: f64,
    pub created_at: DateTime<FixedOffset>,

    // Carrier info
    pub carrier_name: String,
    pub main_office_address: String,
    pub home_terminal_address: String,

    // Truck info
    pub tractor_number: String,
    pub trailer_number: String,
    pub license_plate: String,

    pub logsheets: Vec<LogSheet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Db {
    pub trips: Vec<Trip>,
}
