use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: u32,
    pub name: String,
    pub location: String,
}

/// Time-of-day bucket a slot falls into, derived from its start hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
}

impl Period {
    pub fn from_start_hour(hour: u32) -> Self {
        if hour < 12 {
            Period::Morning
        } else if hour < 17 {
            Period::Afternoon
        } else {
            Period::Evening
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub time: String,
    pub period: Period,
    pub is_booked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub venue_id: u32,
    pub venue_name: String,
    pub date: String,
    pub time: String,
    pub sport: String,
    pub user_name: String,
}

/// What the demand simulator just booked, for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedBooking {
    pub venue_name: String,
    pub date: String,
    pub time: String,
    pub period: Period,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStatus {
    pub active: bool,
    pub last_activity: String,
    pub inactive_for: String,
}
