use crate::backend::SlotBackend;
use crate::error::BookingError;
use crate::types::{Booking, Period, SimulatedBooking, Slot, Venue};
use chrono::{Duration, Local, NaiveDate};
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

const DAYS_GENERATED: i64 = 7;
const FIRST_SLOT_HOUR: u32 = 6;
const LAST_SLOT_HOUR: u32 = 22;

const SPORTS: [&str; 6] = [
    "Cricket",
    "Football",
    "Badminton",
    "Tennis",
    "Basketball",
    "Pickleball",
];

fn venue_list() -> Vec<Venue> {
    [
        (1, "Kabir Sports Academy", "Bopal, Ahmedabad"),
        (2, "AB Box Cricket", "South Bopal, Ahmedabad"),
        (
            3,
            "Karmaveer Education and Sports Federation",
            "Koba, Gandhinagar",
        ),
        (4, "BCCA Box Cricket", "Chandkheda, Ahmedabad"),
        (5, "Eagle Pickleball", "Mumatpura, Ahmedabad"),
        (6, "Crick Buddies Box Cricket", "Satellite, Ahmedabad"),
        (7, "Paradise Box Cricket", "Danilimda, Ahmedabad"),
        (8, "Spinters Club", "Shela, Ahmedabad"),
    ]
    .into_iter()
    .map(|(id, name, location)| Venue {
        id,
        name: name.into(),
        location: location.into(),
    })
    .collect()
}

/// Hourly slot template shared by every (venue, date) bucket: 6:00 through
/// 22:00 starts, 17 slots.
fn canonical_slots() -> Vec<(String, Period)> {
    (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR)
        .map(|hour| {
            (
                format!("{hour}:00 - {}:00", hour + 1),
                Period::from_start_hour(hour),
            )
        })
        .collect()
}

/// Chance that a freshly generated slot starts out booked. Evenings are the
/// most contended; today and the first three venues are kept emptier so the
/// demo always has slots to book.
fn booking_probability(period: Period, day_offset: i64, venue_id: u32) -> f64 {
    let mut probability = match period {
        Period::Morning => 0.15,
        Period::Afternoon => 0.25,
        Period::Evening => 0.35,
    };
    if day_offset == 0 {
        probability /= 2.0;
    }
    if venue_id <= 3 {
        probability *= 0.6;
    }
    probability
}

/// In-memory availability calendar plus booking log. All state lives behind
/// one mutex, so a booking's find-and-flip is atomic with respect to every
/// other writer. Nothing is persisted; a restart regenerates everything.
#[derive(Debug, Clone)]
pub struct LocalCalendar {
    inner: Arc<Mutex<CalendarInner>>,
}

#[derive(Debug)]
struct CalendarInner {
    today: NaiveDate,
    slots: HashMap<u32, HashMap<String, Vec<Slot>>>,
    bookings: Vec<Booking>,
}

impl LocalCalendar {
    pub fn new() -> Self {
        Self::starting_on(Local::now().date_naive())
    }

    /// Builds the calendar for `today` plus the next six days. Invoked once;
    /// the slot map's shape never changes afterwards.
    pub fn starting_on(today: NaiveDate) -> Self {
        let mut rng = rand::thread_rng();
        let mut slots = HashMap::new();
        for venue in venue_list() {
            let mut days = HashMap::new();
            for offset in 0..DAYS_GENERATED {
                let date = today + Duration::days(offset);
                let generated: Vec<Slot> = canonical_slots()
                    .into_iter()
                    .map(|(time, period)| Slot {
                        time,
                        period,
                        is_booked: rng.gen::<f64>()
                            < booking_probability(period, offset, venue.id),
                    })
                    .collect();
                days.insert(date.format("%Y-%m-%d").to_string(), generated);
            }
            slots.insert(venue.id, days);
        }

        Self {
            inner: Arc::new(Mutex::new(CalendarInner {
                today,
                slots,
                bookings: Vec::new(),
            })),
        }
    }
}

impl Default for LocalCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotBackend for LocalCalendar {
    fn venues(&self) -> Vec<Venue> {
        venue_list()
    }

    fn sports(&self) -> Vec<String> {
        SPORTS.iter().map(|sport| sport.to_string()).collect()
    }

    fn slots(&self, venue_id: u32, date: &str) -> Result<Vec<Slot>, BookingError> {
        let inner = self.inner.lock().unwrap();
        inner
            .slots
            .get(&venue_id)
            .and_then(|days| days.get(date))
            .cloned()
            .ok_or_else(|| BookingError::invalid_request("Invalid venue ID or date"))
    }

    fn book_slot(
        &self,
        venue_id: u32,
        date: &str,
        time: &str,
        user_name: &str,
        sport: &str,
    ) -> Result<Booking, BookingError> {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;

        let bucket = inner
            .slots
            .get_mut(&venue_id)
            .and_then(|days| days.get_mut(date))
            .ok_or_else(|| BookingError::invalid_request("Invalid venue or date"))?;

        let slot = bucket
            .iter_mut()
            .find(|slot| slot.time == time && !slot.is_booked)
            .ok_or(BookingError::SlotUnavailable)?;
        slot.is_booked = true;

        // The bucket exists, so the venue is one of the fixed eight.
        let venue_name = venue_list()
            .into_iter()
            .find(|venue| venue.id == venue_id)
            .map(|venue| venue.name)
            .unwrap_or_default();

        let booking = Booking {
            id: Uuid::new_v4().to_string(),
            venue_id,
            venue_name,
            date: date.into(),
            time: time.into(),
            sport: sport.into(),
            user_name: user_name.into(),
        };
        inner.bookings.push(booking.clone());
        info!(
            "Booked {} on {} at {} for {} ({} bookings total)",
            booking.venue_name,
            booking.date,
            booking.time,
            booking.user_name,
            inner.bookings.len()
        );
        Ok(booking)
    }

    fn simulate_random_booking(&self) -> Option<SimulatedBooking> {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        let mut rng = rand::thread_rng();

        let venues = venue_list();
        let venue = &venues[rng.gen_range(0..venues.len())];
        let days = inner.slots.get_mut(&venue.id)?;
        let dates: Vec<String> = days.keys().cloned().collect();
        let date = dates[rng.gen_range(0..dates.len())].clone();
        let bucket = days.get_mut(&date)?;

        let open_indices: Vec<usize> = bucket
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.is_booked)
            .map(|(index, _)| index)
            .collect();
        if open_indices.is_empty() {
            return None;
        }

        let index = open_indices[rng.gen_range(0..open_indices.len())];
        bucket[index].is_booked = true;
        Some(SimulatedBooking {
            venue_name: venue.name.clone(),
            date,
            time: bucket[index].time.clone(),
            period: bucket[index].period,
        })
    }

    fn reset_bucket(&self, venue_id: u32, date: &str) -> Result<(), BookingError> {
        let mut inner = self.inner.lock().unwrap();
        let bucket = inner
            .slots
            .get_mut(&venue_id)
            .and_then(|days| days.get_mut(date))
            .ok_or_else(|| BookingError::invalid_request("Invalid venue ID or date"))?;
        for slot in bucket {
            slot.is_booked = false;
        }
        Ok(())
    }

    fn reset_today(&self) -> (String, usize) {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        let today = inner.today.format("%Y-%m-%d").to_string();

        let mut reset_count = 0;
        for days in inner.slots.values_mut() {
            if let Some(bucket) = days.get_mut(&today) {
                for slot in bucket {
                    if slot.is_booked {
                        reset_count += 1;
                        slot.is_booked = false;
                    }
                }
            }
        }
        (today, reset_count)
    }
}
