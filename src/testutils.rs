use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc, Mutex,
};

use crate::backend::SlotBackend;
use crate::error::BookingError;
use crate::types::{Booking, SimulatedBooking, Slot, Venue};

pub struct MockSlotBackendInner {
    pub success: AtomicBool,
    pub calls_to_venues: AtomicU64,
    pub calls_to_sports: AtomicU64,
    pub calls_to_slots: AtomicU64,
    pub calls_to_book_slot: AtomicU64,
    pub calls_to_simulate_random_booking: AtomicU64,
    pub calls_to_reset_bucket: AtomicU64,
    pub calls_to_reset_today: AtomicU64,
    pub slots: Mutex<Vec<Slot>>,
}

#[derive(Clone)]
pub struct MockSlotBackend(pub Arc<MockSlotBackendInner>);

impl MockSlotBackendInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            calls_to_venues: AtomicU64::default(),
            calls_to_sports: AtomicU64::default(),
            calls_to_slots: AtomicU64::default(),
            calls_to_book_slot: AtomicU64::default(),
            calls_to_simulate_random_booking: AtomicU64::default(),
            calls_to_reset_bucket: AtomicU64::default(),
            calls_to_reset_today: AtomicU64::default(),
            slots: Mutex::default(),
        }
    }
}

impl MockSlotBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockSlotBackendInner::new()))
    }

    fn succeeding(&self) -> bool {
        self.0.success.load(Ordering::SeqCst)
    }
}

impl SlotBackend for MockSlotBackend {
    fn venues(&self) -> Vec<Venue> {
        self.0.calls_to_venues.fetch_add(1, Ordering::SeqCst);
        vec![
            Venue {
                id: 1,
                name: "Kabir Sports Academy".into(),
                location: "Bopal, Ahmedabad".into(),
            },
            Venue {
                id: 2,
                name: "AB Box Cricket".into(),
                location: "South Bopal, Ahmedabad".into(),
            },
        ]
    }

    fn sports(&self) -> Vec<String> {
        self.0.calls_to_sports.fetch_add(1, Ordering::SeqCst);
        vec!["Cricket".into(), "Football".into()]
    }

    fn slots(&self, _venue_id: u32, _date: &str) -> Result<Vec<Slot>, BookingError> {
        self.0.calls_to_slots.fetch_add(1, Ordering::SeqCst);
        if self.succeeding() {
            Ok(self.0.slots.lock().unwrap().clone())
        } else {
            Err(BookingError::invalid_request("Invalid venue ID or date"))
        }
    }

    fn book_slot(
        &self,
        venue_id: u32,
        date: &str,
        time: &str,
        user_name: &str,
        sport: &str,
    ) -> Result<Booking, BookingError> {
        self.0.calls_to_book_slot.fetch_add(1, Ordering::SeqCst);
        if self.succeeding() {
            Ok(Booking {
                id: "mock-booking-id".into(),
                venue_id,
                venue_name: "Kabir Sports Academy".into(),
                date: date.into(),
                time: time.into(),
                sport: sport.into(),
                user_name: user_name.into(),
            })
        } else {
            Err(BookingError::SlotUnavailable)
        }
    }

    fn simulate_random_booking(&self) -> Option<SimulatedBooking> {
        self.0
            .calls_to_simulate_random_booking
            .fetch_add(1, Ordering::SeqCst);
        None
    }

    fn reset_bucket(&self, _venue_id: u32, _date: &str) -> Result<(), BookingError> {
        self.0.calls_to_reset_bucket.fetch_add(1, Ordering::SeqCst);
        if self.succeeding() {
            Ok(())
        } else {
            Err(BookingError::invalid_request("Invalid venue ID or date"))
        }
    }

    fn reset_today(&self) -> (String, usize) {
        self.0.calls_to_reset_today.fetch_add(1, Ordering::SeqCst);
        ("2025-06-02".into(), 3)
    }
}
