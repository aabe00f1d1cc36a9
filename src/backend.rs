use crate::error::BookingError;
use crate::types::{Booking, SimulatedBooking, Slot, Venue};

pub trait SlotBackend: Clone + Send + Sync + 'static {
    fn venues(&self) -> Vec<Venue>;
    fn sports(&self) -> Vec<String>;
    /// Ordered slot list for one (venue, date) bucket. Fails with
    /// `InvalidRequest` when the bucket does not exist; never returns an
    /// empty list.
    fn slots(&self, venue_id: u32, date: &str) -> Result<Vec<Slot>, BookingError>;
    /// Atomically books the matching available slot and appends a Booking to
    /// the log.
    fn book_slot(
        &self,
        venue_id: u32,
        date: &str,
        time: &str,
        user_name: &str,
        sport: &str,
    ) -> Result<Booking, BookingError>;
    /// One demand-simulator step: book a random available slot somewhere, if
    /// any. `None` (everything booked in the chosen bucket) is expected and
    /// not an error.
    fn simulate_random_booking(&self) -> Option<SimulatedBooking>;
    /// Marks every slot in the given bucket as available again.
    fn reset_bucket(&self, venue_id: u32, date: &str) -> Result<(), BookingError>;
    /// Marks today's slots as available across all venues. Returns today's
    /// date string and how many slots were flipped back.
    fn reset_today(&self) -> (String, usize);
}
