use crate::backend::SlotBackend;
use crate::types::SimulationStatus;
use chrono::{DateTime, Local, Timelike, Utc};
use rand::Rng;
use std::ops::Range;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

/// Tick timing and odds for the demand simulator. Tests shrink these so the
/// state machine can be driven in milliseconds.
#[derive(Debug, Clone)]
pub struct SimulatorSettings {
    pub tick_period: Duration,
    pub inactivity_timeout: Duration,
    pub attempt_probability: f64,
    /// Local wall-clock hours during which synthetic bookings may happen.
    pub booking_hours: Range<u32>,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(15),
            inactivity_timeout: Duration::from_secs(300),
            attempt_probability: 0.3,
            booking_hours: 6..22,
        }
    }
}

/// Books random available slots in the background while the API sees
/// traffic, so the demo looks contended. Two states: idle and running. Any
/// recorded activity starts the periodic task; five minutes without activity
/// cancels it again.
#[derive(Clone)]
pub struct DemandSimulator<T: SlotBackend> {
    backend: T,
    settings: SimulatorSettings,
    state: Arc<Mutex<SimulatorState>>,
}

struct SimulatorState {
    active: bool,
    last_activity: DateTime<Utc>,
    task: Option<JoinHandle<()>>,
}

impl<T: SlotBackend> DemandSimulator<T> {
    pub fn new(backend: T) -> Self {
        Self::with_settings(backend, SimulatorSettings::default())
    }

    pub fn with_settings(backend: T, settings: SimulatorSettings) -> Self {
        Self {
            backend,
            settings,
            state: Arc::new(Mutex::new(SimulatorState {
                active: false,
                last_activity: Utc::now(),
                task: None,
            })),
        }
    }

    /// Called on every user-facing request. Refreshes the inactivity clock
    /// and starts the tick task if the simulator is idle.
    pub fn record_activity(&self) {
        let mut state = self.state.lock().unwrap();
        state.last_activity = Utc::now();
        if !state.active {
            info!("Starting booking simulation due to user activity");
            state.active = true;
            state.task = Some(tokio::spawn(self.clone().run()));
        }
    }

    pub fn stop(&self) {
        let mut state = self.state.lock().unwrap();
        if !state.active {
            return;
        }
        info!("Stopping booking simulation");
        state.active = false;
        if let Some(task) = state.task.take() {
            task.abort();
        }
    }

    pub fn status(&self) -> SimulationStatus {
        let state = self.state.lock().unwrap();
        let inactive = Utc::now().signed_duration_since(state.last_activity);
        SimulationStatus {
            active: state.active,
            last_activity: state.last_activity.to_rfc3339(),
            inactive_for: format!("{} minutes", inactive.num_minutes().max(0)),
        }
    }

    async fn run(self) {
        let mut interval = tokio::time::interval(self.settings.tick_period);
        // The first tick of a tokio interval completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            if self.deactivate_if_idle() {
                return;
            }

            let hour = Local::now().hour();
            if !self.settings.booking_hours.contains(&hour) {
                continue;
            }
            if rand::thread_rng().gen::<f64>() >= self.settings.attempt_probability {
                continue;
            }

            // A fully booked bucket is an expected no-op, not an error.
            if let Some(booked) = self.backend.simulate_random_booking() {
                info!(
                    "Simulated booking: Venue {}, Date {}, Slot {} ({:?})",
                    booked.venue_name, booked.date, booked.time, booked.period
                );
            }
        }
    }

    /// Self-deactivation: when the inactivity timeout has passed, flip to
    /// idle and let the tick task exit.
    fn deactivate_if_idle(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        let idle = Utc::now()
            .signed_duration_since(state.last_activity)
            .to_std()
            .unwrap_or_default();
        if idle > self.settings.inactivity_timeout {
            info!("Stopping booking simulation due to inactivity");
            state.active = false;
            state.task = None;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testutils::MockSlotBackend;
    use std::sync::atomic::Ordering;
    use tokio::time::sleep;

    fn quiet_settings() -> SimulatorSettings {
        SimulatorSettings {
            // Long enough that no tick fires during the test.
            tick_period: Duration::from_secs(60),
            inactivity_timeout: Duration::from_secs(60),
            attempt_probability: 1.0,
            booking_hours: 0..24,
        }
    }

    #[tokio::test]
    async fn activity_starts_and_stop_stops() {
        let simulator = DemandSimulator::with_settings(MockSlotBackend::new(), quiet_settings());
        assert!(!simulator.status().active);

        simulator.record_activity();
        assert!(simulator.status().active);

        simulator.stop();
        assert!(!simulator.status().active);
        // Stopping twice is a no-op.
        simulator.stop();
        assert!(!simulator.status().active);
    }

    #[tokio::test]
    async fn deactivates_after_inactivity() {
        let settings = SimulatorSettings {
            tick_period: Duration::from_millis(10),
            inactivity_timeout: Duration::from_millis(30),
            ..quiet_settings()
        };
        let simulator = DemandSimulator::with_settings(MockSlotBackend::new(), settings);

        simulator.record_activity();
        assert!(simulator.status().active);

        sleep(Duration::from_millis(300)).await;
        assert!(!simulator.status().active);
    }

    #[tokio::test]
    async fn ticks_reach_the_backend() {
        let mock_backend = MockSlotBackend::new();
        let settings = SimulatorSettings {
            tick_period: Duration::from_millis(10),
            inactivity_timeout: Duration::from_secs(60),
            attempt_probability: 1.0,
            booking_hours: 0..24,
        };
        let simulator = DemandSimulator::with_settings(mock_backend.clone(), settings);

        simulator.record_activity();
        sleep(Duration::from_millis(300)).await;
        simulator.stop();

        assert!(
            mock_backend
                .0
                .calls_to_simulate_random_booking
                .load(Ordering::SeqCst)
                >= 1
        );
    }

    #[tokio::test]
    async fn outside_booking_hours_nothing_is_booked() {
        let mock_backend = MockSlotBackend::new();
        let settings = SimulatorSettings {
            tick_period: Duration::from_millis(10),
            inactivity_timeout: Duration::from_secs(60),
            attempt_probability: 1.0,
            // Empty range: every hour counts as closed.
            booking_hours: 0..0,
        };
        let simulator = DemandSimulator::with_settings(mock_backend.clone(), settings);

        simulator.record_activity();
        sleep(Duration::from_millis(150)).await;
        simulator.stop();

        assert_eq!(
            mock_backend
                .0
                .calls_to_simulate_random_booking
                .load(Ordering::SeqCst),
            0
        );
    }
}
