//! Instrumented timer doubles
//!
//! `MockTimer` records every interaction in call order and can inject start
//! and stop failures, which real backends are assumed never to produce.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use pulse_api::{PulseError, PulseResult, TimeContext, Timer};

/// One recorded interaction, in call order
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    Started,
    Stopped,
    Updated(Duration),
}

/// A log shared by several mock timers, recording `(timer, event)` pairs in
/// global call order. Lets tests assert fan-out ordering across delegates.
#[derive(Clone, Default)]
pub struct SharedLog(Arc<Mutex<Vec<(String, TimerEvent)>>>);

impl SharedLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(String, TimerEvent)> {
        self.0.lock().clone()
    }

    fn record(&self, timer: &str, event: TimerEvent) {
        self.0.lock().push((timer.to_string(), event));
    }
}

#[derive(Default)]
struct MockState {
    events: Vec<TimerEvent>,
    completed: u64,
    abandoned: usize,
    fail_next_start: bool,
    fail_stops: bool,
    fail_updates: bool,
}

/// A timer double recording starts, stops, and updates
pub struct MockTimer {
    name: String,
    state: Arc<Mutex<MockState>>,
    log: Option<SharedLog>,
}

impl MockTimer {
    pub fn new(name: impl Into<String>) -> Self {
        MockTimer {
            name: name.into(),
            state: Arc::new(Mutex::new(MockState::default())),
            log: None,
        }
    }

    /// A mock that also records its events into a shared cross-timer log
    pub fn with_log(name: impl Into<String>, log: &SharedLog) -> Self {
        let mut timer = MockTimer::new(name);
        timer.log = Some(log.clone());
        timer
    }

    /// Make the next `start()` fail (one-shot)
    pub fn fail_next_start(&self) {
        self.state.lock().fail_next_start = true;
    }

    /// Make every context stop fail from now on
    pub fn fail_stops(&self) {
        self.state.lock().fail_stops = true;
    }

    /// Make every `update()` fail from now on
    pub fn fail_updates(&self) {
        self.state.lock().fail_updates = true;
    }

    /// Every recorded interaction, in call order
    pub fn events(&self) -> Vec<TimerEvent> {
        self.state.lock().events.clone()
    }

    /// Number of measurements started
    pub fn starts(&self) -> usize {
        self.count_events(|e| matches!(e, TimerEvent::Started))
    }

    /// Number of measurements stopped
    pub fn stops(&self) -> usize {
        self.count_events(|e| matches!(e, TimerEvent::Stopped))
    }

    /// Durations recorded through `update`, in call order
    pub fn updates(&self) -> Vec<Duration> {
        self.state
            .lock()
            .events
            .iter()
            .filter_map(|e| match e {
                TimerEvent::Updated(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    /// Measurements started and never stopped
    pub fn open_contexts(&self) -> usize {
        self.starts() - self.stops()
    }

    /// Contexts dropped without ever being stopped
    pub fn abandoned(&self) -> usize {
        self.state.lock().abandoned
    }

    fn count_events(&self, pred: impl Fn(&TimerEvent) -> bool) -> usize {
        self.state.lock().events.iter().filter(|e| pred(e)).count()
    }
}

impl Timer for MockTimer {
    fn start(&self) -> PulseResult<Box<dyn TimeContext>> {
        let mut state = self.state.lock();
        if state.fail_next_start {
            state.fail_next_start = false;
            return Err(PulseError::StartFailed {
                timer: self.name.clone(),
                reason: "injected start failure".to_string(),
            });
        }
        state.events.push(TimerEvent::Started);
        if let Some(log) = &self.log {
            log.record(&self.name, TimerEvent::Started);
        }

        Ok(Box::new(MockContext {
            timer: self.name.clone(),
            state: Arc::clone(&self.state),
            log: self.log.clone(),
            stopped: false,
        }))
    }

    fn update(&self, elapsed: Duration) -> PulseResult<()> {
        let mut state = self.state.lock();
        if state.fail_updates {
            return Err(PulseError::UpdateFailed {
                timer: self.name.clone(),
                reason: "injected update failure".to_string(),
            });
        }
        state.events.push(TimerEvent::Updated(elapsed));
        state.completed += 1;
        if let Some(log) = &self.log {
            log.record(&self.name, TimerEvent::Updated(elapsed));
        }
        Ok(())
    }

    fn count(&self) -> u64 {
        self.state.lock().completed
    }

    fn name(&self) -> &str {
        &self.name
    }
}

struct MockContext {
    timer: String,
    state: Arc<Mutex<MockState>>,
    log: Option<SharedLog>,
    stopped: bool,
}

impl TimeContext for MockContext {
    fn stop(&mut self) -> PulseResult<()> {
        if self.stopped {
            return Ok(());
        }
        self.stopped = true;

        let mut state = self.state.lock();
        if state.fail_stops {
            return Err(PulseError::StopFailed {
                timer: self.timer.clone(),
                reason: "injected stop failure".to_string(),
            });
        }
        state.events.push(TimerEvent::Stopped);
        state.completed += 1;
        if let Some(log) = &self.log {
            log.record(&self.timer, TimerEvent::Stopped);
        }
        Ok(())
    }
}

impl Drop for MockContext {
    fn drop(&mut self) {
        if !self.stopped {
            self.state.lock().abandoned += 1;
        }
    }
}
