//! In-process timer backend

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use pulse_api::{PulseResult, TimeContext, Timer};

#[derive(Default)]
struct LocalStats {
    count: u64,
    total: Duration,
    max: Duration,
}

impl LocalStats {
    fn record(&mut self, elapsed: Duration) {
        self.count += 1;
        self.total += elapsed;
        self.max = self.max.max(elapsed);
    }
}

/// A named in-process timer keeping count, total, and max elapsed.
///
/// Contexts record on the first `stop()` only; a context dropped without
/// being stopped records nothing. Never fails to start, stop, or update.
pub struct LocalTimer {
    name: String,
    stats: Arc<Mutex<LocalStats>>,
}

impl LocalTimer {
    pub fn new(name: impl Into<String>) -> Self {
        LocalTimer {
            name: name.into(),
            stats: Arc::new(Mutex::new(LocalStats::default())),
        }
    }

    /// Sum of all recorded durations
    pub fn total(&self) -> Duration {
        self.stats.lock().total
    }

    /// Largest recorded duration
    pub fn max(&self) -> Duration {
        self.stats.lock().max
    }
}

impl Timer for LocalTimer {
    fn start(&self) -> PulseResult<Box<dyn TimeContext>> {
        Ok(Box::new(LocalContext {
            stats: Arc::clone(&self.stats),
            started: Instant::now(),
            recorded: false,
        }))
    }

    fn update(&self, elapsed: Duration) -> PulseResult<()> {
        self.stats.lock().record(elapsed);
        Ok(())
    }

    fn count(&self) -> u64 {
        self.stats.lock().count
    }

    fn name(&self) -> &str {
        &self.name
    }
}

struct LocalContext {
    stats: Arc<Mutex<LocalStats>>,
    started: Instant,
    recorded: bool,
}

impl TimeContext for LocalContext {
    fn stop(&mut self) -> PulseResult<()> {
        if !self.recorded {
            self.recorded = true;
            self.stats.lock().record(self.started.elapsed());
        }
        Ok(())
    }
}
