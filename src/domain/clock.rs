/// Fixed-rate gate for simulation ticks, independent of the display rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickClock {
    last_tick_time: f64,
    tick_interval: f64,
}

impl TickClock {
    /// Clock that last ticked at time zero
    pub fn new(tick_interval: f64) -> Self {
        Self {
            last_tick_time: 0.0,
            tick_interval,
        }
    }

    /// A tick is due once a full interval has passed since the last one
    pub fn is_due(&self, now: f64) -> bool {
        now - self.last_tick_time >= self.tick_interval
    }

    /// Record that a tick fired at `now`
    pub fn mark(&mut self, now: f64) {
        self.last_tick_time = now;
    }

    pub fn last_tick_time(&self) -> f64 {
        self.last_tick_time
    }

    pub fn tick_interval(&self) -> f64 {
        self.tick_interval
    }

    /// Ticks per second this clock allows at most
    pub fn rate(&self) -> f64 {
        if self.tick_interval > 0.0 {
            1.0 / self.tick_interval
        } else {
            f64::INFINITY
        }
    }
}
