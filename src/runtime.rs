use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

/// Source of terminal events (keyboard, mouse, resize)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError>;

    /// Block until the next event arrives
    fn recv(&self) -> Result<GameEvent, RecvError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                // key release events only show up on some platforms
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => GameEvent::Key(key),
                Ok(CtEvent::Mouse(mouse)) => GameEvent::Mouse(mouse),
                Ok(CtEvent::Resize(w, h)) => GameEvent::Resize(w, h),
                Ok(_) => continue,
                Err(err) => {
                    log::error!("terminal event stream failed: {err}");
                    break;
                }
            };

            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn recv(&self) -> Result<GameEvent, RecvError> {
        self.rx.recv()
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<GameEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GameEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GameEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn recv(&self) -> Result<GameEvent, RecvError> {
        self.rx.recv()
    }
}

/// Runner that advances the application one event/tick at a time.
///
/// Ticks are scheduled against a deadline, so a steady stream of input
/// (mouse drags) cannot starve the countdown.
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Option<Instant>,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    /// Ticking starts enabled
    pub fn new(event_source: E, ticker: T) -> Self {
        let next_tick = Some(Instant::now() + ticker.interval());
        Self {
            event_source,
            ticker,
            next_tick,
        }
    }

    /// Turn the periodic tick on or off. Re-enabling schedules the next tick
    /// one full interval from now.
    pub fn set_ticking(&mut self, enabled: bool) {
        match (enabled, self.next_tick.is_some()) {
            (true, false) => {
                self.next_tick = Some(Instant::now() + self.ticker.interval());
                log::debug!("ticker started");
            }
            (false, true) => {
                self.next_tick = None;
                log::debug!("ticker stopped");
            }
            _ => {}
        }
    }

    /// Drop any pending deadline and tick again one full interval from now
    pub fn restart_ticks(&mut self) {
        self.next_tick = Some(Instant::now() + self.ticker.interval());
        log::debug!("ticker restarted");
    }

    pub fn is_ticking(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Blocks until the next event or tick deadline. Returns None once the
    /// event source is gone.
    pub fn step(&mut self) -> Option<GameEvent> {
        let Some(deadline) = self.next_tick else {
            return self.event_source.recv().ok();
        };

        let now = Instant::now();
        if now >= deadline {
            self.next_tick = Some(deadline + self.ticker.interval());
            return Some(GameEvent::Tick);
        }

        match self.event_source.recv_timeout(deadline - now) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout) => {
                self.next_tick = Some(deadline + self.ticker.interval());
                Some(GameEvent::Tick)
            }
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let mut runner = Runner::new(es, ticker);

        // With no events available, step should yield Tick
        assert_eq!(runner.step(), Some(GameEvent::Tick));
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(GameEvent::Resize(80, 24)).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let mut runner = Runner::new(es, ticker);

        assert_eq!(runner.step(), Some(GameEvent::Resize(80, 24)));
    }

    #[test]
    fn busy_input_does_not_starve_ticks() {
        let (tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(20));
        let mut runner = Runner::new(es, ticker);

        std::thread::sleep(Duration::from_millis(30));
        for _ in 0..5 {
            tx.send(GameEvent::Resize(1, 1)).unwrap();
        }

        // an overdue tick is delivered ahead of queued input
        assert_eq!(runner.step(), Some(GameEvent::Tick));
        assert_eq!(runner.step(), Some(GameEvent::Resize(1, 1)));
    }

    #[test]
    fn stopped_ticker_blocks_for_events() {
        let (tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let mut runner = Runner::new(es, ticker);

        runner.set_ticking(false);
        assert!(!runner.is_ticking());

        std::thread::sleep(Duration::from_millis(5));
        tx.send(GameEvent::Resize(10, 10)).unwrap();
        assert_eq!(runner.step(), Some(GameEvent::Resize(10, 10)));
    }

    #[test]
    fn step_ends_when_source_disconnects() {
        let (tx, rx) = mpsc::channel::<GameEvent>();
        drop(tx);
        let es = TestEventSource::new(rx);
        let mut runner = Runner::new(es, FixedTicker::new(Duration::from_secs(5)));
        assert_eq!(runner.step(), None);

        runner.set_ticking(false);
        assert_eq!(runner.step(), None);
    }

    #[test]
    fn restarting_ticker_schedules_fresh_deadline() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let mut runner = Runner::new(es, FixedTicker::new(Duration::from_millis(2)));

        runner.set_ticking(false);
        runner.set_ticking(true);
        assert!(runner.is_ticking());
        assert_eq!(runner.step(), Some(GameEvent::Tick));
    }

    #[test]
    fn restart_pushes_back_a_pending_tick() {
        let (tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let mut runner = Runner::new(es, FixedTicker::new(Duration::from_millis(200)));

        std::thread::sleep(Duration::from_millis(150));
        runner.restart_ticks();
        tx.send(GameEvent::Resize(1, 1)).unwrap();

        let restarted = Instant::now();
        assert_eq!(runner.step(), Some(GameEvent::Resize(1, 1)));
        assert_eq!(runner.step(), Some(GameEvent::Tick));
        assert!(restarted.elapsed() >= Duration::from_millis(190));
    }
}
