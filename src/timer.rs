use std::time::Duration;

/// Length of one countdown tick
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Round countdown. `Running` always holds a positive number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Running { remaining: u32 },
    Expired,
}

/// What a single tick did to the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still running with this many seconds left
    Running(u32),
    /// Reached zero on this tick; reported once per countdown
    Expired,
    /// Tick arrived after expiry and changed nothing
    Idle,
}

impl Countdown {
    pub fn start(secs: u32) -> Self {
        if secs == 0 {
            Countdown::Expired
        } else {
            Countdown::Running { remaining: secs }
        }
    }

    pub fn tick(&mut self) -> Tick {
        match *self {
            Countdown::Running { remaining } if remaining > 1 => {
                *self = Countdown::Running {
                    remaining: remaining - 1,
                };
                Tick::Running(remaining - 1)
            }
            Countdown::Running { .. } => {
                *self = Countdown::Expired;
                Tick::Expired
            }
            Countdown::Expired => Tick::Idle,
        }
    }

    pub fn remaining(&self) -> u32 {
        match self {
            Countdown::Running { remaining } => *remaining,
            Countdown::Expired => 0,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Countdown::Expired)
    }
}
