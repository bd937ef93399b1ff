//! Fixed-interval tick driver
//!
//! The front end owns the only clock. It hands `now` to [`GameLoop::advance`] after
//! draining input, so ticks and commands are applied one at a time against the same
//! [`Game`] and never interleave.

use crate::game::{Action, Game, GameState, Snapshot};
use std::time::{Duration, Instant};

/// Default gravity interval
pub const DEFAULT_TICK: Duration = Duration::from_millis(400);

pub struct GameLoop {
    game: Game,
    period: Duration,
    next_tick: Instant,
}

impl GameLoop {
    pub fn new(game: Game, period: Duration, now: Instant) -> Self {
        Self {
            game,
            period,
            next_tick: now + period,
        }
    }

    #[cfg(test)]
    pub(crate) fn game(&self) -> &Game {
        &self.game
    }

    pub fn snapshot(&self) -> Snapshot {
        self.game.snapshot()
    }

    /// Apply a command immediately.
    ///
    /// Resuming from pause or restarting re-arms the timer a full period ahead, the same
    /// way a stopped timer restarts.
    pub fn handle(&mut self, action: Action, now: Instant) {
        let before = self.game.state();
        self.game.process_action(action);
        let after = self.game.state();

        let resumed = before == GameState::Paused && after != GameState::Paused;
        if resumed || action == Action::Restart {
            self.next_tick = now + self.period;
        }
    }

    /// Fire the tick if its deadline has passed. Returns whether a tick ran.
    ///
    /// A late call fires once, never a burst of missed ticks.
    pub fn advance(&mut self, now: Instant) -> bool {
        if now < self.next_tick {
            return false;
        }

        match self.game.state() {
            GameState::Paused | GameState::GameOver => {}
            GameState::Spawning | GameState::Falling => self.game.tick(),
        }

        self.next_tick += self.period;
        if self.next_tick <= now {
            self.next_tick = now + self.period;
        }
        true
    }

    /// How long the caller may wait for input before the next tick is due
    pub fn time_until_tick(&self, now: Instant) -> Duration {
        self.next_tick.saturating_duration_since(now)
    }
}
