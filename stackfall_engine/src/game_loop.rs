/*!
This module drives a [`Game`] in real time.

A [`Ticker`] produces gravity ticks at a fixed period, and a [`Session`] ties the game, the ticker,
a [`Renderer`] and an [`AudioSink`] together.
*/

use std::{
    io,
    time::{Duration, Instant},
};

use crate::{render, AudioSink, Button, Feedback, Game, Phase, Renderer};

/// A fixed-period tick source.
///
/// Each tick is scheduled only after the previous one completed, so ticks never overlap
/// and the period drifts by however long a tick takes.
#[derive(Eq, PartialEq, Clone, Copy, Hash, Debug)]
pub struct Ticker {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl Ticker {
    /// Creates a stopped ticker.
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: None,
        }
    }

    /// The period between two ticks.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// When the next tick is due, if the ticker is running.
    pub const fn next_tick(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Whether ticks are being produced.
    pub const fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Starts producing ticks; the first one is due at `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_tick = Some(now);
    }

    /// Stops producing ticks.
    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    /// Whether a tick is due at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_tick.is_some_and(|t| t <= now)
    }

    /// How long until the next tick, or `None` if stopped.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.next_tick.map(|t| t.saturating_duration_since(now))
    }

    /// Schedules the next tick one interval after a tick completed at `completed`.
    ///
    /// Has no effect on a stopped ticker.
    pub fn reschedule(&mut self, completed: Instant) {
        if let Some(next_tick) = &mut self.next_tick {
            *next_tick = completed + self.interval;
        }
    }
}

/// A game being played: the [`Game`], its [`Ticker`], and the frontend capabilities it talks to.
#[derive(Debug)]
pub struct Session<R: Renderer, A: AudioSink> {
    game: Game,
    ticker: Ticker,
    renderer: R,
    audio: A,
}

impl<R: Renderer, A: AudioSink> Session<R, A> {
    /// Creates a session around a game, with the ticker stopped.
    pub fn new(game: Game, renderer: R, audio: A) -> Self {
        let ticker = Ticker::new(game.config().tick_interval);
        Self {
            game,
            ticker,
            renderer,
            audio,
        }
    }

    /// Read accessor for the game.
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Read accessor for the ticker.
    pub const fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Read accessor for the renderer.
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable accessor for the renderer, e.g. to redraw after the display was resized.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Read accessor for the audio sink.
    pub const fn audio(&self) -> &A {
        &self.audio
    }

    /// Takes the session apart again.
    pub fn into_parts(self) -> (Game, R, A) {
        (self.game, self.renderer, self.audio)
    }

    /// The start command: begins a new game if none is running, starts the music and
    /// schedules the first tick for `now`.
    ///
    /// Does nothing unless the game is [`Phase::NotStarted`].
    pub fn start(&mut self, now: Instant) -> io::Result<Vec<Feedback>> {
        let feedback = self.game.start();
        if feedback.is_empty() {
            return Ok(feedback);
        }
        log::info!("game started (seed {})", self.game.seed());
        if let Err(e) = self.audio.play() {
            log::warn!("audio playback failed: {e}");
        }
        self.ticker.start(now);
        self.renderer.show_score(self.game.state().score)?;
        render(&self.game, &mut self.renderer)?;
        Ok(feedback)
    }

    /// Picks up a game that was started in an earlier session: restarts the music, schedules the
    /// next tick one interval from `now` and redraws.
    ///
    /// Does nothing unless the game is under way and the ticker is stopped.
    pub fn resume(&mut self, now: Instant) -> io::Result<()> {
        if self.game.phase() == Phase::NotStarted || self.ticker.is_running() {
            return Ok(());
        }
        log::info!("game resumed");
        if let Err(e) = self.audio.play() {
            log::warn!("audio playback failed: {e}");
        }
        self.ticker.start(now);
        self.ticker.reschedule(now);
        self.renderer.show_score(self.game.state().score)?;
        render(&self.game, &mut self.renderer)
    }

    /// Applies a player command immediately and redraws.
    pub fn press(&mut self, button: Button) -> io::Result<Vec<Feedback>> {
        if self.game.phase() != Phase::Running {
            return Ok(Vec::new());
        }
        let feedback = self.game.press(button);
        self.react(&feedback)?;
        render(&self.game, &mut self.renderer)?;
        Ok(feedback)
    }

    /// How long the caller may wait before the next tick is due, or `None` if no ticks are scheduled.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_tick(now)
    }

    /// Runs the gravity tick if one is due at `now`.
    pub fn update(&mut self, now: Instant) -> io::Result<Vec<Feedback>> {
        if !self.ticker.is_due(now) {
            return Ok(Vec::new());
        }
        let feedback = self.game.tick();
        self.react(&feedback)?;
        render(&self.game, &mut self.renderer)?;
        self.ticker.reschedule(Instant::now().max(now));
        Ok(feedback)
    }

    fn react(&mut self, feedback: &[Feedback]) -> io::Result<()> {
        for event in feedback {
            match event {
                Feedback::LinesCleared { lines, score_bonus } => {
                    log::debug!("cleared {lines} line(s) for {score_bonus} points");
                    self.renderer.show_score(self.game.state().score)?;
                }
                Feedback::ToppedOut => {
                    log::info!("topped out with score {}", self.game.state().score);
                }
                Feedback::GameEnded { final_score } => {
                    self.ticker.stop();
                    self.audio.stop();
                    self.renderer.show_game_over(*final_score)?;
                    self.renderer.show_score(self.game.state().score)?;
                    log::info!("game over, final score {final_score}");
                }
                Feedback::GameStarted
                | Feedback::PieceSpawned(_)
                | Feedback::HardDrop { .. }
                | Feedback::PieceLocked(_) => {}
            }
        }
        Ok(())
    }
}
