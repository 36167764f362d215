use std::{
    io,
    time::{Duration, Instant},
};

use stackfall_engine::{
    AudioError, AudioSink, Button, ColorId, Feedback, Game, Grid, Phase, Renderer, Session,
};

#[derive(Default, Debug)]
struct Recorder {
    frames: usize,
    cells: Vec<(usize, usize, ColorId)>,
    preview_cells: usize,
    scores: Vec<u32>,
    game_overs: Vec<u32>,
}

impl Renderer for Recorder {
    fn clear(&mut self) -> io::Result<()> {
        self.cells.clear();
        self.preview_cells = 0;
        Ok(())
    }

    fn draw_cell(&mut self, x: usize, y: usize, color: ColorId) -> io::Result<()> {
        assert!(x < Grid::WIDTH && y < Grid::HEIGHT);
        self.cells.push((x, y, color));
        Ok(())
    }

    fn draw_preview_cell(&mut self, _x: usize, _y: usize, _color: ColorId) -> io::Result<()> {
        self.preview_cells += 1;
        Ok(())
    }

    fn show_score(&mut self, score: u32) -> io::Result<()> {
        self.scores.push(score);
        Ok(())
    }

    fn show_game_over(&mut self, final_score: u32) -> io::Result<()> {
        self.game_overs.push(final_score);
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.frames += 1;
        Ok(())
    }
}

#[derive(Default, Debug)]
struct BlockedAudio {
    attempts: u32,
    stops: u32,
}

impl AudioSink for BlockedAudio {
    fn play(&mut self) -> Result<(), AudioError> {
        self.attempts += 1;
        Err(AudioError::Rejected("blocked by policy".to_owned()))
    }

    fn stop(&mut self) {
        self.stops += 1;
    }
}

fn session(seed: u64) -> Session<Recorder, BlockedAudio> {
    let game = Game::builder().seed(seed).build();
    Session::new(game, Recorder::default(), BlockedAudio::default())
}

#[test]
fn nothing_happens_before_start() {
    let mut session = session(5);
    let now = Instant::now();

    assert!(session.press(Button::MoveLeft).unwrap().is_empty());
    assert!(session.update(now + Duration::from_secs(5)).unwrap().is_empty());
    assert_eq!(session.time_until_tick(now), None);
    assert_eq!(session.renderer().frames, 0);
    assert_eq!(session.game().phase(), Phase::NotStarted);
}

#[test]
fn blocked_audio_does_not_stop_the_game() {
    let mut session = session(5);
    let now = Instant::now();

    let feedback = session.start(now).unwrap();

    assert_eq!(feedback.first(), Some(&Feedback::GameStarted));
    assert_eq!(session.audio().attempts, 1);
    assert_eq!(session.game().phase(), Phase::Running);
    assert_eq!(session.renderer().scores, vec![0]);
    assert_eq!(session.renderer().frames, 1);
    assert_eq!(session.renderer().cells.len(), 4);
    assert_eq!(session.renderer().preview_cells, 4);
}

#[test]
fn start_is_only_honored_once() {
    let mut session = session(5);
    let now = Instant::now();
    session.start(now).unwrap();
    assert!(session.start(now).unwrap().is_empty());
    assert_eq!(session.audio().attempts, 1);
}

#[test]
fn first_tick_is_immediate_then_periodic() {
    let mut session = session(11);
    let t0 = Instant::now();
    session.start(t0).unwrap();
    let y = |s: &Session<Recorder, BlockedAudio>| s.game().state().piece.map(|p| p.y);

    session.update(t0).unwrap();
    assert_eq!(y(&session), Some(1));

    // Not due again until a full interval after the previous tick completed.
    session.update(t0 + Duration::from_millis(500)).unwrap();
    assert_eq!(y(&session), Some(1));

    let next = session.ticker().next_tick().unwrap();
    assert!(next >= t0 + Duration::from_millis(1000));
    session.update(next).unwrap();
    assert_eq!(y(&session), Some(2));
}

#[test]
fn commands_redraw_immediately() {
    let mut session = session(2);
    let now = Instant::now();
    session.start(now).unwrap();
    let frames = session.renderer().frames;
    let x = session.game().state().piece.map(|p| p.x);

    session.press(Button::MoveRight).unwrap();

    assert_eq!(session.renderer().frames, frames + 1);
    assert_eq!(session.game().state().piece.map(|p| p.x), x.map(|x| x + 1));
}

#[test]
fn game_over_stops_ticks_and_resets() {
    let mut session = session(21);
    let mut now = Instant::now();
    session.start(now).unwrap();

    while session.game().phase() == Phase::Running {
        session.press(Button::DropHard).unwrap();
        now = session.ticker().next_tick().unwrap();
        session.update(now).unwrap();
    }
    assert_eq!(session.game().phase(), Phase::GameOver);

    // Input is ignored until the next tick notices the game ended.
    let frames = session.renderer().frames;
    assert!(session.press(Button::MoveLeft).unwrap().is_empty());
    assert_eq!(session.renderer().frames, frames);

    now = session.ticker().next_tick().unwrap();
    let feedback = session.update(now).unwrap();
    assert!(matches!(feedback.as_slice(), [Feedback::GameEnded { .. }]));

    assert_eq!(session.game().phase(), Phase::NotStarted);
    assert!(!session.ticker().is_running());
    assert_eq!(session.audio().stops, 1);
    assert_eq!(session.renderer().game_overs.len(), 1);
    assert_eq!(session.renderer().scores.last(), Some(&0));
    assert!(session.renderer().cells.is_empty());

    // No more ticks until restarted.
    assert!(session.update(now + Duration::from_secs(10)).unwrap().is_empty());

    session.start(now).unwrap();
    assert_eq!(session.game().phase(), Phase::Running);
    assert_eq!(session.audio().attempts, 2);
}

#[test]
fn into_parts_returns_game() {
    let mut session = session(8);
    session.start(Instant::now()).unwrap();
    let (game, renderer, _audio) = session.into_parts();
    assert_eq!(game.phase(), Phase::Running);
    assert_eq!(renderer.frames, 1);
}

#[test]
fn resumed_game_continues_after_one_interval() {
    let mut session = session(13);
    let t0 = Instant::now();
    session.start(t0).unwrap();
    session.update(t0).unwrap();
    let (game, _, _) = session.into_parts();

    let mut resumed = Session::new(game, Recorder::default(), BlockedAudio::default());
    let t1 = t0 + Duration::from_secs(30);
    // Starting again is refused since the game is still running.
    assert!(resumed.start(t1).unwrap().is_empty());
    resumed.resume(t1).unwrap();

    assert_eq!(resumed.audio().attempts, 1);
    assert_eq!(resumed.renderer().frames, 1);
    assert_eq!(resumed.renderer().scores, vec![0]);
    assert_eq!(resumed.ticker().next_tick(), Some(t1 + Duration::from_millis(1000)));
    assert!(resumed.update(t1).unwrap().is_empty());

    // Resuming twice is a no-op.
    resumed.resume(t1).unwrap();
    assert_eq!(resumed.audio().attempts, 1);
}

#[test]
fn resume_needs_a_started_game() {
    let mut session = session(13);
    session.resume(Instant::now()).unwrap();
    assert!(!session.ticker().is_running());
    assert_eq!(session.audio().attempts, 0);
    assert_eq!(session.renderer().frames, 0);
}
