use std::{
    io::{self, Write},
    sync::mpsc::{self, Receiver},
    time::{Duration, Instant},
};

use stackfall_engine::{AudioSink, Feedback, Phase, Renderer, Session};

use crate::{
    application::{Application, Menu, MenuUpdate},
    audio::soundtrack,
    game_renderers::terminal::TerminalRenderer,
    keybinds_presets::default_keybinds,
    live_input_handler::{InputSignal, LiveTerminalInputHandler},
};

type TerminalSession<'a, T> = Session<TerminalRenderer<'a, T>, Box<dyn AudioSink>>;

impl<T: Write> Application<T> {
    /// How long to wait for input while no tick is scheduled.
    const IDLE_WAIT: Duration = Duration::from_millis(250);

    pub(in crate::application) fn run_menu_play_game(&mut self) -> io::Result<MenuUpdate> {
        let game = self.take_game();
        let palette = self.settings.graphics.palette.palette();
        let glyphset = self.settings.graphics.glyphset;
        let audio = soundtrack(self.settings.music.as_deref());

        // Prepare channel with which to communicate inputs.
        let (input_sender, input_receiver) = mpsc::channel();
        let input_handler = LiveTerminalInputHandler::new(&input_sender, &default_keybinds());

        let renderer = TerminalRenderer::new(&mut self.term, palette, glyphset);
        let mut session = Session::new(game, renderer, audio);
        let menu_update = Self::play(&mut session, &input_receiver);

        // Console epilogue: hand the game back for the next round.
        drop(input_handler);
        let (game, _renderer, mut audio) = session.into_parts();
        audio.stop();
        log::debug!(
            "left game in phase {:?} with score {}",
            game.phase(),
            game.state().score
        );
        self.game = Some(game);
        menu_update
    }

    fn play(
        session: &mut TerminalSession<'_, T>,
        input_receiver: &Receiver<InputSignal>,
    ) -> io::Result<MenuUpdate> {
        let now = Instant::now();
        if session.game().phase() == Phase::NotStarted {
            session.start(now)?;
        } else {
            session.resume(now)?;
        }
        loop {
            let timeout = session
                .time_until_tick(Instant::now())
                .unwrap_or(Self::IDLE_WAIT);
            match input_receiver.recv_timeout(timeout) {
                Ok(InputSignal::ButtonInput(button)) => {
                    session.press(button)?;
                }
                Ok(InputSignal::WindowResize) => {
                    let renderer = session.renderer_mut();
                    renderer.invalidate();
                    renderer.present()?;
                }
                Ok(InputSignal::LeaveGame) => break Ok(MenuUpdate::Pop),
                Ok(InputSignal::AbortProgram) => {
                    break Ok(MenuUpdate::Push(Menu::Quit("exited with ctrl-c".to_owned())))
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    log::warn!("input thread stopped, leaving game");
                    break Ok(MenuUpdate::Pop);
                }
            }
            for feedback in session.update(Instant::now())? {
                if let Feedback::GameEnded { final_score } = feedback {
                    return Ok(MenuUpdate::Push(Menu::GameOver(final_score)));
                }
            }
        }
    }
}
