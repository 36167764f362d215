use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use stackfall_engine::Button;

use crate::keybinds_presets::{normalize, Keybinds};

#[derive(Eq, PartialEq, Clone, Copy, Hash, Debug)]
pub enum InputSignal {
    AbortProgram,
    LeaveGame,
    WindowResize,
    ButtonInput(Button),
}

/// Reads terminal events on a separate thread and forwards them as [`InputSignal`]s.
#[derive(Debug)]
pub struct LiveTerminalInputHandler {
    thread_handle: Option<JoinHandle<()>>,
    running_thread_flag: Arc<AtomicBool>,
}

impl Drop for LiveTerminalInputHandler {
    fn drop(&mut self) {
        self.running_thread_flag.store(false, Ordering::Release);
        // Join so no later key press gets swallowed by this thread instead of the next menu.
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl LiveTerminalInputHandler {
    /// How often the thread checks whether it should stop.
    const POLL_INTERVAL: Duration = Duration::from_millis(50);

    pub fn new(input_sender: &Sender<InputSignal>, keybinds: &Keybinds) -> Self {
        let running_thread_flag = Arc::new(AtomicBool::new(true));
        LiveTerminalInputHandler {
            thread_handle: Some(Self::spawn(
                running_thread_flag.clone(),
                input_sender.clone(),
                keybinds.clone(),
            )),
            running_thread_flag,
        }
    }

    fn spawn(
        run_thread_flag: Arc<AtomicBool>,
        input_sender: Sender<InputSignal>,
        keybinds: Keybinds,
    ) -> JoinHandle<()> {
        thread::spawn(move || {
            'react_to_event: loop {
                // Maybe stop thread.
                let true = run_thread_flag.load(Ordering::Acquire) else {
                    break 'react_to_event;
                };
                match event::poll(Self::POLL_INTERVAL) {
                    Ok(true) => {}
                    Ok(false) => continue 'react_to_event,
                    Err(e) => {
                        log::error!("polling terminal events failed: {e}");
                        break 'react_to_event;
                    }
                }
                let event = match event::read() {
                    Ok(event) => event,
                    Err(e) => {
                        log::error!("reading terminal event failed: {e}");
                        break 'react_to_event;
                    }
                };
                let signal = match event {
                    Event::Key(KeyEvent {
                        code: KeyCode::Char('c'),
                        modifiers: KeyModifiers::CONTROL,
                        kind: KeyEventKind::Press | KeyEventKind::Repeat,
                        ..
                    }) => InputSignal::AbortProgram,

                    Event::Key(KeyEvent {
                        code: KeyCode::Esc,
                        kind: KeyEventKind::Press,
                        ..
                    }) => InputSignal::LeaveGame,

                    Event::Resize(..) => InputSignal::WindowResize,

                    Event::Key(KeyEvent {
                        code,
                        modifiers,
                        kind: KeyEventKind::Press | KeyEventKind::Repeat,
                        ..
                    }) => match keybinds.get(&normalize((code, modifiers))) {
                        Some(&button) => InputSignal::ButtonInput(button),
                        // Unbound keys do nothing.
                        None => continue 'react_to_event,
                    },

                    // Don't care about other events: ignore.
                    _ => continue 'react_to_event,
                };
                let stop_thread = matches!(
                    signal,
                    InputSignal::AbortProgram | InputSignal::LeaveGame
                );
                if input_sender.send(signal).is_err() || stop_thread {
                    break 'react_to_event;
                }
            }
        })
    }
}
