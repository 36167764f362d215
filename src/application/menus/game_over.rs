use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind::Press, KeyModifiers},
    style::{Print, PrintStyledContent, Stylize},
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use stackfall_engine::score_text;

use crate::application::{Application, Menu, MenuUpdate};

impl<T: Write> Application<T> {
    pub(in crate::application) fn run_menu_game_over(
        &mut self,
        final_score: u32,
    ) -> io::Result<MenuUpdate> {
        let w_main = Self::W_MAIN.into();
        let (x_main, y_main) = Self::fetch_main_xy();
        let y_selection = Self::H_MAIN / 5;
        self.term
            .queue(Clear(ClearType::All))?
            .queue(MoveTo(x_main, y_main + y_selection))?
            .queue(Print(format!("{:^w_main$}", "-- Game Over! --")))?
            .queue(MoveTo(x_main, y_main + y_selection + 2))?
            .queue(Print(format!("{:^w_main$}", "──────────────────────────")))?
            .queue(MoveTo(x_main, y_main + y_selection + 3))?
            .queue(Print(format!("{:^w_main$}", score_text(final_score))))?
            .queue(MoveTo(x_main, y_main + y_selection + 4))?
            .queue(Print(format!("{:^w_main$}", "──────────────────────────")))?
            .queue(MoveTo(x_main, y_main + y_selection + 6))?
            .queue(PrintStyledContent(
                format!("{:^w_main$}", "(Press any key to return to the title screen)").italic(),
            ))?;
        self.term.flush()?;
        loop {
            // Wait for the player to acknowledge.
            match event::read()? {
                Event::Key(KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers: KeyModifiers::CONTROL,
                    kind: Press,
                    ..
                }) => {
                    break Ok(MenuUpdate::Push(Menu::Quit(format!(
                        "exited with ctrl-c after scoring {final_score}"
                    ))))
                }
                Event::Key(KeyEvent { kind: Press, .. }) => break Ok(MenuUpdate::Push(Menu::Title)),
                // Other event: don't care.
                _ => {}
            }
        }
    }
}
