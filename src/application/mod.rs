mod menus;

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use crossterm::{cursor, style, terminal, ExecutableCommand};

use stackfall_engine::{Configuration, Game};

use crate::palette_presets::PaletteChoice;

#[derive(
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Clone,
    Copy,
    Hash,
    Debug,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Glyphset {
    #[allow(clippy::upper_case_acronyms)]
    ASCII,
    #[default]
    Unicode,
}

#[derive(
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Clone,
    Copy,
    Hash,
    Debug,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(default)]
pub struct GraphicsSettings {
    pub palette: PaletteChoice,
    pub glyphset: Glyphset,
}

/// Everything the settings file may contain. Missing fields take their default value.
#[derive(PartialEq, Eq, Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    pub config: Configuration,
    pub graphics: GraphicsSettings,
    pub music: Option<PathBuf>,
}

impl Settings {
    pub const SETTINGS_DIR: &'static str = "stackfall";
    pub const SETTINGS_FILE: &'static str = "settings.json";

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::SETTINGS_DIR).join(Self::SETTINGS_FILE))
    }

    /// Reads settings from `custom_path`, or else from the standard config folder.
    ///
    /// Never fails: whatever cannot be read is logged and replaced by defaults.
    pub fn load(custom_path: Option<&Path>) -> Self {
        let Some(path) = custom_path.map(Path::to_path_buf).or_else(Self::default_path) else {
            log::debug!("no config folder, using default settings");
            return Self::default();
        };
        match Self::read(&path) {
            Ok(settings) => {
                log::info!("read settings from {}", path.display());
                settings
            }
            // Not having a settings file in the standard place is normal.
            Err(e) if e.kind() == io::ErrorKind::NotFound && custom_path.is_none() => {
                log::debug!("no settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("could not read settings {}: {e}", path.display());
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> io::Result<Self> {
        let settings_str = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&settings_str)?;
        Ok(settings)
    }
}

#[derive(Eq, PartialEq, Clone, Debug)]
enum Menu {
    Title,
    PlayGame,
    GameOver(u32),
    Quit(String),
}

impl std::fmt::Display for Menu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Menu::Title => "Title Screen",
            Menu::PlayGame => "Play",
            Menu::GameOver(_) => "Game Over",
            Menu::Quit(_) => "Quit",
        };
        write!(f, "{name}")
    }
}

#[derive(Eq, PartialEq, Clone, Debug)]
enum MenuUpdate {
    Pop,
    Push(Menu),
}

#[derive(Debug)]
pub struct Application<T: Write> {
    pub term: T,
    settings: Settings,
    seed: u64,
    // Kept across menus so a left game can be resumed and restarts continue the piece sequence.
    game: Option<Game>,
}

impl<T: Write> Drop for Application<T> {
    fn drop(&mut self) {
        // Nothing sensible left to do if restoring the terminal fails.
        let _ = terminal::disable_raw_mode();
        let _ = self.term.execute(style::ResetColor);
        let _ = self.term.execute(cursor::Show);
        let _ = self.term.execute(terminal::LeaveAlternateScreen);
    }
}

impl<T: Write> Application<T> {
    pub const W_MAIN: u16 = 80;
    pub const H_MAIN: u16 = 24;

    pub fn new(mut term: T, settings: Settings, seed: u64) -> Self {
        // Console prologue: Initialization.
        if let Err(e) = term
            .execute(terminal::EnterAlternateScreen)
            .and_then(|term| term.execute(terminal::SetTitle("Stackfall")))
            .and_then(|term| term.execute(cursor::Hide))
            .and_then(|_| terminal::enable_raw_mode())
        {
            log::warn!("terminal setup incomplete: {e}");
        }
        Self {
            term,
            settings,
            seed,
            game: None,
        }
    }

    pub(crate) fn fetch_main_xy() -> (u16, u16) {
        let (w_console, h_console) = terminal::size().unwrap_or((0, 0));
        (
            w_console.saturating_sub(Self::W_MAIN) / 2,
            h_console.saturating_sub(Self::H_MAIN) / 2,
        )
    }

    /// The game to play next, created on first use.
    fn take_game(&mut self) -> Game {
        self.game.take().unwrap_or_else(|| {
            Game::builder()
                .config(self.settings.config.clone())
                .seed(self.seed)
                .build()
        })
    }

    pub fn run(&mut self) -> io::Result<String> {
        let mut menu_stack = vec![Menu::Title];
        let msg = loop {
            // Retrieve active menu, stop application if stack is empty.
            let Some(menu) = menu_stack.last() else {
                break String::from("all menus exited");
            };
            // Open new menu screen, then store what it returns.
            let menu_update = match menu {
                Menu::Title => self.run_menu_title(),
                Menu::PlayGame => self.run_menu_play_game(),
                Menu::GameOver(final_score) => {
                    let final_score = *final_score;
                    self.run_menu_game_over(final_score)
                }
                Menu::Quit(msg) => break msg.clone(),
            }?;
            log::trace!("menu update {menu_update:?}");

            // Change screen session depending on what response screen gave.
            match menu_update {
                MenuUpdate::Pop => {
                    if menu_stack.len() > 1 {
                        menu_stack.pop();
                    }
                }
                MenuUpdate::Push(menu) => {
                    if matches!(menu, Menu::Title | Menu::GameOver(_)) {
                        menu_stack.clear();
                    }
                    menu_stack.push(menu);
                }
            }
        };
        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("stackfall-settings-test-{name}.json"));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn partial_settings_keep_defaults() {
        let path = write_temp("partial", r#"{ "graphics": { "palette": "color16" } }"#);
        let settings = Settings::load(Some(path.as_path()));

        assert_eq!(settings.graphics.palette, PaletteChoice::Color16);
        assert_eq!(settings.graphics.glyphset, Glyphset::Unicode);
        assert_eq!(settings.config, Configuration::default());
        assert_eq!(settings.music, None);
    }

    #[test]
    fn full_settings_are_read() {
        let path = write_temp(
            "full",
            r#"{
                "config": { "tick_interval": { "secs": 0, "nanos": 250000000 } },
                "graphics": { "palette": "monochrome", "glyphset": "ASCII" },
                "music": "theme.ogg"
            }"#,
        );
        let settings = Settings::load(Some(path.as_path()));

        assert_eq!(settings.config.tick_interval, Duration::from_millis(250));
        assert_eq!(settings.graphics.palette, PaletteChoice::Monochrome);
        assert_eq!(settings.graphics.glyphset, Glyphset::ASCII);
        assert_eq!(settings.music, Some(PathBuf::from("theme.ogg")));
    }

    #[test]
    fn unreadable_settings_fall_back_to_defaults() {
        let malformed = write_temp("malformed", "{ not json");
        assert_eq!(Settings::load(Some(malformed.as_path())), Settings::default());

        let missing = std::env::temp_dir().join("stackfall-settings-test-does-not-exist.json");
        assert_eq!(Settings::load(Some(missing.as_path())), Settings::default());
    }

    #[test]
    fn settings_file_lives_in_app_folder() {
        if let Some(path) = Settings::default_path() {
            assert!(path.ends_with("stackfall/settings.json"));
        }
    }
}
