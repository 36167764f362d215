use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use stackfall_engine::Button;

pub type Keybinds = HashMap<(KeyCode, KeyModifiers), Button>;

pub fn normalize((mut code, mut modifiers): (KeyCode, KeyModifiers)) -> (KeyCode, KeyModifiers) {
    match code {
        // Shift is already reflected in the character itself.
        KeyCode::Char(ref mut char) => {
            *char = char.to_ascii_lowercase();
            modifiers.remove(KeyModifiers::SHIFT);
        }

        // No changes for other keycodes.
        _ => {}
    }

    (code, modifiers)
}

pub fn default_keybinds() -> Keybinds {
    let keybinds: [((KeyCode, KeyModifiers), Button); 5] = [
        (KeyCode::Left, Button::MoveLeft),
        (KeyCode::Right, Button::MoveRight),
        (KeyCode::Down, Button::DropSoft),
        (KeyCode::Up, Button::Rotate),
        (KeyCode::Char(' '), Button::DropHard),
    ]
    .map(|(k, b)| ((k, KeyModifiers::NONE), b));
    HashMap::from(keybinds)
}
