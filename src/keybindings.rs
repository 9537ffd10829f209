use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press means to the demo shell, before it is turned into store
/// actions by the [`Navigator`](crate::navigator::Navigator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Quit,
    OpenMenuBar,
    Back,
    // Cursor movement
    Up,
    Down,
    Left,
    Right,
    Activate,
    Toggle,
    FocusNext,
    CloseDocument,
    // Dialog answers
    Confirm,
    Cancel,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::Quit => "Quit",
            Intent::OpenMenuBar => "Menu",
            Intent::Back => "Back",
            Intent::Up => "Up",
            Intent::Down => "Down",
            Intent::Left => "Left",
            Intent::Right => "Right",
            Intent::Activate => "Select",
            Intent::Toggle => "Expand / collapse",
            Intent::FocusNext => "Next pane",
            Intent::CloseDocument => "Close document",
            Intent::Confirm => "Confirm",
            Intent::Cancel => "Cancel",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            other => format!("{:?}", other),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Ordered key table; the first matching combo wins, so context-specific
/// meanings (Enter confirming a dialog vs. activating a menu item) are
/// resolved by the navigator rather than by registration order.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(Intent, KeyCombo)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Intent::*;
        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        kb.add(OpenMenuBar, KeyCombo::plain(KeyCode::F(10)));
        kb.add(OpenMenuBar, KeyCombo::plain(KeyCode::Char('m')));
        kb.add(Back, KeyCombo::plain(KeyCode::Esc));
        kb.add(Up, KeyCombo::plain(KeyCode::Up));
        kb.add(Up, KeyCombo::plain(KeyCode::Char('k')));
        kb.add(Down, KeyCombo::plain(KeyCode::Down));
        kb.add(Down, KeyCombo::plain(KeyCode::Char('j')));
        kb.add(Left, KeyCombo::plain(KeyCode::Left));
        kb.add(Right, KeyCombo::plain(KeyCode::Right));
        kb.add(Activate, KeyCombo::plain(KeyCode::Enter));
        kb.add(Toggle, KeyCombo::plain(KeyCode::Char(' ')));
        kb.add(FocusNext, KeyCombo::plain(KeyCode::Tab));
        kb.add(CloseDocument, KeyCombo::plain(KeyCode::Char('w')));
        kb.add(Confirm, KeyCombo::plain(KeyCode::Char('y')));
        kb.add(Cancel, KeyCombo::plain(KeyCode::Char('n')));
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn add(&mut self, intent: Intent, combo: KeyCombo) {
        self.bindings.push((intent, combo));
    }

    pub fn intent_for_key(&self, key: &KeyEvent) -> Option<Intent> {
        self.bindings
            .iter()
            .find(|(_, combo)| combo.matches(key))
            .map(|(intent, _)| *intent)
    }

    /// Return the first combo mapped to `intent`, if any.
    pub fn first_combo(&self, intent: Intent) -> Option<&KeyCombo> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == intent)
            .map(|(_, combo)| combo)
    }

    /// `"F10 Menu  Tab Next pane ..."` for the given intents.
    pub fn hint_line(&self, intents: &[Intent]) -> String {
        intents
            .iter()
            .filter_map(|intent| {
                self.first_combo(*intent)
                    .map(|combo| format!("{} {}", combo, intent))
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}
