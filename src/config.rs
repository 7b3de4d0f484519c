//! User configuration — keybindings, motion settings, and persistence.
//!
//! Everything is stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/scrolldeck/config.toml` (default
//! `~/.config/scrolldeck/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::easing::Easing;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the deck view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    JumpTop,
    JumpBottom,
    NextSection,
    PrevSection,
    Advance,
    Back,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the controls menu).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::JumpTop,
        Action::JumpBottom,
        Action::NextSection,
        Action::PrevSection,
        Action::Advance,
        Action::Back,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::ScrollUp => "Scroll Up",
            Action::ScrollDown => "Scroll Down",
            Action::PageUp => "Page Up",
            Action::PageDown => "Page Down",
            Action::JumpTop => "Jump to Top",
            Action::JumpBottom => "Jump to Bottom",
            Action::NextSection => "Next Section",
            Action::PrevSection => "Previous Section",
            Action::Advance => "Advance Carousel",
            Action::Back => "Carousel Back",
            Action::OpenSettings => "Open Settings",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::JumpTop => "jump_top",
            Action::JumpBottom => "jump_bottom",
            Action::NextSection => "next_section",
            Action::PrevSection => "prev_section",
            Action::Advance => "advance",
            Action::Back => "back",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        match s {
            "scroll_up" => Some(Action::ScrollUp),
            "scroll_down" => Some(Action::ScrollDown),
            "page_up" => Some(Action::PageUp),
            "page_down" => Some(Action::PageDown),
            "jump_top" => Some(Action::JumpTop),
            "jump_bottom" => Some(Action::JumpBottom),
            "next_section" => Some(Action::NextSection),
            "prev_section" => Some(Action::PrevSection),
            "advance" => Some(Action::Advance),
            "back" => Some(Action::Back),
            "open_settings" => Some(Action::OpenSettings),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared (platform-specific modifiers like SUPER are ignored).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Create a binding from a raw key event (used during rebinding).
    pub fn from_key_event(event: KeyEvent) -> Self {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        Self {
            code: event.code,
            modifiers: event.modifiers & mask,
        }
    }

    /// User-friendly display string (e.g. `"Alt+↑"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        self.format(true)
    }

    /// Serialise to config-file format (e.g. `"Alt+Up"`, `"Ctrl+c"`).
    fn to_config_string(&self) -> String {
        self.format(false)
    }

    /// `pretty` uses arrows and short names for the status bar; the config
    /// file gets the spelled-out variants `parse` understands.
    fn format(&self, pretty: bool) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up if pretty => "↑".into(),
            KeyCode::Down if pretty => "↓".into(),
            KeyCode::Left if pretty => "←".into(),
            KeyCode::Right if pretty => "→".into(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Backspace if pretty => "Bksp".into(),
            KeyCode::Backspace => "Backspace".into(),
            KeyCode::Delete if pretty => "Del".into(),
            KeyCode::Delete => "Delete".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp if pretty => "PgUp".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown if pretty => "PgDn".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"q"`, `"Enter"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            s if s.len() == 1 => KeyCode::Char(s.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration — keybindings and motion settings.
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Smooth (tweened) scrolling; off means instant jumps.
    pub smooth_scroll: bool,
    /// Snap every animation straight to its end state.
    pub reduced_motion: bool,
    /// Easing curve shared by scroll and reveal animation.
    pub easing: Easing,
    /// Scroll tween duration.
    pub scroll_ms: u64,
    /// Carousel transition budget.
    pub slide_ms: u64,
    /// Animation frame rate.
    pub fps: u64,
    /// Pointer-driven tilt on showcase cards.
    pub pointer_tilt: bool,
    /// Rows scrolled per wheel notch / arrow press.
    pub wheel_rows: f64,
}

impl AppConfig {
    /// Hard-coded defaults.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(KeyCode::PageDown, n)]);
        m.insert(JumpTop, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(JumpBottom, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), KeyModifiers::SHIFT)]);
        m.insert(NextSection, vec![KeyBind::new(Char('n'), n), KeyBind::new(Right, n)]);
        m.insert(PrevSection, vec![KeyBind::new(Char('p'), n), KeyBind::new(Left, n)]);
        m.insert(Advance, vec![KeyBind::new(Char(' '), n), KeyBind::new(Enter, n)]);
        m.insert(Back, vec![KeyBind::new(Backspace, n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Add a binding for `action`.  Removes this key from any other action
    /// to prevent conflicts, then appends it to `action`'s bindings.
    pub fn add_binding(&mut self, action: Action, bind: KeyBind) {
        for (_, binds) in self.bindings.iter_mut() {
            binds.retain(|b| b != &bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    /// Restore all bindings to the built-in defaults.
    pub fn reset_defaults(&mut self) {
        self.bindings = Self::default_bindings();
    }

    /// Format the binding list for a given action (e.g. `"↑ / k"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: scroll | {}: next card | {}: sections | {}: settings | {}: quit",
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::Advance),
            self.short_binding(Action::NextSection),
            self.short_binding(Action::OpenSettings),
            self.short_binding(Action::Quit),
        )
    }

    // ── derived values ──────────────────────────────────────────

    /// Scroll tween duration in seconds (0 when motion is reduced).
    pub fn scroll_duration(&self) -> f64 {
        if self.reduced_motion {
            0.0
        } else {
            self.scroll_ms as f64 / 1000.0
        }
    }

    /// Carousel transition duration in seconds (0 when motion is reduced).
    pub fn slide_duration(&self) -> f64 {
        if self.reduced_motion {
            0.0
        } else {
            self.slide_ms as f64 / 1000.0
        }
    }

    /// Tick interval for the event reader.
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(1000 / self.fps.clamp(10, 120))
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                return Self::parse_config(&contents);
            }
        }
        Self::parse_config("")
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self {
            bindings: Self::default_bindings(),
            smooth_scroll: true,
            reduced_motion: false,
            easing: Easing::ExpoOut,
            scroll_ms: 400,
            slide_ms: 650,
            fps: 60,
            pointer_tilt: true,
            wheel_rows: 3.0,
        };

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            // Motion settings.
            match key {
                "smooth_scroll" => {
                    config.smooth_scroll = value == "true";
                    continue;
                }
                "reduced_motion" => {
                    config.reduced_motion = value == "true";
                    continue;
                }
                "pointer_tilt" => {
                    config.pointer_tilt = value == "true";
                    continue;
                }
                "easing" => {
                    if let Some(e) = Easing::from_config_name(value) {
                        config.easing = e;
                    }
                    continue;
                }
                "scroll_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.scroll_ms = v.clamp(50, 2000);
                    }
                    continue;
                }
                "slide_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        // Keep transitions inside the budgeted envelope.
                        config.slide_ms = v.clamp(200, 1500);
                    }
                    continue;
                }
                "fps" => {
                    if let Ok(v) = value.parse::<u64>() {
                        config.fps = v.clamp(10, 120);
                    }
                    continue;
                }
                "wheel_rows" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.wheel_rows = v.clamp(1.0, 20.0);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let mut parsed = Vec::new();
            for part in value.split(',') {
                let part = part.trim().trim_matches('"');
                if let Some(bind) = KeyBind::parse(part) {
                    parsed.push(bind);
                }
            }
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# scrolldeck configuration".to_string(),
            String::new(),
            "# Motion settings".to_string(),
            format!("smooth_scroll = {}", self.smooth_scroll),
            format!("reduced_motion = {}", self.reduced_motion),
            format!("pointer_tilt = {}", self.pointer_tilt),
            format!("easing = {}", self.easing.config_name()),
            format!("scroll_ms = {}", self.scroll_ms),
            format!("slide_ms = {}", self.slide_ms),
            format!("fps = {}", self.fps),
            format!("wheel_rows = {}", self.wheel_rows),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Backspace, Delete, Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/scrolldeck/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("scrolldeck").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_settings_round_trip() {
        let mut config = AppConfig::parse_config("");
        config.reduced_motion = true;
        config.easing = Easing::SmoothStep;
        config.slide_ms = 800;
        let text = config.serialise();
        let back = AppConfig::parse_config(&text);
        assert!(back.reduced_motion);
        assert_eq!(back.easing, Easing::SmoothStep);
        assert_eq!(back.slide_ms, 800);
    }

    #[test]
    fn reduced_motion_zeroes_durations() {
        let mut config = AppConfig::parse_config("");
        assert!(config.slide_duration() > 0.0);
        config.reduced_motion = true;
        assert_eq!(config.slide_duration(), 0.0);
        assert_eq!(config.scroll_duration(), 0.0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = AppConfig::parse_config("slide_ms = 10000\nfps = 1\n");
        assert_eq!(config.slide_ms, 1500);
        assert_eq!(config.fps, 10);
    }

    #[test]
    fn custom_bindings_replace_defaults() {
        let config = AppConfig::parse_config("advance = Tab\n");
        let binds = &config.bindings[&Action::Advance];
        assert_eq!(binds, &vec![KeyBind::new(KeyCode::Tab, KeyModifiers::NONE)]);
    }
}
