/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: char,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn ctrl(key: char) -> Self {
        Self {
            key,
            ctrl: true,
            meta: false,
            shift: false,
        }
    }

    pub fn with_shift(self) -> Self {
        Self {
            shift: true,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryShortcut {
    Undo,
    Redo,
}

impl HistoryShortcut {
    /// Ctrl/Cmd+Z undoes, Ctrl/Cmd+Shift+Z and Ctrl/Cmd+Y redo.
    pub fn from_chord(chord: KeyChord) -> Option<Self> {
        if !(chord.ctrl || chord.meta) {
            return None;
        }
        match chord.key.to_ascii_lowercase() {
            'z' if chord.shift => Some(HistoryShortcut::Redo),
            'z' => Some(HistoryShortcut::Undo),
            'y' => Some(HistoryShortcut::Redo),
            _ => None,
        }
    }
}
