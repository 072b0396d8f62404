use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Full,
    EntryOnly,
    ExitOnly,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Full => "FULL",
            EventKind::EntryOnly => "ENTRY_ONLY",
            EventKind::ExitOnly => "EXIT_ONLY",
        }
    }

    /// Parse a stored kind. Accepts the legacy localized labels
    /// (`полный` / `вход` / `выход`) as well.
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "full" | "полный" => Some(Self::Full),
            "entry_only" | "вход" => Some(Self::EntryOnly),
            "exit_only" | "выход" => Some(Self::ExitOnly),
            _ => None,
        }
    }
}
