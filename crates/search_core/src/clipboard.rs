/// Single-slot hand-off between copy requests and whatever writes the OS clipboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClipboardRelay {
    #[default]
    Empty,
    Pending(String),
}

impl ClipboardRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always overwrites an unfinished request.
    pub fn request_copy(&mut self, content: impl Into<String>) {
        *self = Self::Pending(content.into());
    }

    /// Clears the slot; no-op when nothing is pending.
    pub fn notify_copied(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Self::Pending(content) => Some(content),
            Self::Empty => None,
        }
    }

    pub fn pending(&self) -> Option<&str> {
        match self {
            Self::Pending(content) => Some(content),
            Self::Empty => None,
        }
    }
}
