/// A user-visible toast. Screens post these through the app's
/// notification channel instead of rendering their own alerts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Warning,
    Error,
}

impl Notification {
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Level::Success, title, text)
    }

    pub fn warning(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Level::Warning, title, text)
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(Level::Error, title, text)
    }

    fn new(level: Level, title: impl Into<String>, text: impl Into<String>) -> Self {
        Notification {
            level,
            title: title.into(),
            text: text.into(),
        }
    }
}
