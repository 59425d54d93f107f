use strum::AsRefStr;

/// Bootstrap alert contexts used by the banner and chart placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
    Danger,
}

impl AlertLevel {
    /// Class list for an inline alert block.
    pub fn css_class(&self) -> String {
        format!("alert alert-{}", self.as_ref())
    }
}

/// A banner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub auto_hide: bool,
}

impl Alert {
    pub fn new(level: AlertLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), auto_hide: false }
    }

    pub fn auto_hiding(level: AlertLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), auto_hide: true }
    }

    /// Class list for the page banner.
    pub fn banner_class(&self) -> String {
        format!("{} mt-3", self.level.css_class())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_class_matches_bootstrap() {
        let alert = Alert::new(AlertLevel::Danger, "boom");
        assert_eq!(alert.banner_class(), "alert alert-danger mt-3");
        assert!(!alert.auto_hide);
    }
}
