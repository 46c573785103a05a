//! Settings shared by every late-bound call and by application start-up

/// Locale passed to `GetIDsOfNames` and `Invoke`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// `GetSystemDefaultLCID()`
    #[default]
    SystemDefault,
    /// `LOCALE_NEUTRAL` (0)
    Neutral,
    /// A specific LCID, e.g. 1033 for en-US
    Fixed(u32),
}

impl Locale {
    /// The LCID when it does not depend on the machine
    pub fn fixed_lcid(&self) -> Option<u32> {
        match self {
            Locale::SystemDefault => None,
            Locale::Neutral => Some(0),
            Locale::Fixed(lcid) => Some(*lcid),
        }
    }

    /// Resolve to the LCID used for calls
    #[cfg(windows)]
    pub fn lcid(&self) -> u32 {
        match self.fixed_lcid() {
            Some(lcid) => lcid,
            None => unsafe { windows::Win32::Globalization::GetSystemDefaultLCID() },
        }
    }
}

/// Configuration for starting and driving an automation server
#[derive(Debug, Clone)]
pub struct AutomationConfig {
    /// Locale for name lookup and invocation. Defaults to the system locale.
    pub locale: Locale,
    /// `Application.Visible` after start-up. Default: false.
    pub visible: bool,
    /// `Application.DisplayAlerts` after start-up. Default: false.
    pub display_alerts: bool,
    /// `Application.ScreenUpdating` after start-up; `None` leaves it alone.
    pub screen_updating: Option<bool>,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        Self {
            locale: Locale::SystemDefault,
            visible: false,
            display_alerts: false,
            screen_updating: None,
        }
    }
}

impl AutomationConfig {
    /// Show the application window
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// The start-up property writes this configuration asks for, in order
    pub fn startup_properties(&self) -> Vec<(&'static str, bool)> {
        let mut props = vec![
            ("Visible", self.visible),
            ("DisplayAlerts", self.display_alerts),
        ];
        if let Some(updating) = self.screen_updating {
            props.push(("ScreenUpdating", updating));
        }
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AutomationConfig::default();
        assert_eq!(config.locale, Locale::SystemDefault);
        assert_eq!(
            config.startup_properties(),
            vec![("Visible", false), ("DisplayAlerts", false)]
        );
    }

    #[test]
    fn test_screen_updating_is_opt_in() {
        let config = AutomationConfig {
            screen_updating: Some(false),
            ..AutomationConfig::default()
        }
        .visible(true);
        assert_eq!(
            config.startup_properties(),
            vec![
                ("Visible", true),
                ("DisplayAlerts", false),
                ("ScreenUpdating", false)
            ]
        );
    }

    #[test]
    fn test_fixed_lcid() {
        assert_eq!(Locale::SystemDefault.fixed_lcid(), None);
        assert_eq!(Locale::Neutral.fixed_lcid(), Some(0));
        assert_eq!(Locale::Fixed(1033).fixed_lcid(), Some(1033));
    }
}
