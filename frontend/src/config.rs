use log::Level;

/// localStorage key holding the visitor's theme preference.
pub const THEME_STORAGE_KEY: &str = "studio-site:theme";

/// How long the `theme-transition` class stays on `<html>` after a change.
pub const THEME_TRANSITION_MS: u32 = 300;

pub const CONTACT_EMAIL: &str = "hello@northpeak.studio";
pub const WHATSAPP_NUMBER: &str = "+358 40 123 4567";

pub const CAROUSEL_INTERVAL_MS: u32 = 5000;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
