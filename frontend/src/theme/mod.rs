//! Light/dark theme handling.
//!
//! [`ThemeResolver`] owns the visitor's preference and the classes on `<html>`,
//! [`ThemeProvider`] hands it to the component tree and [`use_theme`] reads it.

mod browser;
mod provider;
mod resolver;

pub use browser::BrowserHost;
pub use provider::{use_theme, ThemeHandle, ThemeProvider};
pub use resolver::{PlatformError, Subscription, ThemeHost, ThemeResolver};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// What the visitor asked for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    System,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// Resolves the preference against the OS colour scheme.
    pub fn resolve(self, prefers_dark: bool) -> AppliedTheme {
        match self {
            ThemeMode::Light => AppliedTheme::Light,
            ThemeMode::Dark => AppliedTheme::Dark,
            ThemeMode::System => AppliedTheme::from_prefers_dark(prefers_dark),
        }
    }
}

/// A stored value that is not one of `light`, `dark` or `system`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown theme preference {0:?}")]
pub struct ParseThemeError(String);

impl FromStr for ThemeMode {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The theme actually rendered. Never "system".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppliedTheme {
    #[default]
    Light,
    Dark,
}

impl AppliedTheme {
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            AppliedTheme::Dark
        } else {
            AppliedTheme::Light
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            AppliedTheme::Light => AppliedTheme::Dark,
            AppliedTheme::Dark => AppliedTheme::Light,
        }
    }

    /// Class name put on `<html>`.
    pub fn class(self) -> &'static str {
        match self {
            AppliedTheme::Light => "light",
            AppliedTheme::Dark => "dark",
        }
    }

    pub fn as_mode(self) -> ThemeMode {
        match self {
            AppliedTheme::Light => ThemeMode::Light,
            AppliedTheme::Dark => ThemeMode::Dark,
        }
    }
}

/// What a component sees while rendering. `Unresolved` until the resolver
/// has read storage, so theme-dependent assets can show a placeholder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResolvedTheme {
    #[default]
    Unresolved,
    Light,
    Dark,
}

impl From<AppliedTheme> for ResolvedTheme {
    fn from(applied: AppliedTheme) -> Self {
        match applied {
            AppliedTheme::Light => ResolvedTheme::Light,
            AppliedTheme::Dark => ResolvedTheme::Dark,
        }
    }
}

impl From<Option<ThemeSnapshot>> for ResolvedTheme {
    fn from(snapshot: Option<ThemeSnapshot>) -> Self {
        snapshot.map_or(ResolvedTheme::Unresolved, |s| s.applied.into())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeSnapshot {
    pub mode: ThemeMode,
    pub applied: AppliedTheme,
}
