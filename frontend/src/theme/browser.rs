use gloo_timers::callback::Timeout;
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, MediaQueryList, MediaQueryListEvent, Storage};

use super::resolver::{PlatformError, Subscription, ThemeHost};
use super::AppliedTheme;
use crate::config;

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";
const TRANSITION_CLASS: &str = "theme-transition";

/// [`ThemeHost`] backed by the real page: localStorage, `<html>` classes and
/// `matchMedia`.
#[derive(Clone, Default)]
pub struct BrowserHost;

impl BrowserHost {
    fn storage() -> Result<Storage, PlatformError> {
        let window = window().ok_or(PlatformError::NoWindow)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(storage),
            _ => Err(PlatformError::StorageUnavailable),
        }
    }

    fn dark_query() -> Option<MediaQueryList> {
        window()?.match_media(DARK_QUERY).ok().flatten()
    }

    fn with_root_classes(f: impl FnOnce(&web_sys::DomTokenList)) {
        if let Some(root) = window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            f(&root.class_list());
        }
    }
}

impl ThemeHost for BrowserHost {
    fn load_preference(&self) -> Result<Option<String>, PlatformError> {
        Self::storage()?
            .get_item(config::THEME_STORAGE_KEY)
            .map_err(|e| PlatformError::Storage {
                op: "read",
                detail: format!("{:?}", e),
            })
    }

    fn store_preference(&self, value: &str) -> Result<(), PlatformError> {
        Self::storage()?
            .set_item(config::THEME_STORAGE_KEY, value)
            .map_err(|e| PlatformError::Storage {
                op: "write",
                detail: format!("{:?}", e),
            })
    }

    fn prefers_dark(&self) -> bool {
        Self::dark_query().map_or(false, |query| query.matches())
    }

    fn watch_color_scheme(&self, on_change: Box<dyn Fn(bool)>) -> Option<Subscription> {
        let query = Self::dark_query()?;
        let listener = Closure::wrap(Box::new(move |event: MediaQueryListEvent| {
            on_change(event.matches());
        }) as Box<dyn FnMut(MediaQueryListEvent)>);

        if let Err(e) =
            query.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
        {
            warn!("Could not watch colour scheme: {:?}", e);
            return None;
        }

        Some(Subscription::new(move || {
            let _ = query
                .remove_event_listener_with_callback("change", listener.as_ref().unchecked_ref());
        }))
    }

    fn apply_theme(&self, theme: AppliedTheme) {
        Self::with_root_classes(|classes| {
            let _ = classes.remove_1(theme.flipped().class());
            let _ = classes.add_1(theme.class());
        });
    }

    fn set_transitioning(&self, active: bool) {
        Self::with_root_classes(|classes| {
            let _ = if active {
                classes.add_1(TRANSITION_CLASS)
            } else {
                classes.remove_1(TRANSITION_CLASS)
            };
        });
    }

    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }
}
