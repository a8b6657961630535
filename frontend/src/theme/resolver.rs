use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, info, warn};
use thiserror::Error;

use super::{AppliedTheme, ParseThemeError, ThemeMode, ThemeSnapshot};
use crate::config;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("no window available")]
    NoWindow,
    #[error("localStorage is disabled")]
    StorageUnavailable,
    #[error("localStorage {op} failed: {detail}")]
    Storage { op: &'static str, detail: String },
}

/// Releases a platform listener when dropped.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Everything the resolver needs from the page it runs in.
pub trait ThemeHost {
    fn load_preference(&self) -> Result<Option<String>, PlatformError>;
    fn store_preference(&self, value: &str) -> Result<(), PlatformError>;

    fn prefers_dark(&self) -> bool;
    /// `None` when the platform cannot report colour-scheme changes.
    fn watch_color_scheme(&self, on_change: Box<dyn Fn(bool)>) -> Option<Subscription>;

    /// Puts exactly one of the `light`/`dark` classes on the root element.
    fn apply_theme(&self, theme: AppliedTheme);
    fn set_transitioning(&self, active: bool);

    /// Runs `task` once after `delay_ms`. Not cancellable.
    fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

struct State {
    mode: ThemeMode,
    applied: AppliedTheme,
    initialized: bool,
    disposed: bool,
    system_watch: Option<Subscription>,
    transition_epoch: u64,
}

struct Inner<H> {
    host: Rc<H>,
    state: RefCell<State>,
    on_change: RefCell<Option<Box<dyn Fn(ThemeSnapshot)>>>,
}

impl<H: ThemeHost> Inner<H> {
    fn snapshot(&self) -> ThemeSnapshot {
        let state = self.state.borrow();
        ThemeSnapshot {
            mode: state.mode,
            applied: state.applied,
        }
    }

    fn notify(&self, snapshot: ThemeSnapshot) {
        if let Some(on_change) = self.on_change.borrow().as_ref() {
            on_change(snapshot);
        }
    }

    fn system_changed(&self, prefers_dark: bool) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            if state.disposed || state.mode != ThemeMode::System {
                return;
            }
            state.applied = AppliedTheme::from_prefers_dark(prefers_dark);
            ThemeSnapshot {
                mode: state.mode,
                applied: state.applied,
            }
        };
        debug!("OS colour scheme changed, applying {:?}", snapshot.applied);
        self.host.apply_theme(snapshot.applied);
        self.notify(snapshot);
    }
}

/// Single owner of the theme preference, the persisted key and the root
/// element classes. Cloning hands out another handle to the same resolver.
pub struct ThemeResolver<H: ThemeHost + 'static> {
    inner: Rc<Inner<H>>,
}

impl<H: ThemeHost + 'static> Clone for ThemeResolver<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<H: ThemeHost + 'static> ThemeResolver<H> {
    pub fn new(host: H) -> Self {
        Self {
            inner: Rc::new(Inner {
                host: Rc::new(host),
                state: RefCell::new(State {
                    mode: ThemeMode::default(),
                    applied: AppliedTheme::default(),
                    initialized: false,
                    disposed: false,
                    system_watch: None,
                    transition_epoch: 0,
                }),
                on_change: RefCell::new(None),
            }),
        }
    }

    /// Registers the callback told about every change. Replaces any previous one.
    pub fn set_observer(&self, on_change: impl Fn(ThemeSnapshot) + 'static) {
        *self.inner.on_change.borrow_mut() = Some(Box::new(on_change));
    }

    /// True when both handles point at the same resolver.
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.state.borrow().initialized
    }

    /// Reads the stored preference and applies it. Later calls are no-ops.
    pub fn initialize(&self) -> ThemeSnapshot {
        if self.is_initialized() {
            debug!("Theme resolver already initialized");
            return self.snapshot();
        }

        let mode = self.stored_mode();
        // The OS is only asked when the visitor chose to follow it.
        let prefers_dark = mode == ThemeMode::System && self.inner.host.prefers_dark();
        let applied = mode.resolve(prefers_dark);
        {
            let mut state = self.inner.state.borrow_mut();
            state.mode = mode;
            state.applied = applied;
            state.initialized = true;
        }

        self.inner.host.apply_theme(applied);
        self.sync_system_watch(mode);

        let snapshot = self.snapshot();
        info!("Theme initialized: mode={} applied={:?}", mode, applied);
        self.inner.notify(snapshot);
        snapshot
    }

    pub fn set_theme(&self, mode: ThemeMode) -> ThemeSnapshot {
        let prefers_dark = mode == ThemeMode::System && self.inner.host.prefers_dark();
        let applied = mode.resolve(prefers_dark);
        {
            let mut state = self.inner.state.borrow_mut();
            state.mode = mode;
            state.applied = applied;
            state.initialized = true;
        }

        if let Err(e) = self.inner.host.store_preference(mode.as_str()) {
            warn!("Could not persist theme preference: {}", e);
        }
        self.inner.host.apply_theme(applied);
        self.start_transition();
        self.sync_system_watch(mode);

        let snapshot = self.snapshot();
        info!("Theme set: mode={} applied={:?}", mode, applied);
        self.inner.notify(snapshot);
        snapshot
    }

    /// Flips the rendered theme. Always stores a concrete light/dark choice.
    pub fn toggle_theme(&self) -> ThemeSnapshot {
        let next = self.snapshot().applied.flipped();
        self.set_theme(next.as_mode())
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        self.inner.snapshot()
    }

    /// Drops the OS listener and the change observer.
    pub fn dispose(&self) {
        let (watch, observer) = {
            let mut state = self.inner.state.borrow_mut();
            state.disposed = true;
            (state.system_watch.take(), self.inner.on_change.borrow_mut().take())
        };
        drop(watch);
        drop(observer);
        debug!("Theme resolver disposed");
    }

    fn stored_mode(&self) -> ThemeMode {
        match self.inner.host.load_preference() {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e: ParseThemeError| {
                warn!("Ignoring stored theme: {}", e);
                ThemeMode::default()
            }),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                warn!("Theme preference unreadable, using default: {}", e);
                ThemeMode::default()
            }
        }
    }

    fn sync_system_watch(&self, mode: ThemeMode) {
        let (disposed, watching) = {
            let state = self.inner.state.borrow();
            (state.disposed, state.system_watch.is_some())
        };
        if disposed {
            return;
        }

        if mode == ThemeMode::System {
            if watching {
                return;
            }
            let weak: Weak<Inner<H>> = Rc::downgrade(&self.inner);
            let watch = self.inner.host.watch_color_scheme(Box::new(move |prefers_dark| {
                if let Some(inner) = weak.upgrade() {
                    inner.system_changed(prefers_dark);
                }
            }));
            if watch.is_none() {
                debug!("Colour scheme changes are not observable here");
            }
            self.inner.state.borrow_mut().system_watch = watch;
        } else {
            let released = self.inner.state.borrow_mut().system_watch.take();
            drop(released);
        }
    }

    fn start_transition(&self) {
        let epoch = {
            let mut state = self.inner.state.borrow_mut();
            state.transition_epoch += 1;
            state.transition_epoch
        };
        self.inner.host.set_transitioning(true);

        let weak = Rc::downgrade(&self.inner);
        let host = Rc::clone(&self.inner.host);
        self.inner.host.defer(
            config::THEME_TRANSITION_MS,
            Box::new(move || {
                // A newer change owns the marker now.
                let latest = weak.upgrade().map_or(true, |inner| {
                    let current = inner.state.borrow().transition_epoch;
                    current == epoch
                });
                if latest {
                    host.set_transitioning(false);
                }
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct FakePage {
        stored: RefCell<Option<String>>,
        storage_broken: Cell<bool>,
        prefers_dark: Cell<bool>,
        os_queries: Cell<u32>,
        applied: RefCell<Vec<AppliedTheme>>,
        transitioning: Cell<bool>,
        watcher: RefCell<Option<Box<dyn Fn(bool)>>>,
        deferred: RefCell<Vec<(u32, Box<dyn FnOnce()>)>>,
    }

    #[derive(Clone, Default)]
    struct FakeHost(Rc<FakePage>);

    impl FakeHost {
        fn with_stored(value: &str) -> Self {
            let host = Self::default();
            *host.0.stored.borrow_mut() = Some(value.to_string());
            host
        }

        fn os_switch(&self, prefers_dark: bool) {
            self.0.prefers_dark.set(prefers_dark);
            if let Some(watcher) = self.0.watcher.borrow().as_ref() {
                watcher(prefers_dark);
            }
        }

        fn watching(&self) -> bool {
            self.0.watcher.borrow().is_some()
        }

        fn root(&self) -> Option<AppliedTheme> {
            self.0.applied.borrow().last().copied()
        }

        fn stored(&self) -> Option<String> {
            self.0.stored.borrow().clone()
        }

        fn run_timers(&self) {
            let tasks: Vec<_> = self.0.deferred.borrow_mut().drain(..).collect();
            for (_, task) in tasks {
                task();
            }
        }
    }

    impl ThemeHost for FakeHost {
        fn load_preference(&self) -> Result<Option<String>, PlatformError> {
            if self.0.storage_broken.get() {
                return Err(PlatformError::StorageUnavailable);
            }
            Ok(self.0.stored.borrow().clone())
        }

        fn store_preference(&self, value: &str) -> Result<(), PlatformError> {
            if self.0.storage_broken.get() {
                return Err(PlatformError::StorageUnavailable);
            }
            *self.0.stored.borrow_mut() = Some(value.to_string());
            Ok(())
        }

        fn prefers_dark(&self) -> bool {
            self.0.os_queries.set(self.0.os_queries.get() + 1);
            self.0.prefers_dark.get()
        }

        fn watch_color_scheme(&self, on_change: Box<dyn Fn(bool)>) -> Option<Subscription> {
            *self.0.watcher.borrow_mut() = Some(on_change);
            let page = Rc::clone(&self.0);
            Some(Subscription::new(move || {
                page.watcher.borrow_mut().take();
            }))
        }

        fn apply_theme(&self, theme: AppliedTheme) {
            self.0.applied.borrow_mut().push(theme);
        }

        fn set_transitioning(&self, active: bool) {
            self.0.transitioning.set(active);
        }

        fn defer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
            self.0.deferred.borrow_mut().push((delay_ms, task));
        }
    }

    #[test]
    fn first_visit_defaults_to_light_without_asking_the_os() {
        let host = FakeHost::default();
        host.0.prefers_dark.set(true);
        let resolver = ThemeResolver::new(host.clone());

        let snapshot = resolver.initialize();

        assert_eq!(snapshot.mode, ThemeMode::Light);
        assert_eq!(snapshot.applied, AppliedTheme::Light);
        assert_eq!(host.root(), Some(AppliedTheme::Light));
        assert_eq!(host.0.os_queries.get(), 0);
        assert_eq!(host.stored(), None);
    }

    #[test]
    fn restart_restores_stored_dark() {
        let host = FakeHost::with_stored("dark");
        let resolver = ThemeResolver::new(host.clone());

        assert_eq!(resolver.initialize().applied, AppliedTheme::Dark);
        assert_eq!(host.root(), Some(AppliedTheme::Dark));
        assert!(!host.0.transitioning.get());
    }

    #[test]
    fn stored_system_preference_resolves_and_watches_os() {
        let host = FakeHost::with_stored("system");
        host.0.prefers_dark.set(true);
        let resolver = ThemeResolver::new(host.clone());

        let snapshot = resolver.initialize();

        assert_eq!(snapshot.mode, ThemeMode::System);
        assert_eq!(snapshot.applied, AppliedTheme::Dark);
        assert!(host.watching());
    }

    #[test]
    fn initialize_runs_once() {
        let host = FakeHost::with_stored("dark");
        let resolver = ThemeResolver::new(host.clone());

        resolver.initialize();
        resolver.set_theme(ThemeMode::Light);
        let again = resolver.initialize();

        assert_eq!(again.applied, AppliedTheme::Light);
        assert_eq!(host.0.applied.borrow().len(), 2);
    }

    #[test]
    fn broken_storage_degrades_to_memory() {
        let host = FakeHost::default();
        host.0.storage_broken.set(true);
        let resolver = ThemeResolver::new(host.clone());

        assert_eq!(resolver.initialize().applied, AppliedTheme::Light);
        assert_eq!(resolver.set_theme(ThemeMode::Dark).applied, AppliedTheme::Dark);
        assert_eq!(host.root(), Some(AppliedTheme::Dark));
    }

    #[test]
    fn garbage_in_storage_counts_as_absent() {
        let host = FakeHost::with_stored("purple");
        let resolver = ThemeResolver::new(host);

        assert_eq!(resolver.initialize().mode, ThemeMode::Light);
    }

    #[test]
    fn last_set_theme_wins() {
        let host = FakeHost::default();
        let resolver = ThemeResolver::new(host.clone());
        resolver.initialize();

        resolver.set_theme(ThemeMode::Dark);
        resolver.set_theme(ThemeMode::Light);
        host.0.prefers_dark.set(true);
        resolver.set_theme(ThemeMode::System);

        assert_eq!(resolver.snapshot().applied, AppliedTheme::Dark);
        assert_eq!(host.stored().as_deref(), Some("system"));

        host.0.prefers_dark.set(false);
        resolver.set_theme(ThemeMode::Dark);
        assert_eq!(resolver.snapshot().applied, AppliedTheme::Dark);
        assert_eq!(host.stored().as_deref(), Some("dark"));
    }

    #[test]
    fn toggle_twice_restores_applied_theme() {
        let host = FakeHost::with_stored("system");
        host.0.prefers_dark.set(true);
        let resolver = ThemeResolver::new(host.clone());
        let before = resolver.initialize().applied;

        let once = resolver.toggle_theme();
        assert_eq!(once.mode, ThemeMode::Light);
        assert_eq!(host.stored().as_deref(), Some("light"));

        let twice = resolver.toggle_theme();
        assert_eq!(twice.applied, before);
        assert_eq!(twice.mode, ThemeMode::Dark);
    }

    #[test]
    fn os_change_updates_applied_but_not_preference() {
        let host = FakeHost::default();
        let resolver = ThemeResolver::new(host.clone());
        resolver.initialize();
        resolver.set_theme(ThemeMode::System);
        assert_eq!(resolver.snapshot().applied, AppliedTheme::Light);

        host.os_switch(true);

        let snapshot = resolver.snapshot();
        assert_eq!(snapshot.mode, ThemeMode::System);
        assert_eq!(snapshot.applied, AppliedTheme::Dark);
        assert_eq!(host.root(), Some(AppliedTheme::Dark));
        assert_eq!(host.stored().as_deref(), Some("system"));
    }

    #[test]
    fn leaving_system_mode_releases_the_os_listener() {
        let host = FakeHost::default();
        let resolver = ThemeResolver::new(host.clone());
        resolver.set_theme(ThemeMode::System);
        assert!(host.watching());

        resolver.set_theme(ThemeMode::Light);
        assert!(!host.watching());

        host.os_switch(true);
        assert_eq!(resolver.snapshot().applied, AppliedTheme::Light);
    }

    #[test]
    fn dispose_releases_the_os_listener() {
        let host = FakeHost::with_stored("system");
        let resolver = ThemeResolver::new(host.clone());
        resolver.initialize();

        resolver.dispose();

        assert!(!host.watching());
    }

    #[test]
    fn transition_marker_is_cleared_by_the_latest_change_only() {
        let host = FakeHost::default();
        let resolver = ThemeResolver::new(host.clone());
        resolver.initialize();

        resolver.set_theme(ThemeMode::Dark);
        assert!(host.0.transitioning.get());
        assert_eq!(host.0.deferred.borrow()[0].0, config::THEME_TRANSITION_MS);

        // First timer fires after a second change: marker stays.
        let first = host.0.deferred.borrow_mut().remove(0);
        resolver.set_theme(ThemeMode::Light);
        (first.1)();
        assert!(host.0.transitioning.get());

        host.run_timers();
        assert!(!host.0.transitioning.get());
    }

    #[test]
    fn observer_sees_every_change() {
        let host = FakeHost::with_stored("system");
        let resolver = ThemeResolver::new(host.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));
        {
            let seen = Rc::clone(&seen);
            resolver.set_observer(move |snapshot| seen.borrow_mut().push(snapshot.applied));
        }

        resolver.initialize();
        host.os_switch(true);
        resolver.toggle_theme();

        assert_eq!(
            *seen.borrow(),
            vec![AppliedTheme::Light, AppliedTheme::Dark, AppliedTheme::Light]
        );
    }
}
