use yew::prelude::*;

use super::{BrowserHost, ResolvedTheme, ThemeMode, ThemeResolver, ThemeSnapshot};

/// What components get from [`use_theme`].
#[derive(Clone)]
pub struct ThemeHandle {
    snapshot: Option<ThemeSnapshot>,
    resolver: ThemeResolver<BrowserHost>,
}

impl PartialEq for ThemeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot == other.snapshot && self.resolver.same_as(&other.resolver)
    }
}

impl ThemeHandle {
    /// `Unresolved` on the first render, before storage has been read.
    pub fn resolved(&self) -> ResolvedTheme {
        self.snapshot.into()
    }

    pub fn mode(&self) -> Option<ThemeMode> {
        self.snapshot.map(|s| s.mode)
    }

    pub fn set_theme(&self, mode: ThemeMode) {
        self.resolver.set_theme(mode);
    }

    pub fn toggle(&self) {
        self.resolver.toggle_theme();
    }
}

#[derive(Properties, PartialEq)]
pub struct ThemeProviderProps {
    pub children: Children,
}

#[function_component(ThemeProvider)]
pub fn theme_provider(props: &ThemeProviderProps) -> Html {
    let snapshot = use_state(|| None::<ThemeSnapshot>);
    let resolver = use_memo(|_| ThemeResolver::new(BrowserHost), ());

    {
        let resolver = resolver.clone();
        let set_snapshot = snapshot.setter();
        use_effect_with_deps(
            move |_| {
                resolver.set_observer(move |s| set_snapshot.set(Some(s)));
                resolver.initialize();
                move || resolver.dispose()
            },
            (), // Once per app lifetime
        );
    }

    let handle = ThemeHandle {
        snapshot: *snapshot,
        resolver: (*resolver).clone(),
    };

    html! {
        <ContextProvider<ThemeHandle> context={handle}>
            { props.children.clone() }
        </ContextProvider<ThemeHandle>>
    }
}

#[hook]
pub fn use_theme() -> ThemeHandle {
    use_context::<ThemeHandle>()
        .expect("Theme context not found. Wrap the app in <ThemeProvider>")
}
