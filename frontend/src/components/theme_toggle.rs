use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::theme::{use_theme, ResolvedTheme, ThemeMode};

#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let theme = use_theme();

    let onclick = {
        let theme = theme.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            theme.toggle();
        })
    };

    let (icon, label) = match theme.resolved() {
        ResolvedTheme::Unresolved => ("", "Toggle theme"),
        ResolvedTheme::Light => ("☾", "Switch to dark theme"),
        ResolvedTheme::Dark => ("☀", "Switch to light theme"),
    };

    html! {
        <button class="theme-toggle" aria-label={label} title={label} {onclick}>
            {icon}
        </button>
    }
}

/// Three-way picker, the only place "follow system" can be chosen.
#[function_component(ThemeSelect)]
pub fn theme_select() -> Html {
    let theme = use_theme();

    let onchange = {
        let theme = theme.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(mode) = select.value().parse::<ThemeMode>() {
                theme.set_theme(mode);
            }
        })
    };

    let current = theme.mode();
    html! {
        <select class="theme-select" aria-label="Theme" {onchange} disabled={current.is_none()}>
            {
                [(ThemeMode::Light, "Light"), (ThemeMode::Dark, "Dark"), (ThemeMode::System, "System")]
                    .into_iter()
                    .map(|(mode, text)| html! {
                        <option value={mode.as_str()} selected={current == Some(mode)}>{text}</option>
                    })
                    .collect::<Html>()
            }
        </select>
    }
}

#[derive(Properties, PartialEq)]
pub struct ThemedLogoProps {
    pub light_src: AttrValue,
    pub dark_src: AttrValue,
    #[prop_or_default]
    pub alt: AttrValue,
}

/// Picks the asset matching the rendered theme. Until the theme is known
/// an empty box of the same size is shown so nothing flashes.
#[function_component(ThemedLogo)]
pub fn themed_logo(props: &ThemedLogoProps) -> Html {
    let theme = use_theme();
    let src = match theme.resolved() {
        ResolvedTheme::Unresolved => {
            return html! { <span class="logo logo-placeholder" aria-hidden="true"></span> };
        }
        ResolvedTheme::Light => props.light_src.clone(),
        ResolvedTheme::Dark => props.dark_src.clone(),
    };

    html! {
        <img class="logo" {src} alt={props.alt.clone()} />
    }
}
