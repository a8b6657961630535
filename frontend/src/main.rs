use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, MouseEvent};
use yew::prelude::*;

mod catalog;
mod config;
mod contact;
mod reveal;
mod theme;
mod components {
    pub mod carousel;
    pub mod contact_form;
    pub mod modal;
    pub mod reveal;
    pub mod theme_toggle;
}
mod pages {
    pub mod landing;
}

use components::theme_toggle::{ThemeSelect, ThemeToggle};
use pages::landing::Landing;
use theme::ThemeProvider;

const NAV_LINKS: &[(&str, &str)] = &[
    ("#services", "Services"),
    ("#pricing", "Pricing"),
    ("#work", "Work"),
    ("#contact", "Contact"),
];

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state_eq(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(
            move |_| {
                let listener = window().map(|window| {
                    let scroll_window = window.clone();
                    let scroll_callback = Closure::wrap(Box::new(move || {
                        let scroll_y = scroll_window.scroll_y().unwrap_or(0.0);
                        is_scrolled.set(scroll_y > 80.0);
                    }) as Box<dyn FnMut()>);
                    let _ = window.add_event_listener_with_callback(
                        "scroll",
                        scroll_callback.as_ref().unchecked_ref(),
                    );
                    (window, scroll_callback)
                });

                move || {
                    if let Some((window, scroll_callback)) = listener {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            scroll_callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <div class="nav-content">
                <a href="#top" class="nav-logo">{"northpeak"}</a>

                <button class="burger-menu" aria-label="Menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    {
                        NAV_LINKS.iter().map(|(href, label)| html! {
                            <a class="nav-link" href={*href} onclick={close_menu.clone()}>{*label}</a>
                        }).collect::<Html>()
                    }
                    <ThemeSelect />
                    <ThemeToggle />
                </div>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <ThemeProvider>
            <Nav />
            <Landing />
        </ThemeProvider>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
