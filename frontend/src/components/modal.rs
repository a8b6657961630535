use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, KeyboardEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub open: bool,
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

/// The Escape listener is rebuilt whenever either of these changes.
fn escape_listener_deps(props: &ModalProps) -> (bool, Callback<()>) {
    (props.open, props.on_close.clone())
}

fn closes_on(key: &str) -> bool {
    key == "Escape"
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    // Escape closes while open, always through the latest `on_close`
    use_effect_with_deps(
        move |(open, on_close)| {
            let on_close = on_close.clone();
            let listener = if *open {
                window().and_then(|window| {
                    let keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
                        if closes_on(&e.key()) {
                            on_close.emit(());
                        }
                    }) as Box<dyn FnMut(KeyboardEvent)>);
                    window
                        .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
                        .ok()
                        .map(|_| (window, keydown))
                })
            } else {
                None
            };

            move || {
                if let Some((window, keydown)) = listener {
                    let _ = window.remove_event_listener_with_callback(
                        "keydown",
                        keydown.as_ref().unchecked_ref(),
                    );
                }
            }
        },
        escape_listener_deps(props),
    );

    if !props.open {
        return html! {};
    }

    let close_overlay = props.on_close.reform(|_: MouseEvent| ());
    let close_button = props.on_close.reform(|_: MouseEvent| ());
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="modal-overlay" onclick={close_overlay}>
            <div class="modal" role="dialog" aria-modal="true" aria-label={props.title.clone()} onclick={stop}>
                <div class="modal-header">
                    <h2>{props.title.clone()}</h2>
                    <button class="modal-close" aria-label="Close" onclick={close_button}>{"×"}</button>
                </div>
                { props.children.clone() }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(open: bool, on_close: Callback<()>) -> ModalProps {
        ModalProps {
            open,
            title: "Growth".into(),
            on_close,
            children: Children::default(),
        }
    }

    #[test]
    fn new_close_callback_rebuilds_the_escape_listener() {
        let first = Callback::from(|_: ()| ());
        let second = Callback::from(|_: ()| ());

        assert!(
            escape_listener_deps(&props(true, first.clone()))
                == escape_listener_deps(&props(true, first.clone()))
        );
        assert!(
            escape_listener_deps(&props(true, first.clone()))
                != escape_listener_deps(&props(true, second))
        );
        assert!(
            escape_listener_deps(&props(true, first.clone()))
                != escape_listener_deps(&props(false, first))
        );
    }

    #[test]
    fn only_escape_closes() {
        assert!(closes_on("Escape"));
        assert!(!closes_on("Enter"));
    }
}
