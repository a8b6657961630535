use gloo_timers::callback::Timeout;
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{
    window, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
};
use yew::prelude::*;

use super::driver::{attach, RevealHost, RevealObserver};
use super::RevealOptions;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// [`RevealHost`] backed by `IntersectionObserver` and `gloo-timers`.
struct BrowserReveal;

/// Keeps the JS callback alive for as long as the observer is held.
struct BrowserObserver {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl RevealObserver for BrowserObserver {
    fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl RevealHost for BrowserReveal {
    type Target = Element;
    type Observer = BrowserObserver;
    type Timer = Timeout;

    fn observer_supported(&self) -> bool {
        window().map_or(false, |w| {
            Reflect::has(&w, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
        })
    }

    fn observe(
        &self,
        target: &Element,
        options: &RevealOptions,
        on_report: Box<dyn Fn(bool, f64)>,
    ) -> Option<BrowserObserver> {
        let callback = Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    on_report(entry.is_intersecting(), entry.intersection_ratio());
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                observer.observe(target);
                Some(BrowserObserver {
                    observer,
                    _callback: callback,
                })
            }
            Err(e) => {
                warn!("Could not create IntersectionObserver: {:?}", e);
                None
            }
        }
    }

    fn arm_timer(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

/// True while `node` meets the reveal criteria in `options`.
///
/// Unmounting the element (or changing `options`) cancels the pending delay
/// and disconnects the observer before anything else runs. A trigger-once
/// element that has been shown stays shown when `options` change.
#[hook]
pub fn use_reveal(node: NodeRef, options: RevealOptions) -> bool {
    let visible = use_state_eq(|| false);

    {
        let set_visible = visible.setter();
        let already_visible = *visible;
        use_effect_with_deps(
            move |(node, options)| {
                let target = node.cast::<Element>();
                let driver = attach(
                    BrowserReveal,
                    target.as_ref(),
                    options,
                    already_visible,
                    move |v| set_visible.set(v),
                );
                move || {
                    if let Some(driver) = driver {
                        driver.detach();
                    }
                }
            },
            (node, options),
        );
    }

    *visible
}
