use yew::prelude::*;

use crate::reveal::{use_reveal, RevealOptions};

#[derive(Properties, PartialEq)]
pub struct RevealProps {
    #[prop_or_default]
    pub children: Children,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub delay_ms: u32,
    #[prop_or(true)]
    pub once: bool,
    #[prop_or(0.1)]
    pub threshold: f64,
}

/// Wraps children in a `div.reveal` that gains `is-visible` once scrolled into view.
#[function_component(Reveal)]
pub fn reveal(props: &RevealProps) -> Html {
    let node = use_node_ref();

    let mut options = RevealOptions::default()
        .delay(props.delay_ms)
        .threshold(props.threshold);
    if !props.once {
        options = options.replay();
    }
    let visible = use_reveal(node.clone(), options);

    html! {
        <div ref={node} class={classes!("reveal", visible.then(|| "is-visible"), props.class.clone())}>
            { props.children.clone() }
        </div>
    }
}
