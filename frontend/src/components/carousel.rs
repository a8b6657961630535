use std::rc::Rc;

use web_sys::KeyboardEvent;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config;

#[derive(Clone, PartialEq)]
pub struct Slide {
    pub title: &'static str,
    pub image: &'static str,
    pub caption: &'static str,
}

pub enum CarouselAction {
    Next,
    Prev,
    GoTo(usize),
}

impl CarouselAction {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(CarouselAction::Next),
            "ArrowLeft" => Some(CarouselAction::Prev),
            "Home" => Some(CarouselAction::GoTo(0)),
            _ => None,
        }
    }
}

/// Current slide; wraps around at both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarouselState {
    pub len: usize,
    pub index: usize,
}

impl CarouselState {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    fn apply(self, action: CarouselAction) -> Self {
        if self.len == 0 {
            return self;
        }
        let index = match action {
            CarouselAction::Next => (self.index + 1) % self.len,
            CarouselAction::Prev => (self.index + self.len - 1) % self.len,
            CarouselAction::GoTo(i) => i.min(self.len - 1),
        };
        Self { index, ..self }
    }
}

impl Reducible for CarouselState {
    type Action = CarouselAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(self.apply(action))
    }
}

#[derive(Properties, PartialEq)]
pub struct CarouselProps {
    pub slides: Vec<Slide>,
    #[prop_or(config::CAROUSEL_INTERVAL_MS)]
    pub interval_ms: u32,
}

#[function_component(Carousel)]
pub fn carousel(props: &CarouselProps) -> Html {
    let len = props.slides.len();
    let state = use_reducer_eq(|| CarouselState::new(len));
    let paused = use_state_eq(|| false);

    {
        let state = state.clone();
        // 0 stops the interval
        let millis = if *paused || len < 2 { 0 } else { props.interval_ms };
        use_interval(move || state.dispatch(CarouselAction::Next), millis);
    }

    let onkeydown = {
        let state = state.clone();
        Callback::from(move |e: KeyboardEvent| {
            if let Some(action) = CarouselAction::from_key(&e.key()) {
                e.prevent_default();
                state.dispatch(action);
            }
        })
    };

    let pause = {
        let paused = paused.clone();
        Callback::from(move |_: ()| paused.set(true))
    };
    let resume = {
        let paused = paused.clone();
        Callback::from(move |_: ()| paused.set(false))
    };

    let prev = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(CarouselAction::Prev))
    };
    let next = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(CarouselAction::Next))
    };

    html! {
        <div class="carousel" tabindex="0" role="region" aria-roledescription="carousel"
            {onkeydown}
            onmouseenter={pause.reform(|_: MouseEvent| ())}
            onmouseleave={resume.reform(|_: MouseEvent| ())}
            onfocusin={pause.reform(|_: FocusEvent| ())}
            onfocusout={resume.reform(|_: FocusEvent| ())}
        >
            <div class="carousel-track" style={format!("transform: translateX(-{}%);", state.index * 100)}>
                {
                    props.slides.iter().enumerate().map(|(i, slide)| html! {
                        <figure class={classes!("carousel-slide", (i == state.index).then(|| "active"))}
                            aria-hidden={(i != state.index).to_string()}>
                            <img src={slide.image} alt={slide.title} loading="lazy" />
                            <figcaption>
                                <h3>{slide.title}</h3>
                                <p>{slide.caption}</p>
                            </figcaption>
                        </figure>
                    }).collect::<Html>()
                }
            </div>
            <button class="carousel-prev" aria-label="Previous project" onclick={prev}>{"‹"}</button>
            <button class="carousel-next" aria-label="Next project" onclick={next}>{"›"}</button>
            <div class="carousel-dots">
                {
                    (0..len).map(|i| {
                        let state = state.clone();
                        html! {
                            <button
                                class={classes!("carousel-dot", (i == state.index).then(|| "active"))}
                                aria-label={format!("Go to project {}", i + 1)}
                                onclick={Callback::from(move |_: MouseEvent| state.dispatch(CarouselAction::GoTo(i)))}
                            />
                        }
                    }).collect::<Html>()
                }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_in_both_directions() {
        let state = CarouselState::new(3);
        assert_eq!(state.apply(CarouselAction::Prev).index, 2);
        let last = state.apply(CarouselAction::GoTo(2));
        assert_eq!(last.apply(CarouselAction::Next).index, 0);
    }

    #[test]
    fn go_to_clamps_out_of_range() {
        assert_eq!(CarouselState::new(4).apply(CarouselAction::GoTo(9)).index, 3);
    }

    #[test]
    fn empty_carousel_ignores_actions() {
        let state = CarouselState::new(0);
        assert_eq!(state.apply(CarouselAction::Next), state);
        assert_eq!(state.apply(CarouselAction::Prev), state);
    }

    #[test]
    fn arrow_keys_map_to_navigation() {
        assert!(matches!(CarouselAction::from_key("ArrowRight"), Some(CarouselAction::Next)));
        assert!(matches!(CarouselAction::from_key("ArrowLeft"), Some(CarouselAction::Prev)));
        assert!(CarouselAction::from_key("Enter").is_none());
    }
}
