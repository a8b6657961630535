use chrono::Datelike;
use yew::prelude::*;

use crate::catalog::{self, PricingTier, Service};
use crate::components::{
    carousel::Carousel, contact_form::ContactForm, modal::Modal, reveal::Reveal,
    theme_toggle::ThemedLogo,
};

#[function_component(Hero)]
fn hero() -> Html {
    html! {
        <header class="hero" id="top">
            <ThemedLogo
                light_src="/assets/logo-light.svg"
                dark_src="/assets/logo-dark.svg"
                alt="Northpeak Studio"
            />
            <Reveal class="hero-copy">
                <h1>{"Websites that bring you customers"}</h1>
                <p>{"We design, build and look after websites for small businesses."}</p>
                <a class="btn btn-primary" href="#contact">{"Start a project"}</a>
            </Reveal>
        </header>
    }
}

fn service_card(index: usize, service: &Service) -> Html {
    html! {
        <Reveal class="service-card" delay_ms={index as u32 * 100}>
            <img src={service.icon} alt="" aria-hidden="true" />
            <h3>{service.name}</h3>
            <p>{service.summary}</p>
        </Reveal>
    }
}

#[derive(Properties, PartialEq)]
struct PricingProps {
    on_choose: Callback<String>,
}

#[function_component(Pricing)]
fn pricing(props: &PricingProps) -> Html {
    let card = |index: usize, tier: &PricingTier| {
        let choose = {
            let on_choose = props.on_choose.clone();
            let name = tier.name.to_string();
            Callback::from(move |_: MouseEvent| on_choose.emit(name.clone()))
        };
        html! {
            <Reveal class={classes!("pricing-card", tier.featured.then(|| "featured"))} delay_ms={index as u32 * 150}>
                <h3>{tier.name}</h3>
                <p class="price">{tier.price}<span>{format!(" {}", tier.cadence)}</span></p>
                <ul>
                    { tier.features.iter().map(|f| html! { <li>{*f}</li> }).collect::<Html>() }
                </ul>
                <button class="btn btn-primary" onclick={choose}>{"Choose"}</button>
            </Reveal>
        }
    };

    html! {
        <section class="pricing" id="pricing">
            <h2>{"Pricing"}</h2>
            <div class="pricing-grid">
                { catalog::PRICING.iter().enumerate().map(|(i, t)| card(i, t)).collect::<Html>() }
            </div>
        </section>
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    let year = chrono::Local::now().year();
    html! {
        <footer class="footer">
            <p>{format!("© {} Northpeak Studio", year)}</p>
        </footer>
    }
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let chosen_package = use_state(|| None::<String>);

    let on_choose = {
        let chosen_package = chosen_package.clone();
        Callback::from(move |name: String| chosen_package.set(Some(name)))
    };
    let close_modal = {
        let chosen_package = chosen_package.clone();
        Callback::from(move |_: ()| chosen_package.set(None))
    };

    html! {
        <main class="landing">
            <Hero />

            <section class="services" id="services">
                <Reveal><h2>{"What we build"}</h2></Reveal>
                <div class="services-grid">
                    { catalog::SERVICES.iter().enumerate().map(|(i, s)| service_card(i, s)).collect::<Html>() }
                </div>
            </section>

            <Pricing {on_choose} />

            <section class="portfolio" id="work">
                <Reveal once={false}><h2>{"Recent work"}</h2></Reveal>
                <Carousel slides={catalog::portfolio()} />
            </section>

            <section class="contact" id="contact">
                <Reveal delay_ms={150}>
                    <h2>{"Let's talk"}</h2>
                    <ContactForm />
                </Reveal>
            </section>

            <Modal
                open={chosen_package.is_some()}
                title={(*chosen_package).clone().unwrap_or_default()}
                on_close={close_modal.clone()}
            >
                <ContactForm package={(*chosen_package).clone()} on_sent={close_modal} />
            </Modal>

            <Footer />
        </main>
    }
}
