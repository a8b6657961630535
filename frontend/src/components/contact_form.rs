use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::contact::{self, ContactRequest};

#[derive(Properties, PartialEq)]
pub struct ContactFormProps {
    #[prop_or_default]
    pub package: Option<String>,
    #[prop_or_default]
    pub on_sent: Callback<()>,
}

#[function_component(ContactForm)]
pub fn contact_form(props: &ContactFormProps) -> Html {
    let name = use_state(String::new);
    let email = use_state(String::new);
    let message = use_state(String::new);

    let request = ContactRequest {
        name: (*name).clone(),
        email: (*email).clone(),
        package: props.package.clone(),
        message: (*message).clone(),
    };
    let sendable = request.is_sendable();

    let on_name = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };
    let on_email = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };
    let on_message = {
        let message = message.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            message.set(input.value());
        })
    };

    let send_email = {
        let request = request.clone();
        let on_sent = props.on_sent.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            contact::open_email_draft(&request);
            on_sent.emit(());
        })
    };
    let send_whatsapp = {
        let request = request.clone();
        let on_sent = props.on_sent.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            contact::open_whatsapp(&request);
            on_sent.emit(());
        })
    };

    html! {
        <form class="contact-form">
            {
                if let Some(package) = &props.package {
                    html! { <p class="contact-package">{format!("Package: {}", package)}</p> }
                } else {
                    html! {}
                }
            }
            <label>
                {"Name"}
                <input type="text" value={(*name).clone()} oninput={on_name} />
            </label>
            <label>
                {"Email"}
                <input type="email" value={(*email).clone()} oninput={on_email} />
            </label>
            <label>
                {"Tell us about your project"}
                <textarea rows="5" value={(*message).clone()} oninput={on_message} />
            </label>
            <div class="contact-actions">
                <button class="btn btn-primary" disabled={!sendable} onclick={send_email}>
                    {"Send email"}
                </button>
                <button class="btn btn-whatsapp" disabled={!sendable} onclick={send_whatsapp}>
                    {"Message on WhatsApp"}
                </button>
            </div>
        </form>
    }
}
