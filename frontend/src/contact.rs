use log::{info, warn};
use web_sys::window;

use crate::config;

/// What the visitor typed into the contact form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub package: Option<String>,
    pub message: String,
}

impl ContactRequest {
    pub fn is_sendable(&self) -> bool {
        !self.message.trim().is_empty()
    }

    pub fn subject(&self) -> String {
        match &self.package {
            Some(package) => format!("Project inquiry: {}", package),
            None => "Project inquiry".to_string(),
        }
    }

    /// Plain-text body; blank fields are left out.
    pub fn body(&self) -> String {
        let mut lines = Vec::new();
        if !self.name.trim().is_empty() {
            lines.push(format!("Name: {}", self.name.trim()));
        }
        if !self.email.trim().is_empty() {
            lines.push(format!("Email: {}", self.email.trim()));
        }
        if let Some(package) = &self.package {
            lines.push(format!("Package: {}", package));
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(self.message.trim().to_string());
        lines.join("\n")
    }
}

pub fn mailto_link(recipient: &str, request: &ContactRequest) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        urlencoding::encode(&request.subject()),
        urlencoding::encode(&request.body())
    )
}

/// wa.me wants the number as bare digits.
pub fn whatsapp_link(number: &str, request: &ContactRequest) -> String {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    let text = format!("{}\n\n{}", request.subject(), request.body());
    format!("https://wa.me/{}?text={}", digits, urlencoding::encode(&text))
}

pub fn open_email_draft(request: &ContactRequest) {
    let link = mailto_link(config::CONTACT_EMAIL, request);
    if let Some(window) = window() {
        info!("Opening email draft");
        if let Err(e) = window.location().set_href(&link) {
            warn!("Could not open mail client: {:?}", e);
        }
    }
}

pub fn open_whatsapp(request: &ContactRequest) {
    let link = whatsapp_link(config::WHATSAPP_NUMBER, request);
    if let Some(window) = window() {
        info!("Opening WhatsApp");
        if let Err(e) = window.open_with_url_and_target(&link, "_blank") {
            warn!("Could not open WhatsApp: {:?}", e);
        }
    }
}
