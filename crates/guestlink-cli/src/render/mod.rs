use guestlink_core::{phone_digits, Resolution, ResolvedGroup, SkipReason};
use serde::Serialize;
use url::form_urlencoded;

mod html;

pub use html::render_html;

const WHATSAPP_BASE_URL: &str = "https://wa.me/";
const NAME_PLACEHOLDER: &str = "{name}";
const NAMES_PLACEHOLDER: &str = "{names}";

#[derive(Debug, Clone)]
pub struct Templates {
    pub individual: String,
    pub group: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvitationReport {
    pub generated_at: String,
    pub invitations: Vec<Invitation>,
    pub user_skipped: Vec<String>,
    pub not_found: Vec<String>,
    pub no_phone: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Invitation {
    pub entry: String,
    pub is_group: bool,
    pub message: String,
    pub contacts: Vec<InvitationContact>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvitationContact {
    pub name: String,
    pub confidence: f64,
    pub phone: String,
    pub link: String,
}

pub fn build_report(
    resolution: &Resolution,
    templates: &Templates,
    generated_at: String,
) -> InvitationReport {
    let invitations = resolution
        .resolved
        .iter()
        .map(|group| build_invitation(group, templates))
        .collect();

    let names = |reason: SkipReason| -> Vec<String> {
        resolution
            .skipped_with(reason)
            .map(|record| record.name.clone())
            .collect()
    };

    InvitationReport {
        generated_at,
        invitations,
        user_skipped: names(SkipReason::UserSkipped),
        not_found: names(SkipReason::NoMatches),
        no_phone: names(SkipReason::NoPhone),
    }
}

fn build_invitation(group: &ResolvedGroup, templates: &Templates) -> Invitation {
    let message = fill_template(templates, group.is_group, &group.original_entry);
    let contacts = group
        .contacts
        .iter()
        .map(|contact| InvitationContact {
            name: contact.matched.name.clone(),
            confidence: contact.matched.confidence,
            phone: contact.phone.clone(),
            link: whatsapp_link(&contact.phone, &message),
        })
        .collect();

    Invitation {
        entry: group.original_entry.clone(),
        is_group: group.is_group,
        message,
        contacts,
    }
}

/// Picks the group or individual template and fills its first placeholder
/// with the guest-list entry as written.
pub fn fill_template(templates: &Templates, is_group: bool, entry: &str) -> String {
    let template = if is_group {
        &templates.group
    } else {
        &templates.individual
    };
    if template.contains(NAMES_PLACEHOLDER) {
        template.replacen(NAMES_PLACEHOLDER, entry, 1)
    } else {
        template.replacen(NAME_PLACEHOLDER, entry, 1)
    }
}

pub fn whatsapp_link(phone: &str, message: &str) -> String {
    let text: String = form_urlencoded::byte_serialize(message.as_bytes()).collect();
    format!("{WHATSAPP_BASE_URL}{}?text={text}", phone_digits(phone))
}

pub fn confidence_label(confidence: f64) -> &'static str {
    if confidence >= 0.8 {
        "high"
    } else if confidence >= 0.5 {
        "medium"
    } else {
        "low"
    }
}
