use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Shown in links when no business WhatsApp number is configured.
pub const CONTACT_PLACEHOLDER: &str = "<your-number>";

/// Unreserved characters plus `/` stay literal; everything else is escaped,
/// so spaces become `%20`.
const TEXT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub whatsapp_link: String,
    pub auto_reply: String,
}

pub fn build_confirmation(
    full_name: &str,
    device_type: &str,
    brand_model: Option<&str>,
    service_requested: &str,
    contact: &str,
) -> Confirmation {
    let device = match brand_model {
        Some(brand) if !brand.is_empty() => format!("{device_type} {brand}"),
        _ => device_type.to_string(),
    };
    let text = format!(
        "Hi CampusClean — Confirm Booking for {device}. Service: {service_requested}. Name: {full_name}."
    );
    let whatsapp_link = format!(
        "https://wa.me/{contact}?text={}",
        utf8_percent_encode(&text, TEXT_ENCODE_SET)
    );

    let auto_reply = format!(
        "Thanks {full_name}! We received your request for a {service_requested} on your {device_type}. \
         Please confirm & pay via WhatsApp: {whatsapp_link} \
         Payment via mobile money on pickup. We will reply with pickup slots shortly."
    );

    Confirmation {
        whatsapp_link,
        auto_reply,
    }
}
