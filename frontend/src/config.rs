
#[cfg(debug_assertions)]
pub fn get_form_endpoint() -> &'static str {
    "http://localhost:3001/f/dev"  // Local echo endpoint while developing
}

#[cfg(not(debug_assertions))]
pub fn get_form_endpoint() -> &'static str {
    "https://formspree.io/f/mzdaogwo"
}

pub const CALENDAR_LINK: &str = "https://cal.com/nik-thakur/quick-intro";

/// Local storage key of the submission rate-limit ledger. Shared by every
/// form on the device.
pub const LEDGER_KEY: &str = "opportune_submission_ledger";

/// Card width plus gap, used until the first card has been measured.
pub const FALLBACK_CARD_STEP: f64 = 504.0;
pub const CARD_GAP: f64 = 24.0;

/// Scheduling link, optionally prefilled with the visitor's details.
pub fn calendar_link(name: Option<&str>, email: Option<&str>) -> String {
    let mut params = Vec::new();
    if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
        params.push(format!("name={}", urlencoding::encode(name.trim())));
    }
    if let Some(email) = email.filter(|e| !e.trim().is_empty()) {
        params.push(format!("email={}", urlencoding::encode(email.trim())));
    }
    if params.is_empty() {
        CALENDAR_LINK.to_string()
    } else {
        format!("{}?{}", CALENDAR_LINK, params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::{calendar_link, CALENDAR_LINK};

    #[test]
    fn bare_link_without_details() {
        assert_eq!(calendar_link(None, Some("  ")), CALENDAR_LINK);
    }

    #[test]
    fn prefill_is_url_encoded() {
        assert_eq!(
            calendar_link(Some("Jane Smith"), Some("jane+x@acme.com")),
            format!("{}?name=Jane%20Smith&email=jane%2Bx%40acme.com", CALENDAR_LINK)
        );
    }
}
