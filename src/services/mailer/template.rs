const VERIFY_EMAIL_HTML: &str = include_str!("../../../templates/verify_email.html");
const VERIFY_URL_PLACEHOLDER: &str = "{{verify_url}}";

/// `base` + `token`, concatenated as-is.
pub fn verification_link(base: &str, token: &str) -> String {
    format!("{}{}", base, token)
}

pub fn render_verification_email(link: &str) -> String {
    VERIFY_EMAIL_HTML.replace(VERIFY_URL_PLACEHOLDER, &escape_attribute(link))
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
