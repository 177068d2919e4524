//! Redaction of secrets before they reach the log stream.
//!
//! Upstream error bodies and database messages can echo API keys or bearer
//! tokens back at us; everything logged from those sources goes through
//! [`Redacted`].

use std::fmt;

use lazy_regex::{regex, Captures, Regex};

fn email() -> &'static Regex {
    regex!(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b")
}

fn api_key() -> &'static Regex {
    regex!(r"\bsk-[A-Za-z0-9_-]{8,}")
}

fn bearer() -> &'static Regex {
    regex!(r"(?i)\bbearer\s+[A-Za-z0-9._~+/=-]+")
}

fn opaque_token() -> &'static Regex {
    regex!(r"\b[A-Za-z0-9+/]{16,}={0,2}")
}

/// Mask emails, API keys, bearer credentials and long opaque tokens.
///
/// Emails keep the first character of the local part and the whole domain.
pub fn redact(input: &str) -> String {
    let masked = email().replace_all(input, |caps: &Captures| {
        let full = &caps[0];
        match full.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                format!("{}***@{domain}", &local[..1])
            }
            _ => full.to_string(),
        }
    });
    let masked = api_key().replace_all(&masked, "[REDACTED_KEY]");
    let masked = bearer().replace_all(&masked, "Bearer [REDACTED_TOKEN]");
    opaque_token()
        .replace_all(&masked, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Formats the wrapped string through [`redact`].
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
