//! PII redaction for log output.
//!
//! Player emails pass through registration and the notification path; any
//! log line that may contain one goes through [`Redacted`].

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // vetted literal
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
});

/// Mask every email in `input`: keep the first character of the local part
/// and the full domain.
pub fn redact(input: &str) -> String {
    EMAIL_REGEX
        .replace_all(input, |caps: &regex::Captures| {
            let full = &caps[0];
            match full.find('@') {
                Some(0) | None => full.to_string(),
                Some(at) => {
                    let first = full[..at].chars().next().unwrap_or('*');
                    format!("{first}***{}", &full[at..])
                }
            }
        })
        .into_owned()
}

/// Display wrapper that redacts on format.
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
