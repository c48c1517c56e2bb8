//! Email format validation
//!
//! A deliberately loose structural check: one `@`, non-empty local part, and
//! a domain containing a dot. Deliverability is not our problem here.

/// Check whether a string is plausibly an email address
#[must_use]
pub fn is_valid_email_format(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() || s.contains(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}
