//! Guest identity normalization.
//!
//! The customer matcher deduplicates guests by email first, then phone.
//! Both keys are normalized here so "Ada@Example.com " and
//! "ada@example.com" resolve to the same customer, and so the partial
//! unique indexes on `customers` see canonical values.

/// Normalize an email for matching: trim and lowercase.
///
/// Returns `None` when nothing usable remains, so an absent or blank
/// email never participates in matching (and never erases a stored
/// value during merge).
pub fn normalize_email(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Normalize a phone number for matching: keep digits and a leading
/// `+`, drop spacing/punctuation.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    for (idx, ch) in raw.trim().char_indices() {
        if ch.is_ascii_digit() || (idx == 0 && ch == '+') {
            out.push(ch);
        }
    }
    if out.is_empty() || out == "+" {
        return None;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize_email("  Ada@Example.COM "),
            Some("ada@example.com".to_string())
        );
        assert_eq!(normalize_email("   "), None);
        assert_eq!(normalize_email(""), None);
    }

    #[test]
    fn phone_keeps_digits_and_leading_plus() {
        assert_eq!(
            normalize_phone("+49 (151) 123-4567"),
            Some("+491511234567".to_string())
        );
        assert_eq!(normalize_phone("0151 123 4567"), Some("01511234567".to_string()));
        assert_eq!(normalize_phone("+"), None);
        assert_eq!(normalize_phone("n/a"), None);
    }
}
