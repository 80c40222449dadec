use crate::error::ApiError;

/// Non-empty, ASCII letters and digits only.
pub fn require_alphanumeric(label: &str, value: &str) -> Result<(), ApiError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ApiError::BadInput(format!("{label} must be alphanumeric")))
    }
}

pub fn require_min_length(label: &str, value: &str, min: usize) -> Result<(), ApiError> {
    if value.chars().count() >= min {
        Ok(())
    } else {
        Err(ApiError::BadInput(format!(
            "{label} must be at least {min} characters"
        )))
    }
}

/// HTML-entity-escape user content before it is stored, so it is inert when
/// a client later drops it into the DOM.
pub fn escape_for_display(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphanumeric_accepts_letters_and_digits() {
        assert!(require_alphanumeric("username", "alice42").is_ok());
        assert!(require_alphanumeric("username", "").is_err());
        assert!(require_alphanumeric("username", "al ice").is_err());
        assert!(require_alphanumeric("username", "alice!").is_err());
        assert!(require_alphanumeric("username", "алиса").is_err());
    }

    #[test]
    fn min_length_counts_chars() {
        assert!(require_min_length("password", "12345678", 8).is_ok());
        assert!(require_min_length("password", "1234567", 8).is_err());
        // multi-byte characters count once
        assert!(require_min_length("password", "pässwörd", 8).is_ok());
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape_for_display("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;&#x2F;script&gt;"
        );
        assert_eq!(escape_for_display("a & b"), "a &amp; b");
        assert_eq!(escape_for_display("plain text"), "plain text");
    }
}
