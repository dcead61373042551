//! Field validation shared by every form.
//!
//! These checks run before any request is sent; a violation is reported
//! inline next to the offending field and nothing reaches the network. The
//! server functions apply the same rules again.

use api::MAX_DOCUMENT_BYTES;

/// A non-empty, trimmed text field. `what` names the field in the message.
pub fn required_text(value: &str, what: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        Err(format!("{what} is required"))
    } else {
        Ok(value.to_string())
    }
}

/// A valid absolute URL.
pub fn absolute_url(value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("URL is required".to_string());
    }
    match url::Url::parse(value) {
        Ok(_) => Ok(value.to_string()),
        Err(_) => Err("Enter a valid absolute URL, e.g. https://example.com".to_string()),
    }
}

/// An optional URL: empty input is fine, anything else must parse.
pub fn optional_url(value: &str) -> Result<Option<String>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    absolute_url(value).map(Some)
}

/// A plausible email address.
pub fn email(value: &str) -> Result<String, String> {
    let value = value.trim().to_lowercase();
    if value.is_empty() || !value.contains('@') {
        Err("Please enter a valid email".to_string())
    } else {
        Ok(value)
    }
}

/// Password of acceptable length.
pub fn password(value: &str) -> Result<String, String> {
    if value.len() < 8 {
        Err("Password must be at least 8 characters".to_string())
    } else {
        Ok(value.to_string())
    }
}

/// File size against the upload ceiling. Checked before any bytes are read
/// or sent.
pub fn upload_size(size: u64, name: &str) -> Result<(), String> {
    if size > MAX_DOCUMENT_BYTES {
        Err(format!("{name} is larger than the 50 MiB upload limit"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text("  hello  ", "Title").unwrap(), "hello");
        assert_eq!(
            required_text("   ", "Title").unwrap_err(),
            "Title is required"
        );
    }

    #[test]
    fn test_absolute_url_accepts_http() {
        assert!(absolute_url("https://example.com/path?q=1").is_ok());
        assert!(absolute_url("http://localhost:8080").is_ok());
    }

    #[test]
    fn test_absolute_url_rejects_relative_and_garbage() {
        assert!(absolute_url("example.com").is_err());
        assert!(absolute_url("/relative/path").is_err());
        assert!(absolute_url("not a url").is_err());
        assert!(absolute_url("").is_err());
    }

    #[test]
    fn test_optional_url_allows_empty() {
        assert_eq!(optional_url("").unwrap(), None);
        assert_eq!(
            optional_url("https://a.example/pic.png").unwrap().as_deref(),
            Some("https://a.example/pic.png")
        );
        assert!(optional_url("nope").is_err());
    }

    #[test]
    fn test_email_lowercases() {
        assert_eq!(email("Ada@Example.COM").unwrap(), "ada@example.com");
        assert!(email("no-at-sign").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(password("1234567").is_err());
        assert!(password("12345678").is_ok());
    }

    #[test]
    fn test_upload_size_ceiling_is_exact() {
        // At the limit passes; one byte over is rejected locally.
        assert!(upload_size(MAX_DOCUMENT_BYTES, "big.bin").is_ok());
        assert!(upload_size(MAX_DOCUMENT_BYTES + 1, "big.bin").is_err());
    }
}
