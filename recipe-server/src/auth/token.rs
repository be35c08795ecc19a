//! Auth token keys

use rand::RngCore;

/// Random bytes per key; hex encoding doubles the length
const KEY_BYTES: usize = 20;

/// Fresh 40-character hex key
pub fn generate_key() -> String {
    let mut bytes = [0u8; KEY_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Pull the key out of an `Authorization` header value
///
/// Accepts `Token <key>` and `Bearer <key>`. Returns `None` for any other
/// scheme or an empty key.
pub fn extract_from_header(header: &str) -> Option<&str> {
    let (scheme, key) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("token") && !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let key = key.trim();
    if key.is_empty() || key.contains(' ') {
        return None;
    }
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_key_shape() {
        let key = generate_key();
        assert_eq!(key.len(), KEY_BYTES * 2);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(key, generate_key());
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(extract_from_header("Token abc123"), Some("abc123"));
        assert_eq!(extract_from_header("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_from_header("token abc123"), Some("abc123"));
        assert_eq!(extract_from_header("Basic abc123"), None);
        assert_eq!(extract_from_header("Token"), None);
        assert_eq!(extract_from_header("Token "), None);
        assert_eq!(extract_from_header("Token a b"), None);
    }
}
