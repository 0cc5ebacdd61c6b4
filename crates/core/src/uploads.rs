//! Upload naming rules for item images.
//!
//! Stored files are content-addressed: the key is the first
//! [`DIGEST_PREFIX_LEN`] hex characters of the SHA-256 of the bytes, followed
//! by the sanitized original filename. Two different images uploaded under the
//! same name therefore never overwrite each other, while re-uploading the same
//! image resolves to the same key.

use sha2::{Digest, Sha256};

/// Hex characters of the content digest kept in a storage key.
pub const DIGEST_PREFIX_LEN: usize = 16;

/// Name used when sanitization leaves nothing behind.
pub const FALLBACK_FILENAME: &str = "upload";

/// Longest sanitized filename kept in a key.
pub const MAX_FILENAME_LEN: usize = 120;

/// Reduce a client-supplied filename to a safe single path component.
///
/// Directory components (either separator style) are dropped, whitespace
/// becomes `_`, and only ASCII alphanumerics, `.`, `-` and `_` survive.
/// Leading dots and underscores are stripped so the result can never be a
/// hidden file or `..`.
///
/// ```
/// use gearlist_core::uploads::sanitize_filename;
///
/// assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
/// assert_eq!(sanitize_filename("My Tent (2).JPG"), "My_Tent_2.JPG");
/// ```
pub fn sanitize_filename(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("");

    let mut cleaned = String::with_capacity(base.len());
    for ch in base.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
            cleaned.push(ch);
        } else if ch.is_whitespace() && !cleaned.ends_with('_') {
            cleaned.push('_');
        }
    }

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }

    let mut name = trimmed.to_string();
    if name.len() > MAX_FILENAME_LEN {
        // Keep the extension when truncating.
        let ext = name
            .rfind('.')
            .map(|i| name[i..].to_string())
            .filter(|e| e.len() < MAX_FILENAME_LEN / 2)
            .unwrap_or_default();
        name.truncate(MAX_FILENAME_LEN - ext.len());
        name.push_str(&ext);
    }
    name
}

/// Content-addressed storage key for an upload.
pub fn storage_key(content: &[u8], original_filename: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(content));
    format!(
        "{}_{}",
        &digest[..DIGEST_PREFIX_LEN],
        sanitize_filename(original_filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_components_are_stripped() {
        assert_eq!(sanitize_filename("/var/www/tent.png"), "tent.png");
        assert_eq!(sanitize_filename("C:\\Users\\me\\tent.png"), "tent.png");
        assert_eq!(sanitize_filename(".."), FALLBACK_FILENAME);
        assert_eq!(sanitize_filename("dir/"), FALLBACK_FILENAME);
    }

    #[test]
    fn unsafe_characters_are_removed() {
        assert_eq!(sanitize_filename("stöve  <b>.gif"), "stve_b.gif");
        assert_eq!(sanitize_filename(".hidden"), "hidden");
        assert_eq!(sanitize_filename("***"), FALLBACK_FILENAME);
    }

    #[test]
    fn long_names_keep_their_extension() {
        let long = format!("{}.jpeg", "a".repeat(300));
        let name = sanitize_filename(&long);
        assert_eq!(name.len(), MAX_FILENAME_LEN);
        assert!(name.ends_with(".jpeg"));
    }

    #[test]
    fn key_depends_on_content() {
        let a = storage_key(b"first image", "tent.jpg");
        let b = storage_key(b"second image", "tent.jpg");
        assert_ne!(a, b);
        assert!(a.ends_with("_tent.jpg"));
        assert_eq!(a.len(), DIGEST_PREFIX_LEN + 1 + "tent.jpg".len());
    }

    #[test]
    fn same_content_and_name_give_same_key() {
        assert_eq!(
            storage_key(b"bytes", "../x/tent.jpg"),
            storage_key(b"bytes", "tent.jpg")
        );
    }
}
