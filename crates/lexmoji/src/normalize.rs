//! Lookup key canonicalization.

/// Canonicalizes a word into the key used by every lookup table.
///
/// Trims surrounding whitespace and lowercases. The operation is idempotent:
/// `normalize(&normalize(x)) == normalize(x)`.
///
/// # Example
///
/// ```
/// use lexmoji::normalize;
///
/// assert_eq!(normalize("  Chat "), "chat");
/// assert_eq!(normalize("ÉCOLE"), "école");
/// ```
pub fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}
