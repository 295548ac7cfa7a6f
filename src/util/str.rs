pub(crate) trait StrExt {
    fn contains_ignore_case(&self, needle: &str) -> bool;
}

impl StrExt for str {
    fn contains_ignore_case(&self, needle: &str) -> bool {
        self.to_ascii_lowercase()
            .contains(&needle.to_ascii_lowercase())
    }
}

/// Returns `true` if `tokens` (whitespace-separated) contains `token`.
///
/// Used for `properties` and `epub:type` attribute values.
pub(crate) fn has_token(tokens: &str, token: &str) -> bool {
    tokens.split_ascii_whitespace().any(|t| t == token)
}
