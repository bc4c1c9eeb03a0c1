/// Ensures the token carries a `Bearer ` prefix exactly once.
///
/// Only `Bearer ` and `bearer ` are recognized as an existing prefix; other
/// casings such as `BEARER ` are prefixed again.
pub fn normalize_token(raw: &str) -> String {
    let token = raw.trim();
    if token.starts_with("Bearer ") || token.starts_with("bearer ") {
        token.to_string()
    } else {
        format!("Bearer {token}")
    }
}
