//! `${VAR}` and `${VAR:-default}` expansion for raw config text.

/// Expand placeholders from the process environment.
///
/// Unresolved placeholders without a default are left as-is so the parser
/// reports them in context.
pub fn substitute_env(input: &str) -> String {
    substitute_env_with(input, |name| std::env::var(name).ok())
}

/// Expand placeholders using a custom lookup, so tests need not touch the
/// process environment.
pub fn substitute_env_with(input: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find('}') else {
            // Unterminated: keep the remainder verbatim.
            out.push_str(&rest[start..]);
            return out;
        };

        let expr = &after[..end];
        let (name, default) = match expr.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (expr, None),
        };

        match (name.is_empty(), lookup(name), default) {
            (false, Some(value), _) => out.push_str(&value),
            (false, None, Some(default)) => out.push_str(default),
            _ => out.push_str(&rest[start..start + 3 + end]),
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "KEYSEAL_TEST_CONTEXT" => Some("acme-licensing".to_string()),
            _ => None,
        }
    }

    #[test]
    fn substitutes_known_var() {
        assert_eq!(
            substitute_env_with("context = \"${KEYSEAL_TEST_CONTEXT}\"", lookup),
            "context = \"acme-licensing\""
        );
    }

    #[test]
    fn leaves_unknown_var() {
        assert_eq!(
            substitute_env_with("${KEYSEAL_NONEXISTENT_XYZ}", lookup),
            "${KEYSEAL_NONEXISTENT_XYZ}"
        );
    }

    #[test]
    fn uses_default_when_unset() {
        assert_eq!(
            substitute_env_with("m_cost = ${KEYSEAL_NONEXISTENT_XYZ:-19456}", lookup),
            "m_cost = 19456"
        );
        assert_eq!(
            substitute_env_with("${KEYSEAL_TEST_CONTEXT:-fallback}", lookup),
            "acme-licensing"
        );
    }

    #[test]
    fn keeps_malformed_placeholders() {
        assert_eq!(substitute_env_with("a ${} b", lookup), "a ${} b");
        assert_eq!(substitute_env_with("tail ${OPEN", lookup), "tail ${OPEN");
    }

    #[test]
    fn no_placeholders() {
        assert_eq!(substitute_env("plain text"), "plain text");
    }
}
