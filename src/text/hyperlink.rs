//! Hyperlink target validation and resolution.

use crate::context::RenderContext;
use url::Url;

/// Schemes a run hyperlink is allowed to carry.
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Whether a hyperlink target may become a link element.
///
/// Only absolute `http:`, `https:` and `mailto:` URLs qualify; relative
/// or unparsable targets and every other scheme are rejected, so the run
/// renders as plain text instead.
pub fn is_allowed_external_url(target: &str) -> bool {
    match Url::parse(target) {
        Ok(url) => ALLOWED_SCHEMES.contains(&url.scheme()),
        Err(_) => false,
    }
}

/// Resolve a hyperlink relationship id to an allowed external target.
pub fn resolve_hyperlink(rid: &str, ctx: &RenderContext) -> Option<String> {
    let rel = ctx.relationship(rid)?;
    if is_allowed_external_url(&rel.target) {
        Some(rel.target.clone())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_schemes() {
        assert!(is_allowed_external_url("http://example.com"));
        assert!(is_allowed_external_url("https://example.com/a?b=c"));
        assert!(is_allowed_external_url("mailto:someone@example.com"));
    }

    #[test]
    fn test_rejected_schemes() {
        assert!(!is_allowed_external_url("javascript:alert(1)"));
        assert!(!is_allowed_external_url("data:text/html,<b>x</b>"));
        assert!(!is_allowed_external_url("ftp://example.com/file"));
        assert!(!is_allowed_external_url("file:///etc/passwd"));
    }

    #[test]
    fn test_rejected_malformed() {
        assert!(!is_allowed_external_url(""));
        assert!(!is_allowed_external_url("not a url"));
        assert!(!is_allowed_external_url("/relative/path"));
        assert!(!is_allowed_external_url("example.com"));
    }

    proptest::proptest! {
        #[test]
        fn prop_unknown_schemes_rejected(
            scheme in "[a-z][a-z0-9]{1,9}",
            rest in "[a-z0-9./]{0,20}",
        ) {
            proptest::prop_assume!(!ALLOWED_SCHEMES.contains(&scheme.as_str()));
            let url = format!("{scheme}:{rest}");
            proptest::prop_assert!(!is_allowed_external_url(&url));
        }

        #[test]
        fn prop_never_panics(target in "\\PC{0,64}") {
            let _ = is_allowed_external_url(&target);
        }
    }
}
