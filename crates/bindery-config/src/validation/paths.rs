//! Syntax check for binding paths referenced from config.

use regex::Regex;
use std::sync::LazyLock;

/// `<Layout>{usage}/control/sub`, with `*` allowed in place of the layout.
static BINDING_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(<[A-Za-z0-9_*]+>|\*)(\{[A-Za-z0-9_]+\})?(/[A-Za-z0-9_*#()]+)+$").unwrap()
});

/// Push an error for every entry of `paths` that is not a binding path.
pub(crate) fn validate_binding_paths(errors: &mut Vec<String>, name: &str, paths: &[String]) {
    for (i, path) in paths.iter().enumerate() {
        if !BINDING_PATH_RE.is_match(path) {
            errors.push(format!("{name}[{i}] = '{path}' is not a binding path"));
        }
    }
}
