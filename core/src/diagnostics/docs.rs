//! Links attached to diagnostics and quick fixes.

use url::Url;

use super::known_errors::is_known;

/// Default root of the documentation site.
pub const DEFAULT_DOCS_URL: &str = "https://dalexhd.github.io/42-norminette";

/// Used for identifiers that have no documentation page yet.
pub const FALLBACK_URL: &str = "https://github.com/dalexhd/42-norminette/compare";

const SEARCH_URL: &str = "https://stackoverflow.com/search";

/// `TOO_MANY_ARGS` -> `too-many-args`
pub fn kebab_case(identifier: &str) -> String {
    identifier
        .split('_')
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Documentation page for `identifier`, or [`FALLBACK_URL`] when it is not documented.
pub fn documentation_url(identifier: &str, docs_base: &str) -> String {
    if is_known(identifier) {
        format!(
            "{}/docs/errors/{}",
            docs_base.trim_end_matches('/'),
            kebab_case(identifier)
        )
    } else {
        FALLBACK_URL.to_string()
    }
}

/// Web search for `query`, scoped to the editor's language mode.
pub fn search_url(language_id: &str, query: &str) -> String {
    let q = format!("[{}]{}", language_id, query);
    match Url::parse_with_params(SEARCH_URL, &[("q", q.as_str())]) {
        Ok(url) => url.into(),
        Err(_) => SEARCH_URL.to_string(),
    }
}
