//! Route template handling.
//!
//! Service routes use brackets for optional segments and a leading colon for parameters
//! (`/things[/:id]`). Swagger 1.2 expects braces around parameter names (`/things/{id}`).

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered literal substitutions turning a service route into a Swagger path.
///
/// `{/` and `{:` clean up what the bracket substitutions leave behind when an optional
/// segment starts with a slash or a colon parameter.
const REWRITES: [(&str, &str); 4] = [("[", "{"), ("]", "}"), ("{/", "/{"), ("{:", "{")];

/// `{name}` placeholder; names are ASCII letters, digits, `_` and `-`.
static PATH_PARAMETER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_-]+)\}").expect("Invalid regex constant"));

/// Fixed part of the route, before its first optional segment.
pub fn resource_path(route: &str) -> Result<&str> {
    route
        .find('[')
        .map(|index| &route[..index])
        .ok_or_else(|| Error::MissingOptionalSegment {
            route: route.to_string(),
        })
}

/// Rewrite a service route into Swagger's brace syntax
pub fn to_swagger_path(route: &str) -> String {
    REWRITES
        .iter()
        .fold(route.to_string(), |path, (pattern, replacement)| {
            path.replace(pattern, replacement)
        })
}

/// Names of all `{param}` placeholders in a Swagger path, in order of first appearance.
pub fn path_parameter_names(path: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for cap in PATH_PARAMETER.captures_iter(path) {
        let name = &cap[1];
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }

    names
}

/// Swagger path with the `/{identifier}` segment removed
pub fn collection_path(path: &str, identifier: &str) -> String {
    path.replace(&format!("/{{{}}}", identifier), "")
}
