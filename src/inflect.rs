//! String-transform helpers for convention-based name derivation.
//!
//! Component directories, controller classes, view classes and tag segments are
//! all related by naming convention rather than by any declared link, so the
//! scanner and builder derive one name from another with the small functions in
//! this module. The transforms touch only the first character or a trailing
//! suffix; the names being derived are code identifiers, not locale-sensitive
//! prose.

/// Uppercases the first character of `s`, leaving the rest untouched.
///
/// `"categories"` becomes `"Categories"`; an already-capitalized or empty
/// string is returned unchanged.
pub fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Derives a controller class name from a route's controller hint or resource
/// segment.
///
/// The base is capitalized and the `Controller` suffix appended - unless the
/// name already carries it, in which case it is not suffixed twice.
pub fn controller_class_name(base: &str) -> String {
    let name = ucfirst(base);
    if name.ends_with("Controller") {
        name
    } else {
        format!("{name}Controller")
    }
}

/// The spelling variants under which a component name may prefix a route path:
/// the name itself, a naive plural, and a naive singular.
///
/// Pluralization is intentionally dumb (append/strip `s`) - the scanned naming
/// conventions never use irregular plurals. A name ending in `s` yields a
/// "singular" with every trailing `s` removed.
pub fn name_variants(name: &str) -> [String; 3] {
    [
        name.to_string(),
        format!("{name}s"),
        name.trim_end_matches('s').to_string(),
    ]
}

/// Returns the final `/`-separated segment of a path, ignoring trailing
/// slashes. An empty path yields an empty segment.
pub fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or("")
}
