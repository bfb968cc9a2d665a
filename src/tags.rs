//! Hierarchical tag derivation from component names and route paths.
//!
//! A tag is a `|`-joined label sequence always rooted at the title-cased
//! component name, e.g. `Contact|Categories` or `Contact|Fields|Groups|Contact`.
//! Tag names group operations in the output document; descriptions are phrased
//! from the completed label sequence.

use crate::inflect::{name_variants, ucfirst};
use once_cell::sync::Lazy;
use regex::Regex;

/// Label appended for content-history paths.
pub const CONTENT_HISTORY_LABEL: &str = "Content History";

/// Context segment capture inside a fields path: a first segment, a slash,
/// then a segment free of placeholders.
static FIELD_CONTEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^/]+/([^/{]+)").unwrap());

/// Derives the hierarchical tag for a route path owned by a component.
///
/// The path is normalized first: the version prefix and a leading occurrence
/// of the component name (or its naive plural/singular) are stripped. A
/// `fields/` path builds a Fields/Groups hierarchy with an optional context
/// level; a path containing the content-history marker gets the constant
/// label; any other path contributes one title-cased level per remaining
/// segment, skipping placeholder segments and mapping the `:component_name`
/// parameter to a constant label.
pub fn hierarchical_tag(component: &str, path: &str) -> String {
    let mut parts = vec![ucfirst(component)];

    let mut path = strip_version_prefix(path).to_string();
    for variant in name_variants(component) {
        path = strip_leading_segment(&path, &variant);
    }

    // Multilevel hierarchy for fields paths
    let trimmed = path.strip_prefix('/').unwrap_or(&path);
    if let Some(fields_path) = trimmed.strip_prefix("fields/").filter(|p| !p.is_empty()) {
        parts.push("Fields".to_string());

        if let Some(groups_path) = fields_path.strip_prefix("groups/").filter(|p| !p.is_empty()) {
            parts.push("Groups".to_string());
            // A further context level only when a segment follows the next one
            if let Some(context) = FIELD_CONTEXT.captures(groups_path) {
                parts.push(ucfirst(&context[1]));
            }
        } else if let Some(context) = FIELD_CONTEXT.captures(fields_path) {
            parts.push(ucfirst(&context[1]));
        }

        return parts.join("|");
    }

    if path.contains("/contenthistory") {
        parts.push(CONTENT_HISTORY_LABEL.to_string());
        return parts.join("|");
    }

    for segment in path.trim_start_matches('/').split('/') {
        if segment.is_empty() || segment.contains('{') {
            continue;
        }
        if let Some(param) = segment.strip_prefix(':') {
            if param == "component_name" {
                parts.push("Component".to_string());
            }
            continue;
        }
        parts.push(ucfirst(segment));
    }

    parts.join("|")
}

/// Phrases the description for a completed tag, keyed off its label sequence.
pub fn tag_description(component: &str, tag: &str) -> String {
    let parts: Vec<&str> = tag.split('|').collect();
    let subject = component.to_lowercase();

    if parts.len() == 1 {
        return format!("Operations related to {subject}");
    }

    let last = parts[parts.len() - 1];

    if last == CONTENT_HISTORY_LABEL {
        return format!("Content history for {subject}");
    }

    if last == "Fields" || parts[1] == "Fields" {
        match parts.len() {
            2 => return format!("Custom fields for {subject}"),
            3 => return format!("{} fields for {subject}", ucfirst(last)),
            4 if parts[2] == "Groups" => {
                return format!("{} field groups for {subject}", ucfirst(last))
            }
            _ => {}
        }
    }

    format!("{} for {subject}", ucfirst(last))
}

/// Strips the fixed version prefix, with or without a leading slash.
fn strip_version_prefix(path: &str) -> &str {
    path.strip_prefix("/v1/")
        .or_else(|| path.strip_prefix("v1/"))
        .unwrap_or(path)
}

/// Strips a leading `name` segment (optionally slash-prefixed,
/// case-insensitive), keeping the separator that follows it.
fn strip_leading_segment(path: &str, name: &str) -> String {
    if name.is_empty() {
        return path.to_string();
    }
    let rest = path.strip_prefix('/').unwrap_or(path);
    if let Some(head) = rest.get(..name.len()) {
        if head.eq_ignore_ascii_case(name) {
            let tail = &rest[name.len()..];
            if tail.is_empty() || tail.starts_with('/') {
                return tail.to_string();
            }
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_root_path() {
        assert_eq!(hierarchical_tag("contact", "v1/contacts"), "Contact");
    }

    #[test]
    fn test_sub_resource() {
        assert_eq!(
            hierarchical_tag("contact", "v1/contacts/categories"),
            "Contact|Categories"
        );
    }

    #[test]
    fn test_placeholder_segments_skipped() {
        assert_eq!(
            hierarchical_tag("contact", "contacts/form/{id}"),
            "Contact|Form"
        );
    }

    #[test]
    fn test_nested_segments() {
        assert_eq!(
            hierarchical_tag("menus", "v1/menus/site/items"),
            "Menus|Site|Items"
        );
    }

    #[test]
    fn test_component_name_parameter() {
        assert_eq!(
            hierarchical_tag("config", "v1/config/:component_name"),
            "Config|Component"
        );
    }

    #[test]
    fn test_other_colon_parameters_skipped() {
        assert_eq!(
            hierarchical_tag("contact", "v1/contacts/form/:id"),
            "Contact|Form"
        );
    }

    #[test]
    fn test_fields_path() {
        assert_eq!(
            hierarchical_tag("contact", "v1/fields/contacts/contact"),
            "Contact|Fields|Contact"
        );
    }

    #[test]
    fn test_fields_groups_path() {
        assert_eq!(
            hierarchical_tag("contact", "v1/fields/groups/contacts/contact"),
            "Contact|Fields|Groups|Contact"
        );
    }

    #[test]
    fn test_fields_groups_without_context() {
        assert_eq!(
            hierarchical_tag("contact", "v1/fields/groups/contacts"),
            "Contact|Fields|Groups"
        );
    }

    #[test]
    fn test_fields_context_stops_at_placeholder() {
        assert_eq!(
            hierarchical_tag("contact", "v1/fields/contacts/{id}"),
            "Contact|Fields"
        );
    }

    #[test]
    fn test_content_history() {
        assert_eq!(
            hierarchical_tag("contact", "v1/contacts/{id}/contenthistory"),
            "Contact|Content History"
        );
    }

    #[test]
    fn test_empty_path_yields_component_only() {
        assert_eq!(hierarchical_tag("contact", ""), "Contact");
    }

    #[test]
    fn test_plural_component_prefix_stripped() {
        // The path spells the component in the plural; the singular component
        // name still strips it
        assert_eq!(
            hierarchical_tag("banner", "v1/banners/clients"),
            "Banner|Clients"
        );
    }

    #[test]
    fn test_description_component_level() {
        assert_eq!(
            tag_description("contact", "Contact"),
            "Operations related to contact"
        );
    }

    #[test]
    fn test_description_sub_resource() {
        assert_eq!(
            tag_description("contact", "Contact|Categories"),
            "Categories for contact"
        );
    }

    #[test]
    fn test_description_content_history() {
        assert_eq!(
            tag_description("contact", "Contact|Content History"),
            "Content history for contact"
        );
    }

    #[test]
    fn test_description_fields_levels() {
        assert_eq!(
            tag_description("contact", "Contact|Fields"),
            "Custom fields for contact"
        );
        assert_eq!(
            tag_description("contact", "Contact|Fields|Contact"),
            "Contact fields for contact"
        );
        assert_eq!(
            tag_description("contact", "Contact|Fields|Groups|Contact"),
            "Contact field groups for contact"
        );
    }
}
