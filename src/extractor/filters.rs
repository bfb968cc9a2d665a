//! Filter extraction from a controller's list-display method.
//!
//! Each `state-set` call with a literal `filter.` or `list.` key becomes one
//! queryable parameter. Internal key names are mapped to API-facing names
//! through a fixed table, typed by a name heuristic, and described from a
//! fixed table with a templated fallback.

use super::{Filter, ParamType};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Body of the list-display method; runs to a newline followed by a closing
/// brace at method indentation.
static DISPLAY_LIST_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)function\s+displayList\s*\([^)]*\)\s*(?::\s*[\w\\|]+)?\s*\{(.*?)\n\s{4}\}")
        .unwrap()
});

static FILTER_SET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\$this->modelState->set\s*\(\s*['"]filter\.([^'"]+)['"]"#).unwrap()
});

static LIST_SET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\$this->modelState->set\s*\(\s*['"]list\.([^'"]+)['"]"#).unwrap()
});

/// Internal names always typed as plain strings.
const STRING_NAMES: &[&str] = &["search", "title", "name", "language", "ordering", "direction"];

/// Internal names always typed as integers.
const INTEGER_NAMES: &[&str] = &[
    "state",
    "published",
    "category",
    "catid",
    "category_id",
    "author_id",
    "tag",
    "id",
    "limit",
    "offset",
    "checked_out",
    "featured",
    "author",
];

/// Recovers the queryable parameters of one controller source.
///
/// Matches inside the list-display body are emitted in source order, `filter.`
/// keys before `list.` keys. The two pagination parameters are appended
/// unconditionally, then the list is de-duplicated by API-facing name with the
/// first occurrence winning.
pub fn extract_filters(source: &str) -> Vec<Filter> {
    let mut filters = Vec::new();

    if let Some(body) = DISPLAY_LIST_BODY
        .captures(source)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    {
        for m in FILTER_SET.captures_iter(body) {
            let internal = &m[1];
            filters.push(Filter {
                name: api_param_name(internal),
                param_type: infer_type(internal),
                description: describe(internal),
                default: None,
            });
        }

        for m in LIST_SET.captures_iter(body) {
            let internal = &m[1];
            filters.push(Filter {
                name: format!("list[{internal}]"),
                param_type: infer_type(internal),
                description: describe(internal),
                default: None,
            });
        }
    }

    filters.push(Filter {
        name: "page[limit]".to_string(),
        param_type: ParamType::Integer,
        description: "Number of items to return".to_string(),
        default: Some(20),
    });
    filters.push(Filter {
        name: "page[offset]".to_string(),
        param_type: ParamType::Integer,
        description: "Pagination offset".to_string(),
        default: Some(0),
    });

    let mut seen = HashSet::new();
    filters.retain(|f| seen.insert(f.name.clone()));
    filters
}

/// Maps an internal filter key to its API-facing parameter name.
fn api_param_name(internal: &str) -> String {
    match internal {
        "author_id" => "filter[author]".to_string(),
        "category_id" => "filter[category]".to_string(),
        "published" => "filter[state]".to_string(),
        "checked_out" => "filter[checked_out]".to_string(),
        "tag" => "filter[tag]".to_string(),
        _ => format!("filter[{internal}]"),
    }
}

/// Three-tier type heuristic over the internal key name.
fn infer_type(internal: &str) -> ParamType {
    if STRING_NAMES.contains(&internal) {
        return ParamType::String;
    }
    if INTEGER_NAMES.contains(&internal) {
        return ParamType::Integer;
    }
    if internal.contains("date")
        || internal.contains("modified")
        || internal.contains("_start")
        || internal.contains("_end")
    {
        // Dates travel as ISO 8601 strings
        return ParamType::String;
    }
    ParamType::String
}

/// Description text for an internal key name, with a templated fallback.
fn describe(internal: &str) -> String {
    match internal {
        "search" => "Search term",
        "state" => "Publication state (1 = published, 0 = unpublished)",
        "published" => "Filter by publication status",
        "category" => "Filter by category ID",
        "catid" => "Category ID",
        "category_id" => "Filter by category ID",
        "author" => "Filter by author ID",
        "author_id" => "Filter by author ID",
        "tag" => "Filter by tag ID",
        "language" => "Language code",
        "ordering" => "Field to sort by",
        "direction" => "Sort direction (ASC or DESC)",
        "limit" => "Number of items to return",
        "offset" => "Pagination offset",
        "featured" => "Filter by featured status (1 = featured, 0 = not featured)",
        "checked_out" => "Filter by checked out status",
        "modified_start" => "Filter articles modified after this date (ISO 8601 format)",
        "modified_end" => "Filter articles modified before this date (ISO 8601 format)",
        _ => return format!("Filter by {internal}"),
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTROLLER_SOURCE: &str = r#"<?php
class ContactsController extends ApiController
{
    public function displayList()
    {
        $filter = $this->input->get('filter', [], 'array');

        $this->modelState->set('filter.search', $filter['search'] ?? null);
        $this->modelState->set('filter.published', 1);
        $this->modelState->set('filter.category_id', $filter['category'] ?? null);
        $this->modelState->set('list.ordering', 'a.name');
        $this->modelState->set('list.direction', 'ASC');

        return parent::displayList();
    }
}
"#;

    #[test]
    fn test_filter_names_mapped() {
        let filters = extract_filters(CONTROLLER_SOURCE);
        let names: Vec<_> = filters.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "filter[search]",
                "filter[state]",
                "filter[category]",
                "list[ordering]",
                "list[direction]",
                "page[limit]",
                "page[offset]",
            ]
        );
    }

    #[test]
    fn test_type_inference() {
        let filters = extract_filters(CONTROLLER_SOURCE);
        let by_name = |n: &str| filters.iter().find(|f| f.name == n).unwrap();

        assert_eq!(by_name("filter[search]").param_type, ParamType::String);
        assert_eq!(by_name("filter[state]").param_type, ParamType::Integer);
        assert_eq!(by_name("filter[category]").param_type, ParamType::Integer);
        assert_eq!(by_name("list[direction]").param_type, ParamType::String);
        assert_eq!(by_name("page[limit]").param_type, ParamType::Integer);
    }

    #[test]
    fn test_date_names_typed_as_string() {
        assert_eq!(infer_type("modified_start"), ParamType::String);
        assert_eq!(infer_type("created_date"), ParamType::String);
        assert_eq!(infer_type("publish_end"), ParamType::String);
    }

    #[test]
    fn test_unknown_name_defaults_to_string() {
        assert_eq!(infer_type("whatever"), ParamType::String);
    }

    #[test]
    fn test_descriptions() {
        let filters = extract_filters(CONTROLLER_SOURCE);
        let by_name = |n: &str| filters.iter().find(|f| f.name == n).unwrap();

        assert_eq!(by_name("filter[search]").description, "Search term");
        assert_eq!(
            by_name("list[direction]").description,
            "Sort direction (ASC or DESC)"
        );
    }

    #[test]
    fn test_fallback_description() {
        assert_eq!(describe("zipcode"), "Filter by zipcode");
    }

    #[test]
    fn test_pagination_defaults() {
        let filters = extract_filters("");
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].name, "page[limit]");
        assert_eq!(filters[0].default, Some(20));
        assert_eq!(filters[1].name, "page[offset]");
        assert_eq!(filters[1].default, Some(0));
    }

    #[test]
    fn test_dedup_first_occurrence_wins() {
        let source = r#"
    public function displayList()
    {
        $this->modelState->set('filter.author_id', 1);
        $this->modelState->set('filter.author_id', 2);
    }
"#;
        let filters = extract_filters(source);
        let authors: Vec<_> = filters.iter().filter(|f| f.name == "filter[author]").collect();
        assert_eq!(authors.len(), 1);
    }

    #[test]
    fn test_list_limit_does_not_displace_pagination() {
        // list.limit maps to list[limit], distinct from the synthesized
        // page[limit]; both appear exactly once
        let source = r#"
    public function displayList()
    {
        $this->modelState->set('list.limit', 20);
        $this->modelState->set('list.limit', 20);
    }
"#;
        let filters = extract_filters(source);
        let names: Vec<_> = filters.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["list[limit]", "page[limit]", "page[offset]"]);
    }

    #[test]
    fn test_no_display_list_method() {
        let filters = extract_filters("<?php class X {}\n");
        let names: Vec<_> = filters.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["page[limit]", "page[offset]"]);
    }
}
