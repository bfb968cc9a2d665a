//! View field extraction from a view's rendering declarations.

use once_cell::sync::Lazy;
use regex::Regex;

static LIST_FIELDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)protected\s+(?:static\s+)?(?:array\s+)?\$fieldsToRenderList\s*=\s*\[(.*?)\]")
        .unwrap()
});

static ITEM_FIELDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)protected\s+(?:static\s+)?(?:array\s+)?\$fieldsToRenderItem\s*=\s*\[(.*?)\]")
        .unwrap()
});

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"['"]([^'"]+)['"]"#).unwrap());

/// The two ordered field-name lists a view declares: one for list rendering,
/// one for single-item rendering. Either may be empty when the declaration is
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFields {
    pub list: Vec<String>,
    pub item: Vec<String>,
}

/// Recovers the declared field lists from one view source.
pub fn extract_view_fields(source: &str) -> ViewFields {
    ViewFields {
        list: quoted_items(&LIST_FIELDS, source),
        item: quoted_items(&ITEM_FIELDS, source),
    }
}

fn quoted_items(declaration: &Regex, source: &str) -> Vec<String> {
    declaration
        .captures(source)
        .and_then(|c| c.get(1))
        .map(|body| {
            QUOTED
                .captures_iter(body.as_str())
                .map(|m| m[1].to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW_SOURCE: &str = r#"<?php
class JsonapiView extends BaseApiView
{
    protected $fieldsToRenderList = [
        'id',
        'name',
        'published',
    ];

    protected $fieldsToRenderItem = [
        'id',
        'name',
        'created',
        'modified',
    ];
}
"#;

    #[test]
    fn test_both_field_lists() {
        let fields = extract_view_fields(VIEW_SOURCE);
        assert_eq!(fields.list, vec!["id", "name", "published"]);
        assert_eq!(fields.item, vec!["id", "name", "created", "modified"]);
    }

    #[test]
    fn test_missing_declarations() {
        let fields = extract_view_fields("<?php class JsonapiView {}\n");
        assert!(fields.list.is_empty());
        assert!(fields.item.is_empty());
    }

    #[test]
    fn test_single_line_declaration() {
        let source = r#"protected array $fieldsToRenderList = ['id', 'title'];"#;
        let fields = extract_view_fields(source);
        assert_eq!(fields.list, vec!["id", "title"]);
        assert!(fields.item.is_empty());
    }

    #[test]
    fn test_static_modifier() {
        let source = r#"protected static $fieldsToRenderItem = ["id"];"#;
        let fields = extract_view_fields(source);
        assert_eq!(fields.item, vec!["id"]);
    }
}
