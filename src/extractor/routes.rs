//! Route extraction from a plugin's entry-point source text.
//!
//! Three independent passes run over the same text and their results are
//! concatenated, never merged: the same literal path may legitimately be
//! emitted more than once when the source matches several patterns.

use super::{HttpMethod, Route, RouteKind};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Body of the route-registration method, up to its first closing brace.
static REGISTRATION_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"function\s+onBeforeApiRoute\s*\([^)]*\)\s*(?::\s*void)?\s*\{([^}]+)\}").unwrap()
});

/// A `createCRUDRoutes` call with a literal path and optional literal
/// controller name.
static CRUD_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\$router->createCRUDRoutes\s*\(\s*['"]([^'"]+)['"](?:\s*,\s*['"]([^'"]+)['"])?"#)
        .unwrap()
});

/// A bare helper invocation inside the registration body.
static HELPER_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$this->(create\w+Routes)\s*\(").unwrap());

/// A helper-method definition; the body runs to a newline followed by a
/// closing brace at method indentation.
static HELPER_DEF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)function\s+(create\w+Routes)\s*\([^)]*\)\s*(?::\s*void)?\s*\{(.*?)\n    \}")
        .unwrap()
});

/// A literal route-object construction: an array of HTTP-method literals, a
/// path literal, and a dotted controller.action literal.
static ROUTE_OBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"new\s+Route\s*\(\s*\[([^\]]+)\]\s*,\s*['"]([^'"]+)['"]\s*,\s*['"]([^'"]*)\.([^'"]+)['"]"#)
        .unwrap()
});

static METHOD_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"['"]([A-Z]+)['"]"#).unwrap());

/// Recovers all declared routes from a plugin entry-point source.
///
/// Pass 1 scans the registration-method body for `createCRUDRoutes` calls and
/// bare helper invocations. Pass 2 scans every `create<Name>Routes` helper
/// definition, classifying its routes by the lowercased `<Name>`. Pass 3 scans
/// the whole text for route-object literals, fanning one route out per
/// HTTP-method literal in the array. No de-duplication is performed across
/// passes.
pub fn extract_routes(source: &str) -> Vec<Route> {
    let mut routes = Vec::new();

    // Pass 1: registration-method body
    if let Some(body) = REGISTRATION_BODY
        .captures(source)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    {
        for call in CRUD_CALL.captures_iter(body) {
            routes.push(Route {
                kind: RouteKind::Crud,
                path: call[1].to_string(),
                controller: call.get(2).map(|m| m.as_str().to_string()),
            });
        }

        for call in HELPER_CALL.captures_iter(body) {
            debug!("helper invocation marker: {}", &call[1]);
            routes.push(Route {
                kind: RouteKind::Custom,
                path: String::new(),
                controller: None,
            });
        }
    }

    // Pass 2: helper-method definitions
    for def in HELPER_DEF.captures_iter(source) {
        let kind = classify_helper(&def[1]);
        for call in CRUD_CALL.captures_iter(def.get(2).map_or("", |m| m.as_str())) {
            routes.push(Route {
                kind: kind.clone(),
                path: call[1].to_string(),
                controller: call.get(2).map(|m| m.as_str().to_string()),
            });
        }
    }

    // Pass 3: route-object literals
    for obj in ROUTE_OBJECT.captures_iter(source) {
        let path = obj[2].to_string();
        let controller = obj[3].to_string();
        let action = obj[4].to_string();

        for token in METHOD_LITERAL.captures_iter(&obj[1]) {
            let Some(method) = HttpMethod::from_token(&token[1]) else {
                debug!("skipping unrecognized HTTP method literal: {}", &token[1]);
                continue;
            };
            routes.push(Route {
                kind: RouteKind::CustomRoute {
                    method,
                    action: action.clone(),
                },
                path: path.clone(),
                controller: Some(controller.clone()),
            });
        }
    }

    routes
}

/// Classifies a helper route kind by stripping the naming convention from the
/// method name and lowercasing the remainder.
fn classify_helper(method_name: &str) -> RouteKind {
    let kind = method_name
        .replace("create", "")
        .replace("Routes", "")
        .to_lowercase();

    match kind.as_str() {
        "crud" => RouteKind::Crud,
        "fields" => RouteKind::Fields,
        "contenthistory" => RouteKind::ContentHistory,
        _ => RouteKind::Helper(kind),
    }
}
