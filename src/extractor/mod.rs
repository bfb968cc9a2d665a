//! Source-text extraction for route, filter and view-field declarations.
//!
//! Nothing in this module executes or truly parses the scanned sources: each
//! submodule runs a small family of regex matchers over raw text, scoped to a
//! named method body or declaration, and recovers the declarative intent of the
//! statements it recognizes. Constructs that do not match the expected literal
//! shape are silently missed - that permissiveness is part of the contract.
//!
//! # Submodules
//!
//! - [`routes`] - route registrations inside a plugin's entry-point class
//! - [`filters`] - queryable parameters from a controller's `displayList` body
//! - [`views`] - field lists from a view's rendering declarations

pub mod filters;
pub mod routes;
pub mod views;

/// One declared endpoint binding recovered from plugin source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// How the route was declared, which decides its assembly procedure
    pub kind: RouteKind,
    /// Raw path template as written in the source (may carry a `v1/` prefix
    /// and `:name` placeholders); empty for bare helper-invocation markers
    pub path: String,
    /// Optional controller-name hint from the registration call
    pub controller: Option<String>,
}

/// The declaration shapes a route can be recovered from.
///
/// Each kind is routed to exactly one assembly procedure; adding a kind means
/// adding an explicit variant and match arm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    /// `createCRUDRoutes` call inside the route-registration method
    Crud,
    /// `createCRUDRoutes` call inside a `createFieldsRoutes` helper
    Fields,
    /// `createCRUDRoutes` call inside a `createContentHistoryRoutes` helper
    ContentHistory,
    /// Bare `$this->create...Routes(...)` invocation marker; carries no path
    /// and produces no operations
    Custom,
    /// `createCRUDRoutes` call inside some other `create<Name>Routes` helper;
    /// recognized but bound to no assembly procedure
    Helper(String),
    /// Literal `new Route([...], path, 'controller.action')` construction,
    /// one per HTTP-method literal in the array
    CustomRoute { method: HttpMethod, action: String },
}

/// HTTP methods recognized in route-object literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// Parses an uppercase HTTP-method literal as written in source text.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            "PATCH" => Some(HttpMethod::Patch),
            "OPTIONS" => Some(HttpMethod::Options),
            "HEAD" => Some(HttpMethod::Head),
            _ => None,
        }
    }

    /// Uppercase wire form, e.g. `GET`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }

    /// Lowercase document key, e.g. `get`.
    pub fn key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
        }
    }
}

/// A queryable request parameter recovered from controller source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// API-facing parameter name, possibly bracketed (`filter[category]`)
    pub name: String,
    /// Inferred primitive type
    pub param_type: ParamType,
    /// Human-readable description
    pub description: String,
    /// Default value, set only for the synthesized pagination parameters
    pub default: Option<i64>,
}

/// Primitive parameter types the heuristic can infer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
        }
    }
}
