//! OpenAPI document assembly from scanned components and plugins.
//!
//! The [`DocumentBuilder`] is the build context of one generation pass: it
//! owns the tag and path collections, derives both from the scan result, and
//! is consumed by [`DocumentBuilder::build`]. Each route kind is dispatched to
//! exactly one assembly procedure; tag names are globally unique with the
//! first generated description winning, and path entries keep insertion order
//! so that output is deterministic for a given scan.

use crate::extractor::{Filter, HttpMethod, ParamType, Route, RouteKind};
use crate::inflect::{controller_class_name, last_segment, ucfirst};
use crate::scanner::{Component, Controller, ScanResult, View};
use crate::tags::{hierarchical_tag, tag_description};
use log::debug;
use std::collections::HashSet;

/// JSON:API media type used for all request and response content.
pub const MEDIA_TYPE: &str = "application/vnd.api+json";

/// Complete in-memory form of the output document.
#[derive(Debug, Clone)]
pub struct Document {
    pub info: Info,
    pub tags: Vec<Tag>,
    pub paths: Vec<PathEntry>,
    /// Named schemas of the components block
    pub schemas: Vec<(String, Schema)>,
}

/// The info section; wording depends on the inclusion scope.
#[derive(Debug, Clone)]
pub struct Info {
    pub title: String,
    pub summary: String,
    pub description: String,
    pub version: String,
}

/// A classification label grouping operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub description: String,
}

/// One documented URL template and its operations, in registration order.
#[derive(Debug, Clone)]
pub struct PathEntry {
    pub path: String,
    pub operations: Vec<(HttpMethod, Operation)>,
}

/// One documented (path, method) endpoint.
#[derive(Debug, Clone)]
pub struct Operation {
    pub summary: String,
    pub tags: Vec<String>,
    /// Bearer-token security requirement marker; set on every operation
    pub security: bool,
    /// `None` omits the parameter list entirely; `Some(vec![])` documents an
    /// explicitly empty one
    pub parameters: Option<Vec<Parameter>>,
    pub request_body: Option<Schema>,
    pub responses: Vec<(&'static str, Response)>,
}

/// One documented operation parameter.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub description: Option<String>,
    pub param_type: ParamType,
    pub default: Option<i64>,
    pub enum_values: Vec<&'static str>,
}

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    Query,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
        }
    }
}

/// One response descriptor.
#[derive(Debug, Clone)]
pub struct Response {
    pub description: &'static str,
    /// Response body schema under the fixed media type, when documented
    pub content: Option<Schema>,
}

/// A block-structured schema node: a type name plus nested properties or
/// array items.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub type_name: &'static str,
    pub properties: Vec<(&'static str, Schema)>,
    pub items: Option<Box<Schema>>,
}

impl Schema {
    pub fn object() -> Self {
        Schema {
            type_name: "object",
            ..Default::default()
        }
    }

    pub fn string() -> Self {
        Schema {
            type_name: "string",
            ..Default::default()
        }
    }

    pub fn array_of(items: Schema) -> Self {
        Schema {
            type_name: "array",
            items: Some(Box::new(items)),
            ..Default::default()
        }
    }
}

/// Build context for one generation pass.
pub struct DocumentBuilder {
    include_all: bool,
    tags: Vec<Tag>,
    tag_names: HashSet<String>,
    paths: Vec<PathEntry>,
}

impl DocumentBuilder {
    /// Creates a builder; `include_all` widens the scope to components
    /// without a matching plugin.
    pub fn new(include_all: bool) -> Self {
        Self {
            include_all,
            tags: Vec::new(),
            tag_names: HashSet::new(),
            paths: Vec::new(),
        }
    }

    /// Assembles the complete document from one scan result.
    ///
    /// `version` is the host version string placed in the info section.
    pub fn build(mut self, scan: &ScanResult, version: String) -> Document {
        self.build_tags(scan);
        self.build_paths(scan);

        let scope = if self.include_all {
            "all available components"
        } else {
            "active webservices plugins"
        };
        let title = if self.include_all {
            "Core APIs - All Components"
        } else {
            "Core APIs - Active Plugins"
        };

        Document {
            info: Info {
                title: title.to_string(),
                summary: format!("Dynamically generated API documentation for {scope}"),
                description: format!(
                    "REST API endpoints automatically extracted from this installation. \
                     Shows {scope} and their available operations."
                ),
                version,
            },
            tags: self.tags,
            paths: self.paths,
            schemas: vec![("Error".to_string(), error_schema())],
        }
    }

    /// True when a component is inside the documented scope.
    fn in_scope(&self, scan: &ScanResult, component: &Component) -> bool {
        self.include_all || scan.plugins.contains_key(&component.short_name)
    }

    /// Collects the unique tags of all in-scope routes, first writer wins.
    fn build_tags(&mut self, scan: &ScanResult) {
        for component in &scan.components {
            if !self.in_scope(scan, component) {
                continue;
            }

            let routes = scan
                .plugins
                .get(&component.short_name)
                .map(|p| p.routes.as_slice())
                .unwrap_or(&[]);

            for route in routes {
                let name = hierarchical_tag(&component.short_name, &route.path);
                if self.tag_names.insert(name.clone()) {
                    let description = tag_description(&component.short_name, &name);
                    self.tags.push(Tag { name, description });
                }
            }
        }
    }

    /// Assembles path entries for all in-scope routes.
    fn build_paths(&mut self, scan: &ScanResult) {
        for component in &scan.components {
            if !self.in_scope(scan, component) {
                continue;
            }

            let routes = scan
                .plugins
                .get(&component.short_name)
                .map(|p| p.routes.as_slice())
                .unwrap_or(&[]);

            for route in routes {
                match &route.kind {
                    RouteKind::Crud | RouteKind::Fields => self.crud_paths(component, route),
                    RouteKind::ContentHistory => self.content_history_path(component, route),
                    RouteKind::CustomRoute { method, action } => {
                        self.custom_route_path(component, route, *method, action)
                    }
                    RouteKind::Custom => {
                        debug!("helper marker route contributes no paths");
                    }
                    RouteKind::Helper(kind) => {
                        debug!("no assembly procedure for helper kind {kind}");
                    }
                }
            }
        }
    }

    /// Emits the five canonical operations of a CRUD route.
    fn crud_paths(&mut self, component: &Component, route: &Route) {
        let path = normalize_path(&route.path);
        let tag = hierarchical_tag(&component.short_name, &path);
        let resource = last_segment(&path).to_string();

        let controller_base = route.controller.as_deref().unwrap_or(&resource);
        let controller: Option<&Controller> = component
            .controllers
            .get(&controller_class_name(controller_base));
        let view = component.views.get(&ucfirst(&resource));

        self.set_operation(
            &path,
            HttpMethod::Get,
            Operation {
                summary: format!("Get list of {resource}"),
                tags: vec![tag.clone()],
                security: true,
                parameters: Some(query_parameters(
                    controller.map(|c| c.filters.as_slice()).unwrap_or(&[]),
                )),
                request_body: None,
                responses: list_responses(view),
            },
        );

        self.set_operation(
            &path,
            HttpMethod::Post,
            Operation {
                summary: format!("Create new item in {resource}"),
                tags: vec![tag.clone()],
                security: true,
                parameters: None,
                request_body: Some(request_body_schema(view)),
                responses: create_responses(),
            },
        );

        let item_path = format!("{path}/{{id}}");

        self.set_operation(
            &item_path,
            HttpMethod::Get,
            Operation {
                summary: format!("Get single item from {resource}"),
                tags: vec![tag.clone()],
                security: true,
                parameters: Some(vec![id_path_parameter()]),
                request_body: None,
                responses: item_responses(view),
            },
        );

        self.set_operation(
            &item_path,
            HttpMethod::Patch,
            Operation {
                summary: format!("Update item in {resource}"),
                tags: vec![tag.clone()],
                security: true,
                parameters: Some(vec![id_path_parameter()]),
                request_body: Some(request_body_schema(view)),
                responses: update_responses(),
            },
        );

        self.set_operation(
            &item_path,
            HttpMethod::Delete,
            Operation {
                summary: format!("Delete item from {resource}"),
                tags: vec![tag],
                security: true,
                parameters: Some(vec![id_path_parameter()]),
                request_body: None,
                responses: delete_responses(),
            },
        );
    }

    /// Emits the single read operation of a content-history route.
    fn content_history_path(&mut self, component: &Component, route: &Route) {
        let path = normalize_path(&route.path);
        let tag = hierarchical_tag(&component.short_name, &path);

        self.set_operation(
            &path,
            HttpMethod::Get,
            Operation {
                summary: "Get content history".to_string(),
                tags: vec![tag],
                security: true,
                parameters: Some(Vec::new()),
                request_body: None,
                responses: list_responses(None),
            },
        );
    }

    /// Emits one operation for a route-object declaration.
    fn custom_route_path(
        &mut self,
        component: &Component,
        route: &Route,
        method: HttpMethod,
        action: &str,
    ) {
        let path = normalize_path(&route.path);
        let tag = hierarchical_tag(&component.short_name, &path);

        let controller = route.controller.as_deref().and_then(|c| {
            component
                .controllers
                .get(&format!("{}Controller", ucfirst(c)))
        });

        let mut parameters = placeholder_parameters(&path);
        if method == HttpMethod::Get && action == "displayList" {
            if let Some(controller) = controller {
                parameters.extend(query_parameters(&controller.filters));
            }
        }

        let request_body = matches!(method, HttpMethod::Post | HttpMethod::Patch)
            .then(|| request_body_schema(None));

        let responses = match (method, action) {
            (HttpMethod::Get, "displayList") => list_responses(None),
            (HttpMethod::Get, "displayItem") => item_responses(None),
            (HttpMethod::Post, _) => create_responses(),
            (HttpMethod::Patch, _) => update_responses(),
            (HttpMethod::Delete, _) => delete_responses(),
            _ => generic_responses(),
        };

        self.set_operation(
            &brace_placeholders(&path),
            method,
            Operation {
                summary: ucfirst(&action.replace('_', " ")),
                tags: vec![tag],
                security: true,
                parameters: Some(parameters),
                request_body,
                responses,
            },
        );
    }

    /// Registers an operation under a path, replacing any previous operation
    /// for the same method in place.
    fn set_operation(&mut self, path: &str, method: HttpMethod, operation: Operation) {
        let index = match self.paths.iter().position(|e| e.path == path) {
            Some(index) => index,
            None => {
                self.paths.push(PathEntry {
                    path: path.to_string(),
                    operations: Vec::new(),
                });
                self.paths.len() - 1
            }
        };
        let entry = &mut self.paths[index];

        match entry.operations.iter_mut().find(|(m, _)| *m == method) {
            Some((_, existing)) => *existing = operation,
            None => entry.operations.push((method, operation)),
        }
    }
}

/// Trims leading slashes and the version prefix from a route path.
fn normalize_path(path: &str) -> String {
    let path = path.trim_start_matches('/');
    path.strip_prefix("v1/").unwrap_or(path).to_string()
}

/// Rewrites `:name` placeholders to brace form.
fn brace_placeholders(path: &str) -> String {
    use once_cell::sync::Lazy;
    use regex::Regex;
    static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r":(\w+)").unwrap());
    PLACEHOLDER.replace_all(path, "{${1}}").into_owned()
}

/// One required path parameter per `:name` placeholder, typed integer only
/// for the identifier parameter.
fn placeholder_parameters(path: &str) -> Vec<Parameter> {
    use once_cell::sync::Lazy;
    use regex::Regex;
    static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r":(\w+)").unwrap());

    PLACEHOLDER
        .captures_iter(path)
        .map(|c| {
            let name = c[1].to_string();
            let param_type = if name == "id" {
                ParamType::Integer
            } else {
                ParamType::String
            };
            Parameter {
                name,
                location: ParameterLocation::Path,
                required: true,
                description: None,
                param_type,
                default: None,
                enum_values: Vec::new(),
            }
        })
        .collect()
}

/// The synthesized integer `id` path parameter of item-level operations.
fn id_path_parameter() -> Parameter {
    Parameter {
        name: "id".to_string(),
        location: ParameterLocation::Path,
        required: true,
        description: None,
        param_type: ParamType::Integer,
        default: None,
        enum_values: Vec::new(),
    }
}

/// Formats controller filters as query parameters. The sort-direction
/// parameter carries its fixed two-value enumeration.
fn query_parameters(filters: &[Filter]) -> Vec<Parameter> {
    filters
        .iter()
        .map(|filter| Parameter {
            name: filter.name.clone(),
            location: ParameterLocation::Query,
            required: false,
            description: Some(filter.description.clone()),
            param_type: filter.param_type,
            default: filter.default,
            enum_values: if filter.name == "list[direction]" {
                vec!["ASC", "DESC"]
            } else {
                Vec::new()
            },
        })
        .collect()
}

fn request_body_schema(_view: Option<&View>) -> Schema {
    Schema::object()
}

fn list_responses(_view: Option<&View>) -> Vec<(&'static str, Response)> {
    let mut data_array = Schema::object();
    data_array.properties = vec![("data", Schema::array_of(Schema::object()))];

    vec![
        (
            "200",
            Response {
                description: "Successful response",
                content: Some(data_array),
            },
        ),
        ("401", Response { description: "Unauthorized", content: None }),
        ("500", Response { description: "Server error", content: None }),
    ]
}

fn item_responses(_view: Option<&View>) -> Vec<(&'static str, Response)> {
    vec![
        (
            "200",
            Response {
                description: "Successful response",
                content: Some(Schema::object()),
            },
        ),
        ("401", Response { description: "Unauthorized", content: None }),
        ("404", Response { description: "Not found", content: None }),
        ("500", Response { description: "Server error", content: None }),
    ]
}

fn create_responses() -> Vec<(&'static str, Response)> {
    vec![
        ("201", Response { description: "Created successfully", content: None }),
        ("400", Response { description: "Bad request", content: None }),
        ("401", Response { description: "Unauthorized", content: None }),
        ("422", Response { description: "Validation error", content: None }),
        ("500", Response { description: "Server error", content: None }),
    ]
}

fn update_responses() -> Vec<(&'static str, Response)> {
    vec![
        ("200", Response { description: "Updated successfully", content: None }),
        ("400", Response { description: "Bad request", content: None }),
        ("401", Response { description: "Unauthorized", content: None }),
        ("404", Response { description: "Not found", content: None }),
        ("422", Response { description: "Validation error", content: None }),
        ("500", Response { description: "Server error", content: None }),
    ]
}

fn delete_responses() -> Vec<(&'static str, Response)> {
    vec![
        ("204", Response { description: "Deleted successfully", content: None }),
        ("401", Response { description: "Unauthorized", content: None }),
        ("404", Response { description: "Not found", content: None }),
        ("500", Response { description: "Server error", content: None }),
    ]
}

fn generic_responses() -> Vec<(&'static str, Response)> {
    vec![
        ("200", Response { description: "Successful response", content: None }),
        ("401", Response { description: "Unauthorized", content: None }),
        ("500", Response { description: "Server error", content: None }),
    ]
}

/// The fixed error schema of the components block.
fn error_schema() -> Schema {
    let mut error_item = Schema::object();
    error_item.properties = vec![
        ("status", Schema::string()),
        ("title", Schema::string()),
        ("detail", Schema::string()),
    ];

    let mut schema = Schema::object();
    schema.properties = vec![("errors", Schema::array_of(error_item))];
    schema
}
