//! Source-tree scanner for discovering components and plugins.
//!
//! Discovery is purely convention-driven: a candidate directory is accepted as
//! a component when its controller directory exists, and as a plugin when its
//! entry-point source file exists. Candidates failing those checks are skipped
//! silently; only a missing root directory aborts the scan.

use crate::error::{Error, Result};
use crate::extractor::filters::extract_filters;
use crate::extractor::routes::extract_routes;
use crate::extractor::views::{extract_view_fields, ViewFields};
use crate::extractor::{Filter, Route};
use crate::inflect::ucfirst;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Components root, relative to the installation root.
pub const COMPONENTS_DIR: &str = "api/components";

/// Route-registration plugins root, relative to the installation root.
pub const PLUGINS_DIR: &str = "plugins/webservices";

/// Prefix a directory must carry to be considered a component candidate.
const COMPONENT_PREFIX: &str = "com_";

/// Suffix controller source files must carry.
const CONTROLLER_SUFFIX: &str = "Controller.php";

/// Fixed file name scanned for view field declarations.
const VIEW_FILE: &str = "JsonapiView.php";

static RELEASE_CONST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"const\s+RELEASE\s*=\s*['"]([^'"]+)['"]"#).unwrap());

/// A named source module group exposing controllers and views.
#[derive(Debug, Clone)]
pub struct Component {
    /// Full directory name, e.g. `com_contact`
    pub name: String,
    /// Name with the component prefix stripped, e.g. `contact`
    pub short_name: String,
    /// Component root directory
    pub path: PathBuf,
    /// Controller class name -> controller, e.g. `ContactsController`
    pub controllers: BTreeMap<String, Controller>,
    /// View class name -> view, e.g. `Contacts`
    pub views: BTreeMap<String, View>,
}

/// One controller source file and its extracted filters.
#[derive(Debug, Clone)]
pub struct Controller {
    pub file: PathBuf,
    pub filters: Vec<Filter>,
}

/// One view source file and its extracted rendering field lists.
#[derive(Debug, Clone)]
pub struct View {
    pub file: PathBuf,
    pub fields: ViewFields,
}

/// A route-registration unit bound to a component by naming convention.
#[derive(Debug, Clone)]
pub struct Plugin {
    pub name: String,
    pub path: PathBuf,
    /// Entry-point source file the routes were extracted from
    pub extension_file: PathBuf,
    pub routes: Vec<Route>,
}

/// Result of one scan pass over both roots.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Discovered components in name order
    pub components: Vec<Component>,
    /// Discovered plugins keyed by directory name
    pub plugins: BTreeMap<String, Plugin>,
}

/// Scanner for the component and plugin source trees of one installation.
///
/// # Example
///
/// ```no_run
/// use openapi_from_cms::scanner::TreeScanner;
/// use std::path::PathBuf;
///
/// let scanner = TreeScanner::new(PathBuf::from("/var/www/site"));
/// let scan = scanner.scan().unwrap();
/// println!(
///     "{} components, {} plugins",
///     scan.components.len(),
///     scan.plugins.len()
/// );
/// ```
pub struct TreeScanner {
    root: PathBuf,
}

impl TreeScanner {
    /// Creates a scanner rooted at the installation directory.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Scans both roots and returns the discovered components and plugins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] when either root directory is absent.
    pub fn scan(&self) -> Result<ScanResult> {
        Ok(ScanResult {
            components: self.scan_components()?,
            plugins: self.scan_plugins()?,
        })
    }

    /// Enumerates component candidates and accepts those with a controller
    /// directory.
    fn scan_components(&self) -> Result<Vec<Component>> {
        let root = self.root.join(COMPONENTS_DIR);
        if !root.is_dir() {
            return Err(Error::PathNotFound(root));
        }

        let mut components = Vec::new();

        for dir in subdirectories(&root) {
            let name = match dir.file_name().and_then(|n| n.to_str()) {
                Some(n) => n.to_string(),
                None => continue,
            };
            let Some(short_name) = name.strip_prefix(COMPONENT_PREFIX) else {
                continue;
            };

            let controller_dir = dir.join("src/Controller");
            if !controller_dir.is_dir() {
                debug!("skipping {}: no controller directory", name);
                continue;
            }

            components.push(Component {
                short_name: short_name.to_string(),
                controllers: find_controllers(&controller_dir),
                views: find_views(&dir.join("src/View")),
                path: dir,
                name,
            });
        }

        debug!("discovered {} components", components.len());
        Ok(components)
    }

    /// Enumerates plugin candidates and accepts those with an entry-point
    /// source file.
    fn scan_plugins(&self) -> Result<BTreeMap<String, Plugin>> {
        let root = self.root.join(PLUGINS_DIR);
        if !root.is_dir() {
            return Err(Error::PathNotFound(root));
        }

        let mut plugins = BTreeMap::new();

        for dir in subdirectories(&root) {
            let name = match dir.file_name().and_then(|n| n.to_str()) {
                Some(n) => n.to_string(),
                None => continue,
            };

            let extension_file = dir
                .join("src/Extension")
                .join(format!("{}.php", ucfirst(&name)));
            if !extension_file.is_file() {
                debug!("skipping plugin {}: no entry-point file", name);
                continue;
            }

            let routes = match fs::read_to_string(&extension_file) {
                Ok(source) => extract_routes(&source),
                Err(e) => {
                    debug!("skipping plugin {}: {}", name, e);
                    continue;
                }
            };

            plugins.insert(
                name.clone(),
                Plugin {
                    name,
                    path: dir,
                    extension_file,
                    routes,
                },
            );
        }

        debug!("discovered {} plugins", plugins.len());
        Ok(plugins)
    }
}

/// Best-effort lookup of the host release version.
///
/// Reads the conventioned version source file under the installation root and
/// pattern-matches its release constant; returns `None` when the file is
/// missing or the constant is not declared.
pub fn host_version(root: &Path) -> Option<String> {
    let version_file = root.join("libraries/src/Version.php");
    let source = fs::read_to_string(version_file).ok()?;
    RELEASE_CONST
        .captures(&source)
        .map(|c| c[1].to_string())
}

/// Immediate subdirectories of `dir`, in name order. Inaccessible entries are
/// logged and skipped.
fn subdirectories(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) if e.file_type().is_dir() => Some(e.into_path()),
            Ok(_) => None,
            Err(e) => {
                debug!("failed to access path: {}", e);
                None
            }
        })
        .collect()
}

/// Controller source files in one controller directory, keyed by class name.
fn find_controllers(dir: &Path) -> BTreeMap<String, Controller> {
    let mut controllers = BTreeMap::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        if !entry.file_type().is_file() || !file_name.ends_with(CONTROLLER_SUFFIX) {
            continue;
        }

        let class_name = file_name.trim_end_matches(".php").to_string();
        let filters = match fs::read_to_string(entry.path()) {
            Ok(source) => extract_filters(&source),
            Err(e) => {
                debug!("skipping controller {}: {}", class_name, e);
                continue;
            }
        };

        controllers.insert(
            class_name,
            Controller {
                file: entry.into_path(),
                filters,
            },
        );
    }

    controllers
}

/// View directories containing the conventioned view file, keyed by view name.
fn find_views(dir: &Path) -> BTreeMap<String, View> {
    let mut views = BTreeMap::new();
    if !dir.is_dir() {
        return views;
    }

    for view_dir in subdirectories(dir) {
        let Some(view_name) = view_dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let view_file = view_dir.join(VIEW_FILE);
        if !view_file.is_file() {
            continue;
        }

        let fields = match fs::read_to_string(&view_file) {
            Ok(source) => extract_view_fields(&source),
            Err(e) => {
                debug!("skipping view {}: {}", view_name, e);
                continue;
            }
        };

        views.insert(
            view_name.to_string(),
            View {
                file: view_file,
                fields,
            },
        );
    }

    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Lays out a minimal installation tree with one component and one plugin.
    fn create_tree() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let component = root.join("api/components/com_contact");
        fs::create_dir_all(component.join("src/Controller")).unwrap();
        fs::create_dir_all(component.join("src/View/Contacts")).unwrap();
        fs::write(
            component.join("src/Controller/ContactsController.php"),
            r#"<?php
class ContactsController extends ApiController
{
    public function displayList()
    {
        $this->modelState->set('filter.search', null);
    }
}
"#,
        )
        .unwrap();
        fs::write(
            component.join("src/View/Contacts/JsonapiView.php"),
            "<?php\nclass JsonapiView\n{\n    protected $fieldsToRenderList = ['id', 'name'];\n}\n",
        )
        .unwrap();

        let plugin = root.join("plugins/webservices/contact");
        fs::create_dir_all(plugin.join("src/Extension")).unwrap();
        fs::write(
            plugin.join("src/Extension/Contact.php"),
            r#"<?php
class Contact extends ApiRouterPlugin
{
    public function onBeforeApiRoute(&$router): void
    {
        $router->createCRUDRoutes('v1/contacts', 'contacts');
    }
}
"#,
        )
        .unwrap();

        temp_dir
    }

    #[test]
    fn test_scan_discovers_component_and_plugin() {
        let temp_dir = create_tree();
        let scanner = TreeScanner::new(temp_dir.path().to_path_buf());
        let scan = scanner.scan().unwrap();

        assert_eq!(scan.components.len(), 1);
        let component = &scan.components[0];
        assert_eq!(component.name, "com_contact");
        assert_eq!(component.short_name, "contact");
        assert!(component.controllers.contains_key("ContactsController"));
        assert!(component.views.contains_key("Contacts"));

        assert_eq!(scan.plugins.len(), 1);
        let plugin = &scan.plugins["contact"];
        assert_eq!(plugin.routes.len(), 1);
        assert_eq!(plugin.routes[0].path, "v1/contacts");
    }

    #[test]
    fn test_controller_filters_extracted_during_scan() {
        let temp_dir = create_tree();
        let scanner = TreeScanner::new(temp_dir.path().to_path_buf());
        let scan = scanner.scan().unwrap();

        let filters = &scan.components[0].controllers["ContactsController"].filters;
        let names: Vec<_> = filters.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["filter[search]", "page[limit]", "page[offset]"]);
    }

    #[test]
    fn test_view_fields_extracted_during_scan() {
        let temp_dir = create_tree();
        let scanner = TreeScanner::new(temp_dir.path().to_path_buf());
        let scan = scanner.scan().unwrap();

        let view = &scan.components[0].views["Contacts"];
        assert_eq!(view.fields.list, vec!["id", "name"]);
        assert!(view.fields.item.is_empty());
    }

    #[test]
    fn test_component_without_controller_dir_skipped() {
        let temp_dir = create_tree();
        let bare = temp_dir.path().join("api/components/com_bare");
        fs::create_dir_all(&bare).unwrap();

        let scanner = TreeScanner::new(temp_dir.path().to_path_buf());
        let scan = scanner.scan().unwrap();

        assert!(scan.components.iter().all(|c| c.name != "com_bare"));
    }

    #[test]
    fn test_unprefixed_directory_skipped() {
        let temp_dir = create_tree();
        let stray = temp_dir.path().join("api/components/not_a_component/src/Controller");
        fs::create_dir_all(stray).unwrap();

        let scanner = TreeScanner::new(temp_dir.path().to_path_buf());
        let scan = scanner.scan().unwrap();

        assert_eq!(scan.components.len(), 1);
    }

    #[test]
    fn test_plugin_without_entry_point_skipped() {
        let temp_dir = create_tree();
        let bare = temp_dir.path().join("plugins/webservices/bare/src/Extension");
        fs::create_dir_all(&bare).unwrap();
        // Entry point must be named after the title-cased plugin directory
        fs::write(bare.join("Other.php"), "<?php\n").unwrap();

        let scanner = TreeScanner::new(temp_dir.path().to_path_buf());
        let scan = scanner.scan().unwrap();

        assert!(!scan.plugins.contains_key("bare"));
    }

    #[test]
    fn test_missing_components_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("plugins/webservices")).unwrap();

        let scanner = TreeScanner::new(temp_dir.path().to_path_buf());
        match scanner.scan() {
            Err(Error::PathNotFound(path)) => {
                assert!(path.ends_with("api/components"));
            }
            other => panic!("expected PathNotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_missing_plugins_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("api/components")).unwrap();

        let scanner = TreeScanner::new(temp_dir.path().to_path_buf());
        match scanner.scan() {
            Err(Error::PathNotFound(path)) => {
                assert!(path.ends_with("plugins/webservices"));
            }
            other => panic!("expected PathNotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_components_sorted_by_name() {
        let temp_dir = create_tree();
        for name in ["com_banners", "com_articles"] {
            let dir = temp_dir.path().join("api/components").join(name);
            fs::create_dir_all(dir.join("src/Controller")).unwrap();
        }

        let scanner = TreeScanner::new(temp_dir.path().to_path_buf());
        let scan = scanner.scan().unwrap();

        let names: Vec<_> = scan.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["com_articles", "com_banners", "com_contact"]);
    }

    #[test]
    fn test_host_version_lookup() {
        let temp_dir = create_tree();
        let lib = temp_dir.path().join("libraries/src");
        fs::create_dir_all(&lib).unwrap();
        fs::write(
            lib.join("Version.php"),
            "<?php\nfinal class Version\n{\n    public const RELEASE = '6.0';\n}\n",
        )
        .unwrap();

        assert_eq!(host_version(temp_dir.path()).as_deref(), Some("6.0"));
    }

    #[test]
    fn test_host_version_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(host_version(temp_dir.path()), None);
    }
}
