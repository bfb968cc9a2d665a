//! CMS OpenAPI Generator - Automatic OpenAPI documentation from CMS sources.
//!
//! This library generates OpenAPI 3.1 documentation by statically scanning a
//! CMS installation's API-component and webservices-plugin source trees. It
//! never executes the scanned code: route registrations, queryable filters and
//! view field lists are recovered by pattern matching over raw source text,
//! classified into a hierarchical tag taxonomy, assembled into operation
//! descriptors, and rendered through a self-contained YAML serializer whose
//! output is byte-reproducible for an unchanged tree.
//!
//! # Architecture
//!
//! The library is organized into modules that form a single-pass pipeline:
//!
//! 1. [`scanner`] - Discovers components and plugins by naming convention
//! 2. [`extractor`] - Recovers routes, filters and view fields from source text
//! 3. [`tags`] - Derives hierarchical classification labels from route paths
//! 4. [`openapi_builder`] - Assembles operation and path descriptors
//! 5. [`serializer`] - Renders the document model to YAML
//!
//! # Example Usage
//!
//! ```no_run
//! use openapi_from_cms::{
//!     openapi_builder::DocumentBuilder,
//!     scanner::{host_version, TreeScanner},
//!     serializer::render,
//! };
//! use std::path::PathBuf;
//!
//! // Scan the installation
//! let root = PathBuf::from("/var/www/site");
//! let scanner = TreeScanner::new(root.clone());
//! let scan = scanner.scan().unwrap();
//!
//! // Assemble and render the document
//! let version = host_version(&root).unwrap_or_else(|| "unknown".to_string());
//! let document = DocumentBuilder::new(false).build(&scan, version);
//! let yaml = render(&document);
//! println!("{}", yaml);
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module which provides a complete
//! CLI application.

pub mod cli;
pub mod error;
pub mod extractor;
pub mod inflect;
pub mod openapi_builder;
pub mod scanner;
pub mod serializer;
pub mod tags;
