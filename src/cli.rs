use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

/// CMS OpenAPI Generator - Generate OpenAPI documentation from component and plugin sources
#[derive(Parser, Debug)]
#[command(name = "openapi-from-cms")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the CMS installation root
    #[arg(value_name = "CMS_ROOT")]
    pub root: PathBuf,

    /// Include all discovered components, not only those with an active
    /// webservices plugin
    #[arg(short = 'a', long = "all")]
    pub include_all: bool,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.root.exists() {
        anyhow::bail!("CMS root does not exist: {}", args.root.display());
    }

    if !args.root.is_dir() {
        anyhow::bail!("CMS root is not a directory: {}", args.root.display());
    }

    info!("CMS root: {}", args.root.display());
    info!(
        "Scope: {}",
        if args.include_all {
            "all components"
        } else {
            "active plugins only"
        }
    );
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::openapi_builder::DocumentBuilder;
    use crate::scanner::{host_version, TreeScanner};
    use crate::serializer::{render, write_to_file};

    info!("Starting OpenAPI document generation...");

    // Step 1: Scan the component and plugin trees
    info!("Scanning source trees...");
    let scanner = TreeScanner::new(args.root.clone());
    let scan = scanner
        .scan()
        .context("Failed to scan the CMS source tree")?;

    info!(
        "Found {} components and {} plugins",
        scan.components.len(),
        scan.plugins.len()
    );

    // Step 2: Look up the host version
    let version = host_version(&args.root).unwrap_or_else(|| "unknown".to_string());
    debug!("Host version: {}", version);

    // Step 3: Assemble the document
    info!("Building OpenAPI document...");
    let builder = DocumentBuilder::new(args.include_all);
    let document = builder.build(&scan, version);

    info!(
        "Document holds {} tags and {} paths",
        document.tags.len(),
        document.paths.len()
    );

    // Step 4: Render and write
    let yaml = render(&document);

    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&yaml, output_path)?;
        info!(
            "Successfully wrote OpenAPI document to {}",
            output_path.display()
        );
    } else {
        println!("{}", yaml);
    }

    // Step 5: Display summary
    info!("Generation complete!");
    info!("Summary:");
    info!("  - Total components: {}", scan.components.len());
    info!("  - Active plugins: {}", scan.plugins.len());
    info!("  - Documented paths: {}", document.paths.len());

    Ok(())
}
