//! schemamap: schema diagrams and foreign-key DDL from convention-based SQL
//!
//! This library reads `CREATE TABLE` scripts, infers relationships from `_id` column names,
//! groups tables by `-- DIAGRAM SECTION:` comments, and renders Mermaid or Graphviz diagrams.
//! It also turns a persisted relational model (JSON) into PostgreSQL `ALTER TABLE ... FOREIGN KEY`
//! statements.

pub mod error;
pub mod fkeys;
pub mod model;
pub mod parser;
pub mod relational;
pub mod render;
pub mod util;

use std::path::{Path, PathBuf};

use anyhow::Result;

pub use error::{ResolveError, SchemaMapError};
pub use fkeys::ForeignKeyReport;
pub use model::SchemaModel;

/// Default location of the relational model consumed by `fkeys`
pub const DEFAULT_MODEL_PATH: &str = "durc_config/DURC_relational_model.json";
/// Default location of the generated foreign-key script
pub const DEFAULT_FKEYS_PATH: &str = "durc_config/foreign_keys.sql";

/// Options for generating a Mermaid markdown diagram
#[derive(Debug, Clone)]
pub struct DiagramOptions {
    /// SQL files or glob patterns, in merge order
    pub sql_files: Vec<String>,
    /// Output path for the markdown file
    pub output_md_file: PathBuf,
}

/// Options for generating a Graphviz DOT diagram
#[derive(Debug, Clone)]
pub struct GraphvizOptions {
    /// SQL files or glob patterns, in merge order
    pub sql_files: Vec<String>,
    /// Output path for the .dot file
    pub output_dot_file: PathBuf,
}

/// Options for generating foreign-key statements
#[derive(Debug, Clone)]
pub struct ForeignKeyOptions {
    pub input_json_file: PathBuf,
    pub output_sql_file: PathBuf,
    /// Include patterns; empty means every table
    pub include: Vec<String>,
}

impl Default for ForeignKeyOptions {
    fn default() -> Self {
        Self {
            input_json_file: PathBuf::from(DEFAULT_MODEL_PATH),
            output_sql_file: PathBuf::from(DEFAULT_FKEYS_PATH),
            include: Vec::new(),
        }
    }
}

impl ForeignKeyOptions {
    /// Equivalent command line, recorded in the output header
    pub fn command_line(&self) -> String {
        let mut command = format!(
            "schemamap fkeys --input-json-file {} --output-sql-file {}",
            self.input_json_file.display(),
            self.output_sql_file.display()
        );
        if !self.include.is_empty() {
            command.push_str(" --include ");
            command.push_str(&self.include.join(" "));
        }
        command
    }
}

/// Resolve inputs and build the merged schema model; an empty model is an error.
pub fn load_schema(sql_files: &[String]) -> Result<(Vec<PathBuf>, SchemaModel)> {
    // Step 1: Expand and validate inputs before parsing anything
    let files = parser::resolve_sql_inputs(sql_files)?;
    tracing::info!("Processing {} SQL file(s)...", files.len());

    // Step 2: Parse and merge in input order
    let model = model::parse_sql_files(&files)?;
    if model.is_empty() {
        return Err(SchemaMapError::NoTablesFound.into());
    }

    tracing::info!(
        "Parsed {} tables with {} section assignments",
        model.len(),
        model.sections.len()
    );
    Ok((files, model))
}

/// Generate a markdown file containing a Mermaid diagram of the schema
pub fn generate_diagram(options: DiagramOptions) -> Result<PathBuf> {
    let (files, model) = load_schema(&options.sql_files)?;

    tracing::info!("Generating Mermaid diagram...");
    let mermaid = render::render_mermaid(&model);
    let sources: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
    let markdown = render::render_markdown(&mermaid, &sources);

    write_output(&options.output_md_file, &markdown)?;
    tracing::info!(
        "Successfully generated diagram at {}",
        options.output_md_file.display()
    );

    Ok(options.output_md_file)
}

/// Generate a Graphviz DOT file of the schema
pub fn generate_graphviz(options: GraphvizOptions) -> Result<PathBuf> {
    let (_, model) = load_schema(&options.sql_files)?;

    tracing::info!("Generating Graphviz diagram...");
    let dot = render::render_graphviz(&model);

    write_output(&options.output_dot_file, &dot)?;
    tracing::info!("Diagram saved as: {}", options.output_dot_file.display());

    Ok(options.output_dot_file)
}

/// Generate foreign-key statements from a relational model and write them to a SQL file
pub fn generate_foreign_key_file(options: ForeignKeyOptions) -> Result<ForeignKeyReport> {
    // Step 1: Validate patterns before touching the model file
    let filter = relational::IncludeFilter::parse(options.include.as_slice())?;

    // Step 2: Load the model
    tracing::info!("Loading relational model from {}", options.input_json_file.display());
    let model = relational::load_relational_model(&options.input_json_file)?;

    // Step 3: Resolve and deduplicate
    let report = fkeys::generate_foreign_keys(&model, &filter);
    tracing::info!(
        "Generated {} foreign key statements ({} duplicates dropped, {} skipped) from {} tables",
        report.foreign_keys.len(),
        report.duplicates,
        report.skipped.len(),
        report.tables_processed
    );

    // Step 4: Write
    let header = fkeys::SqlFileHeader::new(options.command_line());
    fkeys::write_foreign_key_sql(&options.output_sql_file, &report, &header)?;
    tracing::info!(
        "Foreign key statements written to {}",
        options.output_sql_file.display()
    );

    Ok(report)
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    let write_error = |source| SchemaMapError::OutputWriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, content).map_err(write_error)?;
    Ok(())
}
