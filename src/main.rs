use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use schemamap::{
    generate_diagram, generate_foreign_key_file, generate_graphviz, DiagramOptions,
    ForeignKeyOptions, GraphvizOptions, DEFAULT_FKEYS_PATH, DEFAULT_MODEL_PATH,
};

#[derive(Parser)]
#[command(name = "schemamap")]
#[command(author, version, about = "Schema diagrams and foreign-key DDL from SQL table definitions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a markdown file with a Mermaid diagram from CREATE TABLE statements
    Diagram {
        /// SQL files (or glob patterns) to parse; later files override earlier ones
        #[arg(long, num_args = 1.., required = true)]
        sql_files: Vec<String>,

        /// Output markdown file path
        #[arg(long)]
        output_md_file: PathBuf,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate a Graphviz DOT file from CREATE TABLE statements
    Graphviz {
        /// SQL files (or glob patterns) to parse; later files override earlier ones
        #[arg(long, num_args = 1.., required = true)]
        sql_files: Vec<String>,

        /// Output .dot file path
        #[arg(long)]
        output_dot_file: PathBuf,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Generate PostgreSQL foreign key statements from a relational model
    Fkeys {
        /// Relational model JSON file
        #[arg(long, default_value = DEFAULT_MODEL_PATH)]
        input_json_file: PathBuf,

        /// Output SQL file path
        #[arg(long, default_value = DEFAULT_FKEYS_PATH)]
        output_sql_file: PathBuf,

        /// Limit to tables matching db, db.schema, or db.schema.table
        #[arg(long, num_args = 1..)]
        include: Vec<String>,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Commands::Diagram { verbose, .. }
            | Commands::Graphviz { verbose, .. }
            | Commands::Fkeys { verbose, .. } => *verbose,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.verbose());

    match cli.command {
        Commands::Diagram {
            sql_files,
            output_md_file,
            ..
        } => {
            generate_diagram(DiagramOptions {
                sql_files,
                output_md_file,
            })?;
        }
        Commands::Graphviz {
            sql_files,
            output_dot_file,
            ..
        } => {
            generate_graphviz(GraphvizOptions {
                sql_files,
                output_dot_file,
            })?;
        }
        Commands::Fkeys {
            input_json_file,
            output_sql_file,
            include,
            ..
        } => {
            let report = generate_foreign_key_file(ForeignKeyOptions {
                input_json_file,
                output_sql_file,
                include,
            })?;
            if report.is_empty() {
                tracing::warn!("No foreign key relationships found");
            }
        }
    }

    Ok(())
}
