//! undocx CLI - Word document text extraction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;

use undocx::{detect, Error, Undocx};

/// Exit code for budget-exceeded failures, distinct from parse errors so
/// scripts can offer truncation instead of a re-upload.
const EXIT_BUDGET: u8 = 3;
const EXIT_FAILURE: u8 = 2;

#[derive(Parser)]
#[command(name = "undocx")]
#[command(version)]
#[command(about = "Extract Word document text as JSON-safe output", long_about = None)]
struct Cli {
    /// Input file (.docx, .md, .txt); shorthand for the `text` command
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract JSON-safe text from a document
    Text {
        /// Input file (.docx, .md, .txt)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Model identifier for the token budget
        #[arg(long, env = "UNDOCX_MODEL", default_value = "gpt-3.5-turbo")]
        model: String,

        /// Skip the token budget gate entirely
        #[arg(long)]
        no_budget: bool,

        /// Fail when the token counter itself fails
        #[arg(long)]
        strict_budget: bool,

        /// Maximum input size in megabytes
        #[arg(long, default_value = "20")]
        max_size_mb: usize,
    },

    /// Show document metadata and structure counts
    Info {
        /// Input file (.docx)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Text {
            input,
            output,
            model,
            no_budget,
            strict_budget,
            max_size_mb,
        }) => cmd_text(&input, output, &model, no_budget, strict_budget, max_size_mb),
        Some(Commands::Info { input }) => cmd_info(&input),
        None => match cli.input {
            Some(input) => cmd_text(&input, None, "gpt-3.5-turbo", false, false, 20),
            None => {
                eprintln!("{} no input file; see --help", "error:".red().bold());
                return ExitCode::from(EXIT_FAILURE);
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            match err {
                Error::BudgetExceeded { .. } => ExitCode::from(EXIT_BUDGET),
                _ => ExitCode::from(EXIT_FAILURE),
            }
        }
    }
}

fn cmd_text(
    input: &Path,
    output: Option<PathBuf>,
    model: &str,
    no_budget: bool,
    strict_budget: bool,
    max_size_mb: usize,
) -> Result<(), Error> {
    validate_input_path(input)?;

    let mut builder = Undocx::new()
        .with_model(model)
        .with_max_bytes(max_size_mb * 1024 * 1024);
    if !no_budget {
        builder = builder.with_default_counter();
    }
    if strict_budget {
        builder = builder.strict_budget();
    }

    let result = builder.extract_file(input)?;

    if let Some(tokens) = result.stats.tokens {
        log::info!(
            "token usage: {}/{} for model {}",
            tokens.token_count,
            tokens.model_limit,
            model
        );
    }
    if result.stats.unresolved_nodes > 0 {
        eprintln!(
            "{} {} body nodes could not be resolved; output may be incomplete",
            "warning:".yellow().bold(),
            result.stats.unresolved_nodes
        );
    }

    match output {
        Some(path) => fs::write(path, result.text)?,
        None => println!("{}", result.text),
    }
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Error> {
    validate_input_path(input)?;

    let doc = undocx::parse_file(input)?;
    let info = serde_json::json!({
        "metadata": doc.metadata,
        "blocks": doc.block_count(),
        "paragraphs": doc.paragraph_count(),
        "tables": doc.table_count(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&info).map_err(|e| Error::Other(e.to_string()))?
    );
    Ok(())
}

fn validate_input_path(path: &Path) -> Result<(), Error> {
    if detect::kind_for_path(path).is_none() {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)");
        return Err(Error::UnsupportedType(ext.to_string()));
    }
    Ok(())
}
