use std::{
    path::PathBuf,
    process::ExitCode,
};

use clap::{
    Parser,
    Subcommand,
};
use poemkit::{
    core::{
        PoemStore,
        PoemkitError,
        ToolConfig,
    },
    gui,
    tools::{
        self,
        FileBatchSummary,
    },
};
use tracing_subscriber::{
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

#[derive(Parser)]
#[command(name = "poemkit")]
#[command(version)]
#[command(about = "Maintain multilingual poem data files and images")]
struct Cli {
    /// Configuration file (JSON). Defaults to the user settings file.
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split the combined multilingual file into one file per language
    Split {
        /// Combined input file
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Directory for the per-language files
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Merge the per-language files back into one combined file
    Merge {
        /// Combined output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Remove a top-level field from every record
    StripField {
        /// Field name to remove
        #[arg(short, long)]
        field: Option<String>,

        /// Files to rewrite (default: every per-language file)
        #[arg(value_name = "FILES")]
        files: Vec<PathBuf>,
    },

    /// Drop the trailing full stop from sentences that have no other punctuation
    TrimStops {
        /// Files to rewrite (default: the configured trim languages)
        #[arg(value_name = "FILES")]
        files: Vec<PathBuf>,
    },

    /// Convert every image in a directory to a square WebP
    ConvertImages {
        /// Directory holding the source images
        #[arg(value_name = "SOURCE_DIR")]
        source_dir: PathBuf,
    },

    /// Report poems and sentences that differ between languages
    Check,

    /// Open the multi-language tree editor
    Editor,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "poemkit=info,warn".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PoemkitError> {
    let config = ToolConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Split { input, output_dir } => {
            let input = input.unwrap_or_else(|| config.combined_source.clone());
            let output_dir = output_dir.unwrap_or_else(|| config.data_dir.clone());

            let summary =
                tools::split_file(&input, &output_dir, &config.basename, &config.languages)?;
            tracing::info!(
                "Split {} poems into {} files ({} sentences skipped)",
                summary.poems,
                summary.files.len(),
                summary.skipped_sentences
            );
        }

        Commands::Merge { output } => {
            let output = output.unwrap_or_else(|| config.combined_output.clone());
            let store = PoemStore::load(&config)?;
            let poems = tools::merge_to_file(&store, &output)?;
            tracing::info!("Merged {} poems into {}", poems, output.display());
        }

        Commands::StripField { field, files } => {
            let field = field.unwrap_or_else(|| config.strip_field.clone());
            let files = if files.is_empty() {
                config.language_files().into_iter().map(|(_, path)| path).collect()
            } else {
                files
            };

            let summary = tools::strip_field_files(&files, &field);
            log_batch(&format!("Removed field \"{}\"", field), &summary);
        }

        Commands::TrimStops { files } => {
            let files = if files.is_empty() {
                config.trim_stop_languages.iter().map(|lang| config.language_file(lang)).collect()
            } else {
                files
            };

            let summary = tools::trim_stops_files(&files);
            log_batch("Trimmed trailing full stops", &summary);
        }

        Commands::ConvertImages { source_dir } => {
            let summary = tools::convert_directory(&source_dir, &config.images)?;
            tracing::info!(
                "Wrote {} images to {} ({} failed, {} skipped)",
                summary.converted.len(),
                summary.output_dir.display(),
                summary.failed.len(),
                summary.skipped
            );
        }

        Commands::Check => {
            let store = PoemStore::load(&config)?;
            let issues = tools::check_store(&store);
            for issue in &issues {
                tracing::warn!("{}", issue);
            }
            tracing::info!(
                "Checked {} poems across {} languages: {} issue(s)",
                store.canonical_poems().len(),
                store.loaded_languages().len(),
                issues.len()
            );
        }

        Commands::Editor => gui::run_editor(config)?,
    }

    Ok(())
}

fn log_batch(action: &str, summary: &FileBatchSummary) {
    tracing::info!(
        "{}: {} entries in {} file(s), {} unchanged, {} failed",
        action,
        summary.changes,
        summary.changed_files.len(),
        summary.unchanged_files.len(),
        summary.failed_files.len()
    );
}
