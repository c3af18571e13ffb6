use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mdbatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert documents and folders to Markdown")]
#[command(
    long_about = "mdbatch reads two JSON files, each holding an array of absolute paths \
                  (explicit files and folders to walk), converts every eligible document \
                  to Markdown and writes the result next to the original."
)]
#[command(after_help = "EXAMPLES:\n  \
    mdbatch files.json folders.json\n  \
    mdbatch files.json folders.json --formats docx,xlsx,txt --verbose\n  \
    mdbatch files.json folders.json --output-format json --no-progress\n  \
    mdbatch --generate-config")]
pub struct Cli {
    /// JSON file containing an array of file paths to convert
    pub files_json: Option<PathBuf>,

    /// JSON file containing an array of folder paths to walk
    pub folders_json: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Folder-traversal extensions (comma-separated)
    #[arg(
        short,
        long,
        help = "Extensions converted during folder walks (e.g. docx,xlsx,txt)"
    )]
    pub formats: Option<String>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Do not replace existing .md files
    #[arg(long, help = "Fail items whose output file already exists")]
    pub no_overwrite: bool,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// List what would be converted without writing anything
    #[arg(long, help = "Show what would be converted without doing it")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_formats(self.formats.clone())
            .with_overwrite(if self.no_overwrite { Some(false) } else { None })
    }

    pub fn progress_enabled(&self) -> bool {
        !self.no_progress && !self.quiet && console::Term::stdout().features().is_attended()
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
