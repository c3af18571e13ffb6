pub mod batch;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod request;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use batch::{BatchReport, BatchRunner, Outcome};
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, FilterConfig, OutputConfig};
pub use convert::{Convert, Conversion, ConvertError, DocumentConverter};
pub use error::{BatchError, Result, UserFriendlyError};
pub use request::ConversionRequest;
pub use scanner::{FileFilter, FolderScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Main library interface: owns the configuration, the UI components and the
/// single converter instance reused for every file in the batch.
pub struct MdBatch {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    converter: DocumentConverter,
}

impl MdBatch {
    pub fn new(
        config: Config,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
        progress_enabled: bool,
    ) -> Result<Self> {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(progress_enabled && !quiet);

        // Converter availability is a startup error, not a per-item one.
        let converter =
            DocumentConverter::new().map_err(|e| BatchError::ConverterUnavailable {
                message: e.to_string(),
            })?;

        Ok(Self {
            config,
            output_formatter,
            progress_manager,
            converter,
        })
    }

    /// Create an MdBatch instance from CLI arguments
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = cli.load_config()?;
        let output_mode = match cli.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Self::new(
            config,
            output_mode,
            cli.verbosity_level(),
            cli.quiet,
            cli.progress_enabled(),
        )
    }

    /// Run one batch of conversions and return the ordered outcome report.
    pub fn convert_batch(&self, request: &ConversionRequest) -> BatchReport {
        self.output_formatter
            .start_operation("Starting batch conversion");

        let runner = BatchRunner::new(
            &self.converter,
            self.folder_scanner(),
            &self.output_formatter,
            &self.progress_manager,
            self.config.output.extension.clone(),
            self.config.output.overwrite,
        );

        let report = runner.run(request);
        self.progress_manager.clear();
        report
    }

    pub fn folder_scanner(&self) -> FolderScanner {
        FolderScanner::new(FileFilter::new(&self.config.filters))
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(BatchError::Io)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn progress_manager(&self) -> &ProgressManager {
        &self.progress_manager
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &BatchError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
