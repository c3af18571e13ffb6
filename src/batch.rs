use crate::convert::Convert;
use crate::request::ConversionRequest;
use crate::scanner::FolderScanner;
use crate::ui::{OutputFormatter, ProgressManager};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Per-item result of the batch. Failures are isolated here instead of
/// propagating: nothing recoverable escapes the runner.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Converted { source: PathBuf, dest: PathBuf },
    Failed { path: PathBuf, error: String },
    MissingFile { path: PathBuf },
    MissingFolder { path: PathBuf },
    FolderDone { folder: PathBuf, converted: usize },
    FolderFailed { folder: PathBuf, error: String },
}

impl Outcome {
    pub fn message(&self) -> String {
        match self {
            Outcome::Converted { source, dest } => format!(
                "Converted: {} -> {}",
                file_name(source),
                file_name(dest)
            ),
            Outcome::Failed { path, error } => {
                format!("Conversion failed: {}: {}", path.display(), error)
            }
            Outcome::MissingFile { path } => {
                format!("File does not exist: {}", path.display())
            }
            Outcome::MissingFolder { path } => {
                format!("Folder does not exist: {}", path.display())
            }
            Outcome::FolderDone { folder, converted } => format!(
                "Folder processed: {} ({} converted)",
                file_name(folder),
                converted
            ),
            Outcome::FolderFailed { folder, error } => {
                format!("Folder failed: {}: {}", folder.display(), error)
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Ordered record of everything the batch did. Messages appear in processing
/// order: explicit files first in input order, then each folder's contents in
/// traversal order followed by the folder summary.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
    pub outcomes: Vec<Outcome>,
}

impl BatchReport {
    pub fn converted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Converted { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Failed { .. } | Outcome::FolderFailed { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::MissingFile { .. } | Outcome::MissingFolder { .. }))
            .count()
    }

    pub fn folders_processed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::FolderDone { .. }))
            .count()
    }

    pub fn messages(&self) -> Vec<String> {
        self.outcomes.iter().map(Outcome::message).collect()
    }
}

pub struct BatchRunner<'a> {
    converter: &'a dyn Convert,
    scanner: FolderScanner,
    output: &'a OutputFormatter,
    progress: &'a ProgressManager,
    output_extension: String,
    overwrite: bool,
}

impl<'a> BatchRunner<'a> {
    pub fn new(
        converter: &'a dyn Convert,
        scanner: FolderScanner,
        output: &'a OutputFormatter,
        progress: &'a ProgressManager,
        output_extension: String,
        overwrite: bool,
    ) -> Self {
        Self {
            converter,
            scanner,
            output,
            progress,
            output_extension,
            overwrite,
        }
    }

    /// Run the whole batch: every explicit file in input order, then every
    /// folder in input order. Single-threaded and synchronous; a failing item
    /// never aborts the rest of the batch.
    pub fn run(&self, request: &ConversionRequest) -> BatchReport {
        let started = Utc::now();
        let mut outcomes = Vec::new();

        self.output.info(&format!(
            "Processing {} files and {} folders",
            request.files.len(),
            request.folders.len()
        ));

        for file in &request.files {
            if !file.exists() {
                self.record(&mut outcomes, Outcome::MissingFile { path: file.clone() });
                continue;
            }

            let outcome = match self.convert_file(file) {
                Ok(dest) => Outcome::Converted {
                    source: file.clone(),
                    dest,
                },
                Err(error) => Outcome::Failed {
                    path: file.clone(),
                    error,
                },
            };
            self.record(&mut outcomes, outcome);
        }

        for folder in &request.folders {
            if !folder.exists() {
                self.record(
                    &mut outcomes,
                    Outcome::MissingFolder {
                        path: folder.clone(),
                    },
                );
                continue;
            }

            self.process_folder(folder, &mut outcomes);
        }

        BatchReport {
            started,
            finished: Utc::now(),
            outcomes,
        }
    }

    /// Convert one file and write the Markdown next to it, replacing the
    /// source extension. Errors come back as display text: the caller records
    /// them, it never propagates them.
    fn convert_file(&self, path: &Path) -> std::result::Result<PathBuf, String> {
        let conversion = self.converter.convert(path).map_err(|e| e.to_string())?;

        let dest = path.with_extension(&self.output_extension);
        if !self.overwrite && dest.exists() {
            return Err(format!("destination already exists: {}", dest.display()));
        }

        std::fs::write(&dest, conversion.markdown.as_bytes())
            .map_err(|e| format!("failed to write {}: {}", dest.display(), e))?;

        Ok(dest)
    }

    fn process_folder(&self, folder: &Path, outcomes: &mut Vec<Outcome>) {
        let scan = match self.scanner.scan(folder) {
            Ok(scan) => scan,
            Err(error) => {
                self.record(
                    outcomes,
                    Outcome::FolderFailed {
                        folder: folder.to_path_buf(),
                        error: error.to_string(),
                    },
                );
                return;
            }
        };

        for error in &scan.errors {
            self.progress
                .suspend(|| self.output.warning(&format!("Scan warning: {}", error)));
        }

        let pb = self
            .progress
            .create_file_progress(scan.supported_count() as u64);
        let mut converted = 0usize;

        for file in &scan.files {
            if !file.supported {
                self.progress.suspend(|| {
                    self.output
                        .skip(&format!("Unsupported file format: {}", file_name(&file.path)))
                });
                continue;
            }

            let outcome = match self.convert_file(&file.path) {
                Ok(dest) => {
                    converted += 1;
                    Outcome::Converted {
                        source: file.path.clone(),
                        dest,
                    }
                }
                Err(error) => Outcome::Failed {
                    path: file.path.clone(),
                    error,
                },
            };
            self.record(outcomes, outcome);
            pb.inc(1);
        }

        pb.finish_and_clear();

        self.record(
            outcomes,
            Outcome::FolderDone {
                folder: folder.to_path_buf(),
                converted,
            },
        );
    }

    fn record(&self, outcomes: &mut Vec<Outcome>, outcome: Outcome) {
        let message = outcome.message();
        self.progress.suspend(|| match &outcome {
            Outcome::Converted { .. } | Outcome::FolderDone { .. } => {
                self.output.success(&message)
            }
            Outcome::Failed { .. } | Outcome::FolderFailed { .. } => self.output.error(&message),
            Outcome::MissingFile { .. } | Outcome::MissingFolder { .. } => {
                self.output.skip(&message)
            }
        });
        outcomes.push(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{Conversion, ConvertError, ConvertResult};
    use crate::scanner::FileFilter;
    use crate::ui::OutputMode;
    use std::fs;
    use tempfile::TempDir;

    struct StaticConverter {
        text: &'static str,
    }

    impl Convert for StaticConverter {
        fn convert(&self, _path: &Path) -> ConvertResult<Conversion> {
            Ok(Conversion {
                markdown: self.text.to_string(),
            })
        }
    }

    struct FailingConverter;

    impl Convert for FailingConverter {
        fn convert(&self, _path: &Path) -> ConvertResult<Conversion> {
            Err(ConvertError::UnsupportedFormat {
                extension: "bad".to_string(),
            })
        }
    }

    fn quiet_ui() -> (OutputFormatter, ProgressManager) {
        (
            OutputFormatter::new(OutputMode::Plain, 0, true),
            ProgressManager::new(false),
        )
    }

    fn runner<'a>(
        converter: &'a dyn Convert,
        output: &'a OutputFormatter,
        progress: &'a ProgressManager,
    ) -> BatchRunner<'a> {
        BatchRunner::new(
            converter,
            FolderScanner::new(FileFilter::default()),
            output,
            progress,
            "md".to_string(),
            true,
        )
    }

    #[test]
    fn test_explicit_file_conversion() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.txt");
        fs::write(&source, "hello").unwrap();

        let converter = StaticConverter { text: "hello" };
        let (output, progress) = quiet_ui();
        let runner = runner(&converter, &output, &progress);

        let request = ConversionRequest {
            files: vec![source.clone()],
            folders: vec![],
        };
        let report = runner.run(&request);

        assert_eq!(report.converted(), 1);
        assert_eq!(report.failed(), 0);

        let dest = dir.path().join("a.md");
        assert_eq!(fs::read_to_string(&dest).unwrap(), "hello");
        assert_eq!(
            report.outcomes[0].message(),
            "Converted: a.txt -> a.md"
        );
    }

    #[test]
    fn test_missing_file_is_logged_not_fatal() {
        let converter = StaticConverter { text: "x" };
        let (output, progress) = quiet_ui();
        let runner = runner(&converter, &output, &progress);

        let request = ConversionRequest {
            files: vec![PathBuf::from("/nonexistent/a.txt")],
            folders: vec![],
        };
        let report = runner.run(&request);

        assert_eq!(report.converted(), 0);
        assert_eq!(report.skipped(), 1);
        assert!(report.outcomes[0].message().contains("does not exist"));
    }

    #[test]
    fn test_failure_does_not_abort_batch() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("one.txt");
        let second = dir.path().join("two.txt");
        fs::write(&first, "1").unwrap();
        fs::write(&second, "2").unwrap();

        let converter = FailingConverter;
        let (output, progress) = quiet_ui();
        let runner = runner(&converter, &output, &progress);

        let request = ConversionRequest {
            files: vec![first, second],
            folders: vec![],
        };
        let report = runner.run(&request);

        // Both files were attempted despite the first failing.
        assert_eq!(report.failed(), 2);
        assert_eq!(report.outcomes.len(), 2);
    }

    #[test]
    fn test_direct_files_bypass_extension_filter() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("data.xyz");
        fs::write(&source, "raw").unwrap();

        let converter = StaticConverter { text: "converted" };
        let (output, progress) = quiet_ui();
        let runner = runner(&converter, &output, &progress);

        let request = ConversionRequest {
            files: vec![source],
            folders: vec![],
        };
        let report = runner.run(&request);

        assert_eq!(report.converted(), 1);
        assert!(dir.path().join("data.md").exists());
    }

    #[test]
    fn test_folder_conversion_with_filter() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("note.txt"), "text").unwrap();
        fs::write(dir.path().join("skip.xyz"), "???").unwrap();

        let converter = StaticConverter { text: "body" };
        let (output, progress) = quiet_ui();
        let runner = runner(&converter, &output, &progress);

        let request = ConversionRequest {
            files: vec![],
            folders: vec![dir.path().to_path_buf()],
        };
        let report = runner.run(&request);

        assert_eq!(report.converted(), 1);
        assert_eq!(report.folders_processed(), 1);
        assert!(dir.path().join("note.md").exists());
        assert!(!dir.path().join("skip.md").exists());

        let summary = report
            .outcomes
            .iter()
            .find(|o| matches!(o, Outcome::FolderDone { .. }))
            .unwrap();
        assert!(summary.message().contains("(1 converted)"));
    }

    #[test]
    fn test_missing_folder() {
        let converter = StaticConverter { text: "x" };
        let (output, progress) = quiet_ui();
        let runner = runner(&converter, &output, &progress);

        let request = ConversionRequest {
            files: vec![],
            folders: vec![PathBuf::from("/nonexistent/docs")],
        };
        let report = runner.run(&request);

        assert_eq!(report.skipped(), 1);
        assert_eq!(report.folders_processed(), 0);
    }

    #[test]
    fn test_overwrite_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.txt");
        fs::write(&source, "hello").unwrap();
        let dest = dir.path().join("a.md");
        fs::write(&dest, "stale output").unwrap();

        let converter = StaticConverter { text: "fresh" };
        let (output, progress) = quiet_ui();
        let runner = runner(&converter, &output, &progress);

        let request = ConversionRequest {
            files: vec![source],
            folders: vec![],
        };

        runner.run(&request);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "fresh");

        runner.run(&request);
        assert_eq!(fs::read_to_string(&dest).unwrap(), "fresh");
    }

    #[test]
    fn test_no_overwrite_records_failure() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.txt");
        fs::write(&source, "hello").unwrap();
        fs::write(dir.path().join("a.md"), "keep me").unwrap();

        let converter = StaticConverter { text: "fresh" };
        let (output, progress) = quiet_ui();
        let runner = BatchRunner::new(
            &converter,
            FolderScanner::new(FileFilter::default()),
            &output,
            &progress,
            "md".to_string(),
            false,
        );

        let request = ConversionRequest {
            files: vec![source],
            folders: vec![],
        };
        let report = runner.run(&request);

        assert_eq!(report.failed(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("a.md")).unwrap(),
            "keep me"
        );
    }

    #[test]
    fn test_report_serializes() {
        let report = BatchReport {
            started: Utc::now(),
            finished: Utc::now(),
            outcomes: vec![Outcome::Converted {
                source: PathBuf::from("/tmp/a.txt"),
                dest: PathBuf::from("/tmp/a.md"),
            }],
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"kind\":\"converted\""));
        assert!(json.contains("a.md"));
    }
}
