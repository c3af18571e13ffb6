use clap::error::ErrorKind;
use clap::Parser;
use mdbatch::{
    Cli, ConversionRequest, MdBatch, OutputFormatter, OutputMode, UserFriendlyError,
};
use std::process;

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    // Startup failures all map to exit code 1; item-level failures never
    // change the exit code.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            return code;
        }
    };

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match MdBatch::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    let (files_json, folders_json) = match (&cli.files_json, &cli.folders_json) {
        (Some(files), Some(folders)) => (files, folders),
        _ => {
            app.output_formatter()
                .error("Two arguments are required: <FILES_JSON> <FOLDERS_JSON>");
            return 1;
        }
    };

    let request = match ConversionRequest::load(files_json, folders_json) {
        Ok(request) => request,
        Err(e) => {
            app.handle_error(&e);
            return 1;
        }
    };

    if cli.dry_run {
        return handle_dry_run(&app, &request);
    }

    let report = app.convert_batch(&request);
    app.output_formatter().print_batch_report(&report);

    0
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "mdbatch.toml".to_string());

    match MdBatch::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  mdbatch <FILES_JSON> <FOLDERS_JSON> --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            1
        }
    }
}

fn handle_dry_run(app: &MdBatch, request: &ConversionRequest) -> i32 {
    let formatter = app.output_formatter();

    formatter.start_operation("DRY RUN MODE - no files will be written");

    for file in &request.files {
        if file.exists() {
            formatter.success(&format!("would convert {}", file.display()));
        } else {
            formatter.skip(&format!("File does not exist: {}", file.display()));
        }
    }

    let scanner = app.folder_scanner();
    for folder in &request.folders {
        if !folder.exists() {
            formatter.skip(&format!("Folder does not exist: {}", folder.display()));
            continue;
        }

        match scanner.scan(folder) {
            Ok(scan) => {
                for file in scan.files.iter().filter(|f| f.supported) {
                    formatter.success(&format!("would convert {}", file.path.display()));
                }
                formatter.success(&format!(
                    "Folder {}: {} of {} files eligible",
                    folder.display(),
                    scan.supported_count(),
                    scan.files.len()
                ));
            }
            Err(e) => formatter.error(&format!("Folder failed: {}: {}", folder.display(), e)),
        }
    }

    0
}

fn print_startup_error(error: &mdbatch::BatchError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let cli = Cli::try_parse_from([
            "mdbatch",
            "--generate-config",
            "--config",
            config_path.to_str().unwrap(),
        ])
        .unwrap();

        let exit_code = handle_generate_config(&cli);
        assert_eq!(exit_code, 0);
        assert!(config_path.exists());

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[filters]"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.txt");
        fs::write(&source, "hello").unwrap();

        let app = MdBatch::new(
            mdbatch::Config::default(),
            OutputMode::Plain,
            0,
            true,
            false,
        )
        .unwrap();

        let request = ConversionRequest {
            files: vec![source],
            folders: vec![dir.path().to_path_buf()],
        };

        let exit_code = handle_dry_run(&app, &request);
        assert_eq!(exit_code, 0);
        assert!(!dir.path().join("a.md").exists());
    }
}
