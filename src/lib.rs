pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod report;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, Command, OutputFormat};
pub use config::{CliOverrides, Config, InputConfig, OutputConfig};
pub use error::{Result, SubListError, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    ExtractionSet, OptGprsData, OutputManager, RecordExtractor, RecordKind, ScanProgress, SubData,
    SubscriberData, NOT_AVAILABLE, RECORD_TERMINATOR,
};
pub use report::{
    BulkExporter, ComparisonReport, ComparisonSummary, ExportSummary, PairwiseComparator,
};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Main library interface: reads the dump named by the configuration and
/// runs the export or comparison workflow over it.
pub struct SubList {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl SubList {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create a SubList instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Reads the whole dump. A missing file gets its own error so callers
    /// can report it distinctly.
    pub fn read_input(&self) -> Result<String> {
        let path = &self.config.input.path;
        std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SubListError::InputNotFound { path: path.clone() },
            _ => SubListError::Io(e),
        })
    }

    /// Export every subscriber in the dump to the two CSV files.
    pub fn export_all(&self) -> Result<ExportSummary> {
        let content = self.read_input()?;
        let extractor = RecordExtractor::new()?;

        self.output_formatter.start_operation("Extracting subscriber records");
        let start = Instant::now();
        let total_segments = RecordExtractor::segments(&content).count() as u64;
        let scan_progress = self.progress_manager.create_segment_progress(total_segments);
        let progress_callback = {
            let pb = scan_progress.clone();
            move |progress: &ScanProgress| {
                ui::progress::update_scan_progress(&pb, progress);
            }
        };

        let set = extractor.extract_all(&content, Some(&progress_callback));
        ui::progress::finish_progress_with_summary(
            &scan_progress,
            &format!("Scanned {} records", set.segments_scanned),
            start.elapsed(),
        );

        let exporter = BulkExporter::new(
            OutputManager::new(self.config.export_directory()),
            self.config.output.file_prefix.clone(),
        )
        .with_timestamp_format(self.config.output.timestamp_format.clone());

        let summary = exporter.export(&set)?;
        info!(
            sub = summary.sub_records,
            optgprs = summary.optgprs_records,
            "export complete"
        );

        Ok(summary)
    }

    /// Compare two IMSIs and write the report file.
    pub fn compare(&self, first_imsi: &str, second_imsi: &str) -> Result<ComparisonSummary> {
        let content = self.read_input()?;
        self.compare_in(&content, first_imsi, second_imsi)
    }

    /// Same as [`SubList::compare`] over a dump that was already read.
    pub fn compare_in(
        &self,
        content: &str,
        first_imsi: &str,
        second_imsi: &str,
    ) -> Result<ComparisonSummary> {
        let extractor = RecordExtractor::new()?;

        let spinner = self
            .progress_manager
            .create_spinner(&format!("Comparing {} and {}", first_imsi, second_imsi));
        let start = Instant::now();

        let first = extractor.extract_subscriber(content, first_imsi);
        let second = extractor.extract_subscriber(content, second_imsi);

        let comparator =
            PairwiseComparator::new(OutputManager::new(self.config.compare_directory()));
        let summary = comparator.compare(&first, &second)?;

        ui::progress::finish_progress_with_summary(&spinner, "Comparison written", start.elapsed());
        info!(
            first = first_imsi,
            second = second_imsi,
            differences = summary.differences,
            "comparison complete"
        );

        Ok(summary)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &SubListError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}
