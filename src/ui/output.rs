use crate::error::{SubListError, UserFriendlyError};
use crate::report::{ComparisonSummary, ExportSummary};
use console::{style, Emoji, Term};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &SubListError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    pub fn print_export_summary(&self, summary: &ExportSummary) {
        match self.mode {
            OutputMode::Human => {
                self.print_header("Processing complete!");
                println!("SUB data exported to: {}", summary.sub_file.display());
                println!("OPTGPRS data exported to: {}", summary.optgprs_file.display());
                println!();
                println!("Summary:");
                println!("  Records scanned:       {}", self.emphasize(summary.segments_scanned));
                println!("  Total SUB records:     {}", self.emphasize(summary.sub_records));
                println!("  Total OPTGPRS records: {}", self.emphasize(summary.optgprs_records));
            }
            OutputMode::Json => self.print_json_result("export", summary),
            OutputMode::Plain => {
                println!("COMPLETED: export");
                println!("SUB file: {}", summary.sub_file.display());
                println!("OPTGPRS file: {}", summary.optgprs_file.display());
                println!("SUB records: {}", summary.sub_records);
                println!("OPTGPRS records: {}", summary.optgprs_records);
            }
        }
    }

    pub fn print_comparison_summary(&self, first: &str, second: &str, summary: &ComparisonSummary) {
        match self.mode {
            OutputMode::Human => {
                if !summary.first_found {
                    self.warning(&format!("No records found for IMSI {}", first));
                }
                if !summary.second_found {
                    self.warning(&format!("No records found for IMSI {}", second));
                }
                self.print_header("Comparison complete!");
                println!("Results written to {}", summary.report_file.display());
                println!(
                    "  Fields compared: {}  Differences: {}",
                    self.emphasize(summary.fields_compared),
                    self.emphasize(summary.differences)
                );
            }
            OutputMode::Json => self.print_json_result("compare", summary),
            OutputMode::Plain => {
                println!("COMPLETED: compare");
                println!("Report: {}", summary.report_file.display());
                println!("Fields compared: {}", summary.fields_compared);
                println!("Differences: {}", summary.differences);
            }
        }
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                println!();
                if self.use_colors {
                    println!("{} {}", SPARKLES, style(title).bold().cyan());
                } else {
                    println!("=== {} ===", title);
                }
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "header",
                    "title": title
                }));
            }
            OutputMode::Plain => println!("=== {} ===", title),
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn emphasize(&self, value: usize) -> String {
        if self.use_colors {
            style(value).cyan().bold().to_string()
        } else {
            value.to_string()
        }
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let (emoji, styled) = match msg_type {
                MessageType::Error => (&CROSS, style(message).red().bold()),
                MessageType::Warning => (&WARNING, style(message).yellow().bold()),
            };
            eprintln!("{}{}", emoji, styled);
        } else {
            let prefix = match msg_type {
                MessageType::Error => "✗",
                MessageType::Warning => "!",
            };
            eprintln!("{} {}", prefix, message);
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_result<T: Serialize>(&self, command: &str, result: &T) {
        self.print_json_object(&serde_json::json!({
            "type": "result",
            "command": command,
            "result": result,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Error,
    Warning,
}
