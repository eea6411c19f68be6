use crate::error::{Result, SubListError};
use chrono::Local;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Owns one output directory and the files written into it during a run.
pub struct OutputManager {
    output_directory: PathBuf,
}

impl OutputManager {
    pub fn new<P: Into<PathBuf>>(output_directory: P) -> Self {
        Self {
            output_directory: output_directory.into(),
        }
    }

    /// Creates the directory if needed. An existing directory is fine.
    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.output_directory).map_err(|source| SubListError::OutputWrite {
            path: self.output_directory.clone(),
            source,
        })?;
        debug!(dir = %self.output_directory.display(), "output directory ready");
        Ok(())
    }

    pub fn get_output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Path for `file_name` inside the output directory. If it is taken, a
    /// `_1`, `_2`, ... suffix is inserted before the extension.
    pub fn unique_path(&self, file_name: &str) -> PathBuf {
        let candidate = self.output_directory.join(file_name);
        if !candidate.exists() {
            return candidate;
        }

        let (stem, extension) = match file_name.rsplit_once('.') {
            Some((stem, ext)) => (stem, format!(".{}", ext)),
            None => (file_name, String::new()),
        };

        let mut counter = 1;
        loop {
            let candidate = self
                .output_directory
                .join(format!("{}_{}{}", stem, counter, extension));
            if !candidate.exists() {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Writes every file or none of them: if any write fails, the files
    /// already written in this call are removed before the error is returned.
    pub fn write_all(&self, files: &[(PathBuf, Vec<u8>)]) -> Result<()> {
        let mut written: Vec<&Path> = Vec::with_capacity(files.len());

        for (path, content) in files {
            if let Err(source) = fs::write(path, content) {
                self.cleanup_on_error(&written);
                return Err(SubListError::OutputWrite {
                    path: path.clone(),
                    source,
                });
            }
            info!(path = %path.display(), bytes = content.len(), "wrote output file");
            written.push(path.as_path());
        }

        Ok(())
    }

    fn cleanup_on_error(&self, written: &[&Path]) {
        for path in written {
            if let Err(e) = fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "failed to remove partial output");
            }
        }
    }
}

/// Formats the current local time for run-unique file names.
pub fn run_timestamp(format: &str) -> Result<String> {
    let mut stamp = String::new();
    write!(stamp, "{}", Local::now().format(format)).map_err(|_| SubListError::Config {
        message: format!("Invalid timestamp format: {}", format),
    })?;
    Ok(stamp)
}

/// Makes an IMSI (or any user value) safe to embed in a file name.
pub fn sanitize_file_component(name: &str) -> String {
    let mut sanitized = String::new();

    for ch in name.chars() {
        match ch {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' | '/' | '\\' => sanitized.push('_'),
            c if c.is_alphanumeric() || c == '-' || c == '.' || c == '_' => sanitized.push(c),
            _ => sanitized.push('_'),
        }
    }

    let sanitized = sanitized.trim_matches(|c| c == '.' || c == ' ');

    if sanitized.is_empty() {
        "unnamed".to_string()
    } else if sanitized.chars().count() > 100 {
        sanitized.chars().take(100).collect()
    } else {
        sanitized.to_string()
    }
}
