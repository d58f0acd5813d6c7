//! Line-oriented regex search over a summary file

use crate::diagnostics::DiagnosticSink;
use crate::errors::{file_unavailable, io_error, Result};
use crate::locate::resolve_unique;
use crate::parse::metrics::PerformanceMetrics;
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads a scheduler output file and searches it line by line
#[derive(Debug, Clone)]
pub struct SummaryParser {
    path: PathBuf,
}

impl SummaryParser {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Locate the file to parse by wildcard pattern below `root`
    ///
    /// # Errors
    ///
    /// `FileUnavailable` or `AmbiguousSource` from [`resolve_unique`].
    pub fn locate(root: &Path, pattern: &str) -> Result<Self> {
        resolve_unique(root, pattern).map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file content as a list of lines
    ///
    /// # Errors
    ///
    /// `FileUnavailable` if the file is gone, `Io` otherwise.
    pub fn read_lines(&self) -> Result<Vec<String>> {
        Ok(self.read_text()?.lines().map(str::to_string).collect())
    }

    /// Capture groups of every line matching `pattern`, one entry per line
    ///
    /// # Errors
    ///
    /// Same as [`SummaryParser::read_lines`].
    pub fn search(&self, pattern: &Regex) -> Result<Vec<Vec<String>>> {
        Ok(search_lines(&self.read_text()?, pattern))
    }

    /// Parse the PBS resource-usage footer of this file
    ///
    /// # Errors
    ///
    /// See [`crate::parse::pbs::parse_pbs_summary`].
    pub fn parse_pbs_summary(&self, sink: &dyn DiagnosticSink) -> Result<PerformanceMetrics> {
        crate::parse::pbs::parse_pbs_summary(&self.read_text()?, sink)
    }

    fn read_text(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => file_unavailable("read_summary", &self.path),
            _ => io_error("read_summary", &self.path, e),
        })
    }
}

/// Capture groups of every line of `text` matching `pattern`
///
/// Only the first match on each line is used. Groups that did not
/// participate in the match are returned as empty strings.
pub fn search_lines(text: &str, pattern: &Regex) -> Vec<Vec<String>> {
    text.lines()
        .filter_map(|line| pattern.captures(line))
        .map(|caps| {
            caps.iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect()
        })
        .collect()
}
