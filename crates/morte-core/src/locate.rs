//! Unique file location by wildcard pattern
//!
//! Scheduler logs and similar artefacts are named with run-specific parts
//! (job ids, timestamps), so they are located by pattern. A pattern must
//! resolve to exactly one regular file: zero matches is `FileUnavailable`,
//! several is `AmbiguousSource` and the candidates are attached to the error.
//!
//! Supported wildcards, per path component: `*`, `?`, `[abc]`, `[a-z]`,
//! `[!abc]`. Names starting with `.` only match components that start
//! with `.` themselves.

use crate::errors::{io_error, ExError, ExErrorKind, Result};
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Resolve `pattern` (relative to `root`, or absolute) to exactly one file
///
/// # Errors
///
/// - `FileUnavailable` if nothing matches
/// - `AmbiguousSource` if more than one file matches
/// - `InvalidInput` if the pattern is empty or cannot be compiled
/// - `Io` if a directory on the way cannot be listed
pub fn resolve_unique(root: &Path, pattern: &str) -> Result<PathBuf> {
    let mut matches = resolve_all(root, pattern)?;
    match matches.len() {
        0 => Err(ExError::new(ExErrorKind::FileUnavailable)
            .with_op("resolve_unique")
            .with_path(root.join(pattern))
            .with_message("no file matches the pattern")),
        1 => Ok(matches.remove(0)),
        n => Err(ExError::new(ExErrorKind::AmbiguousSource)
            .with_op("resolve_unique")
            .with_path(root.join(pattern))
            .with_message(format!("pattern matched {} files", n))
            .with_candidates(
                matches
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            )),
    }
}

/// Every regular file matching `pattern`, sorted
///
/// # Errors
///
/// Same as [`resolve_unique`] except that zero or many matches are not errors.
pub fn resolve_all(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let (start, rest) = match pattern.strip_prefix('/') {
        Some(rest) => (PathBuf::from("/"), rest),
        None => (root.to_path_buf(), pattern),
    };
    let components: Vec<&str> = rest
        .split('/')
        .filter(|c| !c.is_empty() && *c != ".")
        .collect();
    if components.is_empty() {
        return Err(ExError::new(ExErrorKind::InvalidInput)
            .with_op("resolve_unique")
            .with_message("pattern has no file component"));
    }

    let mut candidates = vec![start];
    for (idx, component) in components.iter().enumerate() {
        let last = idx + 1 == components.len();
        let mut next = Vec::new();

        if has_wildcard(component) {
            let matcher = ComponentMatcher::new(component)?;
            for dir in &candidates {
                for name in list_dir(dir)? {
                    if matcher.matches(&name) {
                        next.push(dir.join(name));
                    }
                }
            }
        } else {
            next.extend(candidates.iter().map(|dir| dir.join(component)));
        }

        candidates = next
            .into_iter()
            .filter(|p| if last { p.is_file() } else { p.is_dir() })
            .collect();
        if candidates.is_empty() {
            break;
        }
    }

    candidates.sort();
    Ok(candidates)
}

fn has_wildcard(component: &str) -> bool {
    component.contains(['*', '?', '['])
}

fn list_dir(dir: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_error("resolve_list_dir", dir, e)),
    };
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_error("resolve_list_dir", dir, e))?;
        // Non-UTF-8 names cannot match a UTF-8 pattern
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// One wildcard path component compiled to an anchored regex
struct ComponentMatcher {
    regex: Regex,
    allow_hidden: bool,
}

impl ComponentMatcher {
    fn new(component: &str) -> Result<Self> {
        let source = format!("^{}$", translate(component));
        let regex = Regex::new(&source).map_err(|e| {
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("resolve_unique")
                .with_message(format!("invalid pattern component '{}': {}", component, e))
        })?;
        Ok(Self {
            regex,
            allow_hidden: component.starts_with('.'),
        })
    }

    fn matches(&self, name: &str) -> bool {
        (self.allow_hidden || !name.starts_with('.')) && self.regex.is_match(name)
    }
}

fn translate(component: &str) -> String {
    let chars: Vec<char> = component.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.push('[');
                    let mut j = i + 1;
                    if chars[j] == '!' {
                        out.push('^');
                        j += 1;
                    }
                    for &c in &chars[j..end] {
                        if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~') {
                            out.push('\\');
                        }
                        out.push(c);
                    }
                    out.push(']');
                    i = end;
                }
                None => out.push_str(r"\["),
            },
            c => out.push_str(&regex::escape(&c.to_string())),
        }
        i += 1;
    }
    out
}

/// Index of the `]` closing the class opened at `open`, if any
///
/// A `]` directly after `[` or `[!` is a literal member, as in shell globs.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut j = open + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    (j..chars.len()).find(|&k| chars[k] == ']')
}
