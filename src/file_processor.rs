//! File discovery and per-file formatting.

use crate::config::GlobalConfig;
use crate::document::DocumentFormatter;
use crate::error::FormatError;
use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use ignore::types::TypesBuilder;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] ignore::Error),

    #[error("Failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: String,
        source: io::Error,
    },
}

/// What happened to one file
#[derive(Debug)]
pub enum FileOutcome {
    Formatted {
        changed: bool,
        iterations: usize,
        warnings: Vec<String>,
    },
    Failed(FormatError),
}

/// Expand `dir` to also match everything below it
fn expand_directory_pattern(pattern: &str) -> Vec<String> {
    let trimmed = pattern.trim_end_matches('/');
    if trimmed.contains('*') || trimmed.contains('.') {
        vec![trimmed.to_string()]
    } else {
        vec![trimmed.to_string(), format!("{trimmed}/**")]
    }
}

/// Collect the documents to format. Explicit files are always taken; directories
/// are walked for the configured extensions, honoring excludes and gitignore.
pub fn find_files(paths: &[String], config: &GlobalConfig) -> Result<Vec<PathBuf>, FileError> {
    let roots: Vec<&str> = if paths.is_empty() {
        vec!["."]
    } else {
        paths.iter().map(String::as_str).collect()
    };

    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for root in roots {
        let path = Path::new(root);
        if !path.exists() {
            return Err(FileError::NotFound(root.to_string()));
        }
        if path.is_file() {
            files.push(path.to_path_buf());
        } else {
            dirs.push(root);
        }
    }

    let Some((first, rest)) = dirs.split_first() else {
        return Ok(files);
    };

    let mut walk_builder = WalkBuilder::new(first);
    for dir in rest {
        walk_builder.add(dir);
    }

    let mut types_builder = TypesBuilder::new();
    for extension in &config.extensions {
        types_builder.add("document", &format!("*.{}", extension.trim_start_matches('.')))?;
    }
    types_builder.select("document");
    walk_builder.types(types_builder.build()?);

    if !config.exclude.is_empty() {
        let mut override_builder = OverrideBuilder::new(first);
        for pattern in config.exclude.iter().flat_map(|p| expand_directory_pattern(p)) {
            let exclude_rule = if pattern.starts_with('!') {
                pattern
            } else {
                format!("!{pattern}")
            };
            override_builder.add(&exclude_rule)?;
        }
        walk_builder.overrides(override_builder.build()?);
    }

    let use_gitignore = config.respect_gitignore;
    walk_builder.ignore(use_gitignore);
    walk_builder.git_ignore(use_gitignore);
    walk_builder.git_global(use_gitignore);
    walk_builder.git_exclude(use_gitignore);
    walk_builder.parents(use_gitignore);
    walk_builder.hidden(true);
    walk_builder.require_git(false);

    for entry in walk_builder.build() {
        match entry {
            Ok(entry) if entry.file_type().is_some_and(|t| t.is_file()) => {
                let path = entry.into_path();
                files.push(path.strip_prefix("./").map(Path::to_path_buf).unwrap_or(path));
            }
            Ok(_) => {}
            Err(e) => log::warn!("Skipping unreadable entry: {e}"),
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Format one document in place. With `write` false the file is left alone and
/// only the outcome is reported.
pub fn process_file(path: &Path, formatter: &DocumentFormatter, write: bool) -> Result<FileOutcome, FileError> {
    let content = fs::read_to_string(path).map_err(|source| FileError::Io {
        action: "read",
        path: path.display().to_string(),
        source,
    })?;

    let formatted = match formatter.format(&content) {
        Ok(formatted) => formatted,
        Err(e) => return Ok(FileOutcome::Failed(e)),
    };
    let changed = formatted.changed(&content);
    log::debug!(
        "{}: {} pass(es), {}",
        path.display(),
        formatted.iterations,
        if changed { "changed" } else { "unchanged" }
    );

    if changed && write {
        fs::write(path, &formatted.text).map_err(|source| FileError::Io {
            action: "write",
            path: path.display().to_string(),
            source,
        })?;
    }

    Ok(FileOutcome::Formatted {
        changed,
        iterations: formatted.iterations,
        warnings: formatted.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_expand_directory_pattern() {
        assert_eq!(expand_directory_pattern("vendor/"), vec!["vendor", "vendor/**"]);
        assert_eq!(expand_directory_pattern("*.min.html"), vec!["*.min.html"]);
    }

    #[test]
    fn test_missing_path() {
        let err = find_files(&["/definitely/not/here".to_string()], &GlobalConfig::default()).unwrap_err();
        assert!(matches!(err, FileError::NotFound(_)));
    }

    #[test]
    fn test_walks_configured_extensions() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.html"), "").unwrap();
        fs::write(dir.path().join("b.md"), "").unwrap();
        fs::create_dir(dir.path().join("skip")).unwrap();
        fs::write(dir.path().join("skip").join("c.html"), "").unwrap();

        let config = GlobalConfig {
            exclude: vec!["skip".to_string()],
            ..GlobalConfig::default()
        };
        let root = dir.path().to_string_lossy().to_string();
        let files = find_files(&[root], &config).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.html"]);
    }

    #[test]
    fn test_explicit_file_always_taken() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "").unwrap();
        let files = find_files(&[path.to_string_lossy().to_string()], &GlobalConfig::default()).unwrap();
        assert_eq!(files, vec![path]);
    }

    #[test]
    fn test_process_file_writes_changes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "<pre><code>x = \"y\";</code></pre>").unwrap();
        let formatter = DocumentFormatter::default();

        let outcome = process_file(&path, &formatter, false).unwrap();
        assert!(matches!(outcome, FileOutcome::Formatted { changed: true, .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "<pre><code>x = \"y\";</code></pre>");

        process_file(&path, &formatter, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<pre><code>x = 'y';</code></pre>");
    }

    #[test]
    fn test_process_file_reports_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "<pre><code>foo\n(a);</code></pre>").unwrap();
        let outcome = process_file(&path, &DocumentFormatter::default(), true).unwrap();
        assert!(matches!(outcome, FileOutcome::Failed(FormatError::Lint(_))));
    }
}
