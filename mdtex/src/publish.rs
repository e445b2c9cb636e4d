//! Publishing pipeline for converted documents
//!
//! A [`PublishSpec`] describes one conversion job: the source document,
//! an optional output path, and the conversion options. [`publish`] runs
//! the job and yields the LaTeX either in memory or as a written file.
//! [`publish_pair`] is the project-level entry point: it converts the
//! fixed pair of project documents, letting each document succeed or fail
//! on its own.

use std::fs;
use std::path::{Path, PathBuf};

use crate::block::ConvertOptions;
use crate::error::ConvertError;

/// What to convert and where the result should go.
#[derive(Debug)]
pub struct PublishSpec<'a> {
    pub source: &'a Path,
    pub output: Option<PathBuf>,
    pub options: ConvertOptions,
}

impl<'a> PublishSpec<'a> {
    pub fn new(source: &'a Path) -> Self {
        PublishSpec {
            source,
            output: None,
            options: ConvertOptions::default(),
        }
    }

    /// Write the result to the given path instead of returning it in
    /// memory.
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }
}

/// The product of a publish operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    /// Generated LaTeX held in memory.
    InMemory(String),
    /// Generated LaTeX written to this path.
    File(PathBuf),
}

/// Outcome of a publish operation.
#[derive(Debug)]
pub struct PublishResult {
    pub artifact: PublishArtifact,
}

/// Convert one document according to its [`PublishSpec`].
pub fn publish(spec: PublishSpec<'_>) -> Result<PublishResult, ConvertError> {
    let source = fs::read_to_string(spec.source).map_err(|err| {
        ConvertError::Io(format!("failed to read {}: {err}", spec.source.display()))
    })?;
    let latex = crate::convert_with_options(&source, &spec.options)?;
    let artifact = match spec.output {
        Some(path) => {
            fs::write(&path, latex).map_err(|err| {
                ConvertError::Io(format!("failed to write {}: {err}", path.display()))
            })?;
            PublishArtifact::File(path)
        }
        None => PublishArtifact::InMemory(latex),
    };
    Ok(PublishResult { artifact })
}

/// Convert every named project document, writing `<stem>.tex` next to its
/// source. Documents convert independently: a failure in one does not stop
/// the others, and the combined error names every document that failed.
pub fn publish_pair(
    project_dir: &Path,
    sources: &[String],
    options: &ConvertOptions,
) -> Result<Vec<PathBuf>, ConvertError> {
    let mut written = Vec::new();
    let mut failures = Vec::new();
    for source in sources {
        let input = project_dir.join(source);
        let stem = Path::new(source)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(source.as_str());
        let output = project_dir.join(format!("{stem}.tex"));
        let spec = PublishSpec::new(&input)
            .with_output_path(&output)
            .with_options(options.clone());
        match publish(spec) {
            Ok(result) => {
                if let PublishArtifact::File(path) = result.artifact {
                    written.push(path);
                }
            }
            Err(err) => failures.push(format!("{source}: {err}")),
        }
    }
    if failures.is_empty() {
        Ok(written)
    } else {
        Err(ConvertError::PublishFailed(failures.join("; ")))
    }
}
