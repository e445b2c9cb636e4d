//! Native typesetting over an external LaTeX toolchain
//!
//! Runs the configured engine (pdflatex by default) over a generated root
//! document, with a bibliography pass after the first engine pass when
//! enabled. Binary discovery prefers an explicit path, then environment
//! overrides, then `which` lookups, then well-known install locations.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ConvertError;

/// Upper bound on engine passes per run.
pub const MAX_PASSES: u8 = 4;

/// How to run the typesetting toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypesetSpec {
    /// Explicit engine binary; skips discovery entirely.
    pub engine_path: Option<PathBuf>,
    /// Engine name used for discovery when no explicit path is given.
    pub engine: String,
    /// Number of engine passes, 1 through [`MAX_PASSES`].
    pub passes: u8,
    /// Run the bibliography tool after the first pass.
    pub bibliography: bool,
    /// Bibliography tool name, resolved like the engine.
    pub bibliography_tool: String,
}

impl TypesetSpec {
    pub fn new() -> Self {
        TypesetSpec {
            engine_path: None,
            engine: "pdflatex".to_string(),
            passes: 2,
            bibliography: true,
            bibliography_tool: "bibtex".to_string(),
        }
    }

    pub fn with_engine_path(mut self, path: impl AsRef<Path>) -> Self {
        self.engine_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_passes(mut self, passes: u8) -> Self {
        self.passes = passes;
        self
    }

    pub fn with_bibliography(mut self, enabled: bool) -> Self {
        self.bibliography = enabled;
        self
    }
}

impl Default for TypesetSpec {
    fn default() -> Self {
        TypesetSpec::new()
    }
}

/// Run the toolchain over `<root>.tex` inside the project directory.
///
/// References settle over repeated engine passes, so the default is two;
/// anything past [`MAX_PASSES`] is refused rather than looped.
pub fn run(project_dir: &Path, root: &str, spec: &TypesetSpec) -> Result<(), ConvertError> {
    if spec.passes == 0 || spec.passes > MAX_PASSES {
        return Err(ConvertError::TypesetFailed(format!(
            "pass count must be between 1 and {MAX_PASSES}, got {}",
            spec.passes
        )));
    }
    let engine = resolve_engine_binary(spec)?;
    let tex_file = format!("{root}.tex");
    for pass in 1..=spec.passes {
        run_engine_pass(&engine, project_dir, &tex_file)?;
        if pass == 1 && spec.bibliography {
            let tool = resolve_bibliography_binary(spec)?;
            run_bibliography_pass(&tool, project_dir, root)?;
        }
    }
    Ok(())
}

fn run_engine_pass(engine: &Path, project_dir: &Path, tex_file: &str) -> Result<(), ConvertError> {
    let status = Command::new(engine)
        .arg("-interaction=nonstopmode")
        .arg("-halt-on-error")
        .arg(tex_file)
        .current_dir(project_dir)
        .status()
        .map_err(|err| {
            ConvertError::TypesetFailed(format!("failed to launch {}: {err}", engine.display()))
        })?;
    if !status.success() {
        return Err(ConvertError::TypesetFailed(format!(
            "{} exited with status {status} on {tex_file}",
            engine.display()
        )));
    }
    Ok(())
}

fn run_bibliography_pass(tool: &Path, project_dir: &Path, root: &str) -> Result<(), ConvertError> {
    let status = Command::new(tool)
        .arg(root)
        .current_dir(project_dir)
        .status()
        .map_err(|err| {
            ConvertError::TypesetFailed(format!("failed to launch {}: {err}", tool.display()))
        })?;
    if !status.success() {
        return Err(ConvertError::TypesetFailed(format!(
            "{} exited with status {status} on {root}",
            tool.display()
        )));
    }
    Ok(())
}

/// Locate the engine binary.
///
/// Order: an explicit `engine_path`, `MDTEX_LATEX_BIN`, `LATEX_BIN`,
/// `which` over the configured name and the common engines, then fixed
/// install locations for the current platform. Environment overrides
/// that are set but empty are ignored.
pub fn resolve_engine_binary(spec: &TypesetSpec) -> Result<PathBuf, ConvertError> {
    if let Some(path) = &spec.engine_path {
        return Ok(path.clone());
    }
    if let Some(path) = env::var_os("MDTEX_LATEX_BIN") {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    if let Some(path) = env::var_os("LATEX_BIN") {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    let mut candidates = vec![spec.engine.as_str()];
    for fallback in ["pdflatex", "xelatex", "lualatex"] {
        if fallback != spec.engine {
            candidates.push(fallback);
        }
    }
    for candidate in candidates {
        if let Ok(path) = which::which(candidate) {
            return Ok(path);
        }
    }

    #[cfg(target_os = "macos")]
    {
        for path in [
            "/Library/TeX/texbin/pdflatex",
            "/usr/local/texlive/bin/pdflatex",
        ] {
            let candidate = PathBuf::from(path);
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    #[cfg(target_os = "windows")]
    {
        for path in [
            "C:\\texlive\\bin\\windows\\pdflatex.exe",
            "C:\\Program Files\\MiKTeX\\miktex\\bin\\x64\\pdflatex.exe",
        ] {
            let candidate = PathBuf::from(path);
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    #[cfg(target_os = "linux")]
    {
        for path in [
            "/usr/bin/pdflatex",
            "/usr/local/bin/pdflatex",
            "/opt/texlive/bin/pdflatex",
        ] {
            let candidate = PathBuf::from(path);
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    Err(ConvertError::EngineNotFound(format!(
        "could not locate '{}' or a fallback LaTeX engine; set MDTEX_LATEX_BIN to override",
        spec.engine
    )))
}

fn resolve_bibliography_binary(spec: &TypesetSpec) -> Result<PathBuf, ConvertError> {
    if let Some(path) = env::var_os("MDTEX_BIBTEX_BIN") {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    if let Ok(path) = which::which(&spec.bibliography_tool) {
        return Ok(path);
    }
    Err(ConvertError::EngineNotFound(format!(
        "could not locate bibliography tool '{}'; set MDTEX_BIBTEX_BIN to override",
        spec.bibliography_tool
    )))
}
