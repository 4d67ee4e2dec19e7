//! Built-in capability detectors.

use std::path::{Path, PathBuf};

use crate::defaults::{is_truthy, LIBRARY_PATH_VARS, SYSTEM_LIBRARY_DIRS};

/// Error a detector may report. The probe normalizes it to "unavailable".
pub type DetectError = Box<dyn std::error::Error + Send + Sync>;

/// Answers whether one optional backend is usable in this process.
pub trait Detector: Send + Sync {
    fn detect(&self) -> Result<bool, DetectError>;
}

/// Detector with a fixed answer.
#[derive(Debug, Clone, Copy)]
pub struct Fixed(pub bool);

impl Detector for Fixed {
    fn detect(&self) -> Result<bool, DetectError> {
        Ok(self.0)
    }
}

/// Detector backed by a closure.
pub struct FnDetector<F>(pub F);

impl<F> FnDetector<F>
where
    F: Fn() -> Result<bool, DetectError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Detector for FnDetector<F>
where
    F: Fn() -> Result<bool, DetectError> + Send + Sync,
{
    fn detect(&self) -> Result<bool, DetectError> {
        (self.0)()
    }
}

/// Available when an environment variable holds a truthy value.
#[derive(Debug, Clone)]
pub struct EnvFlag {
    pub var: String,
}

impl EnvFlag {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Detector for EnvFlag {
    fn detect(&self) -> Result<bool, DetectError> {
        Ok(std::env::var(&self.var)
            .map(|v| is_truthy(&v))
            .unwrap_or(false))
    }
}

/// Available when a shared library can be located on disk.
///
/// Searches, in order:
/// - `$dir_var/lib` and `$dir_var` (e.g. `LIBTORCH`)
/// - every entry of `LD_LIBRARY_PATH` / `DYLD_LIBRARY_PATH`
/// - the usual system library directories
#[derive(Debug, Clone)]
pub struct LibraryDetector {
    pub stem: String,
    pub dir_var: Option<String>,
}

impl LibraryDetector {
    pub fn new(stem: impl Into<String>) -> Self {
        Self {
            stem: stem.into(),
            dir_var: None,
        }
    }

    pub fn with_dir_var(mut self, var: impl Into<String>) -> Self {
        self.dir_var = Some(var.into());
        self
    }

    fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();

        if let Some(root) = self.dir_var.as_ref().and_then(|v| std::env::var_os(v)) {
            let root = PathBuf::from(root);
            dirs.push(root.join("lib"));
            dirs.push(root);
        }

        for var in LIBRARY_PATH_VARS {
            if let Some(paths) = std::env::var_os(var) {
                dirs.extend(std::env::split_paths(&paths));
            }
        }

        dirs.extend(SYSTEM_LIBRARY_DIRS.iter().map(PathBuf::from));
        dirs
    }

    fn matches(&self, file_name: &str) -> bool {
        let unix_prefix = format!("lib{}.", self.stem);
        if let Some(rest) = file_name.strip_prefix(&unix_prefix) {
            return rest == "dylib"
                || rest == "so"
                || rest.starts_with("so.")
                || rest.ends_with(".dylib");
        }
        file_name.eq_ignore_ascii_case(&format!("{}.dll", self.stem))
    }

    fn dir_contains(&self, dir: &Path) -> bool {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(_) => return false,
        };

        entries
            .filter_map(|e| e.ok())
            .any(|e| e.file_name().to_str().map(|n| self.matches(n)).unwrap_or(false))
    }
}

impl Detector for LibraryDetector {
    fn detect(&self) -> Result<bool, DetectError> {
        for dir in self.search_dirs() {
            if self.dir_contains(&dir) {
                log::debug!("Found lib{} in {:?}", self.stem, dir);
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Available when any inner detector reports available.
///
/// Inner errors are skipped; the error of the last failing detector is
/// returned only if none succeeded and at least one failed.
pub struct AnyOf(pub Vec<Box<dyn Detector>>);

impl Detector for AnyOf {
    fn detect(&self) -> Result<bool, DetectError> {
        let mut last_err = None;
        for detector in &self.0 {
            match detector.detect() {
                Ok(true) => return Ok(true),
                Ok(false) => {}
                Err(e) => last_err = Some(e),
            }
        }
        match last_err {
            Some(e) => Err(e),
            None => Ok(false),
        }
    }
}
