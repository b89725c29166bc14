//! Executable search path resolution.
//!
//! Graphviz installers do not always put `dot` on `PATH`. Before rendering,
//! the generator builds a [`SearchPath`] from the process `PATH`, appends the
//! well-known installation directories that exist on this machine, and looks
//! the executable up there.
//!
//! The augmented path is only handed to the rendering child process. The
//! environment of the running process is never modified.

use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use log::{debug, trace};

/// Ordered list of directories searched for executables.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Creates a search path from explicit directories.
    pub fn new(dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            dirs: dirs.into_iter().collect(),
        }
    }

    /// Reads the search path of the current process from `PATH`.
    pub fn from_env() -> Self {
        let dirs = env::var_os("PATH")
            .map(|path| env::split_paths(&path).collect())
            .unwrap_or_default();
        Self { dirs }
    }

    /// Appends every candidate directory that exists and is not yet present.
    ///
    /// Returns the directories that were appended.
    pub fn augment(&mut self, candidates: impl IntoIterator<Item = PathBuf>) -> Vec<PathBuf> {
        let mut appended = Vec::new();
        for candidate in candidates {
            if !candidate.is_dir() {
                trace!(
                    dir = candidate.display().to_string();
                    "Candidate directory does not exist"
                );
                continue;
            }
            if self.dirs.contains(&candidate) {
                continue;
            }
            debug!(dir = candidate.display().to_string(); "Appending directory to search path");
            self.dirs.push(candidate.clone());
            appended.push(candidate);
        }
        appended
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Finds an executable by name.
    ///
    /// A `name` containing a path separator is checked as given. Otherwise
    /// each directory is tried in order, with the platform executable suffix
    /// (`.exe` on Windows) appended when missing.
    pub fn find_executable(&self, name: &str) -> Option<PathBuf> {
        let as_path = Path::new(name);
        if as_path.components().count() > 1 || as_path.is_absolute() {
            return is_executable(as_path).then(|| as_path.to_path_buf());
        }

        let suffixed = format!("{name}{}", env::consts::EXE_SUFFIX);
        self.dirs.iter().find_map(|dir| {
            [name, suffixed.as_str()]
                .into_iter()
                .map(|file| dir.join(file))
                .find(|path| is_executable(path))
        })
    }

    /// Joins the directories into a `PATH`-style value.
    ///
    /// Returns `None` if a directory contains the platform path separator.
    pub fn to_env_value(&self) -> Option<OsString> {
        env::join_paths(&self.dirs).ok()
    }
}

/// Well-known Graphviz installation directories for the current platform.
pub fn platform_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if cfg!(windows) {
        candidates.push(PathBuf::from(r"C:\Program Files\Graphviz\bin"));
        candidates.push(PathBuf::from(r"C:\Program Files (x86)\Graphviz\bin"));
        if let Some(base) = BaseDirs::new() {
            candidates.push(
                base.home_dir()
                    .join("AppData")
                    .join("Local")
                    .join("Programs")
                    .join("Graphviz")
                    .join("bin"),
            );
        }
    } else if cfg!(target_os = "macos") {
        candidates.push(PathBuf::from("/opt/homebrew/bin"));
        candidates.push(PathBuf::from("/usr/local/bin"));
    }
    candidates
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn fake_executable(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(format!("{name}{}", env::consts::EXE_SUFFIX));
        fs::write(&path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        path
    }

    #[test]
    fn test_augment_appends_existing_directories_once() {
        let existing = tempfile::tempdir().unwrap();
        let missing = existing.path().join("does-not-exist");

        let mut search_path = SearchPath::new([PathBuf::from("/already/there")]);
        let appended = search_path.augment([
            existing.path().to_path_buf(),
            missing,
            existing.path().to_path_buf(),
        ]);

        assert_eq!(appended, [existing.path().to_path_buf()]);
        assert_eq!(
            search_path.dirs(),
            [PathBuf::from("/already/there"), existing.path().to_path_buf()]
        );
    }

    #[test]
    fn test_augment_skips_directories_already_present() {
        let dir = tempfile::tempdir().unwrap();
        let mut search_path = SearchPath::new([dir.path().to_path_buf()]);

        assert!(search_path.augment([dir.path().to_path_buf()]).is_empty());
        assert_eq!(search_path.dirs().len(), 1);
    }

    #[test]
    fn test_find_executable_in_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fake_executable(second.path(), "dot");
        let expected = fake_executable(first.path(), "dot");

        let search_path =
            SearchPath::new([first.path().to_path_buf(), second.path().to_path_buf()]);
        assert_eq!(search_path.find_executable("dot"), Some(expected));
    }

    #[test]
    fn test_find_executable_missing() {
        let empty = tempfile::tempdir().unwrap();
        let search_path = SearchPath::new([empty.path().to_path_buf()]);
        assert_eq!(search_path.find_executable("dot"), None);
    }

    #[test]
    fn test_find_executable_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let exe = fake_executable(dir.path(), "dot");

        let search_path = SearchPath::default();
        let name = exe.to_str().unwrap();
        assert_eq!(search_path.find_executable(name), Some(exe.clone()));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_file_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dot"), "not executable").unwrap();

        let search_path = SearchPath::new([dir.path().to_path_buf()]);
        assert_eq!(search_path.find_executable("dot"), None);
    }

    #[test]
    fn test_env_value_round_trips() {
        let search_path = SearchPath::new([PathBuf::from("a"), PathBuf::from("b")]);
        let value = search_path.to_env_value().unwrap();
        let dirs: Vec<_> = env::split_paths(&value).collect();
        assert_eq!(dirs, [PathBuf::from("a"), PathBuf::from("b")]);
    }
}
