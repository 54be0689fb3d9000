// SPDX-License-Identifier: MIT OR Apache-2.0

//! Run fd for a query and collect the matched paths.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::pattern::fragment_regex;

/// Binary names probed on PATH when no explicit command is configured.
/// Debian and Ubuntu ship fd as `fdfind`.
const FD_CANDIDATES: &[&str] = &["fd", "fdfind"];

/// What kind of filesystem entry a query is looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    File,
    Dir,
}

impl SearchKind {
    /// fd's `--type` flag for this kind
    pub fn type_flags(self) -> [&'static str; 2] {
        match self {
            SearchKind::File => ["-t", "f"],
            SearchKind::Dir => ["-t", "d"],
        }
    }
}

/// A single query, built fresh for every keyword event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub pattern: String,
    pub kind: SearchKind,
    pub root: PathBuf,
    pub extra_flags: String,
    pub max_results: NonZeroUsize,
}

impl SearchRequest {
    /// Passthrough flags with the kind's type filter appended
    pub fn flags(&self) -> String {
        let [flag, value] = self.kind.type_flags();
        format!("{} {flag} {value}", self.extra_flags)
    }
}

/// Handle to an fd binary found on this system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FdFinder {
    program: PathBuf,
}

impl FdFinder {
    /// Use `program` without probing PATH
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate fd once; `None` means the tool is unavailable on this host
    pub fn detect(explicit: Option<&str>) -> Option<Self> {
        let found = match explicit {
            Some(command) => which::which(command).ok(),
            None => FD_CANDIDATES
                .iter()
                .find_map(|name| which::which(name).ok()),
        };

        match found {
            Some(program) => {
                debug!(program = %program.display(), "found fd");
                Some(Self { program })
            }
            None => None,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run the search described by `request`
    pub fn search(&self, request: &SearchRequest) -> Vec<String> {
        self.find(
            &request.pattern,
            &request.root,
            &request.flags(),
            request.max_results,
        )
    }

    /// Search `root` for `pattern`, returning at most `max_results` paths.
    ///
    /// Blank patterns return immediately without spawning fd. A failed or
    /// empty run yields an empty list; the failure is only logged.
    pub fn find(
        &self,
        pattern: &str,
        root: &Path,
        extra: &str,
        max_results: NonZeroUsize,
    ) -> Vec<String> {
        let Some(args) = fd_args(pattern, extra, max_results) else {
            return Vec::new();
        };

        debug!(
            program = %self.program.display(),
            root = %root.display(),
            ?args,
            "running fd"
        );

        let output = match Command::new(&self.program)
            .args(&args)
            .current_dir(root)
            .output()
        {
            Ok(output) => output,
            Err(err) => {
                warn!(root = %root.display(), "failed to run fd: {err}");
                return Vec::new();
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(
                status = %output.status,
                root = %root.display(),
                "fd exited unsuccessfully: {}",
                stderr.trim()
            );
            return Vec::new();
        }

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|line| !line.is_empty())
            .take(max_results.get())
            .map(str::to_string)
            .collect()
    }
}

/// Arguments passed to fd, or `None` for a blank pattern
pub fn fd_args(pattern: &str, extra: &str, max_results: NonZeroUsize) -> Option<Vec<String>> {
    let regex = fragment_regex(pattern)?;

    let mut args: Vec<String> = ["-a", "-c", "never", "--max-results"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    args.push(max_results.to_string());
    args.extend(extra.split_whitespace().map(str::to_string));
    args.push(regex);
    Some(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn limit(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).expect("non-zero")
    }

    #[test]
    fn args_follow_fd_contract() {
        let args = fd_args("foo bar", "--hidden -t f", limit(10)).expect("args");
        assert_eq!(
            args,
            vec![
                "-a",
                "-c",
                "never",
                "--max-results",
                "10",
                "--hidden",
                "-t",
                "f",
                "foo.*bar"
            ]
        );
    }

    #[test]
    fn blank_pattern_builds_no_args() {
        assert!(fd_args("   ", "--hidden", limit(10)).is_none());
    }

    #[test]
    fn request_flags_append_type_filter() {
        let request = SearchRequest {
            pattern: "x".to_string(),
            kind: SearchKind::Dir,
            root: PathBuf::from("/"),
            extra_flags: "--hidden".to_string(),
            max_results: limit(5),
        };
        assert_eq!(request.flags(), "--hidden -t d");
    }

    #[test]
    fn blank_pattern_never_spawns() {
        // A program that cannot exist would log a spawn failure if it were run.
        let finder = FdFinder::new("/nonexistent/quickfind-fd");
        let results = finder.find("  ", Path::new("/"), "", limit(3));
        assert!(results.is_empty());
    }

    #[test]
    fn missing_binary_yields_empty_results() {
        let finder = FdFinder::new("/nonexistent/quickfind-fd");
        let results = finder.find("foo", Path::new("/"), "", limit(3));
        assert!(results.is_empty());
    }

    #[cfg(unix)]
    fn fake_fd(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fd");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("chmod");
        path
    }

    #[cfg(unix)]
    #[test]
    fn output_is_capped_and_ordered() {
        let dir = TempDir::new().expect("tempdir");
        let script = fake_fd(dir.path(), "printf '/a/3\\n/a/1\\n\\n/a/2\\n/a/4\\n'");
        let finder = FdFinder::new(script);

        let results = finder.find("a", dir.path(), "", limit(3));
        assert_eq!(results, vec!["/a/3", "/a/1", "/a/2"]);
    }

    #[cfg(unix)]
    #[test]
    fn runs_inside_root_directory() {
        let dir = TempDir::new().expect("tempdir");
        let root = dir.path().join("root");
        fs::create_dir(&root).expect("mkdir");
        let script = fake_fd(dir.path(), "pwd");
        let finder = FdFinder::new(script);

        let results = finder.find("x", &root, "", limit(1));
        let reported = PathBuf::from(&results[0]);
        assert_eq!(
            reported.canonicalize().expect("canonical pwd"),
            root.canonicalize().expect("canonical root")
        );
    }

    #[cfg(unix)]
    #[test]
    fn failing_tool_yields_empty_results() {
        let dir = TempDir::new().expect("tempdir");
        let script = fake_fd(dir.path(), "echo /partial; echo boom >&2; exit 1");
        let finder = FdFinder::new(script);

        assert!(finder.find("x", dir.path(), "", limit(10)).is_empty());
    }
}
