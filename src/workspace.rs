use std::io::{self, Write};

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};

use crate::config::ErrorPolicy;
use crate::paths;
use crate::templates::{self, ScriptKind};

pub const BIN_DIR: &str = "bin";
pub const PKG_DIR: &str = "pkg";
pub const SRC_DIR: &str = "src";

/// Outcome of a `create` run.
#[derive(Debug)]
pub struct WorkspaceReport {
    pub root: Utf8PathBuf,
    /// The root already existed before this run.
    pub refreshed: bool,
    /// Steps that failed under `ErrorPolicy::Continue`, rendered with their context chain.
    pub failures: Vec<String>,
}

impl WorkspaceReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The four directories making up a workspace: root, bin, pkg and src.
pub fn layout(root: &Utf8Path) -> [Utf8PathBuf; 4] {
    [
        root.to_owned(),
        root.join(BIN_DIR),
        root.join(PKG_DIR),
        root.join(SRC_DIR),
    ]
}

/// Scaffolds `<root>/{bin,pkg,src}` and writes the activation scripts.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorkspaceBuilder {
    policy: ErrorPolicy,
}

impl WorkspaceBuilder {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self { policy }
    }

    pub fn create(&self, root: &Utf8Path) -> Result<WorkspaceReport> {
        let refreshed = paths::exists(root);
        let mut report = WorkspaceReport {
            root: root.to_owned(),
            refreshed,
            failures: Vec::new(),
        };
        self.step(&mut report, print_status(root, refreshed))?;

        let [root_dir, bin, pkg, src] = layout(root);
        self.step(&mut report, paths::ensure_dir(&root_dir))?;
        self.step(&mut report, paths::ensure_dir(&bin))?;
        for kind in ScriptKind::ALL {
            self.step(&mut report, write_script(&bin, root, kind))?;
        }
        self.step(&mut report, paths::ensure_dir(&pkg))?;
        self.step(&mut report, paths::ensure_dir(&src))?;

        if report.is_clean() {
            tracing::info!(root = %root, refreshed, "workspace ready");
        } else {
            tracing::warn!(
                root = %root,
                failed = report.failures.len(),
                "workspace created with failed steps"
            );
        }
        Ok(report)
    }

    fn step(&self, report: &mut WorkspaceReport, outcome: Result<()>) -> Result<()> {
        let Err(err) = outcome else {
            return Ok(());
        };
        match self.policy {
            ErrorPolicy::Abort => {
                Err(err.context(format!("scaffolding goenv in {}", report.root)))
            }
            ErrorPolicy::Continue => {
                let message = format!("{err:#}");
                tracing::warn!(error = %message, "step failed; continuing");
                report.failures.push(message);
                Ok(())
            }
        }
    }
}

fn print_status(root: &Utf8Path, refreshed: bool) -> Result<()> {
    let verb = if refreshed {
        "Refreshing existing"
    } else {
        "Creating new"
    };
    writeln!(io::stdout().lock(), "{} goenv in {}", verb, root).context("writing status line")
}

fn write_script(bin: &Utf8Path, root: &Utf8Path, kind: ScriptKind) -> Result<()> {
    let contents = templates::render(kind, root.as_str())?;
    let destination = bin.join(kind.file_name());
    paths::write_executable(&destination, contents.as_bytes())?;
    tracing::debug!(script = %destination, "wrote activation script");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().join("testenv")).unwrap();
        (dir, root)
    }

    fn script_contents(root: &Utf8Path) -> (String, String) {
        (
            fs::read_to_string(root.join("bin/activate")).unwrap(),
            fs::read_to_string(root.join("bin/activate.fish")).unwrap(),
        )
    }

    fn entries(root: &Utf8Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(root)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn creates_complete_layout() {
        let (_dir, root) = temp_root();
        let report = WorkspaceBuilder::default().create(&root).unwrap();

        assert!(!report.refreshed);
        assert!(report.is_clean());
        for dir in layout(&root) {
            assert!(paths::exists(&dir), "{dir} missing");
            assert!(dir.is_dir());
        }
        assert!(paths::exists(&root.join("bin/activate")));
        assert!(paths::exists(&root.join("bin/activate.fish")));
        assert_eq!(entries(&root), vec!["bin", "pkg", "src"]);
        assert_eq!(entries(&root.join("bin")), vec!["activate", "activate.fish"]);
    }

    #[test]
    fn second_run_refreshes_with_identical_output() {
        let (_dir, root) = temp_root();
        let builder = WorkspaceBuilder::default();

        builder.create(&root).unwrap();
        let first = script_contents(&root);

        let report = builder.create(&root).unwrap();
        assert!(report.refreshed);
        assert_eq!(script_contents(&root), first);
        assert_eq!(entries(&root), vec!["bin", "pkg", "src"]);
    }

    #[test]
    fn scripts_point_at_root() {
        let (_dir, root) = temp_root();
        WorkspaceBuilder::default().create(&root).unwrap();

        let (primary, fish) = script_contents(&root);
        assert!(fish.contains(&format!("set -gx GOENV_ROOT \"{}\"", root)));
        assert!(!fish.contains(templates::ROOT_PLACEHOLDER));
        assert!(primary.contains(&format!("GOENV_ROOT=\"{}\"", root)));
        assert!(!primary.contains(templates::ROOT_PLACEHOLDER));
    }

    #[test]
    fn refresh_overwrites_edited_scripts() {
        let (_dir, root) = temp_root();
        let builder = WorkspaceBuilder::default();
        builder.create(&root).unwrap();
        let original = script_contents(&root);

        fs::write(root.join("bin/activate"), "edited").unwrap();
        builder.create(&root).unwrap();

        assert_eq!(script_contents(&root), original);
    }

    #[cfg(unix)]
    #[test]
    fn scripts_are_executable() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, root) = temp_root();
        WorkspaceBuilder::default().create(&root).unwrap();

        for name in ["activate", "activate.fish"] {
            let mode = fs::metadata(root.join("bin").join(name))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o755, "{name} has mode {mode:o}");
        }
    }

    #[test]
    fn continue_policy_records_failures_and_keeps_going() {
        let (_dir, root) = temp_root();
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("bin"), "not a directory").unwrap();

        let report = WorkspaceBuilder::new(ErrorPolicy::Continue)
            .create(&root)
            .unwrap();

        assert!(report.refreshed);
        // bin itself plus both script writes
        assert_eq!(report.failures.len(), 3);
        assert!(report.failures[0].contains("creating directory"));
        assert!(root.join("pkg").is_dir());
        assert!(root.join("src").is_dir());
    }

    #[test]
    fn abort_policy_stops_at_first_failure() {
        let (_dir, root) = temp_root();
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("bin"), "not a directory").unwrap();

        let err = WorkspaceBuilder::new(ErrorPolicy::Abort)
            .create(&root)
            .unwrap_err();

        let message = format!("{err:#}");
        assert!(message.contains("scaffolding goenv in"));
        assert!(message.contains("creating directory"));
        assert!(!root.join("pkg").exists());
    }

    #[test]
    fn layout_lists_root_and_subdirectories() {
        let root = Utf8Path::new("ws");
        assert_eq!(
            layout(root),
            [
                Utf8PathBuf::from("ws"),
                Utf8PathBuf::from("ws/bin"),
                Utf8PathBuf::from("ws/pkg"),
                Utf8PathBuf::from("ws/src"),
            ]
        );
    }
}
