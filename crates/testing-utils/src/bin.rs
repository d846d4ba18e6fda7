use assert_cmd::prelude::*;
use command_extra::CommandExtra;
use std::{fs, path::PathBuf, process::Command};
use tempfile::{tempdir, TempDir};

/// Temporary project tree and a `cpmconv` command whose working directory is
/// inside it.
pub struct CommandTempCwd {
    /// Command to run the `cpmconv` binary.
    pub cpmconv: Command,
    /// Handle that removes the temporary directory when dropped.
    pub root: TempDir,
    /// Directory holding the project tree under conversion.
    pub workspace: PathBuf,
}

impl CommandTempCwd {
    /// Create a temporary project tree and point a `cpmconv` command at it.
    pub fn init() -> Self {
        let root = tempdir().expect("create temporary directory");
        let workspace = root.path().join("workspace");
        fs::create_dir(&workspace).expect("create temporary workspace for cpmconv");
        let cpmconv = Command::cargo_bin("cpmconv")
            .expect("find the cpmconv binary")
            .with_current_dir(&workspace);
        CommandTempCwd { cpmconv, root, workspace }
    }
}
