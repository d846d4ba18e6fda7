use derive_more::{Display, Error};
use miette::Diagnostic;
use pipe_trait::Pipe;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extension of project descriptor files, compared case-insensitively.
pub const PROJECT_FILE_EXTENSION: &str = "csproj";

/// Error when enumerating project files beneath the scan root.
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum ScanProjectFilesError {
    #[display("Scan root is not a directory: {_0:?}")]
    #[diagnostic(code(cpmconv_converter::not_a_directory))]
    NotADirectory(#[error(not(source))] PathBuf),

    #[display("Failed to walk the project tree: {_0}")]
    #[diagnostic(code(cpmconv_converter::walk_dir))]
    WalkDir(walkdir::Error),
}

/// List every project file beneath `root`.
///
/// The walk recurses into every subdirectory without exclusions, so build
/// output and package cache directories are scanned too. Results are ordered
/// by file name alone, not by full path; files from different subdirectories
/// interleave when their names do.
pub fn scan_project_files(root: &Path) -> Result<Vec<PathBuf>, ScanProjectFilesError> {
    if root.exists() && !root.is_dir() {
        return root.to_path_buf().pipe(ScanProjectFilesError::NotADirectory).pipe(Err);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(ScanProjectFilesError::WalkDir)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_project_file = entry
            .path()
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case(PROJECT_FILE_EXTENSION));
        if is_project_file {
            files.push(entry.into_path());
        }
    }

    // stable sort: files sharing a name keep their walk order
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn finds_project_files_recursively_sorted_by_file_name() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("src/App")).unwrap();
        fs::create_dir_all(root.path().join("tests")).unwrap();
        fs::write(root.path().join("src/App/Zeta.csproj"), "").unwrap();
        fs::write(root.path().join("tests/Alpha.csproj"), "").unwrap();
        fs::write(root.path().join("Beta.csproj"), "").unwrap();
        fs::write(root.path().join("README.md"), "").unwrap();

        let names: Vec<_> = scan_project_files(root.path())
            .unwrap()
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["Alpha.csproj", "Beta.csproj", "Zeta.csproj"]);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("App.CSPROJ"), "").unwrap();
        fs::write(root.path().join("Lib.CsProj"), "").unwrap();
        fs::write(root.path().join("notes.csproj.txt"), "").unwrap();

        let files = scan_project_files(root.path()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn no_directory_is_excluded_from_the_walk() {
        let root = tempdir().unwrap();
        fs::create_dir_all(root.path().join("bin/Debug")).unwrap();
        fs::write(root.path().join("bin/Debug/Generated.csproj"), "").unwrap();

        let files = scan_project_files(root.path()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn missing_root_is_an_error() {
        let root = tempdir().unwrap();
        scan_project_files(&root.path().join("nope")).expect_err("nonexistent root");
    }

    #[test]
    fn file_as_root_is_an_error() {
        let root = tempdir().unwrap();
        let file = root.path().join("App.csproj");
        fs::write(&file, "").unwrap();
        let error = scan_project_files(&file).expect_err("root must be a directory");
        assert!(matches!(error, ScanProjectFilesError::NotADirectory(_)));
    }
}
