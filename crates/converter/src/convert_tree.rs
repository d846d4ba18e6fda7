use crate::{scan_project_files, ConvertProject, ConvertProjectError, ScanProjectFilesError};
use cpmconv_central_manifest::{CentralManifest, SaveCentralManifestError, CENTRAL_MANIFEST_FILE_NAME};
use cpmconv_version_map::PackageVersionMap;
use derive_more::{Display, Error};
use miette::Diagnostic;
use std::path::Path;

/// This subroutine does everything `cpmconv <root>` is supposed to do: scan
/// the tree, convert each project file in file-name order, then emit the
/// central manifest at the root when any version pin was collected.
#[must_use]
pub struct ConvertTree<'a> {
    pub root: &'a Path,
}

/// Counters reported after a conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertSummary {
    /// Project files found beneath the root.
    pub scanned: usize,
    /// Project files rewritten with version pins removed.
    pub rewritten: usize,
    /// Distinct packages recorded in the manifest.
    pub packages: usize,
}

/// Error type of [`ConvertTree::run`].
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum ConvertTreeError {
    #[diagnostic(transparent)]
    Scan(#[error(source)] ScanProjectFilesError),

    #[diagnostic(transparent)]
    ConvertProject(#[error(source)] ConvertProjectError),

    #[diagnostic(transparent)]
    SaveManifest(#[error(source)] SaveCentralManifestError),
}

impl ConvertTree<'_> {
    /// Execute the subroutine.
    pub fn run(self) -> Result<ConvertSummary, ConvertTreeError> {
        let ConvertTree { root } = self;

        tracing::info!(target: "cpmconv::convert", root = %root.display(), "Start conversion");

        let files = scan_project_files(root).map_err(ConvertTreeError::Scan)?;
        let mut versions = PackageVersionMap::new();
        let mut rewritten = 0;

        for path in &files {
            let changed = ConvertProject { path, versions: &mut versions }
                .run()
                .map_err(ConvertTreeError::ConvertProject)?;
            if changed {
                rewritten += 1;
            }
        }

        if versions.is_empty() {
            println!("No references found...");
        } else {
            println!(
                "Writing {count} refs to {CENTRAL_MANIFEST_FILE_NAME} to {root}...",
                count = versions.len(),
                root = root.display(),
            );
            CentralManifest::from(&versions)
                .save(root)
                .map_err(ConvertTreeError::SaveManifest)?;
        }

        tracing::info!(target: "cpmconv::convert", "Complete conversion");

        Ok(ConvertSummary { scanned: files.len(), rewritten, packages: versions.len() })
    }
}
