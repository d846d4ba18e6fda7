use cpmconv_project_file::{
    LoadProjectFileError, ProjectFile, SaveProjectFileError, StripVersionPinsError,
    StrippedProject,
};
use cpmconv_version_map::{MergeOutcome, PackagePin, PackageVersionMap};
use derive_more::{Display, Error};
use miette::Diagnostic;
use pipe_trait::Pipe;
use std::path::Path;

/// This subroutine converts a single project file and folds its version pins
/// into the shared accumulator.
#[must_use]
pub struct ConvertProject<'a> {
    pub path: &'a Path,
    pub versions: &'a mut PackageVersionMap,
}

/// Error type of [`ConvertProject::run`].
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum ConvertProjectError {
    #[diagnostic(transparent)]
    Load(#[error(source)] LoadProjectFileError),

    #[diagnostic(transparent)]
    StripVersionPins(#[error(source)] StripVersionPinsError),

    #[diagnostic(transparent)]
    Save(#[error(source)] SaveProjectFileError),
}

impl ConvertProject<'_> {
    /// Execute the subroutine. Returns whether the file was rewritten.
    pub fn run(self) -> Result<bool, ConvertProjectError> {
        let ConvertProject { path, versions } = self;

        println!("Processing references for {}...", path.display());
        tracing::debug!(target: "cpmconv::convert", path = %path.display(), "Convert project");

        let project =
            path.to_path_buf().pipe(ProjectFile::load).map_err(ConvertProjectError::Load)?;
        let StrippedProject { content, pins, changed } =
            project.strip_version_pins().map_err(ConvertProjectError::StripVersionPins)?;

        for PackagePin { id, version } in pins {
            match versions.merge(&id, &version) {
                MergeOutcome::Inserted | MergeOutcome::Lowered => {
                    println!(" Found new reference: {id} {version}");
                }
                MergeOutcome::Kept => {}
            }
        }

        if changed {
            project.save(&content).map_err(ConvertProjectError::Save)?;
            tracing::debug!(target: "cpmconv::convert", path = %path.display(), "Rewrote project");
        }

        Ok(changed)
    }
}
