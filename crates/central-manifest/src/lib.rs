use cpmconv_version_map::{PackagePin, PackageVersionMap};
use derive_more::{Display, Error};
use miette::Diagnostic;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use text_block_macros::text_block_fnl;

/// File name of the consolidated version manifest, written at the root of the
/// converted tree.
pub const CENTRAL_MANIFEST_FILE_NAME: &str = "Directory.Packages.props";

const MANIFEST_HEADER: &str = text_block_fnl! {
    "<Project>"
    "  <PropertyGroup>"
    "    <ManagePackageVersionsCentrally>true</ManagePackageVersionsCentrally>"
    "  </PropertyGroup>"
    "  <ItemGroup>"
};

const MANIFEST_FOOTER: &str = text_block_fnl! {
    "  </ItemGroup>"
    "</Project>"
};

/// Error when writing the manifest to the root of the converted tree.
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum SaveCentralManifestError {
    #[display("Failed to write the central manifest: {_0}")]
    #[diagnostic(code(cpmconv_central_manifest::write_file))]
    WriteFile(io::Error),
}

/// Consolidated package versions in emission order.
#[derive(Debug, PartialEq, Eq)]
pub struct CentralManifest {
    packages: Vec<PackagePin>,
}

impl From<&PackageVersionMap> for CentralManifest {
    fn from(versions: &PackageVersionMap) -> Self {
        CentralManifest { packages: versions.sorted_pins().into_iter().cloned().collect() }
    }
}

impl CentralManifest {
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Render the manifest document, one `PackageVersion` entry per package.
    pub fn render(&self) -> String {
        let mut document = String::from(MANIFEST_HEADER);
        for PackagePin { id, version } in &self.packages {
            document.push_str(&format!(
                "    <PackageVersion Include=\"{id}\" Version=\"{version}\" />\n"
            ));
        }
        document.push_str(MANIFEST_FOOTER);
        document
    }

    /// Path of the manifest inside `root`.
    pub fn file_path(root: &Path) -> PathBuf {
        root.join(CENTRAL_MANIFEST_FILE_NAME)
    }

    /// Write the manifest at the root of the converted tree, replacing any
    /// existing file of the same name. There is no merge with a pre-existing
    /// manifest.
    pub fn save(&self, root: &Path) -> Result<PathBuf, SaveCentralManifestError> {
        let file_path = CentralManifest::file_path(root);
        fs::write(&file_path, self.render()).map_err(SaveCentralManifestError::WriteFile)?;
        Ok(file_path)
    }
}
