mod convert_project;
mod convert_tree;
mod scan;

pub use convert_project::{ConvertProject, ConvertProjectError};
pub use convert_tree::{ConvertSummary, ConvertTree, ConvertTreeError};
pub use scan::{scan_project_files, ScanProjectFilesError, PROJECT_FILE_EXTENSION};
