use std::path::Path;
use walkdir::WalkDir;

/// Names of the entries directly inside `path`, sorted.
pub fn get_filenames_in_folder(path: &Path) -> Vec<String> {
    let mut files = std::fs::read_dir(path)
        .expect("read folder")
        .map(|entry| entry.expect("access entry").file_name().to_string_lossy().to_string())
        .collect::<Vec<_>>();
    files.sort();
    files
}

/// Every file beneath `root` as a sorted list of slash-separated suffixes.
pub fn get_all_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.expect("access entry"))
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .expect("strip root prefix from entry path")
                .components()
                .map(|component| {
                    component.as_os_str().to_str().expect("convert path component to UTF-8")
                })
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    files.sort();
    files
}
