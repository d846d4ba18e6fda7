use cpmconv_version_map::PackagePin;
use derive_more::{Display, Error};
use miette::Diagnostic;
use pipe_trait::Pipe;
use quick_xml::{
    events::{BytesStart, Event},
    Reader, Writer,
};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Tag name of a dependency declaration inside a project file.
pub const PACKAGE_REFERENCE_TAG: &str = "PackageReference";
/// Attribute carrying the package identifier.
pub const INCLUDE_ATTRIBUTE: &str = "Include";
/// Attribute carrying the version pin.
pub const VERSION_ATTRIBUTE: &str = "Version";

/// Error when reading a project file from the filesystem.
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum LoadProjectFileError {
    #[display("Failed to read project file content: {_0}")]
    #[diagnostic(code(cpmconv_project_file::read_file))]
    ReadFile(io::Error),
}

/// Error when stripping version pins from project file content.
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum StripVersionPinsError {
    #[display("Failed to parse project file content as XML: {_0}")]
    #[diagnostic(code(cpmconv_project_file::parse_xml))]
    ParseXml(quick_xml::Error),

    #[display("Project file has no root element")]
    #[diagnostic(code(cpmconv_project_file::no_root_element))]
    NoRootElement,

    #[display("Project file has content outside the root element")]
    #[diagnostic(code(cpmconv_project_file::content_outside_root))]
    ContentOutsideRoot,

    #[display("Project file ends before all elements are closed")]
    #[diagnostic(code(cpmconv_project_file::unclosed_elements))]
    UnclosedElements,
}

/// Error when writing a converted project file back to disk.
#[derive(Debug, Display, Error, Diagnostic)]
#[non_exhaustive]
pub enum SaveProjectFileError {
    #[display("Failed to write project file content: {_0}")]
    #[diagnostic(code(cpmconv_project_file::write_file))]
    WriteFile(io::Error),
}

/// Content of a project descriptor file and its path.
#[derive(Debug)]
pub struct ProjectFile {
    path: PathBuf,
    content: String,
}

/// Output of [`ProjectFile::strip_version_pins`].
#[derive(Debug, PartialEq, Eq)]
pub struct StrippedProject {
    /// Project content with version attributes removed from every package
    /// reference.
    pub content: String,
    /// Every `(Include, Version)` pair where both values were non-empty.
    pub pins: Vec<PackagePin>,
    /// Whether the file needs to be rewritten. Only references that carried a
    /// non-empty version pin mark the project as changed; a project without
    /// any is left byte-for-byte untouched on disk.
    pub changed: bool,
}

impl ProjectFile {
    /// Load a project file from disk.
    pub fn load(path: PathBuf) -> Result<Self, LoadProjectFileError> {
        let content = fs::read_to_string(&path).map_err(LoadProjectFileError::ReadFile)?;
        Ok(ProjectFile { path, content })
    }

    pub fn path(&self) -> &'_ Path {
        &self.path
    }

    pub fn content(&self) -> &'_ str {
        &self.content
    }

    /// Compute a copy of the content where every package reference, anywhere
    /// in the document, has its version attribute removed.
    ///
    /// All other XML events pass through verbatim. References without a
    /// package identifier are skipped for pin collection but still lose their
    /// version attribute in the returned content.
    ///
    /// The document must be well-formed: exactly one root element, every
    /// element closed, nothing but the prolog and whitespace outside the
    /// root. Anything else is an error that aborts the whole run.
    pub fn strip_version_pins(&self) -> Result<StrippedProject, StripVersionPinsError> {
        let mut reader = Reader::from_str(&self.content);
        let mut writer = Writer::new(Vec::new());
        let mut pins = Vec::new();
        let mut changed = false;
        let mut depth = 0_usize;
        let mut root_seen = false;

        loop {
            match reader.read_event().map_err(StripVersionPinsError::ParseXml)? {
                Event::Eof => {
                    if depth > 0 {
                        return Err(StripVersionPinsError::UnclosedElements);
                    }
                    if !root_seen {
                        return Err(StripVersionPinsError::NoRootElement);
                    }
                    break;
                }
                Event::Start(tag) => {
                    if depth == 0 && root_seen {
                        return Err(StripVersionPinsError::ContentOutsideRoot);
                    }
                    root_seen = true;
                    depth += 1;
                    let event = if tag.name().as_ref() == PACKAGE_REFERENCE_TAG.as_bytes() {
                        strip_reference(tag, &mut pins, &mut changed)?.pipe(Event::Start)
                    } else {
                        Event::Start(tag)
                    };
                    writer.write_event(event).map_err(StripVersionPinsError::ParseXml)?;
                }
                Event::Empty(tag) => {
                    if depth == 0 && root_seen {
                        return Err(StripVersionPinsError::ContentOutsideRoot);
                    }
                    root_seen = true;
                    let event = if tag.name().as_ref() == PACKAGE_REFERENCE_TAG.as_bytes() {
                        strip_reference(tag, &mut pins, &mut changed)?.pipe(Event::Empty)
                    } else {
                        Event::Empty(tag)
                    };
                    writer.write_event(event).map_err(StripVersionPinsError::ParseXml)?;
                }
                Event::End(tag) => {
                    // mismatched names are already rejected by the reader
                    depth = depth.saturating_sub(1);
                    writer.write_event(Event::End(tag)).map_err(StripVersionPinsError::ParseXml)?;
                }
                Event::Text(text) if depth == 0 => {
                    let content =
                        text.unescape().map_err(StripVersionPinsError::ParseXml)?;
                    let is_blank = content
                        .trim_matches(|character: char| {
                            character.is_whitespace() || character == '\u{feff}'
                        })
                        .is_empty();
                    if !is_blank {
                        return Err(StripVersionPinsError::ContentOutsideRoot);
                    }
                    writer
                        .write_event(Event::Text(text))
                        .map_err(StripVersionPinsError::ParseXml)?;
                }
                Event::CData(_) if depth == 0 => {
                    return Err(StripVersionPinsError::ContentOutsideRoot);
                }
                event => {
                    writer.write_event(event).map_err(StripVersionPinsError::ParseXml)?;
                }
            }
        }

        let content = writer
            .into_inner()
            .pipe(String::from_utf8)
            .expect("writer output is UTF-8 because the input was a str");
        Ok(StrippedProject { content, pins, changed })
    }

    /// Overwrite the on-disk file with converted content.
    pub fn save(&self, content: &str) -> Result<(), SaveProjectFileError> {
        fs::write(&self.path, content).map_err(SaveProjectFileError::WriteFile)
    }
}

/// Rebuild a package reference tag without its version attribute, recording a
/// pin when both the identifier and the version are non-empty.
fn strip_reference(
    tag: BytesStart<'_>,
    pins: &mut Vec<PackagePin>,
    changed: &mut bool,
) -> Result<BytesStart<'static>, StripVersionPinsError> {
    let mut stripped = BytesStart::new(PACKAGE_REFERENCE_TAG);
    let mut id = None;
    let mut version = None;

    for attribute in tag.attributes() {
        let attribute = attribute
            .map_err(quick_xml::Error::from)
            .map_err(StripVersionPinsError::ParseXml)?;
        if attribute.key.as_ref() == VERSION_ATTRIBUTE.as_bytes() {
            version = attribute
                .unescape_value()
                .map_err(StripVersionPinsError::ParseXml)?
                .into_owned()
                .pipe(Some);
            continue; // dropped from the rebuilt tag
        }
        if attribute.key.as_ref() == INCLUDE_ATTRIBUTE.as_bytes() {
            id = attribute
                .unescape_value()
                .map_err(StripVersionPinsError::ParseXml)?
                .into_owned()
                .pipe(Some);
        }
        stripped.push_attribute(attribute);
    }

    if let (Some(id), Some(version)) = (id, version) {
        if !id.is_empty() && !version.is_empty() {
            pins.push(PackagePin { id, version });
            *changed = true;
        }
    }

    Ok(stripped)
}
