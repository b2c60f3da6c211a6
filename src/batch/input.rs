//! Input discovery: directory scans and explicit file lists

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::BatchError;

/// The role a file plays in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRole {
    /// idXML identification files
    Identification,
    /// mzML spectral files
    Spectral,
}

impl InputRole {
    /// File extension matched by directory scans (case-sensitive)
    pub fn extension(self) -> &'static str {
        match self {
            InputRole::Identification => "idXML",
            InputRole::Spectral => "mzML",
        }
    }
}

impl fmt::Display for InputRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// How an input set was specified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Every matching file in a folder
    Directory,
    /// An ordered, user-supplied list
    ExplicitList,
}

/// Where the files of one role come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Scan a folder for files with the role's extension
    Directory(PathBuf),
    /// Use these files, in this order
    List(Vec<PathBuf>),
}

impl InputSource {
    /// Build a source from the mutually exclusive folder / list options.
    ///
    /// Returns `Ok(None)` when neither is given.
    pub fn from_options(
        role: InputRole,
        folder: Option<PathBuf>,
        list: Option<&str>,
    ) -> Result<Option<Self>, BatchError> {
        match (folder, list) {
            (Some(_), Some(_)) => Err(BatchError::Configuration(format!(
                "cannot specify both a {role} folder and a {role} file list"
            ))),
            (Some(folder), None) => Ok(Some(InputSource::Directory(folder))),
            (None, Some(list)) => {
                let files = Self::parse_list(list);
                if files.is_empty() {
                    return Err(BatchError::Configuration(format!(
                        "the {role} file list is empty"
                    )));
                }
                Ok(Some(InputSource::List(files)))
            }
            (None, None) => Ok(None),
        }
    }

    /// Split a comma-separated list, trimming whitespace and dropping empty entries
    pub fn parse_list(list: &str) -> Vec<PathBuf> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect()
    }

    /// The mode this source was specified in
    pub fn mode(&self) -> InputMode {
        match self {
            InputSource::Directory(_) => InputMode::Directory,
            InputSource::List(_) => InputMode::ExplicitList,
        }
    }

    /// Resolve to concrete, existing files.
    ///
    /// Directory scans are sorted by file name so that runs are reproducible.
    pub fn resolve(&self, role: InputRole) -> Result<InputSet, BatchError> {
        let files = match self {
            InputSource::Directory(dir) => scan_directory(dir, role)?,
            InputSource::List(files) => {
                if files.is_empty() {
                    return Err(BatchError::Configuration(format!(
                        "the {role} file list is empty"
                    )));
                }
                if let Some(missing) = files.iter().find(|f| !f.is_file()) {
                    return Err(BatchError::Configuration(format!(
                        "{role} file not found: {}",
                        missing.display()
                    )));
                }
                files.clone()
            }
        };

        Ok(InputSet {
            mode: self.mode(),
            files,
        })
    }
}

fn scan_directory(dir: &Path, role: InputRole) -> Result<Vec<PathBuf>, BatchError> {
    if !dir.is_dir() {
        return Err(BatchError::Configuration(format!(
            "{role} folder not found: {}",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .is_some_and(|ext| ext == role.extension());
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    // An mzML folder without spectra only means nothing gets enriched
    if files.is_empty() && role == InputRole::Identification {
        return Err(BatchError::Configuration(format!(
            "no .{} files found in {}",
            role.extension(),
            dir.display()
        )));
    }
    Ok(files)
}

/// An ordered, resolved set of files of one role.
///
/// Identification sets are never empty; a spectral folder may hold no files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSet {
    mode: InputMode,
    files: Vec<PathBuf>,
}

impl InputSet {
    /// Build a set directly (no file-system checks)
    pub fn new(mode: InputMode, files: Vec<PathBuf>) -> Self {
        Self { mode, files }
    }

    /// How the set was specified
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Files in processing order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Identification and optional spectral sources of one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchInputs {
    /// idXML files
    pub identification: InputSource,
    /// mzML files, if enrichment is wanted
    pub spectral: Option<InputSource>,
}

impl BatchInputs {
    /// Create inputs from already-built sources
    pub fn new(identification: InputSource, spectral: Option<InputSource>) -> Self {
        Self {
            identification,
            spectral,
        }
    }

    /// Build inputs from the four folder / list options of the batch command
    pub fn from_options(
        identification_folder: Option<PathBuf>,
        identification_files: Option<&str>,
        spectral_folder: Option<PathBuf>,
        spectral_files: Option<&str>,
    ) -> Result<Self, BatchError> {
        let identification = InputSource::from_options(
            InputRole::Identification,
            identification_folder,
            identification_files,
        )?
        .ok_or_else(|| {
            BatchError::Configuration(
                "either an idXML folder or an idXML file list is required".to_string(),
            )
        })?;
        let spectral =
            InputSource::from_options(InputRole::Spectral, spectral_folder, spectral_files)?;

        Ok(Self::new(identification, spectral))
    }

    /// Resolve both sources to existing files
    pub fn resolve(&self) -> Result<(InputSet, Option<InputSet>), BatchError> {
        let identification = self.identification.resolve(InputRole::Identification)?;
        let spectral = self
            .spectral
            .as_ref()
            .map(|source| source.resolve(InputRole::Spectral))
            .transpose()?;
        Ok((identification, spectral))
    }
}
