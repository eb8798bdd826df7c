//! Project files.
//!
//! A project is a JSON document listing data files, reference files, the
//! directive text and custom display names:
//!
//! ```json
//! {
//!   "data_files": ["scans/a.xy", "scans/b.gr"],
//!   "ref_files": ["refs/quartz.csv"],
//!   "commands": "offset = 1.5\nlegendpos = outside",
//!   "custom_names": { "scans/a.xy": "As synthesized" },
//!   "custom_ref_names": {}
//! }
//! ```
//!
//! Missing fields default to empty and unknown fields are ignored. Paths are
//! used exactly as stored.

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;

use crate::{PlotRequest, StackplotError};

/// The read side of a saved project.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Project {
    #[serde(default)]
    data_files: Vec<PathBuf>,

    #[serde(default)]
    ref_files: Vec<PathBuf>,

    #[serde(default)]
    commands: String,

    #[serde(default)]
    custom_names: IndexMap<PathBuf, String>,

    #[serde(default)]
    custom_ref_names: IndexMap<PathBuf, String>,
}

impl Project {
    /// Reads and parses a project file, dropping names of unlisted files.
    ///
    /// # Errors
    ///
    /// Returns [`StackplotError::Io`] if the file cannot be read, or
    /// [`StackplotError::Project`] if it is not a valid project document.
    pub fn load(path: &Path) -> Result<Self, StackplotError> {
        info!(path:? = path; "Loading project");
        let text = fs::read_to_string(path)?;
        let mut project: Self =
            serde_json::from_str(&text).map_err(|source| StackplotError::Project {
                path: path.to_path_buf(),
                source,
            })?;
        project.prune_custom_names();
        debug!(
            data_files = project.data_files.len(),
            ref_files = project.ref_files.len();
            "Project loaded"
        );
        Ok(project)
    }

    pub fn data_files(&self) -> &[PathBuf] {
        &self.data_files
    }

    pub fn ref_files(&self) -> &[PathBuf] {
        &self.ref_files
    }

    pub fn commands(&self) -> &str {
        &self.commands
    }

    pub fn custom_names(&self) -> &IndexMap<PathBuf, String> {
        &self.custom_names
    }

    pub fn custom_ref_names(&self) -> &IndexMap<PathBuf, String> {
        &self.custom_ref_names
    }

    /// Removes custom names whose file is no longer listed.
    pub fn prune_custom_names(&mut self) {
        let data_files = &self.data_files;
        self.custom_names.retain(|path, _| data_files.contains(path));
        let ref_files = &self.ref_files;
        self.custom_ref_names.retain(|path, _| ref_files.contains(path));
    }
}

impl From<Project> for PlotRequest {
    fn from(project: Project) -> Self {
        Self {
            data_files: project.data_files,
            ref_files: project.ref_files,
            directives: project.commands,
            custom_names: project.custom_names,
            custom_ref_names: project.custom_ref_names,
        }
    }
}
