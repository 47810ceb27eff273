use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::documents::{ScholarshipDocument, SchemeDocument};
use super::domain::{Program, ProgramId};

/// Errors raised while seeding the catalog from an exported JSON file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate program id '{0}'")]
    DuplicateId(ProgramId),
}

/// Export of the two catalog collections as stored by the admin panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    pub schemes: Vec<SchemeDocument>,
    pub scholarships: Vec<ScholarshipDocument>,
}

impl CatalogFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogLoadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Adapt every document into a [`Program`], schemes first, preserving file order.
    ///
    /// Documents without an `id` get a positional one (`scheme-1`, `scholarship-3`, ...).
    pub fn into_programs(self) -> Result<Vec<Program>, CatalogLoadError> {
        let scheme_count = self.schemes.len();
        let scholarship_count = self.scholarships.len();

        let schemes = self
            .schemes
            .into_iter()
            .enumerate()
            .map(|(index, document)| document.into_program(&format!("scheme-{}", index + 1)));
        let scholarships = self
            .scholarships
            .into_iter()
            .enumerate()
            .map(|(index, document)| {
                document.into_program(&format!("scholarship-{}", index + 1))
            });

        let mut seen = HashSet::new();
        let mut programs = Vec::with_capacity(scheme_count + scholarship_count);
        for program in schemes.chain(scholarships) {
            if !seen.insert(program.id.clone()) {
                return Err(CatalogLoadError::DuplicateId(program.id));
            }
            programs.push(program);
        }

        info!(
            schemes = scheme_count,
            scholarships = scholarship_count,
            "catalog adapted"
        );
        Ok(programs)
    }
}

/// Read and adapt a catalog export in one step.
pub fn load_programs<P: AsRef<Path>>(path: P) -> Result<Vec<Program>, CatalogLoadError> {
    CatalogFile::from_path(path)?.into_programs()
}
