use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use crate::domain::Chromosome;
use crate::error::HarvestError;

/// Layout of the harvest output directory. All result files live flat under
/// one root; per-chromosome tables and the combined table are overwritten on
/// each run.
#[derive(Debug, Clone)]
pub struct OutputStore {
    root: Utf8PathBuf,
}

impl OutputStore {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn chromosome_path(&self, chromosome: &Chromosome) -> Utf8PathBuf {
        self.root
            .join(format!("chromosome_{}_genes.csv", chromosome.as_str()))
    }

    pub fn combined_path(&self) -> Utf8PathBuf {
        self.root.join("all_chromosomes_genes.csv")
    }

    pub fn ensure_root(&self) -> Result<(), HarvestError> {
        fs::create_dir_all(self.root.as_std_path())
            .map_err(|err| HarvestError::Filesystem(err.to_string()))
    }

    pub fn write_bytes_atomic(path: &Utf8Path, content: &[u8]) -> Result<(), HarvestError> {
        let parent = path
            .parent()
            .ok_or_else(|| HarvestError::Filesystem("invalid destination path".to_string()))?;
        fs::create_dir_all(parent.as_std_path())
            .map_err(|err| HarvestError::Filesystem(err.to_string()))?;
        let temp = tempfile::Builder::new()
            .prefix("mart-harvest")
            .tempfile_in(parent.as_std_path())
            .map_err(|err| HarvestError::Filesystem(err.to_string()))?;
        fs::write(temp.path(), content)
            .map_err(|err| HarvestError::Filesystem(err.to_string()))?;
        if path.as_std_path().exists() {
            fs::remove_file(path.as_std_path())
                .map_err(|err| HarvestError::Filesystem(err.to_string()))?;
        }
        temp.persist(path.as_std_path())
            .map_err(|err| HarvestError::Filesystem(err.to_string()))?;
        Ok(())
    }
}
