use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use serde::Serialize;
use tracing::{info, warn};

use crate::biomart::BiomartClient;
use crate::config::HarvestConfig;
use crate::domain::{Chromosome, GeneTable};
use crate::error::HarvestError;
use crate::fetch::Fetcher;
use crate::store::OutputStore;

/// Counters for one harvest run. The combined-table figures are present only
/// when at least one chromosome yielded data.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub total_records: Option<usize>,
    pub distinct_genes: Option<usize>,
    pub distinct_proteins: Option<usize>,
    pub started_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub summary: RunSummary,
    pub combined_path: Option<String>,
}

pub struct App<C: BiomartClient> {
    config: HarvestConfig,
    fetcher: Fetcher<C>,
    store: OutputStore,
    interrupt: Arc<AtomicBool>,
}

impl<C: BiomartClient> App<C> {
    pub fn new(config: HarvestConfig, client: C, interrupt: Arc<AtomicBool>) -> Self {
        let store = OutputStore::new(config.output_dir.clone());
        let fetcher = Fetcher::new(config.clone(), client, store.clone());
        Self {
            config,
            fetcher,
            store,
            interrupt,
        }
    }

    /// Walk the chromosome list in the given order, one blocking fetch at a
    /// time. A chromosome that cannot be retrieved is counted and skipped;
    /// only an interrupt or a run with no data at all ends in an error.
    pub fn run(&self, chromosomes: &[Chromosome]) -> Result<RunReport, HarvestError> {
        let started_at = iso_timestamp();
        self.store.ensure_root()?;

        let total = chromosomes.len();
        let mut successful = 0usize;
        let mut failed = 0usize;
        let mut combined = GeneTable::new();

        for (index, chromosome) in chromosomes.iter().enumerate() {
            if self.interrupt.load(Ordering::SeqCst) {
                warn!("interrupted after {} of {} chromosomes", index, total);
                return Err(HarvestError::Interrupted);
            }
            info!(
                "processing chromosome {} ({}/{})",
                chromosome,
                index + 1,
                total
            );
            match self.fetcher.fetch(chromosome) {
                Some(table) if !table.is_empty() => {
                    successful += 1;
                    combined.append(&table);
                }
                Some(_) => successful += 1,
                None => failed += 1,
            }
            if index + 1 < total {
                thread::sleep(self.config.pacing_delay);
            }
        }

        info!(
            "processed {} chromosomes: {} successful, {} failed",
            total, successful, failed
        );

        if combined.is_empty() {
            warn!("no gene records retrieved from any chromosome");
            return Err(HarvestError::NoDataRetrieved);
        }

        let combined_path = self.store.combined_path();
        OutputStore::write_bytes_atomic(&combined_path, combined.to_csv().as_bytes())?;
        info!(
            "wrote combined table with {} records to {}",
            combined.len(),
            combined_path
        );

        Ok(RunReport {
            summary: RunSummary {
                processed: total,
                successful,
                failed,
                total_records: Some(combined.len()),
                distinct_genes: Some(combined.distinct_gene_ids()),
                distinct_proteins: Some(combined.distinct_protein_ids()),
                started_at,
            },
            combined_path: Some(combined_path.to_string()),
        })
    }
}

fn iso_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
