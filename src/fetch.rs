use std::thread;

use tracing::{debug, info, warn};

use crate::biomart::BiomartClient;
use crate::config::HarvestConfig;
use crate::domain::{Chromosome, GeneTable};
use crate::error::HarvestError;
use crate::query::chromosome_query;
use crate::response::{self, BodyKind};
use crate::store::OutputStore;

/// Retrieves and persists one chromosome's gene table. Service errors,
/// unparseable bodies and empty answers are treated as valid empty results;
/// only exhausted transport retries or a write failure mark the chromosome
/// absent.
pub struct Fetcher<C> {
    config: HarvestConfig,
    client: C,
    store: OutputStore,
}

impl<C: BiomartClient> Fetcher<C> {
    pub fn new(config: HarvestConfig, client: C, store: OutputStore) -> Self {
        Self {
            config,
            client,
            store,
        }
    }

    /// `Some` on success (the table may be empty), `None` when the chromosome
    /// could not be retrieved. Never propagates an error to the caller.
    pub fn fetch(&self, chromosome: &Chromosome) -> Option<GeneTable> {
        match self.try_fetch(chromosome) {
            Ok(table) => Some(table),
            Err(err) => {
                warn!("chromosome {}: giving up: {}", chromosome, err);
                None
            }
        }
    }

    fn try_fetch(&self, chromosome: &Chromosome) -> Result<GeneTable, HarvestError> {
        let body = self.send_with_retries(chromosome)?;
        let table = self.normalize(chromosome, &body);
        let path = self.store.chromosome_path(chromosome);
        OutputStore::write_bytes_atomic(&path, table.to_csv().as_bytes())?;
        info!(
            "chromosome {}: wrote {} records to {}",
            chromosome,
            table.len(),
            path
        );
        Ok(table)
    }

    fn send_with_retries(&self, chromosome: &Chromosome) -> Result<String, HarvestError> {
        let xml = chromosome_query(chromosome);
        let max_attempts = self.config.max_attempts;
        let mut attempt = 1u32;
        loop {
            match self.client.send_query(&xml) {
                Ok(body) => return Ok(body),
                Err(err) if err.is_transport() && attempt < max_attempts => {
                    warn!(
                        "chromosome {}: attempt {}/{} failed ({}), retrying in {}s",
                        chromosome,
                        attempt,
                        max_attempts,
                        err,
                        self.config.retry_delay.as_secs()
                    );
                    thread::sleep(self.config.retry_delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn normalize(&self, chromosome: &Chromosome, body: &str) -> GeneTable {
        match response::classify_body(body) {
            BodyKind::Empty => {
                info!("chromosome {}: service returned no records", chromosome);
                GeneTable::new()
            }
            BodyKind::ServiceError => {
                warn!(
                    "chromosome {}: service reported an error: {}",
                    chromosome,
                    response::preview(body)
                );
                GeneTable::new()
            }
            BodyKind::Data => match response::parse_table(body) {
                Ok(mut table) => {
                    let before = table.len();
                    table.dedup_exact();
                    if table.len() < before {
                        debug!(
                            "chromosome {}: dropped {} duplicate rows",
                            chromosome,
                            before - table.len()
                        );
                    }
                    table
                }
                Err(bad) => {
                    warn!(
                        "chromosome {}: malformed row {} carries {} fields: {}",
                        chromosome,
                        bad.line_number,
                        bad.field_count,
                        response::preview(body)
                    );
                    GeneTable::new()
                }
            },
        }
    }
}
