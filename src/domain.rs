use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::HarvestError;

/// CSV column names, in the exact order the attributes are requested from
/// the mart. Response rows come back headerless in this order.
pub const COLUMNS: [&str; 6] = [
    "ensembl_gene_id",
    "external_gene_name",
    "ensembl_peptide_id",
    "uniprotswissprot",
    "chromosome_name",
    "band",
];

/// A human nuclear chromosome token: `"1"`..`"22"`, `"X"` or `"Y"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chromosome(String);

impl Chromosome {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The fixed run list: autosomes in numeric order, then X, then Y.
    pub fn human_autosomes_and_allosomes() -> Vec<Chromosome> {
        let mut list: Vec<Chromosome> = (1..=22).map(|n: u8| Chromosome(n.to_string())).collect();
        list.push(Chromosome("X".to_string()));
        list.push(Chromosome("Y".to_string()));
        list
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Chromosome {
    type Err = HarvestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_uppercase();
        if normalized == "X" || normalized == "Y" {
            return Ok(Self(normalized));
        }
        let is_autosome = !normalized.is_empty()
            && !normalized.starts_with('0')
            && normalized.chars().all(|ch| ch.is_ascii_digit())
            && normalized
                .parse::<u8>()
                .map(|n| (1..=22).contains(&n))
                .unwrap_or(false);
        if !is_autosome {
            return Err(HarvestError::InvalidChromosome(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

/// One annotation row. Every field may be absent: the mart returns empty
/// columns for genes without a name, protein product or Swiss-Prot entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneRecord {
    pub gene_id: Option<String>,
    pub gene_name: Option<String>,
    pub protein_id: Option<String>,
    pub swissprot_id: Option<String>,
    pub chromosome: Option<String>,
    pub band: Option<String>,
}

impl GeneRecord {
    fn csv_row(&self) -> String {
        [
            csv_field(&self.gene_id),
            csv_field(&self.gene_name),
            csv_field(&self.protein_id),
            csv_field(&self.swissprot_id),
            csv_field(&self.chromosome),
            csv_field(&self.band),
        ]
        .join(",")
    }
}

/// An ordered set of gene records for one chromosome, or the combined run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneTable {
    records: Vec<GeneRecord>,
}

impl GeneTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<GeneRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[GeneRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: GeneRecord) {
        self.records.push(record);
    }

    /// Remove exact-duplicate rows, keeping the first occurrence in order.
    /// Rows differing in any single field are distinct and both kept.
    pub fn dedup_exact(&mut self) {
        let mut seen = HashSet::new();
        self.records.retain(|record| seen.insert(record.clone()));
    }

    pub fn append(&mut self, other: &GeneTable) {
        self.records.extend_from_slice(&other.records);
    }

    /// Distinct non-null gene stable IDs.
    pub fn distinct_gene_ids(&self) -> usize {
        self.records
            .iter()
            .filter_map(|record| record.gene_id.as_deref())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Distinct non-null protein stable IDs.
    pub fn distinct_protein_ids(&self) -> usize {
        self.records
            .iter()
            .filter_map(|record| record.protein_id.as_deref())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Render as CSV: header row plus one line per record, absent fields
    /// rendered empty, `\n` endings with a trailing newline.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        out.push_str(&COLUMNS.join(","));
        out.push('\n');
        for record in &self.records {
            out.push_str(&record.csv_row());
            out.push('\n');
        }
        out
    }
}

fn csv_field(value: &Option<String>) -> String {
    match value {
        Some(text) => csv_escape(text),
        None => String::new(),
    }
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn record(gene: &str, band: &str) -> GeneRecord {
        GeneRecord {
            gene_id: Some(gene.to_string()),
            gene_name: None,
            protein_id: None,
            swissprot_id: None,
            chromosome: Some("21".to_string()),
            band: Some(band.to_string()),
        }
    }

    #[test]
    fn parse_chromosome_valid() {
        let chrom: Chromosome = "21".parse().unwrap();
        assert_eq!(chrom.as_str(), "21");
        let chrom: Chromosome = "x".parse().unwrap();
        assert_eq!(chrom.as_str(), "X");
        let chrom: Chromosome = " Y ".parse().unwrap();
        assert_eq!(chrom.as_str(), "Y");
    }

    #[test]
    fn parse_chromosome_invalid() {
        for value in ["0", "23", "007", "MT", "chr1", ""] {
            let err = value.parse::<Chromosome>().unwrap_err();
            assert_matches!(err, HarvestError::InvalidChromosome(_));
        }
    }

    #[test]
    fn canonical_list_order() {
        let list = Chromosome::human_autosomes_and_allosomes();
        assert_eq!(list.len(), 24);
        assert_eq!(list[0].as_str(), "1");
        assert_eq!(list[21].as_str(), "22");
        assert_eq!(list[22].as_str(), "X");
        assert_eq!(list[23].as_str(), "Y");
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let mut table = GeneTable::from_records(vec![
            record("ENSG01", "q21.1"),
            record("ENSG02", "q21.2"),
            record("ENSG01", "q21.1"),
            record("ENSG01", "q21.3"),
        ]);
        table.dedup_exact();
        assert_eq!(table.len(), 3);
        assert_eq!(table.records()[0].band.as_deref(), Some("q21.1"));
        assert_eq!(table.records()[1].gene_id.as_deref(), Some("ENSG02"));
        assert_eq!(table.records()[2].band.as_deref(), Some("q21.3"));
    }

    #[test]
    fn distinct_counts_ignore_absent_ids() {
        let mut table = GeneTable::new();
        table.push(record("ENSG01", "p11"));
        table.push(record("ENSG01", "p12"));
        table.push(GeneRecord {
            gene_id: None,
            gene_name: Some("orphan".to_string()),
            protein_id: Some("ENSP01".to_string()),
            swissprot_id: None,
            chromosome: None,
            band: None,
        });
        assert_eq!(table.distinct_gene_ids(), 1);
        assert_eq!(table.distinct_protein_ids(), 1);
        assert!(table.distinct_gene_ids() <= table.len());
    }

    #[test]
    fn csv_escapes_embedded_delimiters() {
        let mut table = GeneTable::new();
        table.push(GeneRecord {
            gene_id: Some("ENSG01".to_string()),
            gene_name: Some("protein, putative".to_string()),
            protein_id: None,
            swissprot_id: Some("P\"quoted\"".to_string()),
            chromosome: Some("1".to_string()),
            band: None,
        });
        let csv = table.to_csv();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(COLUMNS.join(",").as_str()));
        assert_eq!(
            lines.next(),
            Some("ENSG01,\"protein, putative\",,\"P\"\"quoted\"\"\",1,")
        );
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn empty_table_renders_header_only() {
        let csv = GeneTable::new().to_csv();
        assert_eq!(
            csv,
            "ensembl_gene_id,external_gene_name,ensembl_peptide_id,uniprotswissprot,chromosome_name,band\n"
        );
    }
}
