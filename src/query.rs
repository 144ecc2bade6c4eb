use crate::domain::{COLUMNS, Chromosome};

pub const MART_DATASET: &str = "hsapiens_gene_ensembl";

/// Build the mart query document for one chromosome: the human gene dataset,
/// a single chromosome-name filter, and the six annotation attributes,
/// requested as headerless TSV. Chromosome tokens are validated upstream and
/// contain no XML metacharacters, so no escaping is needed.
pub fn chromosome_query(chromosome: &Chromosome) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<!DOCTYPE Query>\n");
    xml.push_str(
        "<Query virtualSchemaName=\"default\" formatter=\"TSV\" header=\"0\" uniqueRows=\"0\" count=\"\" datasetConfigVersion=\"0.6\">\n",
    );
    xml.push_str(&format!(
        "  <Dataset name=\"{MART_DATASET}\" interface=\"default\">\n"
    ));
    xml.push_str(&format!(
        "    <Filter name=\"chromosome_name\" value=\"{}\"/>\n",
        chromosome.as_str()
    ));
    for attribute in COLUMNS {
        xml.push_str(&format!("    <Attribute name=\"{attribute}\"/>\n"));
    }
    xml.push_str("  </Dataset>\n");
    xml.push_str("</Query>\n");
    xml
}
