use assert_matches::assert_matches;

use biomart_harvester::domain::{COLUMNS, Chromosome, GeneRecord, GeneTable};
use biomart_harvester::error::HarvestError;

#[test]
fn parse_autosome_valid() {
    let chromosome: Chromosome = "21".parse().unwrap();
    assert_eq!(chromosome.as_str(), "21");
}

#[test]
fn parse_allosome_normalizes_case() {
    let x: Chromosome = "x".parse().unwrap();
    assert_eq!(x.as_str(), "X");
    let y: Chromosome = " y ".parse().unwrap();
    assert_eq!(y.as_str(), "Y");
}

#[test]
fn parse_chromosome_invalid() {
    for token in ["0", "23", "07", "MT", "", "chr1", "1.5"] {
        let err = token.parse::<Chromosome>().unwrap_err();
        assert_matches!(err, HarvestError::InvalidChromosome(_));
    }
}

#[test]
fn canonical_list_is_autosomes_then_allosomes() {
    let list = Chromosome::human_autosomes_and_allosomes();
    assert_eq!(list.len(), 24);
    assert_eq!(list[0].as_str(), "1");
    assert_eq!(list[21].as_str(), "22");
    assert_eq!(list[22].as_str(), "X");
    assert_eq!(list[23].as_str(), "Y");
}

#[test]
fn table_renders_header_and_absent_fields() {
    let table = GeneTable::from_records(vec![
        GeneRecord {
            gene_id: Some("ENSG01".to_string()),
            gene_name: None,
            protein_id: Some("ENSP01".to_string()),
            swissprot_id: None,
            chromosome: Some("21".to_string()),
            band: Some("q21.1".to_string()),
        },
        GeneRecord {
            gene_id: Some("ENSG02".to_string()),
            gene_name: Some("a,b".to_string()),
            protein_id: None,
            swissprot_id: None,
            chromosome: Some("21".to_string()),
            band: None,
        },
    ]);

    let csv = table.to_csv();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], COLUMNS.join(","));
    assert_eq!(lines[1], "ENSG01,,ENSP01,,21,q21.1");
    assert_eq!(lines[2], "ENSG02,\"a,b\",,,21,");
}

#[test]
fn append_preserves_table_order() {
    let mut combined = GeneTable::new();
    let first = GeneTable::from_records(vec![GeneRecord {
        gene_id: Some("ENSG01".to_string()),
        gene_name: None,
        protein_id: None,
        swissprot_id: None,
        chromosome: Some("1".to_string()),
        band: None,
    }]);
    let second = GeneTable::from_records(vec![GeneRecord {
        gene_id: Some("ENSG02".to_string()),
        gene_name: None,
        protein_id: None,
        swissprot_id: None,
        chromosome: Some("2".to_string()),
        band: None,
    }]);

    combined.append(&first);
    combined.append(&second);

    assert_eq!(combined.len(), 2);
    assert_eq!(combined.records()[0].chromosome.as_deref(), Some("1"));
    assert_eq!(combined.records()[1].chromosome.as_deref(), Some("2"));
}
