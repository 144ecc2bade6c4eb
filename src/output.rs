use std::io::{self, Write};

use serde::Serialize;

use crate::app::RunReport;

pub struct TextOutput;

impl TextOutput {
    pub fn print_report(report: &RunReport) -> io::Result<()> {
        let summary = &report.summary;
        let rule = "=".repeat(60);
        let mut block = String::new();
        block.push_str(&rule);
        block.push('\n');
        block.push_str("Run summary\n");
        block.push_str(&rule);
        block.push('\n');
        block.push_str(&format!("Chromosomes processed: {}\n", summary.processed));
        block.push_str(&format!("Successful: {}\n", summary.successful));
        block.push_str(&format!("Failed: {}\n", summary.failed));
        if let Some(total) = summary.total_records {
            block.push_str(&format!("Total records: {}\n", total));
        }
        if let Some(genes) = summary.distinct_genes {
            block.push_str(&format!("Distinct gene IDs: {}\n", genes));
        }
        if let Some(proteins) = summary.distinct_proteins {
            block.push_str(&format!("Distinct protein IDs: {}\n", proteins));
        }
        if let Some(path) = &report.combined_path {
            block.push_str(&format!("Combined file: {}\n", path));
        }

        let mut stdout = io::stdout();
        stdout.write_all(block.as_bytes())
    }
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_report(report: &RunReport) -> io::Result<()> {
        Self::print_json(report)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
