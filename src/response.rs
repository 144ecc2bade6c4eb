use crate::domain::{COLUMNS, GeneRecord, GeneTable};

/// Shape of a mart response body, decided before any row parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Empty or whitespace-only: a valid "no genes" answer.
    Empty,
    /// The service answered with an XML document or an inline error marker
    /// instead of data rows.
    ServiceError,
    /// Tab-separated data rows.
    Data,
}

pub fn classify_body(body: &str) -> BodyKind {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return BodyKind::Empty;
    }
    if trimmed.starts_with("<?xml") || body.contains("[ERROR]") {
        return BodyKind::ServiceError;
    }
    BodyKind::Data
}

/// A row carrying more fields than the requested attributes. One such row
/// fails the whole parse, the way a strict columnar reader rejects the
/// entire input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRow {
    pub line_number: usize,
    pub field_count: usize,
}

/// Parse a data-shaped body into records. Blank lines are skipped, `\r\n`
/// endings are tolerated, empty fields become absent values, and rows with
/// fewer than six fields are padded with absent trailing columns.
pub fn parse_table(body: &str) -> Result<GeneTable, MalformedRow> {
    let mut table = GeneTable::new();
    for (index, raw_line) in body.lines().enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() > COLUMNS.len() {
            return Err(MalformedRow {
                line_number: index + 1,
                field_count: fields.len(),
            });
        }
        let mut columns = fields.into_iter().map(optional_field);
        table.push(GeneRecord {
            gene_id: columns.next().flatten(),
            gene_name: columns.next().flatten(),
            protein_id: columns.next().flatten(),
            swissprot_id: columns.next().flatten(),
            chromosome: columns.next().flatten(),
            band: columns.next().flatten(),
        });
    }
    Ok(table)
}

fn optional_field(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// First hundred characters of a body, for diagnostics.
pub fn preview(body: &str) -> &str {
    const PREVIEW_CHARS: usize = 100;
    match body.char_indices().nth(PREVIEW_CHARS) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}
