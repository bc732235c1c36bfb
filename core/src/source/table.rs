use crate::telemetry::log::LogManager;

/// Text standing in for a missing numeric field in instrument exports.
pub const MISSING_SENTINEL: &str = "n.a.";

const FIELD_COUNT: usize = 3;

/// One `time / step / value` sample of the chromatogram table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalRow {
    pub time: f64,
    pub step: f64,
    pub value: f64,
}

/// Rows accepted from a table body plus how many were dropped.
#[derive(Debug, Clone, Default)]
pub struct ParsedTable {
    pub rows: Vec<SignalRow>,
    pub skipped: usize,
}

/// Parse a tab-delimited `time / step / value` table.
///
/// The first non-blank line is the column header and is skipped. Blank
/// lines are ignored; rows with the wrong field count or a non-numeric
/// field are logged and dropped.
pub fn parse_table(body: &str) -> ParsedTable {
    let logger = LogManager::new("chromacore::source");
    let mut table = ParsedTable::default();

    let lines = body
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
        .skip(1);

    for (line_no, line) in lines {
        match parse_row(line) {
            Ok(row) => table.rows.push(row),
            Err(reason) => {
                table.skipped += 1;
                logger.warn(&format!(
                    "skipping table line {}: {} ({:?})",
                    line_no, reason, line
                ));
            }
        }
    }

    table
}

fn parse_row(line: &str) -> Result<SignalRow, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FIELD_COUNT {
        return Err(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            fields.len()
        ));
    }

    Ok(SignalRow {
        time: parse_field(fields[0])?,
        step: parse_field(fields[1])?,
        value: parse_field(fields[2])?,
    })
}

fn parse_field(field: &str) -> Result<f64, String> {
    let field = field.trim();
    if field.is_empty() || field == MISSING_SENTINEL {
        return Ok(0.0);
    }
    field
        .parse::<f64>()
        .map_err(|_| format!("{:?} is not a number", field))
}
