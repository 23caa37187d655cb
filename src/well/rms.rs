//! RMS ASCII well reader
//!
//! ```text
//! 1.0                              <- format version
//! Unknown                          <- well type
//! OP_1 461809.6 5932990.4          <- name, head x, head y [, rkb]
//! 2                                <- number of logs
//! Zonelog DISC 1 Valysar 2 Therys  <- log name, type, code/name pairs
//! Poro UNK lin
//! 461809.6 5932990.4 1620.0 1 0.25 <- x y tvd log1 log2 ...
//! ```
//!
//! Log values equal to the undefined marker become `None`.

use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::WellError;
use crate::types::{LogKind, WellLog, WellRecord, WellTrajectory};

/// Undefined log value marker used by RMS well files.
pub const RMS_UNDEFINED: f64 = -999.0;

/// Read and parse an RMS ASCII well file.
pub fn read_rms_well(path: &Path) -> Result<WellTrajectory, WellError> {
    let text = std::fs::read_to_string(path).map_err(|source| WellError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let well = parse_rms_well(&text)?;
    debug!(
        path = %path.display(),
        well = %well.name,
        records = well.records.len(),
        logs = well.logs.len(),
        "Read RMS well"
    );
    Ok(well)
}

fn parse_err(line: usize, message: impl Into<String>) -> WellError {
    WellError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_f64(token: &str, line: usize) -> Result<f64, WellError> {
    token
        .parse::<f64>()
        .map_err(|e| parse_err(line, format!("'{token}': {e}")))
}

/// Parse a log definition line: `NAME TYPE [code name ...]`.
fn parse_log_header(text: &str, line: usize) -> Result<(String, LogKind), WellError> {
    let mut tokens = text.split_whitespace();
    let name = tokens
        .next()
        .ok_or_else(|| parse_err(line, "empty log definition"))?
        .to_string();
    let kind = match tokens.next() {
        Some(t) if t.eq_ignore_ascii_case("DISC") => {
            let rest: Vec<&str> = tokens.collect();
            let mut codes = BTreeMap::new();
            for pair in rest.chunks(2) {
                if let [code, label] = pair {
                    let code = code
                        .parse::<i32>()
                        .map_err(|e| parse_err(line, format!("zone code '{code}': {e}")))?;
                    codes.insert(code, (*label).to_string());
                }
            }
            LogKind::Discrete { codes }
        }
        Some(_) => LogKind::Continuous,
        None => return Err(parse_err(line, format!("log {name} has no type"))),
    };
    Ok((name, kind))
}

/// Parse the text of an RMS ASCII well file.
pub fn parse_rms_well(text: &str) -> Result<WellTrajectory, WellError> {
    // (1-based line number, content) for non-blank lines
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let mut next_line = |what: &str| {
        lines
            .next()
            .ok_or_else(|| parse_err(0, format!("file ends before {what}")))
    };

    let _version = next_line("version")?;
    let _well_type = next_line("well type")?;

    let (head_no, head) = next_line("well header")?;
    let name = head
        .split_whitespace()
        .next()
        .ok_or_else(|| parse_err(head_no, "missing well name"))?
        .to_string();

    let (count_no, count) = next_line("log count")?;
    let nlogs = count
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .parse::<usize>()
        .map_err(|e| parse_err(count_no, format!("log count: {e}")))?;

    // Grows with the definitions actually present, not the declared count
    let mut headers = Vec::new();
    for _ in 0..nlogs {
        let (no, l) = next_line("log definitions")?;
        headers.push(parse_log_header(l, no)?);
    }

    let mut raw: Vec<(f64, f64, f64)> = Vec::new();
    let nlogs = headers.len();
    let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); nlogs];
    for (no, l) in lines {
        let values = l
            .split_whitespace()
            .map(|t| parse_f64(t, no))
            .collect::<Result<Vec<_>, _>>()?;
        if values.len() != 3 + nlogs {
            return Err(parse_err(
                no,
                format!("expected {} columns, found {}", 3 + nlogs, values.len()),
            ));
        }
        raw.push((values[0], values[1], values[2]));
        for (column, v) in columns.iter_mut().zip(&values[3..]) {
            let undefined = (*v - RMS_UNDEFINED).abs() < f64::EPSILON || !v.is_finite();
            column.push((!undefined).then_some(*v));
        }
    }

    if raw.is_empty() {
        return Err(WellError::Empty(name));
    }

    let records = derive_records(&raw);
    let logs = headers
        .into_iter()
        .zip(columns)
        .map(|((name, kind), values)| WellLog { name, kind, values })
        .collect();

    Ok(WellTrajectory {
        name,
        records,
        logs,
    })
}

/// Accumulate along-hole depth and relative horizontal length from raw (x, y, tvd).
fn derive_records(raw: &[(f64, f64, f64)]) -> Vec<WellRecord> {
    let mut records = Vec::with_capacity(raw.len());
    let mut md = 0.0;
    let mut hlen = 0.0;
    let mut prev: Option<(f64, f64, f64)> = None;

    for &(x, y, z) in raw {
        if let Some((px, py, pz)) = prev {
            let horizontal = (x - px).hypot(y - py);
            hlen += horizontal;
            md += horizontal.hypot(z - pz);
        }
        records.push(WellRecord {
            x,
            y,
            md,
            tvd: z,
            hlen,
        });
        prev = Some((x, y, z));
    }
    records
}
