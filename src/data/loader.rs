use anyhow::{Context, Result};

use super::model::{AirportDataset, AirportRecord};
use super::parser::parse_line;

/// Turn the raw bytes of a downloaded dataset into an [`AirportDataset`].
///
/// One record per line. The first malformed line aborts the whole load with
/// its 1-based line number attached; a bad line is never silently skipped or
/// padded with defaults. Blank lines (trailing newline) are not records.
pub fn load_dataset(raw: &[u8]) -> Result<AirportDataset> {
    let mut airports = Vec::new();

    for (idx, line) in raw.split(|&b| b == b'\n').enumerate() {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() {
            continue;
        }
        let record = parse_line(line)
            .and_then(AirportRecord::from_tokens)
            .with_context(|| format!("line {}", idx + 1))?;
        airports.push(record);
    }

    log::info!("loaded {} airport records", airports.len());
    Ok(AirportDataset::from_records(airports))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_AIRPORTS: &[u8] = b"507,\"London Heathrow\",\"London\",\"United Kingdom\",\"LHR\",\"EGLL\",51.4706,-0.461941,83,0,\"E\"\n\
        4296,\"Eros\",\"Windhoek\",\"Namibia\",\"ERS\",\"FYWE\",-22.6122,17.0804,5575,1,\"S\"\n";

    #[test]
    fn loads_well_formed_lines() {
        let dataset = load_dataset(TWO_AIRPORTS).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.airports[0].iata_code, "LHR");
        assert_eq!(dataset.airports[1].city, "Windhoek");
    }

    #[test]
    fn handles_crlf_line_endings() {
        let crlf = TWO_AIRPORTS.split(|&b| b == b'\n').collect::<Vec<_>>();
        let joined = crlf.join(&b"\r\n"[..]);
        assert_eq!(load_dataset(&joined).unwrap().len(), 2);
    }

    #[test]
    fn wrong_field_count_aborts_with_line_number() {
        let mut data = TWO_AIRPORTS.to_vec();
        data.extend_from_slice(b"99,too,short\n");
        let err = load_dataset(&data).unwrap_err();
        assert!(format!("{err:#}").contains("line 3"));
    }

    #[test]
    fn undecodable_line_aborts() {
        assert!(load_dataset(b"1,\xff\xfe,x\n").is_err());
    }

    #[test]
    fn empty_input_yields_empty_dataset() {
        assert!(load_dataset(b"").unwrap().is_empty());
    }
}
