use thiserror::Error;

// ---------------------------------------------------------------------------
// Line parsing – one raw dataset line → ordered string tokens
// ---------------------------------------------------------------------------

/// Why a raw line could not be turned into tokens.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("quoted field is not closed before end of line")]
    UnterminatedQuote,
    #[error("line yields no fields")]
    NoFields,
    #[error("expected 11 fields, found {0}")]
    FieldCount(usize),
    #[error("tokenization failed: {0}")]
    Tokenize(#[from] csv::Error),
}

/// Parse one raw dataset line into its comma-separated fields.
///
/// Double-quoted spans are literal: a comma inside quotes does not split the
/// field. The parser handles exactly one line per call; a quote left open at
/// end of line is an error, never a truncated token list. Tokens come back as
/// raw strings – numeric and sentinel interpretation happens later, at
/// [`AirportRecord`](super::model::AirportRecord) construction and match time.
pub fn parse_line(raw: &[u8]) -> Result<Vec<String>, ParseError> {
    let line = std::str::from_utf8(raw)?;

    // Escaped quotes ("") come in pairs, so an odd count means an open span.
    if line.bytes().filter(|&b| b == b'"').count() % 2 != 0 {
        return Err(ParseError::UnterminatedQuote);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(line.as_bytes());

    let mut record = csv::StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Err(ParseError::NoFields);
    }

    Ok(record.iter().map(str::to_owned).collect())
}
