use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use super::model::AirportRecord;

// ---------------------------------------------------------------------------
// Search fields and errors
// ---------------------------------------------------------------------------

/// The fixed set of searchable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SearchField {
    AirportName,
    IataCode,
    IcaoCode,
    CityName,
    CountryName,
    Latitude,
    Longitude,
    Elevation,
    UtcOffset,
    DstArea,
}

impl SearchField {
    pub fn key(self) -> &'static str {
        match self {
            SearchField::AirportName => "airport_name",
            SearchField::IataCode => "iata_code",
            SearchField::IcaoCode => "icao_code",
            SearchField::CityName => "city_name",
            SearchField::CountryName => "country_name",
            SearchField::Latitude => "latitude",
            SearchField::Longitude => "longitude",
            SearchField::Elevation => "elevation",
            SearchField::UtcOffset => "utc_offset",
            SearchField::DstArea => "dst_area",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Why a search could not be run (or had to be aborted).
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("at least one search field is required")]
    EmptyRequest,
    #[error("invalid value for {field}: {value:?}")]
    Invalid { field: SearchField, value: String },
    #[error("latitude and longitude must be given together, or not at all")]
    UnpairedCoordinate,
    #[error("corrupt record: {field} holds non-numeric value {value:?}")]
    CorruptRecord { field: SearchField, value: String },
}

// ---------------------------------------------------------------------------
// SearchRequest – one user-supplied set of filter criteria
// ---------------------------------------------------------------------------

/// An immutable field → value mapping, built fresh per search and discarded
/// after use. At most one value per field.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    params: BTreeMap<SearchField, String>,
}

impl SearchRequest {
    pub fn builder() -> SearchRequestBuilder {
        SearchRequestBuilder::default()
    }

    pub fn get(&self, field: SearchField) -> Option<&str> {
        self.params.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }
}

#[derive(Debug, Default)]
pub struct SearchRequestBuilder {
    params: BTreeMap<SearchField, String>,
}

impl SearchRequestBuilder {
    pub fn with(mut self, field: SearchField, value: impl Into<String>) -> Self {
        self.params.insert(field, value.into());
        self
    }

    pub fn build(self) -> SearchRequest {
        SearchRequest {
            params: self.params,
        }
    }
}

// ---------------------------------------------------------------------------
// Request validation
// ---------------------------------------------------------------------------

/// Check every requested value against its field's format rule. Runs before
/// any matching, so format problems never surface from deep inside a match.
pub fn validate(request: &SearchRequest) -> Result<(), SearchError> {
    if request.is_empty() {
        return Err(SearchError::EmptyRequest);
    }
    if let Some(code) = request.get(SearchField::IataCode) {
        if code.chars().count() != 3 || !code.chars().all(char::is_alphabetic) {
            return Err(invalid(SearchField::IataCode, code));
        }
    }
    if let Some(code) = request.get(SearchField::IcaoCode) {
        if code.chars().count() != 4 || !code.chars().all(char::is_alphabetic) {
            return Err(invalid(SearchField::IcaoCode, code));
        }
    }
    let lat = request.get(SearchField::Latitude);
    let lon = request.get(SearchField::Longitude);
    if lat.is_some() != lon.is_some() {
        return Err(SearchError::UnpairedCoordinate);
    }
    for (field, value) in [(SearchField::Latitude, lat), (SearchField::Longitude, lon)] {
        if let Some(value) = value {
            if value.trim().parse::<f64>().is_err() {
                return Err(invalid(field, value));
            }
        }
    }
    if let Some(value) = request.get(SearchField::Elevation) {
        match value.trim().parse::<i64>() {
            Ok(feet) if feet >= 0 => {}
            _ => return Err(invalid(SearchField::Elevation, value)),
        }
    }
    if let Some(value) = request.get(SearchField::UtcOffset) {
        match value.trim().parse::<f64>() {
            Ok(hours) if (-12.0..=14.0).contains(&hours) => {}
            _ => return Err(invalid(SearchField::UtcOffset, value)),
        }
    }
    Ok(())
}

fn invalid(field: SearchField, value: &str) -> SearchError {
    SearchError::Invalid {
        field,
        value: value.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return the records matching every requested field, preserving their
/// relative order. Pure and stateless; validates the request first.
pub fn search<'a>(
    records: &'a [AirportRecord],
    request: &SearchRequest,
) -> Result<Vec<&'a AirportRecord>, SearchError> {
    validate(request)?;

    let mut hits = Vec::new();
    for record in records {
        if record.matches(request)? {
            hits.push(record);
        }
    }
    Ok(hits)
}
