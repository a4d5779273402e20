use std::fmt;

use super::filter::{SearchError, SearchField, SearchRequest};
use super::parser::ParseError;

/// Marker used by the source dataset for a missing IATA/ICAO/UTC value.
pub const UNKNOWN_SENTINEL: &str = "\\N";

// ---------------------------------------------------------------------------
// DstArea – daylight-saving-time rule region
// ---------------------------------------------------------------------------

/// Single-letter DST classification used by the dataset, addressed in the UI
/// by a human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DstArea {
    European,
    UsCanada,
    SouthAmerica,
    Australia,
    NewZealand,
    None,
    Unknown,
}

impl DstArea {
    /// Dropdown labels, in the order the form presents them.
    pub const LABELS: [&'static str; 7] = [
        "Unknown",
        "European",
        "US/Canada",
        "S. America",
        "Australia",
        "New Zealand",
        "None",
    ];

    /// Translate a form label to its area. Unrecognized labels yield `None`
    /// and therefore never match any record.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "European" => Some(DstArea::European),
            "US/Canada" => Some(DstArea::UsCanada),
            "S. America" => Some(DstArea::SouthAmerica),
            "Australia" => Some(DstArea::Australia),
            "New Zealand" => Some(DstArea::NewZealand),
            "None" => Some(DstArea::None),
            "Unknown" => Some(DstArea::Unknown),
            _ => Option::None,
        }
    }

    /// The single-letter code stored in the dataset.
    pub fn code(self) -> &'static str {
        match self {
            DstArea::European => "E",
            DstArea::UsCanada => "A",
            DstArea::SouthAmerica => "S",
            DstArea::Australia => "O",
            DstArea::NewZealand => "Z",
            DstArea::None => "N",
            DstArea::Unknown => "U",
        }
    }
}

// ---------------------------------------------------------------------------
// AirportRecord – one row of the source dataset
// ---------------------------------------------------------------------------

/// One airport, built from the 11 fields of a dataset line.
///
/// All fields stay as raw strings; latitude/longitude/elevation/UTC are only
/// converted to numbers when a search asks for them, and a conversion failure
/// there is reported, not treated as a mismatch.
#[derive(Debug, Clone)]
pub struct AirportRecord {
    pub id: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub iata_code: String,
    pub icao_code: String,
    pub latitude: String,
    pub longitude: String,
    pub elevation: String,
    pub utc_offset: String,
    pub dst_area: String,
}

impl AirportRecord {
    /// Build a record from the tokens of one parsed line. Exactly 11 fields
    /// are required; numeric convertibility is not checked here.
    pub fn from_tokens(tokens: Vec<String>) -> Result<Self, ParseError> {
        let fields: [String; 11] = tokens
            .try_into()
            .map_err(|t: Vec<String>| ParseError::FieldCount(t.len()))?;
        let [id, name, city, country, iata_code, icao_code, latitude, longitude, elevation, utc_offset, dst_area] =
            fields;
        Ok(AirportRecord {
            id,
            name,
            city,
            country,
            iata_code,
            icao_code,
            latitude,
            longitude,
            elevation,
            utc_offset,
            dst_area,
        })
    }

    /// True iff every field present in `request` satisfies its rule.
    /// Trivially true for an empty request – the public search entry point
    /// rejects those before getting here.
    pub fn matches(&self, request: &SearchRequest) -> Result<bool, SearchError> {
        if let Some(wanted) = request.get(SearchField::AirportName) {
            if !contains_ci(&self.name, wanted) {
                return Ok(false);
            }
        }
        if let Some(wanted) = request.get(SearchField::CityName) {
            if !contains_ci(&self.city, wanted) {
                return Ok(false);
            }
        }
        if let Some(wanted) = request.get(SearchField::IataCode) {
            if !eq_ci(&self.iata_code, wanted) {
                return Ok(false);
            }
        }
        if let Some(wanted) = request.get(SearchField::IcaoCode) {
            if !eq_ci(&self.icao_code, wanted) {
                return Ok(false);
            }
        }
        if let Some(wanted) = request.get(SearchField::CountryName) {
            // Some dataset rows keep their quoting artifacts around the
            // country name; strip them before comparing. "ALL" is a wildcard.
            let stored = self.country.trim_matches('"');
            if !eq_ci(wanted, "ALL") && !eq_ci(stored, wanted) {
                return Ok(false);
            }
        }
        if let Some(wanted) = request.get(SearchField::UtcOffset) {
            // Records with an unknown UTC offset never match, but never error.
            if self.utc_offset == UNKNOWN_SENTINEL {
                return Ok(false);
            }
            let stored = record_float(SearchField::UtcOffset, &self.utc_offset)?;
            if stored != requested_float(SearchField::UtcOffset, wanted)? {
                return Ok(false);
            }
        }
        if let (Some(lat), Some(lon)) = (
            request.get(SearchField::Latitude),
            request.get(SearchField::Longitude),
        ) {
            // Coordinates are compared as a pair, at 2-decimal precision.
            let stored_lat = round2(record_float(SearchField::Latitude, &self.latitude)?);
            let stored_lon = round2(record_float(SearchField::Longitude, &self.longitude)?);
            let wanted_lat = round2(requested_float(SearchField::Latitude, lat)?);
            let wanted_lon = round2(requested_float(SearchField::Longitude, lon)?);
            if stored_lat != wanted_lat || stored_lon != wanted_lon {
                return Ok(false);
            }
        }
        if let Some(wanted) = request.get(SearchField::Elevation) {
            // The record's elevation is a floor the requested value must not
            // exceed.
            let stored: i64 = self
                .elevation
                .trim()
                .parse()
                .map_err(|_| SearchError::CorruptRecord {
                    field: SearchField::Elevation,
                    value: self.elevation.clone(),
                })?;
            let wanted: i64 = wanted.trim().parse().map_err(|_| SearchError::Invalid {
                field: SearchField::Elevation,
                value: wanted.to_owned(),
            })?;
            if stored < wanted {
                return Ok(false);
            }
        }
        if let Some(label) = request.get(SearchField::DstArea) {
            match DstArea::from_label(label) {
                Some(area) if area.code() == self.dst_area => {}
                _ => return Ok(false),
            }
        }
        Ok(true)
    }
}

/// Display form: `"{name} ({iata}), {country}"`, falling back to the ICAO
/// code when the IATA code is unknown. Also the canonical export format.
impl fmt::Display for AirportRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = if self.iata_code == UNKNOWN_SENTINEL {
            &self.icao_code
        } else {
            &self.iata_code
        };
        write!(f, "{} ({}), {}", self.name, code, self.country)
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_uppercase().contains(&needle.to_uppercase())
}

fn eq_ci(a: &str, b: &str) -> bool {
    a.to_uppercase() == b.to_uppercase()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Record-side float conversion; failure means the record is corrupt.
fn record_float(field: SearchField, raw: &str) -> Result<f64, SearchError> {
    raw.trim().parse().map_err(|_| SearchError::CorruptRecord {
        field,
        value: raw.to_owned(),
    })
}

/// Request-side float conversion; failure is a validation problem.
fn requested_float(field: SearchField, raw: &str) -> Result<f64, SearchError> {
    raw.trim().parse().map_err(|_| SearchError::Invalid {
        field,
        value: raw.to_owned(),
    })
}

// ---------------------------------------------------------------------------
// AirportDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Replaced wholesale on each fetch; individual
/// records are never mutated, so shared reads are safe.
#[derive(Debug, Clone, Default)]
pub struct AirportDataset {
    /// All airports, in dataset order.
    pub airports: Vec<AirportRecord>,
    /// Sorted unique country names (quoting artifacts stripped), for the
    /// country dropdown.
    pub countries: Vec<String>,
}

impl AirportDataset {
    pub fn from_records(airports: Vec<AirportRecord>) -> Self {
        let mut countries: Vec<String> = airports
            .iter()
            .map(|a| a.country.trim_matches('"').to_owned())
            .collect();
        countries.sort();
        countries.dedup();
        AirportDataset { airports, countries }
    }

    /// Number of airports.
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: [&str; 11]) -> AirportRecord {
        AirportRecord::from_tokens(fields.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn heathrow() -> AirportRecord {
        record([
            "507",
            "London Heathrow",
            "London",
            "United Kingdom",
            "LHR",
            "EGLL",
            "51.4706",
            "-0.461941",
            "83",
            "0",
            "E",
        ])
    }

    fn request(pairs: &[(SearchField, &str)]) -> SearchRequest {
        let mut builder = SearchRequest::builder();
        for (field, value) in pairs {
            builder = builder.with(*field, *value);
        }
        builder.build()
    }

    #[test]
    fn requires_exactly_eleven_fields() {
        let err = AirportRecord::from_tokens(vec!["1".into(), "x".into()]).unwrap_err();
        assert!(matches!(err, ParseError::FieldCount(2)));
    }

    #[test]
    fn renders_name_code_country() {
        assert_eq!(
            heathrow().to_string(),
            "London Heathrow (LHR), United Kingdom"
        );
    }

    #[test]
    fn render_falls_back_to_icao_when_iata_unknown() {
        let mut airport = heathrow();
        airport.iata_code = UNKNOWN_SENTINEL.to_owned();
        assert_eq!(
            airport.to_string(),
            "London Heathrow (EGLL), United Kingdom"
        );
    }

    #[test]
    fn dst_label_translation() {
        assert_eq!(DstArea::from_label("European"), Some(DstArea::European));
        assert_eq!(
            DstArea::from_label("US/Canada").map(DstArea::code),
            Some("A")
        );
        assert_eq!(DstArea::from_label("Bogus"), None);
    }

    #[test]
    fn name_match_is_case_insensitive_substring() {
        let airport = heathrow();
        assert!(airport
            .matches(&request(&[(SearchField::AirportName, "lond")]))
            .unwrap());
        assert!(!airport
            .matches(&request(&[(SearchField::AirportName, "gatwick")]))
            .unwrap());
    }

    #[test]
    fn iata_match_is_exact() {
        let airport = heathrow();
        assert!(airport
            .matches(&request(&[(SearchField::IataCode, "lhr")]))
            .unwrap());
        assert!(!airport
            .matches(&request(&[(SearchField::IataCode, "lh")]))
            .unwrap());
    }

    #[test]
    fn country_all_is_a_wildcard() {
        let airport = heathrow();
        assert!(airport
            .matches(&request(&[(SearchField::CountryName, "ALL")]))
            .unwrap());
        assert!(airport
            .matches(&request(&[(SearchField::CountryName, "united kingdom")]))
            .unwrap());
        assert!(!airport
            .matches(&request(&[(SearchField::CountryName, "France")]))
            .unwrap());
    }

    #[test]
    fn country_match_strips_quoting_artifacts() {
        let mut airport = heathrow();
        airport.country = "\"United Kingdom\"".to_owned();
        assert!(airport
            .matches(&request(&[(SearchField::CountryName, "United Kingdom")]))
            .unwrap());
    }

    #[test]
    fn coordinates_compare_as_a_rounded_pair() {
        let airport = heathrow();
        let hit = request(&[
            (SearchField::Latitude, "51.47"),
            (SearchField::Longitude, "-0.46"),
        ]);
        assert!(airport.matches(&hit).unwrap());

        let miss = request(&[
            (SearchField::Latitude, "51.47"),
            (SearchField::Longitude, "-0.45"),
        ]);
        assert!(!airport.matches(&miss).unwrap());
    }

    #[test]
    fn elevation_is_a_floor() {
        let mut airport = heathrow();
        airport.elevation = "25".to_owned();
        assert!(airport
            .matches(&request(&[(SearchField::Elevation, "10")]))
            .unwrap());
        assert!(!airport
            .matches(&request(&[(SearchField::Elevation, "30")]))
            .unwrap());
    }

    #[test]
    fn corrupt_elevation_is_an_error_not_a_mismatch() {
        let mut airport = heathrow();
        airport.elevation = "high".to_owned();
        let err = airport
            .matches(&request(&[(SearchField::Elevation, "10")]))
            .unwrap_err();
        assert!(matches!(
            err,
            SearchError::CorruptRecord {
                field: SearchField::Elevation,
                ..
            }
        ));
    }

    #[test]
    fn utc_match_compares_floats() {
        let mut airport = heathrow();
        airport.utc_offset = "5.5".to_owned();
        assert!(airport
            .matches(&request(&[(SearchField::UtcOffset, "5.50")]))
            .unwrap());
        assert!(!airport
            .matches(&request(&[(SearchField::UtcOffset, "5")]))
            .unwrap());
    }

    #[test]
    fn unknown_utc_never_matches_and_never_errors() {
        let mut airport = heathrow();
        airport.utc_offset = UNKNOWN_SENTINEL.to_owned();
        assert!(!airport
            .matches(&request(&[(SearchField::UtcOffset, "0")]))
            .unwrap());
    }

    #[test]
    fn dst_request_translates_before_comparing() {
        let airport = heathrow();
        assert!(airport
            .matches(&request(&[(SearchField::DstArea, "European")]))
            .unwrap());
        assert!(!airport
            .matches(&request(&[(SearchField::DstArea, "Australia")]))
            .unwrap());
        assert!(!airport
            .matches(&request(&[(SearchField::DstArea, "Bogus")]))
            .unwrap());
    }

    #[test]
    fn empty_request_matches_trivially() {
        assert!(heathrow().matches(&SearchRequest::default()).unwrap());
    }

    #[test]
    fn dataset_collects_unique_countries() {
        let dataset = AirportDataset::from_records(vec![
            heathrow(),
            record([
                "1",
                "Gatwick",
                "London",
                "United Kingdom",
                "LGW",
                "EGKK",
                "51.1481",
                "-0.190278",
                "202",
                "0",
                "E",
            ]),
            record([
                "2",
                "Orly",
                "Paris",
                "\"France\"",
                "ORY",
                "LFPO",
                "48.7233",
                "2.37944",
                "291",
                "1",
                "E",
            ]),
        ]);
        assert_eq!(dataset.len(), 3);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.countries, vec!["France", "United Kingdom"]);
    }
}
