use std::sync::mpsc::{Receiver, TryRecvError};

use crate::data::fetch::{spawn_fetch, AIRPORTS_URL};
use crate::data::filter::{search, validate, SearchField, SearchRequest};
use crate::data::model::AirportDataset;

// ---------------------------------------------------------------------------
// Search form
// ---------------------------------------------------------------------------

/// Raw text of the search form, one string per entry widget. Dropdowns keep
/// their selected label; empty means "not requested".
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    pub airport_name: String,
    pub iata_code: String,
    pub icao_code: String,
    pub city_name: String,
    pub country_name: String,
    pub latitude: String,
    pub longitude: String,
    pub elevation: String,
    pub utc_offset: String,
    pub dst_area: String,
}

impl SearchForm {
    /// Build a request from the non-empty entries.
    pub fn to_request(&self) -> SearchRequest {
        let entries = [
            (SearchField::AirportName, &self.airport_name),
            (SearchField::IataCode, &self.iata_code),
            (SearchField::IcaoCode, &self.icao_code),
            (SearchField::CityName, &self.city_name),
            (SearchField::CountryName, &self.country_name),
            (SearchField::Latitude, &self.latitude),
            (SearchField::Longitude, &self.longitude),
            (SearchField::Elevation, &self.elevation),
            (SearchField::UtcOffset, &self.utc_offset),
            (SearchField::DstArea, &self.dst_area),
        ];

        let mut builder = SearchRequest::builder();
        for (field, value) in entries {
            let value = value.trim();
            if !value.is_empty() {
                builder = builder.with(field, value);
            }
        }
        builder.build()
    }

    pub fn clear(&mut self) {
        *self = SearchForm::default();
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// What to do once a pending fetch delivers its dataset.
#[derive(Debug)]
enum Pending {
    Search(SearchRequest),
    ShowAll,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the first fetch completes).
    pub dataset: Option<AirportDataset>,

    /// The search form's current text.
    pub form: SearchForm,

    /// Rendered lines of the last search / show-all (None = nothing run yet).
    pub results: Option<Vec<String>>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a fetch is in flight.
    pub loading: bool,

    fetch_rx: Option<Receiver<anyhow::Result<AirportDataset>>>,
    pending: Option<Pending>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            form: SearchForm::default(),
            results: None,
            status_message: None,
            loading: false,
            fetch_rx: None,
            pending: None,
        }
    }
}

impl AppState {
    /// Search button: validate the form, then fetch a fresh dataset and run
    /// the search once it arrives. Records are replaced wholesale per fetch.
    pub fn start_search(&mut self) {
        let request = self.form.to_request();
        if let Err(e) = validate(&request) {
            log::warn!("rejected search request: {e}");
            self.status_message = Some(format!("Error: {e}"));
            return;
        }
        self.pending = Some(Pending::Search(request));
        self.begin_fetch();
    }

    /// Show All button: fetch a fresh dataset and list every record.
    pub fn start_show_all(&mut self) {
        self.pending = Some(Pending::ShowAll);
        self.begin_fetch();
    }

    fn begin_fetch(&mut self) {
        self.loading = true;
        self.status_message = None;
        self.fetch_rx = Some(spawn_fetch(AIRPORTS_URL.to_owned()));
    }

    /// Drain the fetch channel; called once per frame.
    pub fn poll_fetch(&mut self) {
        let Some(rx) = &self.fetch_rx else { return };
        match rx.try_recv() {
            Ok(Ok(dataset)) => {
                self.fetch_rx = None;
                self.loading = false;
                self.install_dataset(dataset);
            }
            Ok(Err(e)) => {
                self.fetch_rx = None;
                self.loading = false;
                self.pending = None;
                self.status_message = Some(format!("Error: {e:#}"));
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.fetch_rx = None;
                self.loading = false;
                self.pending = None;
                self.status_message = Some("Error: fetch worker exited unexpectedly".to_owned());
            }
        }
    }

    fn install_dataset(&mut self, dataset: AirportDataset) {
        self.dataset = Some(dataset);
        match self.pending.take() {
            Some(Pending::Search(request)) => self.run_search(&request),
            Some(Pending::ShowAll) | None => self.show_all(),
        }
    }

    fn run_search(&mut self, request: &SearchRequest) {
        let Some(dataset) = &self.dataset else { return };
        match search(&dataset.airports, request) {
            Ok(hits) => {
                log::info!("search matched {} of {} airports", hits.len(), dataset.len());
                self.results = Some(hits.iter().map(ToString::to_string).collect());
            }
            Err(e) => {
                log::error!("search failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    fn show_all(&mut self) {
        if let Some(dataset) = &self.dataset {
            self.results = Some(dataset.airports.iter().map(ToString::to_string).collect());
        }
    }

    /// Clear button: reset the form and any displayed results.
    pub fn clear(&mut self) {
        self.form.clear();
        self.results = None;
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_skips_blank_entries() {
        let mut form = SearchForm::default();
        form.airport_name = "  lond  ".to_owned();
        form.iata_code = String::new();
        form.dst_area = "European".to_owned();

        let request = form.to_request();
        assert_eq!(request.len(), 2);
        assert_eq!(request.get(SearchField::AirportName), Some("lond"));
        assert_eq!(request.get(SearchField::DstArea), Some("European"));
    }

    #[test]
    fn blank_form_builds_an_empty_request() {
        assert!(SearchForm::default().to_request().is_empty());
    }

    #[test]
    fn invalid_form_surfaces_a_message_without_fetching() {
        let mut state = AppState::default();
        state.form.iata_code = "toolong".to_owned();
        state.start_search();
        assert!(state.status_message.is_some());
        assert!(!state.loading);
    }
}
