use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};

use super::loader::load_dataset;
use super::model::AirportDataset;

/// Public OpenFlights airport dataset.
pub const AIRPORTS_URL: &str =
    "https://raw.githubusercontent.com/jpatokal/openflights/master/data/airports.dat";

/// Download and parse the dataset on a worker thread.
///
/// The outcome – parsed dataset or failure – arrives as a single message on
/// the returned channel, which the UI polls once per frame. No retries;
/// failures are reported upward as-is.
pub fn spawn_fetch(url: String) -> mpsc::Receiver<Result<AirportDataset>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = fetch_dataset(&url);
        match &result {
            Ok(dataset) => log::info!("fetched {} airports from {url}", dataset.len()),
            Err(e) => log::error!("fetch failed: {e:#}"),
        }
        // The receiver is gone if the app closed mid-fetch; nothing to do.
        let _ = tx.send(result);
    });
    rx
}

fn fetch_dataset(url: &str) -> Result<AirportDataset> {
    log::info!("downloading airport data from {url}");
    let response = reqwest::blocking::get(url)
        .context("requesting airport data")?
        .error_for_status()
        .context("airport data request was refused")?;
    let body = response.bytes().context("reading airport data body")?;
    load_dataset(&body).context("parsing airport data")
}
