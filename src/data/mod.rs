/// Data layer: core types, parsing, filtering, fetch, and export.
///
/// Architecture:
/// ```text
///  airports.dat (OpenFlights, over HTTP)
///        │
///        ▼
///   ┌──────────┐
///   │  fetch    │  worker thread → raw bytes → result over a channel
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse lines → AirportDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ AirportDataset │  Vec<AirportRecord>, country index
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  validate request, match every field → hits
///   └──────────┘
/// ```

pub mod export;
pub mod fetch;
pub mod filter;
pub mod loader;
pub mod model;
pub mod parser;
