//! Fetch a constellation from the catalog, convert its coordinates and hand the
//! plottable stars to a renderer

use crate::{
    catalog::{CatalogResponse, CatalogSource, HttpCatalog, TransportError},
    config::ChartConfig,
    render::{RenderError, Renderer},
};
use derive_more::Display;
use skycoords::{parse_coordinate, CoordinateError};
use skytypes::prelude::*;
use tracing::{error, info, warn};

/// Errors that end a run. Per-record conversion failures are not among them.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Error during the request")]
    Transport(#[from] TransportError),

    #[error("HTTP error: status {status}")]
    Status { status: u16, body: String },

    #[error("JSON decoding error, the response is probably not valid JSON")]
    Decode(#[from] serde_json::Error),

    #[error("Rendering failed")]
    Render(#[from] RenderError),
}

impl PipelineError {
    /// Process exit code, one per failure category
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Transport(_) => 3,
            PipelineError::Status { .. } => 4,
            PipelineError::Decode(_) => 5,
            PipelineError::Render(_) => 6,
        }
    }
}

/// A catalog entry whose coordinates could not be converted
#[derive(Clone, Debug, Eq, PartialEq, Display)]
#[display(
    fmt = "Unable to convert coordinates for star: {} (RA: '{}', Dec: '{}')",
    "name",
    "right_ascension",
    "declination"
)]
pub struct RecordFailure {
    pub name: String,
    pub right_ascension: String,
    pub declination: String,
    pub error: CoordinateError,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RunOutcome {
    /// The catalog returned an empty list
    NoStars,
    /// Records were returned but none had usable coordinates
    NothingToPlot,
    /// The renderer was given this many points
    Plotted(usize),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunReport {
    /// Number of records in the catalog response
    pub records: usize,
    pub failures: Vec<RecordFailure>,
    pub outcome: RunOutcome,
}

pub struct Pipeline<C> {
    catalog: C,
    constellation: String,
    main_stars: MainStarSet,
}

impl Pipeline<HttpCatalog> {
    pub fn from_config(cfg: &ChartConfig) -> Result<Self, PipelineError> {
        Ok(Self::new(HttpCatalog::new(cfg)?, cfg))
    }
}

impl<C: CatalogSource> Pipeline<C> {
    pub fn new(catalog: C, cfg: &ChartConfig) -> Self {
        Self {
            catalog,
            constellation: cfg.constellation.clone(),
            main_stars: cfg.main_stars.clone(),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn main_stars(&self) -> &MainStarSet {
        &self.main_stars
    }

    /// Run once: fetch, convert, render.
    ///
    /// Fatal errors are reported on the console before being returned.
    pub fn run<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<RunReport, PipelineError> {
        let records = self.fetch_records().map_err(report_fatal)?;

        if records.is_empty() {
            println!("No stars found for constellation '{}'", self.constellation);
            info!(constellation = self.constellation.as_str(), "No stars found");
            return Ok(RunReport {
                records: 0,
                failures: Vec::new(),
                outcome: RunOutcome::NoStars,
            });
        }

        println!(
            "Found {} stars in constellation '{}'",
            records.len(),
            self.constellation
        );

        let (dataset, failures) = collect_dataset(&records);
        for f in failures.iter() {
            println!("{f}");
        }

        let outcome = if dataset.is_empty() {
            println!("No valid star data to plot");
            RunOutcome::NothingToPlot
        } else {
            info!(
                points = dataset.len(),
                skipped = failures.len(),
                "Rendering chart"
            );
            renderer
                .render(&dataset, &self.main_stars)
                .map_err(|e| report_fatal(e.into()))?;
            RunOutcome::Plotted(dataset.len())
        };

        Ok(RunReport {
            records: records.len(),
            failures,
            outcome,
        })
    }

    /// Query the catalog and decode the record list
    pub fn fetch_records(&self) -> Result<Vec<RawStarRecord>, PipelineError> {
        let response = self.catalog.fetch(&self.constellation)?;
        decode_response(response)
    }
}

/// Check the status and decode the body of a catalog response
pub fn decode_response(response: CatalogResponse) -> Result<Vec<RawStarRecord>, PipelineError> {
    if !response.is_success() {
        return Err(PipelineError::Status {
            status: response.status,
            body: response.body,
        });
    }
    Ok(serde_json::from_str(&response.body)?)
}

/// Convert every record, keeping the ones with valid coordinates in response order
pub fn collect_dataset(records: &[RawStarRecord]) -> (PlotDataset, Vec<RecordFailure>) {
    let mut dataset = PlotDataset::new();
    let mut failures = Vec::new();

    for rec in records {
        let (name, ra, dec) = (rec.name(), rec.right_ascension(), rec.declination());
        match parse_coordinate(ra, dec) {
            Ok(coord) => dataset.push(name, coord),
            Err(error) => {
                warn!(name, ra, dec, %error, "Skipping star");
                failures.push(RecordFailure {
                    name: name.to_owned(),
                    right_ascension: ra.to_owned(),
                    declination: dec.to_owned(),
                    error,
                });
            }
        }
    }

    (dataset, failures)
}

fn report_fatal(e: PipelineError) -> PipelineError {
    match &e {
        PipelineError::Transport(t) => {
            eprintln!("{e}: {t}");
            error!(err = %t, "Catalog request failed");
        }
        PipelineError::Status { status, body } => {
            eprintln!("{e}");
            eprintln!("API response: {body}");
            error!(status, "Catalog returned an error status");
        }
        PipelineError::Decode(d) => {
            eprintln!("{e}");
            error!(err = %d, "Failed to decode catalog response");
        }
        PipelineError::Render(r) => {
            eprintln!("{e}: {r}");
            error!(err = %r, "Failed to render chart");
        }
    }
    e
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_checks_status_first() {
        let err = decode_response(CatalogResponse::new(401, "{\"error\": \"Invalid API Key.\"}"))
            .unwrap_err();
        match err {
            PipelineError::Status { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Invalid API Key"));
            }
            e => panic!("Unexpected error {e:?}"),
        }
    }

    #[test]
    fn decode_rejects_non_json() {
        let err = decode_response(CatalogResponse::new(200, "<html>")).unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
        assert_eq!(err.exit_code(), 5);

        // An object is valid JSON but not a record list
        let err = decode_response(CatalogResponse::new(200, "{}")).unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
    }

    #[test]
    fn collect_keeps_order_and_reports_failures() {
        let records = vec![
            RawStarRecord::new("Rigel", "05h 14m 32.27s", "−08° 12′ 05.9″"),
            RawStarRecord {
                name: Some("NoRa".to_owned()),
                right_ascension: None,
                declination: Some("+07° 24′ 25.4″".to_owned()),
            },
            RawStarRecord::new("Betelgeuse", "05h 55m 10.3053s", "+07° 24′ 25.4″"),
        ];

        let (dataset, failures) = collect_dataset(&records);
        assert_eq!(dataset.names(), &["Rigel", "Betelgeuse"]);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].error, CoordinateError::RightAscension);
        assert_eq!(
            failures[0].to_string(),
            "Unable to convert coordinates for star: NoRa (RA: 'N/A', Dec: '+07° 24′ 25.4″')"
        );
    }
}
