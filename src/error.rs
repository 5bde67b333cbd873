use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

/// Every way a harvesting run can fail. Each one aborts the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Can't read data from file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: ReadFailure,
    },

    #[error("Invalid coordinates {coordinates:?} in data row {row}")]
    Format {
        row: usize,
        coordinates: String,
        #[source]
        source: CoordinatesError,
    },

    #[error("Can't get data about restaurant: {query}")]
    Fetch {
        query: String,
        #[source]
        source: PlacesApiError,
    },

    #[error("Can't write reviews about {place} to file")]
    Write {
        place: String,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum ReadFailure {
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("data row {row} has no `{column}` cell")]
    MissingCell { row: usize, column: &'static str },
}

#[derive(Debug, Error, PartialEq)]
pub enum CoordinatesError {
    #[error("Coordinates string must contain exactly one comma separating latitude and longitude, found {0} parts")]
    SegmentCount(usize),

    #[error("Invalid format for latitude or longitude: {0}")]
    InvalidNumber(#[from] ParseFloatError),

    #[error("Latitude and longitude must be finite numbers")]
    NotFinite,
}

/// Failures talking to the Google Places text search endpoint.
#[derive(Debug, Error)]
pub enum PlacesApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Google Places API error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from Google Places: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}
