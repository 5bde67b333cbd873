use std::path::Path;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};
use crate::error::{CoordinatesError, PipelineError, ReadFailure};
use crate::models::search_request::{Center, SearchRequest};

pub const NAME_HEADER: &str = "Name";
pub const COORDINATES_HEADER: &str = "Coordinates";

/// Reads every restaurant row of `path` into a search request biased toward
/// the row's coordinates. The whole file is materialized before returning.
pub fn read_search_requests(
    path: &Path,
    max_result_count: u32,
) -> Result<Vec<SearchRequest>, PipelineError> {
    let read_error = |source: ReadFailure| PipelineError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| read_error(e.into()))?;

    let headers = reader
        .headers()
        .map_err(|e| read_error(e.into()))?
        .clone();
    let name_idx = column_index(&headers, NAME_HEADER).map_err(read_error)?;
    let coordinates_idx = column_index(&headers, COORDINATES_HEADER).map_err(read_error)?;

    let mut restaurants = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| read_error(e.into()))?;
        let row = idx + 1;

        let name = cell(&record, name_idx, row, NAME_HEADER).map_err(read_error)?;
        let coordinates =
            cell(&record, coordinates_idx, row, COORDINATES_HEADER).map_err(read_error)?;

        let center = parse_coordinates(coordinates).map_err(|source| PipelineError::Format {
            row,
            coordinates: coordinates.to_string(),
            source,
        })?;
        debug!("Parsed row {} ({}) at {:?}", row, name, center);

        restaurants.push(SearchRequest::near_point(name, max_result_count, center));
    }

    info!("Read {} restaurants from {}", restaurants.len(), path.display());
    Ok(restaurants)
}

fn column_index(headers: &StringRecord, column: &'static str) -> Result<usize, ReadFailure> {
    headers
        .iter()
        .position(|header| header == column)
        .ok_or(ReadFailure::MissingColumn(column))
}

fn cell<'r>(
    record: &'r StringRecord,
    idx: usize,
    row: usize,
    column: &'static str,
) -> Result<&'r str, ReadFailure> {
    record
        .get(idx)
        .ok_or(ReadFailure::MissingCell { row, column })
}

/// Parses a `"<lat>,<lon>"` cell.
pub fn parse_coordinates(coordinates: &str) -> Result<Center, CoordinatesError> {
    let parts: Vec<&str> = coordinates.split(',').collect();
    if parts.len() != 2 {
        return Err(CoordinatesError::SegmentCount(parts.len()));
    }

    let latitude: f64 = parts[0].trim().parse()?;
    let longitude: f64 = parts[1].trim().parse()?;
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(CoordinatesError::NotFinite);
    }

    Ok(Center { latitude, longitude })
}
