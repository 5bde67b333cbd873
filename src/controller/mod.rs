use std::path::Path;
use tracing::info;
use crate::config::Config;
use crate::controller::google_places_api::{GooglePlacesClient, PlaceSearch};
use crate::error::PipelineError;
use crate::repositories::csv_reader::read_search_requests;
use crate::repositories::csv_writer::append_reviews;

pub mod google_places_api;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessSummary {
    pub restaurants: usize,
    pub places: usize,
    pub reviews_written: usize,
}

pub fn run(config: &Config) -> Result<ProcessSummary, PipelineError> {
    let client = GooglePlacesClient::from_config(config);

    process(
        &client,
        &config.input_path,
        &config.output_path,
        config.max_result_count,
    )
}

/// Reads every restaurant from `input`, then fetches and appends its reviews
/// to `output` one restaurant at a time, in input order. The first failure
/// stops the run; rows appended before it stay in `output`.
pub fn process<S: PlaceSearch>(
    search: &S,
    input: &Path,
    output: &Path,
    max_result_count: u32,
) -> Result<ProcessSummary, PipelineError> {
    let requests = read_search_requests(input, max_result_count)?;
    let mut summary = ProcessSummary::default();

    for request in &requests {
        info!("Fetching reviews for restaurant: {}", request.text_query);
        let response = search.search_text(request)?;
        let written = append_reviews(&response, output)?;

        summary.restaurants += 1;
        summary.places += response.places.len();
        summary.reviews_written += written;
        info!(
            "Wrote {} of {} reviews for restaurant: {}",
            written,
            response.review_count(),
            request.text_query
        );
    }

    Ok(summary)
}
