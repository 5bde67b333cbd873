use std::fs::OpenOptions;
use std::path::Path;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;
use crate::error::PipelineError;
use crate::models::search_response::{Place, Review, SearchResponse};

pub const OUTPUT_HEADERS: [&str; 10] = [
    "Place Name",
    "Review Name",
    "Relative Publish Time Description",
    "Rating",
    "Text",
    "Original Text",
    "Author Display Name",
    "Author URI",
    "Author Photo URI",
    "Publish Time",
];

/// Appends one row per review in `response` to the CSV file at `path`,
/// creating it if needed. The header goes in only when the file is empty at
/// the moment of the call, so a single writer per output file is assumed.
///
/// Returns the number of review rows written.
pub fn append_reviews(response: &SearchResponse, path: &Path) -> Result<usize, PipelineError> {
    let write_error = |source: csv::Error| PipelineError::Write {
        place: response
            .places
            .first()
            .map(|place| place.display_name.clone())
            .unwrap_or_default(),
        source,
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| write_error(e.into()))?;
    let is_empty = file
        .metadata()
        .map_err(|e| write_error(e.into()))?
        .len()
        == 0;

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(line_terminator())
        .from_writer(file);

    if is_empty {
        writer.write_record(OUTPUT_HEADERS).map_err(write_error)?;
    }

    let mut rows = 0;
    for place in &response.places {
        for review in &place.reviews {
            writer
                .write_record(review_row(place, review))
                .map_err(write_error)?;
            rows += 1;
        }
    }

    writer.flush().map_err(|e| write_error(e.into()))?;
    debug!("Appended {} review rows to {}", rows, path.display());

    Ok(rows)
}

fn review_row(place: &Place, review: &Review) -> [String; 10] {
    [
        place.display_name.clone(),
        review.name.clone(),
        review.relative_publish_time_description.clone(),
        review.rating.to_string(),
        review.text.text.clone(),
        review.original_text.text.clone(),
        review.author_attribution.display_name.clone(),
        review.author_attribution.uri.clone(),
        review.author_attribution.photo_uri.clone(),
        review.publish_time.clone(),
    ]
}

fn line_terminator() -> Terminator {
    if cfg!(windows) {
        Terminator::CRLF
    } else {
        Terminator::Any(b'\n')
    }
}
