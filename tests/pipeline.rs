use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use review_harvester::controller::google_places_api::PlaceSearch;
use review_harvester::controller::{process, ProcessSummary};
use review_harvester::error::{PipelineError, PlacesApiError};
use review_harvester::models::search_request::{Center, SearchRequest};
use review_harvester::models::search_response::{
    LocalizedText, Place, Review, SearchResponse,
};

const HEADER: &str = "Place Name,Review Name,Relative Publish Time Description,Rating,Text,Original Text,Author Display Name,Author URI,Author Photo URI,Publish Time";

/// Replies from a fixed table and records every request it sees.
#[derive(Default)]
struct StubSearch {
    replies: HashMap<String, SearchResponse>,
    seen: RefCell<Vec<SearchRequest>>,
}

impl StubSearch {
    fn reply(mut self, query: &str, response: SearchResponse) -> Self {
        self.replies.insert(query.to_string(), response);
        self
    }
}

impl PlaceSearch for StubSearch {
    fn search_text(&self, request: &SearchRequest) -> Result<SearchResponse, PipelineError> {
        self.seen.borrow_mut().push(request.clone());
        self.replies
            .get(&request.text_query)
            .cloned()
            .ok_or_else(|| PipelineError::Fetch {
                query: request.text_query.clone(),
                source: PlacesApiError::Status {
                    status: 404,
                    body: "not stubbed".to_string(),
                },
            })
    }
}

fn single_review(place: &str, rating: i32, text: &str) -> SearchResponse {
    SearchResponse {
        places: vec![Place {
            display_name: place.to_string(),
            reviews: vec![Review {
                rating,
                text: LocalizedText {
                    text: text.to_string(),
                    language_code: "en".to_string(),
                },
                ..Review::default()
            }],
        }],
    }
}

fn write_input(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("restaurant.csv");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_single_restaurant_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "Name,Coordinates\n\"Cafe A\",\"1.0,2.0\"\n");
    let output = dir.path().join("reviews.csv");
    let search = StubSearch::default().reply("Cafe A", single_review("Cafe A", 5, "Great"));

    let summary = process(&search, &input, &output, 1).unwrap();

    assert_eq!(
        summary,
        ProcessSummary {
            restaurants: 1,
            places: 1,
            reviews_written: 1,
        }
    );

    let contents = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines, vec![HEADER, "Cafe A,,,5,Great,,,,,"]);

    let seen = search.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].max_result_count, Some(1));
    let circle = &seen[0].location_bias.as_ref().unwrap().circle;
    assert_eq!(circle.center, Center { latitude: 1.0, longitude: 2.0 });
    assert_eq!(circle.radius, 0.0);
}

#[test]
fn test_rows_follow_input_order_under_one_header() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "Name,Coordinates\nCafe A,\"1,2\"\nEmpty Diner,\"3,4\"\nBistro B,\"5,6\"\n",
    );
    let output = dir.path().join("reviews.csv");
    let search = StubSearch::default()
        .reply("Cafe A", single_review("Cafe A", 5, "Great"))
        .reply(
            "Empty Diner",
            SearchResponse {
                places: vec![Place {
                    display_name: "Empty Diner".to_string(),
                    reviews: vec![],
                }],
            },
        )
        .reply("Bistro B", single_review("Bistro B", 2, "Slow, cold"));

    let summary = process(&search, &input, &output, 1).unwrap();

    assert_eq!(summary.restaurants, 3);
    assert_eq!(summary.places, 3);
    assert_eq!(summary.reviews_written, 2);

    let queries: Vec<String> = search
        .seen
        .borrow()
        .iter()
        .map(|request| request.text_query.clone())
        .collect();
    assert_eq!(queries, vec!["Cafe A", "Empty Diner", "Bistro B"]);

    let contents = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            HEADER,
            "Cafe A,,,5,Great,,,,,",
            "Bistro B,,,2,\"Slow, cold\",,,,,",
        ]
    );
}

#[test]
fn test_fetch_failure_stops_run_and_keeps_earlier_rows() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(
        dir.path(),
        "Name,Coordinates\nCafe A,\"1,2\"\nUnknown,\"3,4\"\nBistro B,\"5,6\"\n",
    );
    let output = dir.path().join("reviews.csv");
    let search = StubSearch::default()
        .reply("Cafe A", single_review("Cafe A", 5, "Great"))
        .reply("Bistro B", single_review("Bistro B", 4, "Nice"));

    let err = process(&search, &input, &output, 1).unwrap_err();

    assert_eq!(err.to_string(), "Can't get data about restaurant: Unknown");
    assert_eq!(search.seen.borrow().len(), 2);

    let contents = fs::read_to_string(&output).unwrap();
    assert_eq!(contents.lines().count(), 2);
    assert!(!contents.contains("Bistro B"));
}

#[test]
fn test_bad_coordinates_abort_before_any_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "Name,Coordinates\nCafe A,\"1,2\"\nCafe B,abc\n");
    let output = dir.path().join("reviews.csv");
    let search = StubSearch::default().reply("Cafe A", single_review("Cafe A", 5, "Great"));

    let err = process(&search, &input, &output, 1).unwrap_err();

    assert!(matches!(err, PipelineError::Format { row: 2, .. }));
    assert!(search.seen.borrow().is_empty());
    assert!(!output.exists());
}

#[test]
fn test_missing_input_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let search = StubSearch::default();

    let err = process(
        &search,
        &dir.path().join("nope.csv"),
        &dir.path().join("reviews.csv"),
        1,
    )
    .unwrap_err();

    assert!(matches!(err, PipelineError::Read { .. }));
    assert!(search.seen.borrow().is_empty());
}
