use std::fmt;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::{debug, warn};
use crate::config::{Config, DEFAULT_PLACES_API_URL};
use crate::error::{PipelineError, PlacesApiError};
use crate::models::search_request::SearchRequest;
use crate::models::search_response::{
    AuthorAttribution, LocalizedText, Place, Review, SearchResponse,
};

pub const API_KEY_HEADER: &str = "X-Goog-Api-Key";
pub const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";
pub const FIELD_MASK_VALUE: &str = "places.displayName.text,places.reviews";

/// Anything that can answer a text search with normalized places.
pub trait PlaceSearch {
    fn search_text(&self, request: &SearchRequest) -> Result<SearchResponse, PipelineError>;
}

/// Blocking client for the Places API (New) `places:searchText` endpoint.
/// Every call is an independent round trip; nothing is cached or retried.
#[derive(Clone)]
pub struct GooglePlacesClient {
    http_client: Client,
    api_key: String,
    api_url: String,
    field_mask: String,
}

impl GooglePlacesClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            api_url: DEFAULT_PLACES_API_URL.to_string(),
            field_mask: FIELD_MASK_VALUE.to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.google_places_api_key.clone())
            .with_api_url(config.google_places_api_url.clone())
    }

    /// Points the client at another endpoint, e.g. a local stub.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    fn fetch(&self, request: &SearchRequest) -> Result<SearchResponse, PlacesApiError> {
        let response = self
            .http_client
            .post(&self.api_url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .header(FIELD_MASK_HEADER, &self.field_mask)
            .json(&ApiSearchRequest::from(request))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        debug!("Status Code: {}", status.as_u16());
        debug!("Response Body: {}", body);

        if !status.is_success() {
            warn!(
                "Google Places returned {} for query: {}",
                status, request.text_query
            );
            return Err(PlacesApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let api_response: ApiSearchResponse = serde_json::from_str(&body)?;
        Ok(api_response.into())
    }
}

impl fmt::Debug for GooglePlacesClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GooglePlacesClient")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("field_mask", &self.field_mask)
            .finish()
    }
}

impl PlaceSearch for GooglePlacesClient {
    fn search_text(&self, request: &SearchRequest) -> Result<SearchResponse, PipelineError> {
        self.fetch(request).map_err(|source| PipelineError::Fetch {
            query: request.text_query.clone(),
            source,
        })
    }
}

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiSearchRequest {
    text_query: String,
    max_result_count: Option<u32>,
    location_bias: Option<ApiLocationBias>,
}

#[derive(Debug, Serialize)]
struct ApiLocationBias {
    circle: ApiCircle,
}

#[derive(Debug, Serialize)]
struct ApiCircle {
    center: ApiLatLng,
    radius: f64,
}

#[derive(Debug, Serialize)]
struct ApiLatLng {
    latitude: f64,
    longitude: f64,
}

impl From<&SearchRequest> for ApiSearchRequest {
    fn from(request: &SearchRequest) -> Self {
        Self {
            text_query: request.text_query.clone(),
            max_result_count: request.max_result_count,
            location_bias: request.location_bias.as_ref().map(|bias| ApiLocationBias {
                circle: ApiCircle {
                    center: ApiLatLng {
                        latitude: bias.circle.center.latitude,
                        longitude: bias.circle.center.longitude,
                    },
                    radius: bias.circle.radius,
                },
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiSearchResponse {
    places: Option<Vec<ApiPlace>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPlace {
    display_name: Option<ApiLocalizedText>,
    reviews: Option<Vec<ApiReview>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiLocalizedText {
    text: Option<String>,
    language_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiReview {
    name: Option<String>,
    relative_publish_time_description: Option<String>,
    rating: Option<f64>,
    text: Option<ApiLocalizedText>,
    original_text: Option<ApiLocalizedText>,
    author_attribution: Option<ApiAuthorAttribution>,
    publish_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiAuthorAttribution {
    display_name: Option<String>,
    uri: Option<String>,
    photo_uri: Option<String>,
}

impl From<ApiSearchResponse> for SearchResponse {
    fn from(response: ApiSearchResponse) -> Self {
        Self {
            places: response
                .places
                .unwrap_or_default()
                .into_iter()
                .map(Place::from)
                .collect(),
        }
    }
}

impl From<ApiPlace> for Place {
    fn from(place: ApiPlace) -> Self {
        Self {
            display_name: place
                .display_name
                .and_then(|name| name.text)
                .unwrap_or_default(),
            reviews: place
                .reviews
                .unwrap_or_default()
                .into_iter()
                .map(Review::from)
                .collect(),
        }
    }
}

impl From<ApiReview> for Review {
    fn from(review: ApiReview) -> Self {
        let author = review.author_attribution;
        Self {
            name: review.name.unwrap_or_default(),
            relative_publish_time_description: review
                .relative_publish_time_description
                .unwrap_or_default(),
            // Truncated toward zero, never rounded.
            rating: review.rating.map(|rating| rating.trunc() as i32).unwrap_or(0),
            text: review.text.map(LocalizedText::from).unwrap_or_default(),
            original_text: review.original_text.map(LocalizedText::from).unwrap_or_default(),
            author_attribution: author.map(AuthorAttribution::from).unwrap_or_default(),
            publish_time: review.publish_time.unwrap_or_default(),
        }
    }
}

impl From<ApiLocalizedText> for LocalizedText {
    fn from(text: ApiLocalizedText) -> Self {
        Self {
            text: text.text.unwrap_or_default(),
            language_code: text.language_code.unwrap_or_default(),
        }
    }
}

impl From<ApiAuthorAttribution> for AuthorAttribution {
    fn from(author: ApiAuthorAttribution) -> Self {
        Self {
            display_name: author.display_name.unwrap_or_default(),
            uri: author.uri.unwrap_or_default(),
            photo_uri: author.photo_uri.unwrap_or_default(),
        }
    }
}
