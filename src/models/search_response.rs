use serde::{Deserialize, Serialize};

/// Normalized reply of a text search. Absent API fields are already
/// replaced by empty strings or a zero rating here.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct SearchResponse {
    pub places: Vec<Place>,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct Place {
    pub display_name: String,
    pub reviews: Vec<Review>,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct Review {
    pub name: String,
    pub relative_publish_time_description: String,
    pub rating: i32,
    pub text: LocalizedText,
    pub original_text: LocalizedText,
    pub author_attribution: AuthorAttribution,
    /// Kept exactly as the API returned it.
    pub publish_time: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct LocalizedText {
    pub text: String,
    pub language_code: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct AuthorAttribution {
    pub display_name: String,
    pub uri: String,
    pub photo_uri: String,
}

impl SearchResponse {
    pub fn review_count(&self) -> usize {
        self.places.iter().map(|place| place.reviews.len()).sum()
    }
}
