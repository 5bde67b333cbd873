use serde::{Deserialize, Serialize};

/// One text search to issue against the places API.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct SearchRequest {
    pub text_query: String,
    pub max_result_count: Option<u32>,
    pub location_bias: Option<LocationBias>,
}

/// Circular geofence the search should prefer results from.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct LocationBias {
    pub circle: Circle,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Circle {
    pub center: Center,
    /// Meters. Zero biases toward the point without an area constraint.
    pub radius: f64,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Center {
    pub latitude: f64,
    pub longitude: f64,
}

impl SearchRequest {
    pub fn near_point(
        text_query: impl Into<String>,
        max_result_count: u32,
        center: Center,
    ) -> Self {
        Self {
            text_query: text_query.into(),
            max_result_count: Some(max_result_count),
            location_bias: Some(LocationBias {
                circle: Circle {
                    center,
                    radius: 0.0,
                },
            }),
        }
    }
}
