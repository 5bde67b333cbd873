use std::fmt;
use std::path::PathBuf;
use clap::Parser;

pub const DEFAULT_PLACES_API_URL: &str = "https://places.googleapis.com/v1/places:searchText";

#[derive(Parser, Clone)]
#[clap(about = "Fetches Google Places reviews for every restaurant in a CSV file")]
pub struct Config {
    #[clap(env, long)]
    pub google_places_api_key: String,

    #[clap(env, long, default_value = DEFAULT_PLACES_API_URL)]
    pub google_places_api_url: String,

    #[clap(env, long, default_value = "restaurant.csv")]
    pub input_path: PathBuf,

    #[clap(env, long, default_value = "reviews.csv")]
    pub output_path: PathBuf,

    /// Result limit sent with every text search.
    #[clap(env, long, default_value_t = 1)]
    pub max_result_count: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("google_places_api_key", &"<redacted>")
            .field("google_places_api_url", &self.google_places_api_url)
            .field("input_path", &self.input_path)
            .field("output_path", &self.output_path)
            .field("max_result_count", &self.max_result_count)
            .finish()
    }
}
