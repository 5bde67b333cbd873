//! Batch export of Google Places reviews for a list of restaurants.
//!
//! Restaurants are read from a CSV file with `Name` and `Coordinates`
//! columns, looked up one at a time through the Places text search, and
//! every returned review is appended as a row of the output CSV file.

pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod repositories;
