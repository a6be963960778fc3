pub mod app;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod models;
pub mod pools;
pub mod sink;

pub use error::ConfigurationError;
pub use generator::{generate_datasets, DatasetGenerator, Datasets};
