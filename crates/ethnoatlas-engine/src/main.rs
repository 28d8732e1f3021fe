//! Search engine binary for the EthnoAtlas.
//!
//! Seeds the in-memory sample atlas, runs a faceted search (from a JSON
//! query file or the built-in showcase query), and prints the matched
//! societies with their projected trees, followed by the continuous-variable
//! legend and the environmental min/max for two sample variables.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `ethnoatlas-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Seed the sample atlas
//! 4. Build the search engine
//! 5. Run the query (file or showcase)
//! 6. Print results, legend, and min/max

mod config;
mod error;

use std::path::PathBuf;

use ethnoatlas_search::SearchEngine;
use ethnoatlas_store::{SampleAtlasIds, sample_atlas};
use ethnoatlas_types::{
    ClassificationFilter, EnvOperator, EnvironmentalFilter, SearchQuery,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::EngineConfig;
use crate::error::EngineError;

/// Application entry point for the search engine.
///
/// # Errors
///
/// Returns an error if configuration, seeding, or the query itself fails.
#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let config_path = std::env::var("ETHNOATLAS_CONFIG")
        .map_or_else(|_| PathBuf::from("ethnoatlas-config.yaml"), PathBuf::from);
    let (config, defaulted) = EngineConfig::load_or_default(&config_path)?;

    // 2. Initialize structured logging.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.filter.clone()));
    if config.logging.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
    }

    info!("ethnoatlas-engine starting");
    if defaulted {
        warn!(path = %config_path.display(), "config file not found, using defaults");
    }

    // 3. Seed the sample atlas.
    let (atlas, ids) = sample_atlas()?;
    info!(
        societies = atlas.society_count(),
        languages = atlas.language_count(),
        trees = atlas.tree_count(),
        regions = atlas.region_count(),
        "sample atlas loaded"
    );

    // 4. Build the search engine.
    let engine = SearchEngine::new(atlas);

    // 5. Run the query.
    let query = match &config.query.file {
        Some(path) => {
            info!(path, "loading query from file");
            let raw = std::fs::read_to_string(path)?;
            serde_json::from_str(&raw)?
        }
        None => {
            info!("running the built-in showcase query");
            showcase_query(&ids)
        }
    };
    let results = engine.search(&query).await?;
    info!(
        societies = results.societies.len(),
        trees = results.trees.len(),
        "query finished"
    );

    // 6. Print results, legend, and min/max.
    println!("{}", serde_json::to_string_pretty(&results)?);

    let legend = engine.bin(ids.population_density).await?;
    println!("{}", serde_json::to_string_pretty(&legend)?);

    let range = engine.min_max(ids.temperature).await?;
    println!("temperature range: {:.4} - {:.4}", range.min, range.max);

    Ok(())
}

/// The built-in showcase query: Austronesian-speaking societies in warm
/// climates.
fn showcase_query(ids: &SampleAtlasIds) -> SearchQuery {
    SearchQuery {
        language_classifications: Some(vec![
            ClassificationFilter { id: ids.hawaiian },
            ClassificationFilter { id: ids.maori },
            ClassificationFilter { id: ids.samoan },
            ClassificationFilter { id: ids.fijian },
        ]),
        environmental_filters: Some(vec![EnvironmentalFilter {
            id: ids.temperature,
            operator: EnvOperator::Gt,
            params: vec![20.0],
        }]),
        ..SearchQuery::default()
    }
}
