use crate::error::{EngineError, EngineResult};
use crate::factors::Factor;
use crate::fixed::Weight;
use crate::ranking::SimilarityCriteria;
use crate::scorer::{normalize_weights, WeightSet};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Aggregation strategy identifier.
    #[arg(long, global = true, default_value = "weighted_sum")]
    pub strategy: String,

    /// Re-normalize the weight set before scoring.
    #[arg(long, global = true, default_value_t = false)]
    pub normalize: bool,

    /// JSON file of `{ "factor": weight }` fractions. Built-in weights otherwise.
    #[arg(long = "weights", global = true)]
    pub weights_file: Option<String>,

    /// Override one weight, e.g. `--weight school_district=0.2`. Repeatable.
    #[arg(long = "weight", global = true, value_name = "FACTOR=VALUE", value_parser = parse_weight_override)]
    #[serde(skip)]
    pub weight_overrides: Vec<(Factor, Weight)>,

    // === SIMILARITY ===
    #[arg(long, global = true, default_value_t = 10.0)]
    pub similar_window: f64,
    #[arg(long, global = true, default_value_t = 10)]
    pub max_similar: usize,
    #[arg(long, global = true, default_value_t = 0.0)]
    pub location_weight: f64,
    #[arg(long, global = true, default_value_t = 0.6)]
    pub min_similarity: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: "weighted_sum".to_string(),
            normalize: false,
            weights_file: None,
            weight_overrides: Vec::new(),
            similar_window: 10.0,
            max_similar: 10,
            location_weight: 0.0,
            min_similarity: 0.6,
        }
    }
}

pub fn parse_weight_override(s: &str) -> Result<(Factor, Weight), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FACTOR=VALUE, got '{}'", s))?;
    let factor = Factor::lookup(name).ok_or_else(|| format!("unknown factor '{}'", name.trim()))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid weight '{}' for {}", value.trim(), factor))?;
    if !value.is_finite() {
        return Err(format!("invalid weight '{}' for {}", value, factor));
    }
    Ok((factor, Weight::from_real(value)))
}

impl EngineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&content).map_err(|e| {
            EngineError::Config(format!(
                "failed to parse {}: {}",
                path.as_ref().display(),
                e
            ))
        })
    }

    /// Copies every value the user typed on the command line over `self`,
    /// leaving file-provided values in place for everything else.
    pub fn merge_from_cli(&mut self, cli: &EngineConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident, $arg_name:expr) => {
                if matches.value_source($arg_name) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(strategy, "strategy");
        update_if_present!(normalize, "normalize");
        update_if_present!(weights_file, "weights_file");
        update_if_present!(weight_overrides, "weight_overrides");
        update_if_present!(similar_window, "similar_window");
        update_if_present!(max_similar, "max_similar");
        update_if_present!(location_weight, "location_weight");
        update_if_present!(min_similarity, "min_similarity");
    }

    /// The weight set to score with: the weights file (or built-in weights),
    /// then CLI overrides, then normalization if requested.
    pub fn resolve_weights(&self) -> EngineResult<WeightSet> {
        let mut weights = match &self.weights_file {
            Some(path) => {
                info!("⚖️  Loading weights from: {}", path);
                WeightSet::load_from_file(path)?
            }
            None => WeightSet::standard(),
        };
        weights.merge_overrides(&self.weight_overrides);

        if self.normalize {
            weights = normalize_weights(&weights);
        } else if !self.weight_overrides.is_empty() && self.weights_file.is_none() {
            warn!("⚠️  Overriding built-in weights without --normalize; the total may no longer be 1.0");
        }
        Ok(weights)
    }

    pub fn similarity_criteria(&self) -> SimilarityCriteria {
        SimilarityCriteria {
            location_weight: self.location_weight,
            score_range: self.similar_window,
            min_similarity: self.min_similarity,
            max_results: self.max_similar,
        }
    }
}
