//! ISO 3166-1 country name registry.
//!
//! Loads `countries.json` at compile time via `include_str!` and builds the
//! lookup indexes once via `lazy_static`.

use std::collections::HashMap;

use lazy_static::lazy_static;
use log::debug;
use serde::Deserialize;

use super::normalize;
use super::traits::RegionResolver;

/// Minimum Jaro-Winkler similarity for a fuzzy country match.
pub const FUZZY_THRESHOLD: f64 = 0.93;

/// Shorter inputs are only matched exactly.
pub const FUZZY_MIN_LEN: usize = 4;

// ── JSON schema ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CountryCatalog {
    countries: Vec<CountryEntry>,
}

#[derive(Debug, Deserialize)]
struct CountryEntry {
    alpha2: String,
    name: String,
    #[serde(default)]
    official_name: Option<String>,
    #[serde(default)]
    local_names: Vec<String>,
}

impl CountryEntry {
    fn names(&self) -> impl Iterator<Item = &String> {
        std::iter::once(&self.name)
            .chain(self.official_name.iter())
            .chain(self.local_names.iter())
    }
}

// ── Registry with pre-built indexes ──────────────────────────────────────────

fn leak_str(s: String) -> &'static str {
    Box::leak(s.into_boxed_str())
}

struct CountryRegistry {
    /// normalized name → alpha-2
    by_name: HashMap<String, &'static str>,
    /// (normalized name, alpha-2) in file order, for fuzzy scans
    candidates: Vec<(String, &'static str)>,
}

lazy_static! {
    static ref REGISTRY: CountryRegistry = CountryRegistry::load();
}

impl CountryRegistry {
    fn load() -> Self {
        let json = include_str!("countries.json");
        let catalog: CountryCatalog =
            serde_json::from_str(json).expect("countries.json must be valid");

        let mut by_name = HashMap::new();
        let mut candidates = Vec::new();

        for entry in &catalog.countries {
            let code = leak_str(entry.alpha2.to_uppercase());
            for name in entry.names() {
                let key = normalize(name);
                if key.is_empty() {
                    continue;
                }
                by_name.entry(key.clone()).or_insert(code);
                candidates.push((key, code));
            }
        }

        Self {
            by_name,
            candidates,
        }
    }

    fn exact(&self, normalized: &str) -> Option<&'static str> {
        self.by_name.get(normalized).copied()
    }

    fn fuzzy(&self, normalized: &str) -> Option<(&'static str, f64)> {
        if normalized.chars().count() < FUZZY_MIN_LEN {
            return None;
        }

        let mut best: Option<(&'static str, f64)> = None;
        for (name, code) in &self.candidates {
            let score = strsim::jaro_winkler(normalized, name);
            if score >= FUZZY_THRESHOLD && best.map_or(true, |(_, s)| score > s) {
                best = Some((*code, score));
            }
        }
        best
    }
}

/// Second link of the chain: country names, exact first, then fuzzy.
#[derive(Debug, Default)]
pub struct CountryNameResolver;

impl CountryNameResolver {
    pub fn new() -> Self {
        Self
    }
}

impl RegionResolver for CountryNameResolver {
    fn name(&self) -> &'static str {
        "country_names"
    }

    fn resolve(&self, normalized: &str) -> Option<&'static str> {
        if let Some(code) = REGISTRY.exact(normalized) {
            return Some(code);
        }
        REGISTRY.fuzzy(normalized).map(|(code, score)| {
            debug!(
                "Fuzzy country match '{}' -> {} (score {:.3})",
                normalized,
                code,
                score
            );
            code
        })
    }
}
