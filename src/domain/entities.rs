use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer,
};
use thiserror::Error;
use time::{macros::format_description, PrimitiveDateTime};

/// Delivery platforms compared by the analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Foodora,
    Wolt,
}

impl Platform {
    /// Display order used by every chart.
    pub const ALL: [Platform; 2] = [Platform::Foodora, Platform::Wolt];

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Foodora => "Foodora",
            Platform::Wolt => "Wolt",
        }
    }

    /// Key used for the platform inside the analysis JSON.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Foodora => "foodora",
            Platform::Wolt => "wolt",
        }
    }
}

/// Price buckets assigned by the analyzer (`$`, `$$`, `$$$`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PriceTier {
    Budget,
    Mid,
    Premium,
}

impl PriceTier {
    pub const ALL: [PriceTier; 3] = [PriceTier::Budget, PriceTier::Mid, PriceTier::Premium];

    pub fn label(&self) -> &'static str {
        match self {
            PriceTier::Budget => "$",
            PriceTier::Mid => "$$",
            PriceTier::Premium => "$$$",
        }
    }
}

/// One value per platform, keyed `foodora` / `wolt` in the JSON.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PerPlatform<T> {
    pub foodora: T,
    pub wolt: T,
}

impl<T> PerPlatform<T> {
    pub fn get(&self, platform: Platform) -> &T {
        match platform {
            Platform::Foodora => &self.foodora,
            Platform::Wolt => &self.wolt,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerPlatform<U> {
        PerPlatform {
            foodora: f(&self.foodora),
            wolt: f(&self.wolt),
        }
    }
}

/// Share of vendors per price tier. The analyzer emits percentages.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct TierDistribution {
    #[serde(rename = "$")]
    pub budget: f64,
    #[serde(rename = "$$")]
    pub mid: f64,
    #[serde(rename = "$$$")]
    pub premium: f64,
}

impl TierDistribution {
    pub fn get(&self, tier: PriceTier) -> f64 {
        match tier {
            PriceTier::Budget => self.budget,
            PriceTier::Mid => self.mid,
            PriceTier::Premium => self.premium,
        }
    }
}

/// Per-city slice of the analysis document.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CityRecord {
    pub vendor_counts: PerPlatform<u64>,
    #[serde(default)]
    pub unique_vendors: Option<PerPlatform<u64>>,
    #[serde(default)]
    pub cuisine_types: Option<PerPlatform<Vec<String>>>,
    pub price_distribution: PerPlatform<TierDistribution>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("analysis contains no cities")]
    NoCities,
    #[error("analysis contains a city with an empty key")]
    EmptyCityKey,
}

/// The report written by the analyzer: per-city statistics plus optional metadata.
///
/// Cities keep the order in which they appear in the JSON object so the city
/// selector lists them the way the report declares them.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AnalysisDocument {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub cities_analyzed: Vec<String>,
    #[serde(rename = "analysis", deserialize_with = "ordered_cities")]
    cities: Vec<(String, CityRecord)>,
}

impl AnalysisDocument {
    #[cfg(test)]
    pub fn new(cities: Vec<(String, CityRecord)>) -> Self {
        Self {
            timestamp: None,
            cities_analyzed: Vec::new(),
            cities,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::NoCities);
        }
        if self.cities.iter().any(|(key, _)| key.trim().is_empty()) {
            return Err(ValidationError::EmptyCityKey);
        }
        Ok(())
    }

    pub fn city(&self, key: &str) -> Option<&CityRecord> {
        self.cities
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, record)| record)
    }

    pub fn contains_city(&self, key: &str) -> bool {
        self.city(key).is_some()
    }

    pub fn city_keys(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(|(key, _)| key.as_str())
    }

    pub fn first_city(&self) -> Option<&str> {
        self.city_keys().next()
    }

    /// Cities listed in `cities_analyzed` that have no record in `analysis`.
    pub fn missing_cities(&self) -> Vec<&str> {
        self.cities_analyzed
            .iter()
            .map(String::as_str)
            .filter(|city| !self.contains_city(city))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Report generation time, when present and in the analyzer's `YYYY-MM-DD HH:MM:SS` format.
    pub fn report_time(&self) -> Option<PrimitiveDateTime> {
        let raw = self.timestamp.as_deref()?;
        let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        PrimitiveDateTime::parse(raw.trim(), format).ok()
    }
}

fn ordered_cities<'de, D>(deserializer: D) -> Result<Vec<(String, CityRecord)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OrderedCities;

    impl<'de> Visitor<'de> for OrderedCities {
        type Value = Vec<(String, CityRecord)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of city keys to city records")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut cities: Vec<(String, CityRecord)> =
                Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((key, record)) = access.next_entry::<String, CityRecord>()? {
                // Duplicate keys: last value wins, first position is kept.
                match cities.iter_mut().find(|(existing, _)| *existing == key) {
                    Some(slot) => slot.1 = record,
                    None => cities.push((key, record)),
                }
            }
            Ok(cities)
        }
    }

    deserializer.deserialize_map(OrderedCities)
}
