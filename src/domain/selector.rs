//! Projects a city record into the row shapes drawn by the dashboard charts.

use thiserror::Error;

use super::entities::{AnalysisDocument, CityRecord, PerPlatform, Platform, PriceTier};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("city `{0}` is not part of the loaded analysis")]
    UnknownCity(String),
}

/// One bar of the vendor comparison chart.
#[derive(Clone, Debug, PartialEq)]
pub struct VendorRow {
    pub name: &'static str,
    pub vendors: u64,
}

/// One price tier of the distribution chart, with a value per platform.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceRow {
    pub name: &'static str,
    pub foodora: f64,
    pub wolt: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CityCharts {
    pub vendors: [VendorRow; 2],
    pub prices: [PriceRow; 3],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CityOption {
    pub key: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CitySummary {
    pub total_vendors: u64,
    pub unique_vendors: Option<PerPlatform<u64>>,
    pub cuisine_counts: Option<PerPlatform<usize>>,
}

/// Derives both chart row sets for `city`.
///
/// Values are copied from the record untouched. A city missing from the
/// document is reported rather than replaced with another one.
pub fn select_city(document: &AnalysisDocument, city: &str) -> Result<CityCharts, SelectError> {
    let record = lookup(document, city)?;
    Ok(CityCharts {
        vendors: vendor_rows(record),
        prices: price_rows(record),
    })
}

pub fn vendor_rows(record: &CityRecord) -> [VendorRow; 2] {
    Platform::ALL.map(|platform| VendorRow {
        name: platform.name(),
        vendors: *record.vendor_counts.get(platform),
    })
}

pub fn price_rows(record: &CityRecord) -> [PriceRow; 3] {
    let distribution = &record.price_distribution;
    PriceTier::ALL.map(|tier| PriceRow {
        name: tier.label(),
        foodora: distribution.foodora.get(tier),
        wolt: distribution.wolt.get(tier),
    })
}

/// Dropdown entries in document order.
pub fn city_options(document: &AnalysisDocument) -> Vec<CityOption> {
    document
        .city_keys()
        .map(|key| CityOption {
            key: key.to_string(),
            label: city_label(key),
        })
        .collect()
}

/// Uppercases the first character of a city key (`"oslo"` -> `"Oslo"`).
pub fn city_label(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn summarize_city(document: &AnalysisDocument, city: &str) -> Result<CitySummary, SelectError> {
    let record = lookup(document, city)?;
    let counts = &record.vendor_counts;
    Ok(CitySummary {
        total_vendors: counts.foodora.saturating_add(counts.wolt),
        unique_vendors: record.unique_vendors.clone(),
        cuisine_counts: record
            .cuisine_types
            .as_ref()
            .map(|types| types.map(Vec::len)),
    })
}

fn lookup<'a>(document: &'a AnalysisDocument, city: &str) -> Result<&'a CityRecord, SelectError> {
    document
        .city(city)
        .ok_or_else(|| SelectError::UnknownCity(city.to_string()))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::entities::{
        fixtures::{parse, FULL_REPORT, OSLO_ONLY},
        TierDistribution,
    };

    fn record(foodora: u64, wolt: u64) -> CityRecord {
        let tiers = TierDistribution {
            budget: 0.0,
            mid: 0.0,
            premium: 0.0,
        };
        CityRecord {
            vendor_counts: PerPlatform { foodora, wolt },
            unique_vendors: None,
            cuisine_types: None,
            price_distribution: PerPlatform {
                foodora: tiers,
                wolt: tiers,
            },
        }
    }

    #[test]
    fn oslo_rows_match_record() {
        let doc = parse(OSLO_ONLY);
        let charts = select_city(&doc, "oslo").expect("oslo selectable");

        assert_eq!(
            charts.vendors,
            [
                VendorRow { name: "Foodora", vendors: 10 },
                VendorRow { name: "Wolt", vendors: 7 },
            ]
        );
        assert_eq!(
            charts.prices,
            [
                PriceRow { name: "$", foodora: 1.0, wolt: 4.0 },
                PriceRow { name: "$$", foodora: 2.0, wolt: 5.0 },
                PriceRow { name: "$$$", foodora: 3.0, wolt: 6.0 },
            ]
        );
    }

    #[rstest]
    #[case("oslo", 120, 150, [50.0, 33.33, 16.67])]
    #[case("bergen", 60, 45, [70.0, 20.0, 10.0])]
    fn every_city_copies_values_verbatim(
        #[case] city: &str,
        #[case] foodora: u64,
        #[case] wolt: u64,
        #[case] foodora_tiers: [f64; 3],
    ) {
        let doc = parse(FULL_REPORT);
        let charts = select_city(&doc, city).expect("city selectable");

        assert_eq!(charts.vendors.len(), 2);
        assert_eq!(charts.prices.len(), 3);
        assert_eq!(charts.vendors[0].vendors, foodora);
        assert_eq!(charts.vendors[1].vendors, wolt);
        let tiers: Vec<f64> = charts.prices.iter().map(|row| row.foodora).collect();
        assert_eq!(tiers, foodora_tiers.to_vec());
    }

    #[test]
    fn unknown_city_fails_fast() {
        let doc = parse(OSLO_ONLY);
        assert_eq!(
            select_city(&doc, "tromso"),
            Err(SelectError::UnknownCity("tromso".into()))
        );
        assert!(summarize_city(&doc, "tromso").is_err());
    }

    #[test]
    fn switching_city_leaves_document_untouched() {
        let doc = parse(FULL_REPORT);
        let before = doc.clone();

        let oslo = select_city(&doc, "oslo").expect("oslo");
        let bergen = select_city(&doc, "bergen").expect("bergen");

        assert_ne!(oslo, bergen);
        assert_eq!(doc, before);
        assert_eq!(select_city(&doc, "oslo").expect("oslo again"), oslo);
    }

    #[test]
    fn options_follow_document_order() {
        let doc = AnalysisDocument::new(vec![
            ("stavanger".into(), record(1, 2)),
            ("ålesund".into(), record(3, 4)),
            ("bergen".into(), record(5, 6)),
        ]);
        let options = city_options(&doc);
        let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
        let keys: Vec<_> = options.iter().map(|o| o.key.as_str()).collect();

        assert_eq!(keys, vec!["stavanger", "ålesund", "bergen"]);
        assert_eq!(labels, vec!["Stavanger", "Ålesund", "Bergen"]);
    }

    #[rstest]
    #[case("oslo", "Oslo")]
    #[case("Bergen", "Bergen")]
    #[case("x", "X")]
    #[case("", "")]
    fn labels_capitalize_first_character(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(city_label(key), expected);
    }

    #[test]
    fn summary_uses_optional_analyzer_fields() {
        let doc = parse(FULL_REPORT);
        let summary = summarize_city(&doc, "oslo").expect("oslo");
        assert_eq!(summary.total_vendors, 270);
        assert_eq!(
            summary.unique_vendors,
            Some(PerPlatform { foodora: 118, wolt: 149 })
        );
        assert_eq!(
            summary.cuisine_counts,
            Some(PerPlatform { foodora: 3, wolt: 2 })
        );

        let minimal = parse(OSLO_ONLY);
        let summary = summarize_city(&minimal, "oslo").expect("oslo");
        assert_eq!(summary.total_vendors, 17);
        assert!(summary.unique_vendors.is_none());
        assert!(summary.cuisine_counts.is_none());
    }
}
