use std::sync::Arc;

use dioxus::prelude::*;

use crate::{
    domain::{
        city_options, select_city, summarize_city, AnalysisDocument, CityCharts, CitySummary,
        LoadState, SelectedCity,
    },
    ui::components::{
        bar_chart::{BarChart, ChartData},
        city_select::CitySelect,
        kpi_card::KpiCard,
        loading::Loading,
    },
};

#[component]
pub fn DashboardPage() -> Element {
    let load_state = use_context::<Signal<LoadState>>();

    match load_state() {
        LoadState::Pending => rsx! { Loading {} },
        LoadState::Failed(reason) => rsx! { Loading { failure: Some(reason) } },
        LoadState::Ready(document) => rsx! { CityDashboard { document } },
    }
}

#[component]
fn CityDashboard(document: Arc<AnalysisDocument>) -> Element {
    let mut selected = use_context::<Signal<SelectedCity>>();
    let city = selected().0;

    let options = city_options(&document);
    let view = select_city(&document, &city)
        .and_then(|charts| summarize_city(&document, &city).map(|summary| (charts, summary)));

    rsx! {
        div { class: "toolbar",
            CitySelect {
                options,
                selected: city.clone(),
                on_change: move |key: String| selected.set(SelectedCity(key)),
            }
        }
        match view {
            Ok((charts, summary)) => rsx! { CityPanels { charts, summary } },
            Err(err) => rsx! {
                div { class: "panel panel-error", "{err}" }
            },
        }
    }
}

#[component]
fn CityPanels(charts: CityCharts, summary: CitySummary) -> Element {
    let vendor_data = ChartData::from(&charts.vendors);
    let price_data = ChartData::from(&charts.prices);

    let unique_description = summary
        .unique_vendors
        .as_ref()
        .map(|unique| format!("Unique: Foodora {} / Wolt {}", unique.foodora, unique.wolt));
    let cuisine_value = summary
        .cuisine_counts
        .as_ref()
        .map(|counts| format!("{} / {}", counts.foodora, counts.wolt));

    rsx! {
        div { class: "kpi-grid",
            KpiCard {
                title: "Vendors listed".to_string(),
                value: summary.total_vendors.to_string(),
                description: unique_description,
            }
            if let Some(value) = cuisine_value {
                KpiCard {
                    title: "Cuisine types".to_string(),
                    value,
                    description: Some("Foodora / Wolt".to_string()),
                }
            }
        }
        div { class: "chart-grid",
            div { class: "panel",
                h2 { class: "panel-title", "Vendor Comparison" }
                BarChart { data: vendor_data }
            }
            div { class: "panel",
                h2 { class: "panel-title", "Price Distribution" }
                BarChart { data: price_data }
            }
        }
    }
}
