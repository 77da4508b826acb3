//! Analysis data model and the chart projections derived from it.

pub mod app_state;
pub mod entities;
pub mod selector;

pub use app_state::{LoadState, SelectedCity};
pub use entities::{AnalysisDocument, Platform, ValidationError};
pub use selector::{
    city_options, select_city, summarize_city, CityCharts, CityOption, CitySummary, PriceRow,
    VendorRow,
};
