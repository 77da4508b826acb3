use std::sync::Arc;

use super::entities::AnalysisDocument;

/// City shown before the analysis has loaded.
pub const DEFAULT_CITY: &str = "oslo";

/// Lifecycle of the one-shot analysis load.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState {
    #[default]
    Pending,
    Ready(Arc<AnalysisDocument>),
    /// Terminal; the dashboard keeps showing its loading indicator.
    Failed(String),
}

impl LoadState {
    pub fn document(&self) -> Option<&Arc<AnalysisDocument>> {
        match self {
            LoadState::Ready(document) => Some(document),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            LoadState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Key of the city the charts currently display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedCity(pub String);

impl Default for SelectedCity {
    fn default() -> Self {
        Self(DEFAULT_CITY.to_string())
    }
}

impl SelectedCity {
    pub fn key(&self) -> &str {
        &self.0
    }

    /// Returns the selection to switch to when the current one is not a city
    /// of `document`, or `None` if it can stay.
    pub fn reconcile(&self, document: &AnalysisDocument) -> Option<SelectedCity> {
        if document.contains_city(&self.0) {
            return None;
        }
        document
            .first_city()
            .map(|first| SelectedCity(first.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::fixtures::{parse, FULL_REPORT, OSLO_ONLY};

    #[test]
    fn starts_pending_on_default_city() {
        let state = LoadState::default();
        assert_eq!(state, LoadState::Pending);
        assert!(state.document().is_none());
        assert!(state.failure().is_none());
        assert_eq!(SelectedCity::default().key(), "oslo");
    }

    #[test]
    fn failed_state_has_no_document() {
        let state = LoadState::Failed("connection refused".into());
        assert!(state.document().is_none());
        assert_eq!(state.failure(), Some("connection refused"));
    }

    #[test]
    fn keeps_selection_present_in_document() {
        let doc = parse(FULL_REPORT);
        let selected = SelectedCity("bergen".into());
        assert_eq!(selected.reconcile(&doc), None);
    }

    #[test]
    fn falls_back_to_first_city_when_default_missing() {
        let raw = OSLO_ONLY.replace("\"oslo\"", "\"bergen\"");
        let doc = parse(&raw);
        let selected = SelectedCity::default();
        assert_eq!(
            selected.reconcile(&doc),
            Some(SelectedCity("bergen".into()))
        );
    }
}
