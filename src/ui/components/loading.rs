use dioxus::prelude::*;

/// Shown while the analysis is pending, and for good once it has failed.
#[component]
pub fn Loading(failure: Option<String>) -> Element {
    rsx! {
        div { class: "loading",
            span { class: "loading-spinner" }
            p { "Loading..." }
            if let Some(reason) = failure {
                p { class: "loading-error", "Could not load the analysis: {reason}" }
            }
        }
    }
}
