use dioxus::prelude::*;
use tracing::{error, info};

use crate::{
    domain::{LoadState, SelectedCity},
    infra::loader::{AnalysisLoader, DataSource},
    ui::{
        components::toast::{push_toast, Toast, ToastKind, ToastMessage},
        pages::DashboardPage,
        shell::Shell,
    },
    util::{assets, config::load_config, version::APP_NAME},
};

#[component]
pub fn App() -> Element {
    let load_state = use_signal(LoadState::default);
    use_context_provider(|| load_state);

    let selected_city = use_signal(SelectedCity::default);
    use_context_provider(|| selected_city);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    // Runs once: nothing read inside subscribes the resource to a signal.
    let _analysis = use_resource(move || async move {
        load_analysis(load_state, selected_city, toasts).await;
    });

    rsx! {
        document::Title { "{APP_NAME}" }
        document::Style { "{assets::main_css()}" }
        Shell { DashboardPage {} }
        Toast {}
    }
}

async fn load_analysis(
    mut load_state: Signal<LoadState>,
    mut selected_city: Signal<SelectedCity>,
    toasts: Signal<Vec<ToastMessage>>,
) {
    let state = match build_loader() {
        Ok(loader) => loader.load().await,
        Err(reason) => LoadState::Failed(reason),
    };

    if let Some(document) = state.document() {
        let replacement = selected_city.peek().reconcile(document);
        if let Some(next) = replacement {
            info!(
                "selected city {} not in analysis; switching to {}",
                selected_city.peek().key(),
                next.key()
            );
            selected_city.set(next);
        }
        push_toast(
            toasts,
            ToastKind::Success,
            format!("Loaded analysis for {} cities.", document.len()),
        );
    } else if let Some(reason) = state.failure() {
        push_toast(
            toasts,
            ToastKind::Error,
            format!("Failed to load analysis: {reason}"),
        );
    }

    load_state.set(state);
}

fn build_loader() -> Result<AnalysisLoader, String> {
    let config = load_config();
    let source = DataSource::parse(&config.data_source).map_err(|err| {
        error!("invalid data source {:?}: {err}", config.data_source);
        err.to_string()
    })?;
    let loader = AnalysisLoader::new(source).map_err(|err| {
        error!("failed to initialise analysis loader: {err}");
        err.to_string()
    })?;
    info!("loading analysis from {}", loader.source());
    Ok(loader)
}
