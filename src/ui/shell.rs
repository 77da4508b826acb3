use dioxus::prelude::*;
use time::macros::format_description;

use crate::domain::LoadState;
use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    let load_state = use_context::<Signal<LoadState>>();
    let report_time = load_state.with(|state| {
        let format = format_description!("[day] [month repr:short] [year], [hour]:[minute]");
        state
            .document()
            .and_then(|document| document.report_time())
            .and_then(|time| time.format(format).ok())
    });

    rsx! {
        div { class: "container",
            header { class: "header",
                h1 { class: "title", "{APP_NAME}" }
                if let Some(generated) = report_time {
                    p { class: "subtitle", "Report generated {generated}" }
                }
            }
            main {
                {children}
            }
            footer { class: "footer", "{version_label()}" }
        }
    }
}
