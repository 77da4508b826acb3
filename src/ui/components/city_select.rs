use dioxus::prelude::*;

use crate::domain::CityOption;

#[component]
pub fn CitySelect(
    options: Vec<CityOption>,
    selected: String,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        label { class: "city-select",
            span { class: "city-select-label", "City" }
            select {
                value: "{selected}",
                onchange: move |evt: FormEvent| on_change.call(evt.value()),
                for city in options {
                    option {
                        key: "{city.key}",
                        value: "{city.key}",
                        selected: city.key == selected,
                        "{city.label}"
                    }
                }
            }
        }
    }
}
