use leptos::{component, view, IntoView};

#[component]
pub fn Spinner() -> impl IntoView {
    view! { <span aria-busy="true">"Loading battery data..."</span> }
}

/// Small coloured label, `class` picks the severity colour.
#[component]
pub fn Pill(class: &'static str, #[prop(into)] label: String) -> impl IntoView {
    view! { <span class=format!("pill {class}")>{label}</span> }
}
