use leptos::{component, view, Children, IntoView};

#[component]
pub fn Spinner() -> impl IntoView {
    view! { <span aria-busy="true">"Loading..."</span> }
}

/// Labelled row of small chips, one per item.
#[component]
pub fn InfoItemRow(
    #[prop(into)] label: String,
    #[prop(into, optional)] label_class: String,
    items: Vec<String>,
) -> impl IntoView {
    view! {
        <div class="info-item-row flex items-center">
            <div class=format!("info-item-row__label {label_class}")>{label}</div>
            <div class="info-item-row__items flex">
                {items
                    .into_iter()
                    .map(|item| view! { <kbd class="info-item">{item}</kbd> })
                    .collect::<Vec<_>>()}
            </div>
        </div>
    }
}

#[component]
pub fn Card(#[prop(into)] title: String, children: Children) -> impl IntoView {
    view! {
        <article class="card">
            <header>
                <strong>{title}</strong>
            </header>
            {children()}
        </article>
    }
}
