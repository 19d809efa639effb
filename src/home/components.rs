use chrono::Utc;
use leptos::{component, view, For, IntoView, SignalGet};

use crate::components::Spinner;
use crate::config::DEFAULT_NAMESPACE;
use crate::datetime::format_age;
use crate::request::{create_request, rollouts_url};
use crate::rollout::types::{RolloutInfo, RolloutInfoList};

#[component]
pub fn Home() -> impl IntoView {
    let rollouts = create_request::<RolloutInfoList>(|| rollouts_url(DEFAULT_NAMESPACE));

    view! {
        <div class="overflow-auto">
            <table class="striped">
                <thead>
                    <tr>
                        <th scope="col">"Name"</th>
                        <th scope="col">"Status"</th>
                        <th scope="col">"Strategy"</th>
                        <th scope="col">"Age"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        if rollouts.loading().get() {
                            view! { <Spinner /> }.into_view()
                        } else {
                            let rollouts = rollouts.get().unwrap_or_default().rollouts;
                            view! {
                                <For
                                    each=move || rollouts.clone()
                                    key=|rollout| (rollout.object_meta.uid, rollout.object_meta.name.clone())
                                    let:rollout
                                >
                                    <RolloutRow rollout=rollout></RolloutRow>
                                </For>
                            }
                                .into_view()
                        }
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[component]
pub fn RolloutRow(rollout: RolloutInfo) -> impl IntoView {
    let age = rollout
        .object_meta
        .created_at()
        .map_or_else(|| "-".to_string(), |created_at| format_age(created_at, Utc::now()));
    let href = format!(
        "/rollout/{}/{}",
        rollout.object_meta.namespace, rollout.object_meta.name
    );

    view! {
        <tr>
            <th scope="row">
                <a href=href>{rollout.object_meta.name}</a>
            </th>
            <td>{rollout.status}</td>
            <td>{rollout.strategy}</td>
            <td>{age}</td>
        </tr>
    }
}
