use leptos::ev::MouseEvent;
use leptos::{
    component, create_action, create_effect, create_memo, create_signal, view, For, IntoView,
    Params, SignalGet, SignalUpdate, SignalWith,
};
use leptos_router::{use_params, Params};
use tracing::{error, info};

use crate::analysis::components::AnalysisRunWidget;
use crate::components::{InfoItemRow, Spinner};
use crate::config::DEFAULT_NAMESPACE;
use crate::request::{create_request, rollback, rollout_url};

use super::browser::RevisionPanel;
use super::revisions::{group_revisions, parse_images, ImageInfo, Revision};
use super::types::{ExperimentInfo, ReplicaSetInfo, RolloutInfo};

#[derive(Params, PartialEq)]
struct RolloutParams {
    namespace: Option<String>,
    name: Option<String>,
}

#[component]
pub fn Rollout() -> impl IntoView {
    let params = use_params::<RolloutParams>();
    let key = create_memo(move |_| {
        params.with(|params| {
            let params = params.as_ref().ok();
            let namespace = params
                .and_then(|params| params.namespace.clone())
                .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
            let name = params
                .and_then(|params| params.name.clone())
                .unwrap_or_default();
            (namespace, name)
        })
    });

    let rollout = create_request::<RolloutInfo>(move || {
        key.with(|(namespace, name)| rollout_url(namespace, name))
    });

    let rollback_action = create_action(move |revision: &i64| {
        let revision = *revision;
        let (namespace, name) = key.get();
        async move {
            info!(namespace, name, revision, "rolling back");
            match rollback(&namespace, &name, revision).await {
                Ok(()) => true,
                Err(err) => {
                    error!(namespace, name, revision, "rollback error: {err}");
                    false
                }
            }
        }
    });

    create_effect(move |_| {
        if rollback_action.value().get() == Some(true) {
            rollout.refetch();
        }
    });

    view! {
        <div class="w-full p-4 flex flex-col">
            {move || {
                if rollout.loading().get() {
                    view! { <Spinner /> }.into_view()
                } else {
                    let rollout = rollout.get().unwrap_or_default();
                    view! {
                        <RolloutHeader rollout=rollout.clone() />
                        <Revisions
                            rollout
                            on_rollback=move |revision| rollback_action.dispatch(revision)
                        />
                    }
                        .into_view()
                }
            }}
        </div>
    }
}

#[component]
fn RolloutHeader(rollout: RolloutInfo) -> impl IntoView {
    let canary = (rollout.strategy == "Canary").then(|| {
        view! {
            <p>
                "Step " {rollout.step.clone()} " · Set weight " {rollout.set_weight.clone()}
                " · Actual weight " {rollout.actual_weight.clone()}
            </p>
        }
    });

    view! {
        <hgroup>
            <h2>{rollout.object_meta.name}</h2>
            <p>
                {rollout.object_meta.namespace} " · " <strong>{rollout.status}</strong> " · "
                {rollout.strategy}
            </p>
            {canary}
            <p class:hidden=rollout.message.is_empty()>{rollout.message.clone()}</p>
        </hgroup>
    }
}

#[component]
fn Revisions(rollout: RolloutInfo, on_rollback: impl Fn(i64) + Copy + 'static) -> impl IntoView {
    let revisions = group_revisions(&rollout);
    let current = revisions.first().map(|revision| revision.number);

    view! {
        <For
            each=move || revisions.clone()
            key=|revision| revision.number
            let:revision
        >
            <RevisionWidget
                current={Some(revision.number) == current}
                revision
                on_rollback
            />
        </For>
    }
}

#[component]
fn RevisionWidget(
    revision: Revision,
    current: bool,
    on_rollback: impl Fn(i64) + 'static,
) -> impl IntoView {
    let (panel, set_panel) = create_signal(RevisionPanel::new(!current, revision.has_pods()));
    let images = parse_images(&revision.replica_sets);
    let number = revision.number;

    let confirm_rollback = move |_evt: MouseEvent| {
        let confirmed = leptos::window()
            .confirm_with_message(&format!("Rollback to revision {number}?"))
            .unwrap_or_default();
        if confirmed {
            on_rollback(number);
        }
    };

    let Revision {
        replica_sets,
        experiments,
        analysis_runs,
        ..
    } = revision;

    view! {
        <article class="revision">
            <header class="revision__header flex items-center">
                <strong>"Revision " {number}</strong>
                <div style="margin-left: auto; display: flex; align-items: center">
                    <button
                        class="secondary outline"
                        class:hidden=current
                        on:click=confirm_rollback
                    >
                        "Rollback"
                    </button>
                    <button
                        class="outline revision__header__button"
                        class:hidden=move || !panel.get().collapsible
                        on:click=move |_| set_panel.update(|panel| *panel = panel.toggle())
                    >
                        {move || if panel.get().collapsed { "▼" } else { "▲" }}
                    </button>
                </div>
            </header>
            <div class="revision__images">
                <ImageItems images />
            </div>
            {move || {
                (!panel.get().collapsed)
                    .then(|| {
                        let analysis = (!analysis_runs.is_empty())
                            .then(|| {
                                view! {
                                    <div style="margin-top: 1em">
                                        <AnalysisRunWidget analysis_runs=analysis_runs.clone() />
                                    </div>
                                }
                            });
                        view! {
                            <ReplicaSets replica_sets=replica_sets.clone() />
                            <Experiments experiments=experiments.clone() />
                            {analysis}
                        }
                    })
            }}
        </article>
    }
}

#[component]
fn ImageItems(images: Vec<ImageInfo>) -> impl IntoView {
    images
        .into_iter()
        .map(|image| {
            let label_class = image.css_class();
            let tags = image
                .tags
                .iter()
                .map(|tag| tag.name().to_string())
                .collect::<Vec<_>>();
            view! { <InfoItemRow label=image.image label_class items=tags /> }
        })
        .collect::<Vec<_>>()
}

#[component]
fn ReplicaSets(replica_sets: Vec<ReplicaSetInfo>) -> impl IntoView {
    view! {
        <div class="pods">
            {replica_sets
                .into_iter()
                .filter(|replica_set| !replica_set.pods.is_empty())
                .map(|replica_set| {
                    view! {
                        <div class="pods__container">
                            <div class="pods__header">
                                <span>{replica_set.object_meta.name}</span>
                                " " <small>{replica_set.status}</small>
                                " " <small>{replica_set.available} "/" {replica_set.replicas}</small>
                            </div>
                            <ul class="pods__list">
                                {replica_set
                                    .pods
                                    .into_iter()
                                    .map(|pod| {
                                        let tooltip = format!(
                                            "Status: {} · Ready: {} · Restarts: {}",
                                            pod.status,
                                            pod.ready,
                                            pod.restarts,
                                        );
                                        view! { <li data-tooltip=tooltip>{pod.object_meta.name}</li> }
                                    })
                                    .collect::<Vec<_>>()}
                            </ul>
                        </div>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

#[component]
fn Experiments(experiments: Vec<ExperimentInfo>) -> impl IntoView {
    experiments
        .into_iter()
        .map(|experiment| {
            view! {
                <div class="experiment">
                    "Experiment " <strong>{experiment.object_meta.name}</strong> " "
                    <small>{experiment.status}</small>
                </div>
            }
        })
        .collect::<Vec<_>>()
}
