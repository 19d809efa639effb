use leptos::{
    component, create_memo, create_resource, create_signal, view, For, IntoView, Show, Signal,
    SignalGet, SignalUpdate, SignalWith,
};
use tracing::{debug, error};

use crate::chart::components::MetricResultChart;
use crate::components::{Card, Spinner};
use crate::datetime::{display_datetime, format_timestamp};
use crate::request::get_custom_object;
use crate::rollout::browser::RunSelection;
use crate::rollout::types::AnalysisRunInfo;

use super::phase::{run_status_class, AnalysisPhase};
use super::types::{AnalysisRun, JobInfo, MetricInfo};

const GROUP: &str = "argoproj.io";
const VERSION: &str = "v1alpha1";
const PLURAL: &str = "analysisruns";

#[component]
pub fn AnalysisRunWidget(analysis_runs: Vec<AnalysisRunInfo>) -> impl IntoView {
    let (selection, set_selection) = create_signal(RunSelection::default());

    let series = create_memo(move |_| {
        let series = selection.with(RunSelection::series);
        debug!(series = series.len(), "aggregated measurements");
        series
    });
    let selected = move || selection.with(|selection| selection.run().cloned());

    view! {
        <div class="analysis">
            <div class="analysis-header">"Analysis Runs"</div>
            <div class="analysis__runs flex">
                <For
                    each=move || analysis_runs.clone()
                    key=|run| (run.object_meta.uid, run.object_meta.name.clone())
                    let:run
                >
                    <AnalysisRunButton
                        run=run.clone()
                        selected=Signal::derive({
                            let name = run.object_meta.name.clone();
                            move || selection.with(|selection| selection.is_selected(&name))
                        })
                        on_click=move || {
                            debug!(run = run.object_meta.name, "analysis run clicked");
                            set_selection.update(|selection| {
                                *selection = std::mem::take(selection).toggle(run.clone());
                            });
                        }
                    />
                </For>
            </div>
            {move || {
                selected()
                    .map(|run| {
                        let chart = (!run.non_job_info.is_empty()).then(|| {
                            view! {
                                <MetricResultChart
                                    title=run.object_meta.name.clone()
                                    series=series.into()
                                />
                            }
                        });
                        view! {
                            <AnalysisRunSummary run=run.clone() />
                            {chart}
                            <JobList jobs=run.jobs.clone() />
                            <MetricCards metrics=run.metrics.clone() />
                            <AnalysisRunDetails
                                namespace=run.object_meta.namespace.clone()
                                name=run.object_meta.name.clone()
                            />
                        }
                    })
            }}
        </div>
    }
}

#[component]
fn AnalysisRunButton(
    run: AnalysisRunInfo,
    selected: Signal<bool>,
    on_click: impl Fn() + 'static,
) -> impl IntoView {
    let tooltip = format!(
        "Name: {}\nCreated at: {}\nStatus: {}",
        run.object_meta.name,
        format_timestamp(run.object_meta.creation_timestamp.as_deref()),
        run.status,
    );
    let class = format!("analysis__runs-action {}", run_status_class(&run.status));

    view! {
        <div class=class data-tooltip=tooltip>
            <button
                class:outline=move || !selected.get()
                on:click=move |_| on_click()
            >
                {run.short_name()}
            </button>
        </div>
    }
}

#[component]
fn AnalysisRunSummary(run: AnalysisRunInfo) -> impl IntoView {
    let phase = AnalysisPhase::from_label(&run.status);

    view! {
        <div class="analysis__run__summary flex">
            <span style:color=phase.color()>{phase.name()}</span>
            {run
                .counters()
                .into_iter()
                .map(|(label, count)| {
                    let color = AnalysisPhase::from_label(label).color();
                    view! {
                        <span class="analysis__run__counter">
                            {label} ": " <strong style:color=color>{count}</strong>
                        </span>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

#[component]
fn JobList(jobs: Vec<JobInfo>) -> impl IntoView {
    if jobs.is_empty() {
        return ().into_view();
    }

    view! {
        <div class="analysis__run__jobs">
            <table class="striped">
                <thead>
                    <tr>
                        <th scope="col">"Job"</th>
                        <th scope="col">"Metric"</th>
                        <th scope="col">"Status"</th>
                        <th scope="col">"Started at"</th>
                    </tr>
                </thead>
                <tbody>
                    {jobs
                        .into_iter()
                        .map(|job| {
                            let phase = AnalysisPhase::from_label(&job.status);
                            let started_at = job
                                .started_at
                                .as_ref()
                                .and_then(|started_at| started_at.timestamp_millis())
                                .and_then(chrono::DateTime::from_timestamp_millis)
                                .map_or_else(|| "Never".to_string(), display_datetime);
                            view! {
                                <tr>
                                    <td>{job.object_meta.name}</td>
                                    <td>{job.metric_name}</td>
                                    <td style:color=phase.color()>{job.status}</td>
                                    <td>{started_at}</td>
                                </tr>
                            }
                        })
                        .collect::<Vec<_>>()}
                </tbody>
            </table>
        </div>
    }
    .into_view()
}

#[component]
fn MetricCards(metrics: Vec<MetricInfo>) -> impl IntoView {
    view! {
        <div class="analysis__run__metrics__cards grid">
            {metrics
                .into_iter()
                .map(|metric| {
                    let descriptions = metric.descriptions();
                    view! {
                        <Card title=metric.name>
                            <dl class="analysis__run__metrics__cards__metric">
                                {descriptions
                                    .into_iter()
                                    .map(|(label, value)| {
                                        view! {
                                            <dt>{label}</dt>
                                            <dd>{value}</dd>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </dl>
                        </Card>
                    }
                })
                .collect::<Vec<_>>()}
        </div>
    }
}

/// Live view of the analysis run resource. A failed fetch is logged and keeps the spinner up.
#[component]
pub fn AnalysisRunDetails(namespace: String, name: String) -> impl IntoView {
    let details = create_resource(
        move || (namespace.clone(), name.clone()),
        |(namespace, name)| async move {
            match get_custom_object::<AnalysisRun>(GROUP, VERSION, &namespace, PLURAL, &name).await
            {
                Ok(run) => Some(run),
                Err(err) => {
                    error!(namespace, name, "analysis run fetch error: {err}");
                    None
                }
            }
        },
    );

    view! {
        <div class="analysis">
            <div class="analysis-header">"Analysis Run Metric Results"</div>
            {move || match details.get().flatten() {
                None => view! { <Spinner /> }.into_view(),
                Some(run) => view! { <AnalysisRunStatusView run /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn AnalysisRunStatusView(run: AnalysisRun) -> impl IntoView {
    let phase = run.phase();
    let message = run
        .status
        .as_ref()
        .and_then(|status| status.message.clone())
        .unwrap_or_default();
    let inconclusive = run.inconclusive();
    let successful = run.successful();
    let results = run.metric_results().to_vec();

    view! {
        <div class="analysis__runs">
            <div class="analysis__status">
                <span>"Status: "</span>
                <strong style:color=phase.color()>{phase.name()}</strong>
                <Show when=move || !phase.is_completed()>
                    " " <span aria-busy="true"></span>
                </Show>
            </div>
            <div class="analysis__message" class:hidden=message.is_empty()>
                {message.clone()}
            </div>
            <div class="analysis__inconclusive">
                <span>"Inconclusive Measurements: "</span>
                {inconclusive}
            </div>
            <div class="analysis__successful">
                <span>"Successful Measurements: "</span>
                {successful}
            </div>
            <table class="striped">
                <thead>
                    <tr>
                        <th scope="col">"Metric"</th>
                        <th scope="col">"Phase"</th>
                        <th scope="col">"Count"</th>
                        <th scope="col">"Successful"</th>
                        <th scope="col">"Failed"</th>
                        <th scope="col">"Inconclusive"</th>
                        <th scope="col">"Error"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || results.clone()
                        key=|result| result.name.clone()
                        let:result
                    >
                        <tr>
                            <td>{result.name}</td>
                            <td style:color=AnalysisPhase::from_label(&result.phase).color()>
                                {result.phase}
                            </td>
                            <td>{result.count}</td>
                            <td>{result.successful}</td>
                            <td>{result.failed}</td>
                            <td>{result.inconclusive}</td>
                            <td>{result.error}</td>
                        </tr>
                    </For>
                </tbody>
            </table>
        </div>
    }
}
