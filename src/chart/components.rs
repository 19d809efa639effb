use std::{cell::RefCell, rc::Rc};

use leptos::{
    component, create_effect, create_memo, create_signal, view, For, IntoView, Signal, SignalGet,
    SignalSet, SignalWith,
};
use tracing::error;

use crate::analysis::aggregate::SeriesMap;
use crate::analysis::phase::AnalysisPhase;
use crate::datetime::format_tick;
use crate::use_canvas::{use_canvas, UseCanvasReturn};

use super::canvas::{plot_frame, x_to_time, ChartCanvas};
use super::spec::{render, ChartSpec};

const BAND_HEIGHT: usize = 140;
const CHROME_HEIGHT: usize = 72;

#[derive(Debug, Clone, PartialEq)]
struct HoveredPoint {
    series: String,
    value: f64,
    phase: AnalysisPhase,
}

#[component]
pub fn MetricResultChart(#[prop(into)] title: String, series: Signal<SeriesMap>) -> impl IntoView {
    let UseCanvasReturn {
        node_ref,
        dpr,
        width,
        height,
        actual_width,
        actual_height,
        hover_x,
        on_mousemove,
        set_hover_x,
    } = use_canvas();

    let chart = create_memo(move |_| series.with(|series| render(&title, series.as_slice())));
    let is_empty = move || chart.with(ChartSpec::is_empty);
    let css_height = move || {
        let bands = chart.with(|chart| chart.bands.len());
        format!("{}px", bands * BAND_HEIGHT + CHROME_HEIGHT)
    };

    let (canvas, set_canvas) = create_signal::<Option<Rc<RefCell<ChartCanvas>>>>(None);

    create_effect(move |_| {
        let Some(node) = node_ref.get() else {
            return;
        };

        match ChartCanvas::try_new(&node) {
            Ok(chart_canvas) => set_canvas.set(Some(Rc::new(RefCell::new(chart_canvas)))),
            Err(err) => error!("chart canvas failed to initialize: {err}"),
        }
    });

    create_effect(move |_| {
        actual_width.track();
        actual_height.track();

        let Some(canvas) = canvas.get() else {
            return;
        };

        chart.with(|chart| {
            canvas
                .borrow_mut()
                .render(chart, width.get(), height.get(), hover_x.get(), dpr.get());
        });
    });

    let hovered_time = create_memo(move |_| {
        let x = hover_x.get()?;
        let plot = plot_frame(width.get(), height.get());
        if x < plot.left || x > plot.left + plot.width {
            return None;
        }

        let domain = chart.with(ChartSpec::time_domain)?;
        Some(x_to_time(x, domain, plot))
    });

    let hovered_points = create_memo(move |_| {
        let Some(timestamp) = hovered_time.get() else {
            return Vec::new();
        };

        chart.with(|chart| {
            chart
                .bands
                .iter()
                .filter_map(|band| {
                    band.closest_point(timestamp).map(|point| HoveredPoint {
                        series: band.name.clone(),
                        value: point.value,
                        phase: point.phase,
                    })
                })
                .collect()
        })
    });

    view! {
        <div class="relative w-full" class:hidden=is_empty>
            <canvas
                class="w-full"
                node_ref=node_ref
                width=actual_width
                height=actual_height
                style:width="100%"
                style:height=css_height
                on:mousemove=on_mousemove
                on:mouseleave=move |_| set_hover_x.set(None)
            />
            <article
                class="absolute flex flex-col"
                class:hidden=move || hovered_time.get().is_none()
                style:left=move || format!("{}px", hover_x.get().unwrap_or_default() + 8.0)
                style:top="8px"
            >
                <div>{move || hovered_time.get().map(format_tick).unwrap_or_default()}</div>
                <For
                    each=move || hovered_points.get()
                    key=|point| point.series.clone()
                    let:point
                >
                    <div>
                        {point.series} ": " {point.value} " ("
                        <span style:color=point.phase.color()>{point.phase.name()}</span> ")"
                    </div>
                </For>
            </article>
        </div>
    }
}
