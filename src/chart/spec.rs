use crate::analysis::phase::AnalysisPhase;
use crate::analysis::types::TimeSeries;

pub const LEGEND_TITLE: &str = "Measurement Status";

pub const POINT_SIZE: f64 = 3.0;
pub const LEGEND_MARKER_RADIUS: f64 = 5.0;

/// Relative coordinates in the plot area, `(0, 0)` being the top left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub start: (f64, f64),
    pub end: (f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyledPoint {
    pub timestamp: Option<i64>,
    pub value: f64,
    pub phase: AnalysisPhase,
    pub color: &'static str,
}

impl StyledPoint {
    /// Time and value when the point can be placed, `None` for gaps.
    pub fn position(&self) -> Option<(i64, f64)> {
        let timestamp = self.timestamp?;
        self.value.is_finite().then_some((timestamp, self.value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub name: String,
    pub region: Region,
    pub show_x_axis: bool,
    pub points: Vec<StyledPoint>,
}

impl Band {
    pub fn time_domain(&self) -> Option<(i64, i64)> {
        let mut timestamps = self.points.iter().filter_map(|point| point.timestamp);
        let first = timestamps.next()?;
        Some(timestamps.fold((first, first), |(min, max), timestamp| {
            (min.min(timestamp), max.max(timestamp))
        }))
    }

    /// Value range over the finite values, widened when flat so it can be scaled.
    pub fn value_domain(&self) -> Option<(f64, f64)> {
        let (min, max) = self
            .points
            .iter()
            .map(|point| point.value)
            .filter(|value| value.is_finite())
            .fold(None, |domain, value| match domain {
                None => Some((value, value)),
                Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
            })?;

        if max - min <= f64::EPSILON * f64::max(min.abs(), max.abs()) {
            return Some((min - 1.0, max + 1.0));
        }

        Some((min, max))
    }

    /// Closest point in time, ignoring gaps.
    pub fn closest_point(&self, timestamp: i64) -> Option<&StyledPoint> {
        self.points
            .iter()
            .filter_map(|point| point.position().map(|(time, _)| (time, point)))
            .min_by_key(|(time, _)| time.abs_diff(timestamp))
            .map(|(_, point)| point)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendItem {
    pub name: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: &'static str,
    pub items: Vec<LegendItem>,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            title: LEGEND_TITLE,
            items: AnalysisPhase::ALL
                .into_iter()
                .map(|phase| LegendItem {
                    name: phase.name(),
                    color: phase.color(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub bands: Vec<Band>,
    pub legend: Legend,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Time range shared by all bands.
    pub fn time_domain(&self) -> Option<(i64, i64)> {
        self.bands
            .iter()
            .filter_map(Band::time_domain)
            .reduce(|(min, max), (band_min, band_max)| (min.min(band_min), max.max(band_max)))
    }
}

/// Lays out one band per series, stacked from top to bottom.
#[expect(clippy::cast_precision_loss)]
pub fn render(title: &str, series: &[TimeSeries]) -> ChartSpec {
    let count = series.len();

    let bands = series
        .iter()
        .enumerate()
        .map(|(index, series)| Band {
            name: series.name.clone(),
            region: Region {
                start: (0.0, index as f64 / count as f64),
                end: (1.0, (index + 1) as f64 / count as f64),
            },
            show_x_axis: index + 1 == count,
            points: series
                .points
                .iter()
                .map(|point| StyledPoint {
                    timestamp: point.timestamp,
                    value: point.value,
                    phase: point.phase,
                    color: point.phase.color(),
                })
                .collect(),
        })
        .collect();

    ChartSpec {
        title: title.to_string(),
        bands,
        legend: Legend::default(),
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::analysis::types::DataPoint;

    fn series(name: &str, points: &[(Option<i64>, f64, AnalysisPhase)]) -> TimeSeries {
        TimeSeries {
            name: name.to_string(),
            points: points
                .iter()
                .map(|&(timestamp, value, phase)| DataPoint {
                    timestamp,
                    value,
                    phase,
                })
                .collect(),
        }
    }

    #[test]
    fn stacks_three_bands() {
        let chart = render(
            "guestbook-6c5d9b-2-1",
            &[
                series("success-rate", &[(Some(0), 0.9, AnalysisPhase::Successful)]),
                series("latency", &[(Some(0), 120.0, AnalysisPhase::Successful)]),
                series("errors", &[(Some(0), 1.0, AnalysisPhase::Failed)]),
            ],
        );

        assert_eq!(chart.title, "guestbook-6c5d9b-2-1");
        assert_eq!(chart.bands.len(), 3);

        let expected = [(0.0, 1.0 / 3.0), (1.0 / 3.0, 2.0 / 3.0), (2.0 / 3.0, 1.0)];
        for (band, (top, bottom)) in chart.bands.iter().zip(expected) {
            assert!((band.region.start.1 - top).abs() < 1e-9);
            assert!((band.region.end.1 - bottom).abs() < 1e-9);
            assert_eq!(band.region.start.0, 0.0);
            assert_eq!(band.region.end.0, 1.0);
        }

        let x_axes = chart
            .bands
            .iter()
            .map(|band| band.show_x_axis)
            .collect::<Vec<_>>();
        assert_eq!(x_axes, [false, false, true]);
    }

    #[test]
    fn no_series_is_an_empty_chart() {
        let chart = render("empty", &[]);
        assert!(chart.is_empty());
        assert_eq!(chart.time_domain(), None);
        assert_eq!(chart.legend.items.len(), 6);
    }

    #[test]
    fn points_are_colored_by_phase() {
        let chart = render(
            "run",
            &[series(
                "success-rate",
                &[
                    (Some(0), 0.9, AnalysisPhase::Successful),
                    (Some(1), 0.5, AnalysisPhase::Inconclusive),
                    (Some(2), 0.1, AnalysisPhase::Error),
                    (Some(3), 0.0, AnalysisPhase::Pending),
                ],
            )],
        );

        let colors = chart.bands[0]
            .points
            .iter()
            .map(|point| point.color)
            .collect::<Vec<_>>();
        assert_eq!(colors, ["green", "orange", "red", "gray"]);
    }

    #[test]
    fn legend_is_static() {
        let chart = render(
            "run",
            &[series("success-rate", &[(Some(0), 0.9, AnalysisPhase::Successful)])],
        );

        assert_eq!(chart.legend.title, "Measurement Status");
        let names = chart
            .legend
            .items
            .iter()
            .map(|item| item.name)
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            ["Pending", "Running", "Successful", "Failed", "Error", "Inconclusive"]
        );
    }

    #[test]
    fn domains_skip_gaps_and_widen_flat_values() {
        let chart = render(
            "run",
            &[series(
                "latency",
                &[
                    (Some(300), 5.0, AnalysisPhase::Successful),
                    (Some(100), f64::NAN, AnalysisPhase::Error),
                    (Some(200), 5.0, AnalysisPhase::Successful),
                ],
            )],
        );
        let band = &chart.bands[0];

        assert_eq!(band.time_domain(), Some((100, 300)));
        assert_eq!(band.value_domain(), Some((4.0, 6.0)));
        assert_eq!(
            band.closest_point(120).and_then(|point| point.timestamp),
            Some(200)
        );
    }

    #[test]
    fn all_gaps_have_no_value_domain() {
        let chart = render(
            "run",
            &[series("latency", &[(Some(0), f64::NAN, AnalysisPhase::Error)])],
        );
        let band = &chart.bands[0];

        assert_eq!(band.value_domain(), None);
        assert!(band.closest_point(0).is_none());
    }

    #[test]
    fn tiny_values_keep_their_spread() {
        let chart = render(
            "run",
            &[series(
                "drift",
                &[
                    (Some(0), 1e-17, AnalysisPhase::Successful),
                    (Some(1), 3e-17, AnalysisPhase::Successful),
                ],
            )],
        );

        assert_eq!(chart.bands[0].value_domain(), Some((1e-17, 3e-17)));
    }

    #[test]
    fn points_without_time_stay_in_their_band() {
        let chart = render(
            "run",
            &[
                series("latency", &[(Some(100), 1.0, AnalysisPhase::Successful)]),
                series("errors", &[(None, 2.0, AnalysisPhase::Failed)]),
            ],
        );

        assert_eq!(chart.bands.len(), 2);
        let errors = &chart.bands[1];
        assert_eq!(errors.points.len(), 1);
        assert_eq!(errors.time_domain(), None);
        assert!(errors.closest_point(100).is_none());
        assert_eq!(chart.time_domain(), Some((100, 100)));
    }
}
