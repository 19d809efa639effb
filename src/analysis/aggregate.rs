use std::collections::HashMap;

use tracing::warn;

use super::phase::AnalysisPhase;
use super::types::{DataPoint, MeasurementRecord, StartedAt, TimeSeries};

/// Time series keyed by metric name, iterated in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesMap {
    series: Vec<TimeSeries>,
    index: HashMap<String, usize>,
}

impl SeriesMap {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn as_slice(&self) -> &[TimeSeries] {
        &self.series
    }

    fn push(&mut self, name: &str, point: DataPoint) {
        if let Some(&position) = self.index.get(name) {
            self.series[position].points.push(point);
            return;
        }

        self.index.insert(name.to_string(), self.series.len());
        self.series.push(TimeSeries {
            name: name.to_string(),
            points: vec![point],
        });
    }
}

/// Groups measurement records by metric, keeping record order within each series.
pub fn aggregate(records: &[MeasurementRecord]) -> SeriesMap {
    let mut series = SeriesMap::default();

    for record in records {
        let timestamp = record
            .started_at
            .as_ref()
            .and_then(StartedAt::timestamp_millis);
        if timestamp.is_none() {
            warn!(
                metric = record.metric_name,
                started_at = ?record.started_at,
                "measurement without a valid start time"
            );
        }

        let value = record
            .value
            .as_ref()
            .map_or(f64::NAN, |value| value.as_f64());

        series.push(
            &record.metric_name,
            DataPoint {
                timestamp,
                value,
                phase: AnalysisPhase::from_label(&record.status),
            },
        );
    }

    series
}
