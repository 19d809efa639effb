use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalysisPhase {
    #[default]
    Pending,
    Running,
    Successful,
    Failed,
    Error,
    Inconclusive,
}

impl AnalysisPhase {
    /// Legend order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Running,
        Self::Successful,
        Self::Failed,
        Self::Error,
        Self::Inconclusive,
    ];

    /// Labels that aren't phase names, including an empty one, classify as `Pending`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Running" => Self::Running,
            "Successful" => Self::Successful,
            "Failed" => Self::Failed,
            "Error" => Self::Error,
            "Inconclusive" => Self::Inconclusive,
            _ => Self::Pending,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Successful => "Successful",
            Self::Failed => "Failed",
            Self::Error => "Error",
            Self::Inconclusive => "Inconclusive",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Pending => "gray",
            Self::Running => "blue",
            Self::Successful => "green",
            Self::Failed | Self::Error => "red",
            Self::Inconclusive => "orange",
        }
    }

    pub fn is_completed(self) -> bool {
        !matches!(self, Self::Pending | Self::Running)
    }
}

impl fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Css modifier of an analysis run button.
pub fn run_status_class(status: &str) -> &'static str {
    match AnalysisPhase::from_label(status) {
        AnalysisPhase::Running => "analysis--pending",
        AnalysisPhase::Successful => "analysis--success",
        _ => "analysis--failure",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_round_trip_through_names() {
        for phase in AnalysisPhase::ALL {
            assert_eq!(AnalysisPhase::from_label(phase.name()), phase);
        }
    }

    #[test]
    fn unknown_labels_are_pending() {
        for label in ["", "successful", "Unknown", " Running", "Failed\n"] {
            assert_eq!(AnalysisPhase::from_label(label), AnalysisPhase::Pending);
        }
    }

    #[test]
    fn every_phase_has_a_color() {
        let colors = AnalysisPhase::ALL.map(AnalysisPhase::color);
        assert_eq!(colors, ["gray", "blue", "green", "red", "red", "orange"]);
    }

    #[test]
    fn run_classes() {
        assert_eq!(run_status_class("Running"), "analysis--pending");
        assert_eq!(run_status_class("Successful"), "analysis--success");
        assert_eq!(run_status_class("Failed"), "analysis--failure");
        assert_eq!(run_status_class("Pending"), "analysis--failure");
        assert_eq!(run_status_class(""), "analysis--failure");
    }
}
