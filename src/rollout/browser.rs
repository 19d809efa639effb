use crate::analysis::aggregate::{aggregate, SeriesMap};

use super::types::AnalysisRunInfo;

/// Analysis run inspected below the run buttons of a revision.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RunSelection {
    #[default]
    None,
    Selected(AnalysisRunInfo),
}

impl RunSelection {
    /// Clicking the selected run clears the selection, any other run replaces it.
    #[must_use]
    pub fn toggle(self, run: AnalysisRunInfo) -> Self {
        match self {
            Self::Selected(selected) if selected.object_meta.name == run.object_meta.name => {
                Self::None
            }
            _ => Self::Selected(run),
        }
    }

    pub fn run(&self) -> Option<&AnalysisRunInfo> {
        match self {
            Self::None => None,
            Self::Selected(run) => Some(run),
        }
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.run().is_some_and(|run| run.object_meta.name == name)
    }

    /// Series of the selected run, rebuilt from its measurements.
    pub fn series(&self) -> SeriesMap {
        self.run()
            .map(|run| aggregate(&run.non_job_info))
            .unwrap_or_default()
    }
}

/// Collapse state of a revision card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevisionPanel {
    pub collapsed: bool,
    pub collapsible: bool,
}

impl RevisionPanel {
    pub fn new(init_collapsed: bool, has_pods: bool) -> Self {
        Self {
            collapsed: init_collapsed,
            collapsible: has_pods,
        }
    }

    /// Only panels with pods show the toggle.
    #[must_use]
    pub fn toggle(self) -> Self {
        if !self.collapsible {
            return self;
        }

        Self {
            collapsed: !self.collapsed,
            ..self
        }
    }
}
