use std::collections::BTreeMap;

use super::types::{AnalysisRunInfo, ExperimentInfo, ReplicaSetInfo, RolloutInfo};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Revision {
    pub number: i64,
    pub replica_sets: Vec<ReplicaSetInfo>,
    pub experiments: Vec<ExperimentInfo>,
    pub analysis_runs: Vec<AnalysisRunInfo>,
}

impl Revision {
    pub fn has_pods(&self) -> bool {
        self.replica_sets
            .iter()
            .any(|replica_set| !replica_set.pods.is_empty())
    }
}

/// Groups replica sets, experiments and analysis runs by revision, newest first.
pub fn group_revisions(rollout: &RolloutInfo) -> Vec<Revision> {
    let mut revisions = BTreeMap::<i64, Revision>::new();

    for replica_set in &rollout.replica_sets {
        revision_entry(&mut revisions, replica_set.revision)
            .replica_sets
            .push(replica_set.clone());
    }
    for experiment in &rollout.experiments {
        revision_entry(&mut revisions, experiment.revision)
            .experiments
            .push(experiment.clone());
    }
    for analysis_run in &rollout.analysis_runs {
        revision_entry(&mut revisions, analysis_run.revision)
            .analysis_runs
            .push(analysis_run.clone());
    }

    revisions.into_values().rev().collect()
}

fn revision_entry(revisions: &mut BTreeMap<i64, Revision>, number: i64) -> &mut Revision {
    revisions.entry(number).or_insert_with(|| Revision {
        number,
        ..Revision::default()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageTag {
    Canary,
    Stable,
    Active,
    Preview,
}

impl ImageTag {
    pub fn name(self) -> &'static str {
        match self {
            Self::Canary => "canary",
            Self::Stable => "stable",
            Self::Active => "active",
            Self::Preview => "preview",
        }
    }

    fn of(replica_set: &ReplicaSetInfo) -> Vec<Self> {
        [
            (replica_set.canary, Self::Canary),
            (replica_set.stable, Self::Stable),
            (replica_set.active, Self::Active),
            (replica_set.preview, Self::Preview),
        ]
        .into_iter()
        .filter_map(|(set, tag)| set.then_some(tag))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub image: String,
    pub tags: Vec<ImageTag>,
}

impl ImageInfo {
    pub fn css_class(&self) -> String {
        let color = self.tags.first().map_or("unknown", |tag| tag.name());
        format!("image image--{color}")
    }
}

/// One entry per image with the tags of every replica set running it, untagged images last.
pub fn parse_images(replica_sets: &[ReplicaSetInfo]) -> Vec<ImageInfo> {
    let mut images: Vec<ImageInfo> = Vec::new();

    for replica_set in replica_sets {
        let tags = ImageTag::of(replica_set);
        for image in &replica_set.images {
            let position = images
                .iter()
                .position(|info| &info.image == image)
                .unwrap_or_else(|| {
                    images.push(ImageInfo {
                        image: image.clone(),
                        tags: Vec::new(),
                    });
                    images.len() - 1
                });

            let info = &mut images[position];
            for tag in &tags {
                if !info.tags.contains(tag) {
                    info.tags.push(*tag);
                }
            }
        }
    }

    images.sort_by_key(|info| info.tags.is_empty());
    images
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rollout::types::PodInfo;

    fn replica_set(revision: i64, images: &[&str]) -> ReplicaSetInfo {
        ReplicaSetInfo {
            revision,
            images: images.iter().map(ToString::to_string).collect(),
            ..ReplicaSetInfo::default()
        }
    }

    #[test]
    fn groups_by_revision_newest_first() {
        let rollout = RolloutInfo {
            replica_sets: vec![replica_set(1, &[]), replica_set(3, &[]), replica_set(2, &[])],
            analysis_runs: vec![AnalysisRunInfo {
                revision: 3,
                ..AnalysisRunInfo::default()
            }],
            experiments: vec![ExperimentInfo {
                revision: 4,
                ..ExperimentInfo::default()
            }],
            ..RolloutInfo::default()
        };

        let revisions = group_revisions(&rollout);
        let numbers = revisions.iter().map(|revision| revision.number).collect::<Vec<_>>();
        assert_eq!(numbers, [4, 3, 2, 1]);
        assert_eq!(revisions[0].experiments.len(), 1);
        assert!(revisions[0].replica_sets.is_empty());
        assert_eq!(revisions[1].analysis_runs.len(), 1);
        assert_eq!(revisions[1].replica_sets.len(), 1);
    }

    #[test]
    fn no_resources_no_revisions() {
        assert!(group_revisions(&RolloutInfo::default()).is_empty());
    }

    #[test]
    fn pods_are_detected() {
        let mut revision = Revision {
            replica_sets: vec![replica_set(1, &[])],
            ..Revision::default()
        };
        assert!(!revision.has_pods());

        revision.replica_sets[0].pods.push(PodInfo::default());
        assert!(revision.has_pods());
    }

    #[test]
    fn merges_tags_and_puts_untagged_images_last() {
        let mut old = replica_set(1, &["demo:yellow"]);
        old.preview = true;
        let untagged = replica_set(2, &["demo:red"]);
        let mut stable = replica_set(3, &["demo:blue"]);
        stable.stable = true;
        stable.active = true;
        let mut canary = replica_set(4, &["demo:blue"]);
        canary.canary = true;
        canary.stable = true;

        let images = parse_images(&[untagged, stable, canary, old]);

        assert_eq!(
            images,
            vec![
                ImageInfo {
                    image: "demo:blue".to_string(),
                    tags: vec![ImageTag::Stable, ImageTag::Active, ImageTag::Canary],
                },
                ImageInfo {
                    image: "demo:yellow".to_string(),
                    tags: vec![ImageTag::Preview],
                },
                ImageInfo {
                    image: "demo:red".to_string(),
                    tags: Vec::new(),
                },
            ]
        );
        assert_eq!(images[0].css_class(), "image image--stable");
        assert_eq!(images[2].css_class(), "image image--unknown");
    }
}
