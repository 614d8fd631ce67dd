//! Ordering policy: how jobs are grouped and sorted before packing.

use crate::classify::classify;
use booklet_core::{Job, JobCategory};
use serde::{Deserialize, Serialize};

const CATEGORY_ORDER: [JobCategory; 3] = [
    JobCategory::Shunting,
    JobCategory::Transport,
    JobCategory::Unknown,
];

/// How jobs are pooled for row packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderingMode {
    /// One packing pool per category, each sorted by destination.
    #[default]
    Grouped,
    /// A single pool sorted by `(category, destination)`.
    Ungrouped,
}

impl OrderingMode {
    /// Mode selected by the `group_by_category` setting.
    pub fn from_group_by_category(group_by_category: bool) -> Self {
        if group_by_category {
            OrderingMode::Grouped
        } else {
            OrderingMode::Ungrouped
        }
    }
}

/// Split `jobs` into ordered packing groups.
///
/// Empty groups are omitted. Sorting is stable, so jobs with equal keys keep
/// their input order.
pub fn order_jobs<'a>(jobs: &[&'a Job], mode: OrderingMode) -> Vec<Vec<&'a Job>> {
    match mode {
        OrderingMode::Grouped => CATEGORY_ORDER
            .iter()
            .filter_map(|category| {
                let mut group: Vec<&Job> = jobs
                    .iter()
                    .copied()
                    .filter(|job| classify(job.job_type) == *category)
                    .collect();
                if group.is_empty() {
                    return None;
                }
                group.sort_by(|a, b| a.destination.cmp(&b.destination));
                Some(group)
            })
            .collect(),
        OrderingMode::Ungrouped => {
            if jobs.is_empty() {
                return Vec::new();
            }
            let mut group = jobs.to_vec();
            group.sort_by(|a, b| {
                classify(a.job_type)
                    .cmp(&classify(b.job_type))
                    .then_with(|| a.destination.cmp(&b.destination))
            });
            vec![group]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booklet_core::JobType;

    fn ids(group: &[&Job]) -> Vec<String> {
        group.iter().map(|job| job.id.0.clone()).collect()
    }

    fn sample() -> Vec<Job> {
        vec![
            Job::new("t1", JobType::Transport, "MF"),
            Job::new("o1", JobType::Other, "AA"),
            Job::new("s1", JobType::ShuntingLoad, "SM"),
            Job::new("t2", JobType::EmptyHaul, "CSW"),
            Job::new("s2", JobType::ShuntingUnload, "FF"),
        ]
    }

    #[test]
    fn grouped_mode_splits_by_category_in_layout_order() {
        let jobs = sample();
        let refs: Vec<&Job> = jobs.iter().collect();
        let groups = order_jobs(&refs, OrderingMode::Grouped);

        assert_eq!(groups.len(), 3);
        assert_eq!(ids(&groups[0]), vec!["s2", "s1"]);
        assert_eq!(ids(&groups[1]), vec!["t2", "t1"]);
        assert_eq!(ids(&groups[2]), vec!["o1"]);
    }

    #[test]
    fn grouped_mode_skips_empty_categories() {
        let jobs = vec![Job::new("t1", JobType::Transport, "MF")];
        let refs: Vec<&Job> = jobs.iter().collect();
        let groups = order_jobs(&refs, OrderingMode::Grouped);
        assert_eq!(groups.len(), 1);
        assert_eq!(ids(&groups[0]), vec!["t1"]);
    }

    #[test]
    fn ungrouped_mode_uses_single_pool_with_category_first() {
        let jobs = sample();
        let refs: Vec<&Job> = jobs.iter().collect();
        let groups = order_jobs(&refs, OrderingMode::Ungrouped);

        assert_eq!(groups.len(), 1);
        assert_eq!(ids(&groups[0]), vec!["s2", "s1", "t2", "t1", "o1"]);
    }

    #[test]
    fn equal_destinations_keep_input_order() {
        let jobs = vec![
            Job::new("b", JobType::Transport, "HB"),
            Job::new("a", JobType::Transport, "HB"),
            Job::new("c", JobType::Transport, "GF"),
        ];
        let refs: Vec<&Job> = jobs.iter().collect();
        for mode in [OrderingMode::Grouped, OrderingMode::Ungrouped] {
            let groups = order_jobs(&refs, mode);
            assert_eq!(ids(&groups[0]), vec!["c", "b", "a"]);
        }
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(order_jobs(&[], OrderingMode::Grouped).is_empty());
        assert!(order_jobs(&[], OrderingMode::Ungrouped).is_empty());
    }

    #[test]
    fn mode_follows_setting() {
        assert_eq!(OrderingMode::from_group_by_category(true), OrderingMode::Grouped);
        assert_eq!(
            OrderingMode::from_group_by_category(false),
            OrderingMode::Ungrouped
        );
    }
}
