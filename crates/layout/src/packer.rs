//! Row packer: turns ordered groups into normalized `(u, v)` slots.
//!
//! Each group is cut into rows whose capacity is bounded by a gap ceiling, so
//! booklets never crowd below a legible spacing, and by a rows-per-group
//! budget, so each category stays compact. Rows of all groups are then
//! stacked along `v` across `total_span`.

use booklet_core::Job;
use serde::{Deserialize, Serialize};

/// Tunables for packing and presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Row budget per group used to derive the desired gap.
    pub max_rows_per_group: u32,
    /// Ceiling on the spacing between neighbours in a row.
    pub max_gap: f32,
    /// Fraction of the surface the rows are spread across.
    pub total_span: f32,
    /// Half-width of the uniform jitter added to `u` and `v`.
    pub position_jitter: f32,
    /// Half-width of the uniform yaw jitter in degrees.
    pub rotation_jitter_degrees: f32,
    /// Elevation index of the first record in a batch.
    pub elevation_base: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            max_rows_per_group: 3,
            max_gap: 0.2,
            total_span: 0.8,
            position_jitter: 0.01,
            rotation_jitter_degrees: 2.0,
            elevation_base: 1,
        }
    }
}

/// A job with its packed, pre-jitter coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot<'a> {
    /// Placed job.
    pub job: &'a Job,
    /// Index of the row across all groups.
    pub row: usize,
    /// Position within the row.
    pub u: f32,
    /// Row position.
    pub v: f32,
}

/// Row capacity for a group of `item_count` jobs. Zero for an empty group.
pub fn items_per_row(item_count: usize, params: &LayoutParams) -> usize {
    if item_count == 0 {
        return 0;
    }
    let desired_gap = params.max_rows_per_group as f32 / item_count as f32;
    let gap = desired_gap.min(params.max_gap);
    if gap <= 0.0 {
        return item_count;
    }
    ((1.0 / gap).ceil() as usize).max(1)
}

/// Spacing between neighbours in a row of `n` jobs.
pub fn row_gap(n: usize, max_gap: f32) -> f32 {
    if n > 1 {
        (1.0 / (n - 1) as f32).min(max_gap)
    } else {
        0.0
    }
}

/// Spacing between consecutive rows when `row_count` rows share `total_span`.
pub fn row_spacing(row_count: usize, total_span: f32) -> f32 {
    if row_count > 1 {
        total_span / (row_count - 1) as f32
    } else {
        0.0
    }
}

/// Pack ordered groups into slots, emitted row by row in group order.
pub fn pack_groups<'a>(groups: &[Vec<&'a Job>], params: &LayoutParams) -> Vec<Slot<'a>> {
    let rows: Vec<&[&'a Job]> = groups
        .iter()
        .flat_map(|group| group.chunks(items_per_row(group.len(), params).max(1)))
        .collect();
    let spacing = row_spacing(rows.len(), params.total_span);

    let mut slots = Vec::with_capacity(groups.iter().map(Vec::len).sum());
    for (row_index, row) in rows.iter().enumerate() {
        let gap = row_gap(row.len(), params.max_gap);
        let v = (row_index as f32 * spacing).min(1.0);
        for (i, &job) in row.iter().enumerate() {
            slots.push(Slot {
                job,
                row: row_index,
                u: (i as f32 * gap).min(1.0),
                v,
            });
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use booklet_core::JobType;

    fn params(max_rows_per_group: u32) -> LayoutParams {
        LayoutParams {
            max_rows_per_group,
            ..LayoutParams::default()
        }
    }

    fn jobs(prefix: &str, n: usize) -> Vec<Job> {
        (0..n)
            .map(|i| Job::new(format!("{prefix}{i}"), JobType::Transport, "MF"))
            .collect()
    }

    #[test]
    fn gap_is_clamped_to_ceiling() {
        // 2/3 > 0.2 so the ceiling wins and five booklets fit a row.
        assert_eq!(items_per_row(3, &params(2)), 5);
        assert_eq!(items_per_row(4, &params(2)), 5);
    }

    #[test]
    fn large_groups_shrink_gap_below_ceiling() {
        // 3/30 = 0.1 -> ten per row.
        assert_eq!(items_per_row(30, &params(3)), 10);
        // 3/16 = 0.1875 -> ceil(5.33) = 6.
        assert_eq!(items_per_row(16, &params(3)), 6);
    }

    #[test]
    fn capacity_rounds_up_just_above_whole_number() {
        // 1 / 0.199998 is a hair above 5, so a sixth booklet fits.
        let params = LayoutParams {
            max_rows_per_group: 3,
            max_gap: 0.199998,
            ..LayoutParams::default()
        };
        assert_eq!(items_per_row(11, &params), 6);

        let transport = jobs("t", 11);
        let groups = vec![transport.iter().collect::<Vec<_>>()];
        let last_row = pack_groups(&groups, &params).iter().map(|s| s.row).max();
        assert_eq!(last_row, Some(1));
    }

    #[test]
    fn empty_group_has_no_capacity_and_no_rows() {
        assert_eq!(items_per_row(0, &params(3)), 0);
        let empty: Vec<Vec<&Job>> = vec![Vec::new()];
        assert!(pack_groups(&empty, &params(3)).is_empty());
    }

    #[test]
    fn row_gap_spreads_short_rows_at_ceiling() {
        assert_eq!(row_gap(1, 0.2), 0.0);
        assert_eq!(row_gap(3, 0.2), 0.2);
        assert!((row_gap(11, 0.2) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn single_row_sits_at_zero() {
        assert_eq!(row_spacing(0, 0.8), 0.0);
        assert_eq!(row_spacing(1, 0.8), 0.0);
        assert_eq!(row_spacing(2, 0.8), 0.8);
        assert!((row_spacing(5, 0.8) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn groups_start_on_fresh_rows() {
        let shunting = jobs("s", 3);
        let transport = jobs("t", 4);
        let groups = vec![
            shunting.iter().collect::<Vec<_>>(),
            transport.iter().collect::<Vec<_>>(),
        ];
        let slots = pack_groups(&groups, &params(2));

        assert_eq!(slots.len(), 7);
        let rows: Vec<usize> = slots.iter().map(|s| s.row).collect();
        assert_eq!(rows, vec![0, 0, 0, 1, 1, 1, 1]);
        let us: Vec<f32> = slots.iter().map(|s| s.u).collect();
        let expected: Vec<f32> = vec![0.0, 0.2, 0.4, 0.0, 0.2, 0.4, 0.6];
        assert_eq!(us, expected);
        assert!(slots[..3].iter().all(|s| s.v == 0.0));
        assert!(slots[3..].iter().all(|s| s.v == 0.8));
    }

    #[test]
    fn overflowing_group_wraps_into_more_rows() {
        let transport = jobs("t", 12);
        let groups = vec![transport.iter().collect::<Vec<_>>()];
        let slots = pack_groups(&groups, &params(3));

        // 3/12 = 0.25 clamps to 0.2 -> five per row -> 5 + 5 + 2.
        let last_row = slots.iter().map(|s| s.row).max();
        assert_eq!(last_row, Some(2));
        assert_eq!(slots.iter().filter(|s| s.row == 2).count(), 2);
        assert!((slots[11].v - 0.8).abs() < 1e-6);
        assert!((slots[5].v - 0.4).abs() < 1e-6);
    }
}
