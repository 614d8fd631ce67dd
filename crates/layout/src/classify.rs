use booklet_core::{JobCategory, JobType};

/// Fold a raw job type tag into its layout category.
pub fn classify(job_type: JobType) -> JobCategory {
    match job_type {
        JobType::ShuntingLoad | JobType::ShuntingUnload => JobCategory::Shunting,
        JobType::Transport | JobType::EmptyHaul | JobType::ComplexTransport => {
            JobCategory::Transport
        }
        JobType::Other => JobCategory::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shunting_tags_map_to_shunting() {
        assert_eq!(classify(JobType::ShuntingLoad), JobCategory::Shunting);
        assert_eq!(classify(JobType::ShuntingUnload), JobCategory::Shunting);
    }

    #[test]
    fn hauling_tags_map_to_transport() {
        assert_eq!(classify(JobType::Transport), JobCategory::Transport);
        assert_eq!(classify(JobType::EmptyHaul), JobCategory::Transport);
        assert_eq!(classify(JobType::ComplexTransport), JobCategory::Transport);
    }

    #[test]
    fn unmapped_tags_fall_back_to_unknown() {
        let unknown: Vec<_> = JobType::ALL
            .into_iter()
            .filter(|t| classify(*t) == JobCategory::Unknown)
            .collect();
        assert_eq!(unknown, vec![JobType::Other]);
    }
}
