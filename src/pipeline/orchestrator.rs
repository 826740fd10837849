// Phase 7: 全ジョブ実行

use tracing::{error, info};

use crate::pipeline::job_runner::{JobConfig, JobResult, run_job};

/// Run multiple jobs, collecting results.
/// One job failure does NOT prevent other jobs from running.
pub fn run_all_jobs(jobs: &[JobConfig]) -> Vec<crate::error::Result<JobResult>> {
    jobs.iter()
        .enumerate()
        .map(|(i, job)| {
            info!(job = i, image = %job.image_path.display(), "starting job");
            let result = run_job(job);
            if let Err(e) = &result {
                error!(job = i, error = %e, "job failed");
            }
            result
        })
        .collect()
}
