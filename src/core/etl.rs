use crate::core::{Pipeline, RunReport};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Drives one extract → transform → load pass and reports what happened.
pub struct FlattenEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> FlattenEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting flatten process...");

        let table = self.pipeline.extract().await?;
        let input_rows = table.rows.len();
        let input_columns = table.columns.len();
        self.monitor.log_stats("extract");

        let result = self.pipeline.transform(table).await?;
        let output_rows = result.flat.rows.len();
        let case_count = result.case_count;
        let step_count = result.step_count;
        self.monitor.log_stats("transform");

        let output_path = self.pipeline.load(result).await?;
        self.monitor.log_stats("load");
        self.monitor.log_final_stats();

        Ok(RunReport {
            input_rows,
            input_columns,
            output_rows,
            case_count,
            step_count,
            output_path,
        })
    }
}
