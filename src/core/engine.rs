use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct CalcEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> CalcEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        let monitor = SystemMonitor::new(monitor_enabled);
        if monitor.is_enabled() {
            tracing::debug!("System monitoring enabled");
        }
        Self { pipeline, monitor }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting batch calculation...");

        // Extract
        let requests = self.pipeline.extract().await?;
        tracing::info!("Extracted {} calculation requests", requests.len());
        self.monitor.log_stats("Extract");

        // Transform
        let result = self.pipeline.transform(requests).await?;
        tracing::info!(
            "Evaluated {} calculations ({} failed)",
            result.outcomes.len(),
            result.failures.len()
        );
        self.monitor.log_stats("Transform");

        // Load
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}
