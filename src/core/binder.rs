use crate::core::Pipeline;
use crate::domain::model::{MergedOutput, ResolvedDocument, Route};
use crate::utils::error::{BinderError, Result};
use crate::utils::monitor::SystemMonitor;

/// Drives one binder run: resolve every waypoint first, then download, then merge.
pub struct BinderEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> BinderEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Run and report only whether a binder was produced. Failures are logged
    /// and summarized on stderr.
    pub async fn execute(&self, flight_name: &str, route: &Route) -> bool {
        match self.run(flight_name, route).await {
            Ok(output) => {
                tracing::info!(
                    "✅ Binder for {} written to {} ({} documents)",
                    output.flight_name,
                    output.path.display(),
                    output.documents
                );
                println!("📁 Output saved to: {}", output.path.display());
                true
            }
            Err(e) => {
                tracing::error!(
                    "❌ Binder for {} failed: {} (Category: {:?}, Severity: {:?})",
                    flight_name,
                    e,
                    e.category(),
                    e.severity()
                );
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                false
            }
        }
    }

    pub async fn run(&self, flight_name: &str, route: &Route) -> Result<MergedOutput> {
        tracing::info!(
            "Building binder {} for route {}",
            flight_name,
            route.waypoints().join(" ")
        );

        self.pipeline.prepare().await?;

        let cycle = self.pipeline.resolve_cycle().await?;
        tracing::info!(
            "🗓️  Using cycle {} (effective {})",
            cycle.token,
            cycle.effective
        );
        self.monitor.log_stats("Cycle");

        let mut documents = Vec::with_capacity(route.len());
        for waypoint in route.waypoints() {
            match self.pipeline.locate(waypoint, &cycle).await? {
                Some(url) => {
                    tracing::debug!("{} -> {}", waypoint, url);
                    documents.push(ResolvedDocument {
                        waypoint: waypoint.clone(),
                        url,
                    });
                }
                None => {
                    return Err(BinderError::UnresolvedWaypoint {
                        waypoint: waypoint.clone(),
                    });
                }
            }
        }
        tracing::info!("Located {} documents", documents.len());
        self.monitor.log_stats("Locate");

        let mut files = Vec::with_capacity(documents.len());
        for document in &documents {
            files.push(self.pipeline.fetch(document).await?);
        }
        let hits = files.iter().filter(|f| f.cache_hit).count();
        tracing::info!(
            "Fetched {} documents ({} from cache)",
            files.len(),
            hits
        );
        self.monitor.log_stats("Fetch");

        let output_path = self.pipeline.output_path(flight_name);
        self.pipeline.merge(&files, &output_path).await?;
        self.monitor.log_stats("Merge");
        self.monitor.log_final_stats();

        Ok(MergedOutput {
            flight_name: flight_name.to_string(),
            path: output_path,
            documents: files.len(),
        })
    }
}
