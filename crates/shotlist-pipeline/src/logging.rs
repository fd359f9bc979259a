//! Structured logging for generation runs.

use tracing::{error, info, warn, Span};

/// Logs run lifecycle events tagged with the run's epoch.
///
/// ```ignore
/// let logger = RunLogger::new(epoch, "generate");
/// logger.log_start("planning scene");
/// logger.log_progress("rendering image 1 of 5");
/// logger.log_completion("5 shots rendered");
/// ```
#[derive(Debug, Clone)]
pub struct RunLogger {
    epoch: u64,
    operation: String,
    scene_id: Option<String>,
}

impl RunLogger {
    pub fn new(epoch: u64, operation: impl Into<String>) -> Self {
        Self {
            epoch,
            operation: operation.into(),
            scene_id: None,
        }
    }

    /// Attach the scene id once the plan is known.
    pub fn set_scene_id(&mut self, scene_id: impl Into<String>) {
        self.scene_id = Some(scene_id.into());
    }

    pub fn log_start(&self, message: &str) {
        info!(
            epoch = self.epoch,
            operation = %self.operation,
            "Run started: {}", message
        );
    }

    pub fn log_progress(&self, message: &str) {
        info!(
            epoch = self.epoch,
            operation = %self.operation,
            scene_id = self.scene_id.as_deref().unwrap_or(""),
            "Run progress: {}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            epoch = self.epoch,
            operation = %self.operation,
            scene_id = self.scene_id.as_deref().unwrap_or(""),
            "Run warning: {}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            epoch = self.epoch,
            operation = %self.operation,
            scene_id = self.scene_id.as_deref().unwrap_or(""),
            "Run error: {}", message
        );
    }

    pub fn log_completion(&self, message: &str) {
        info!(
            epoch = self.epoch,
            operation = %self.operation,
            scene_id = self.scene_id.as_deref().unwrap_or(""),
            "Run completed: {}", message
        );
    }

    /// Span carrying the run fields, for instrumenting nested calls.
    pub fn create_span(&self) -> Span {
        tracing::info_span!("run", epoch = self.epoch, operation = %self.operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_logger_scene_id_attached() {
        let mut logger = RunLogger::new(1, "generate");
        assert!(logger.scene_id.is_none());

        logger.set_scene_id("loft-001");
        assert_eq!(logger.scene_id.as_deref(), Some("loft-001"));
        assert_eq!(logger.epoch, 1);
        assert_eq!(logger.operation, "generate");
    }
}
