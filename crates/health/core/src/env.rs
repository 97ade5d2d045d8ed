use crate::config::HealthConfig;
use crate::events::ResultSink;
use crate::stats::StatProvider;

/// Collaborators passed to every mutating vitality operation.
pub struct HealthEnv<'a> {
    pub stats: &'a dyn StatProvider,
    pub config: &'a HealthConfig,
    pub sink: &'a mut dyn ResultSink,
}

impl<'a> HealthEnv<'a> {
    pub fn new(
        stats: &'a dyn StatProvider,
        config: &'a HealthConfig,
        sink: &'a mut dyn ResultSink,
    ) -> Self {
        Self {
            stats,
            config,
            sink,
        }
    }
}
