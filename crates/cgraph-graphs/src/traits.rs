//! Graph renderer trait definitions.

use crate::chart::ChartConfig;
use async_trait::async_trait;
use cgraph_common::Result;

/// Trait for graph renderers that write an image to disk.
#[async_trait]
pub trait GraphRenderer: Send + Sync {
    /// The type of data this renderer expects.
    type Data: Sync;

    /// Renders `data` to `config.path`, replacing any existing file.
    async fn render_to_file(&self, data: &Self::Data, config: &ChartConfig) -> Result<()>;

    /// Gets the name of this graph type.
    fn name(&self) -> &'static str;

    /// Gets the description of this graph type.
    fn description(&self) -> &'static str;
}
