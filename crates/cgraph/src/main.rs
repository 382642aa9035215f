//! Main entry point for cgraph.

use cgraph::{App, AppResult};
use cgraph_common::{init_default_logging, init_logging};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> AppResult<()> {
    let app = match App::from_env() {
        Ok(app) => app,
        Err(e) => {
            // Logging config is part of what failed to load
            let _ = init_default_logging();
            error!("{}", e);
            return Err(e);
        }
    };

    init_logging(&app.config().logging).map_err(cgraph::AppError::Config)?;
    info!("Starting cgraph {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = app.run().await {
        error!("{}", e);
        return Err(e);
    }

    Ok(())
}
