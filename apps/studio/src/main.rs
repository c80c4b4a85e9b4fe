//! Opens the studio from the environment and reports what it loaded.
//!
//! ```bash
//! PETAL_DB_PATH=./petal_dev.db cargo run -p petal-studio
//! ```

use petal_studio::commands::{catalog, presets, pricing};
use petal_studio::state::StudioConfig;
use petal_studio::{init_tracing, StudioApp};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    init_tracing();
    info!("Starting Petal & Prose studio");

    let app = match StudioApp::open(StudioConfig::from_env()).await {
        Ok(app) => app,
        Err(e) => {
            error!(error = %e, "Studio failed to start");
            std::process::exit(1);
        }
    };

    info!(
        store = %app.config.store_name,
        flowers = catalog::list_flowers(&app.catalog, None, None).len(),
        healthy = app.db.health_check().await,
        "Studio ready"
    );

    match presets::list_user_presets(&app.db).await {
        Ok(saved) => info!(count = saved.len(), "Saved collection loaded"),
        Err(e) => error!(error = %e, "Saved collection unavailable"),
    }

    match pricing::get_pricing_panel(&app.config, &app.catalog, &app.builder, &app.wholesale).await {
        Ok(panel) => info!(
            unit = %panel.unit_price_display,
            wholesale = panel.summary.wholesale_enabled,
            segment = %panel.summary.multiplier_label,
            "Empty canvas priced"
        ),
        Err(e) => error!(error = %e, "Pricing unavailable"),
    }

    app.db.close().await;
}
