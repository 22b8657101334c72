use std::sync::Arc;

use cemaden_core::control::CemadenControlPlane;
use cemaden_core::panel::{PanelConfig, PanelError, PanelProxy};
use cemaden_core::services::Catalog;

use crate::config::CemadenConfig;

/// Loads the dataset and builds the panel client for the configured daemon.
///
/// A missing or malformed dataset does not stop startup; only the
/// municipality listing reports it.
pub async fn build_control_plane(
    config: &CemadenConfig,
) -> Result<CemadenControlPlane, PanelError> {
    let catalog = Catalog::load_or_empty(&config.dataset_path).await;
    let panel = PanelProxy::new(
        PanelConfig::new(config.panel_url.clone()).with_timeout(config.panel_timeout),
    )?;
    Ok(CemadenControlPlane::new(Arc::new(catalog), panel))
}
