//! Interactive dashboard command (`withroom dashboard`)

use std::sync::Arc;

use iocraft::prelude::*;

use super::connect;
use crate::config::Config;
use crate::error::{Result, WithRoomError};
use crate::render::LayoutMode;
use crate::tui::Dashboard;

/// Launch the dashboard TUI
pub async fn cmd_dashboard(layout: Option<LayoutMode>) -> Result<()> {
    let layout = match layout {
        Some(layout) => layout,
        None => Config::load()?.layout,
    };
    let api = connect()?;
    if !api.auth().is_present() {
        return Err(WithRoomError::LoginRequired);
    }

    element!(Dashboard(api: Some(Arc::new(api)), layout: layout))
        .fullscreen()
        .await
        .map_err(|e| WithRoomError::Other(format!("TUI error: {e}")))
}
