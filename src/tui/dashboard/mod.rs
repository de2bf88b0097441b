//! Interactive "My Info" dashboard: five study tabs with like, join and
//! join-request handling.

pub mod effects;
pub mod model;
pub mod view;

pub use model::{
    ActionFailure, DashboardAction, DashboardEffect, DashboardState, DashboardViewModel,
    compute_dashboard_view_model, key_to_action, reduce_dashboard_state,
};
pub use view::{Dashboard, DashboardProps};
