//! Process environment loading for [`WorkflowConfig`].

use std::env;

use triage_core::config::ConfigResult;
use triage_core::WorkflowConfig;

/// Load from the process environment, reading `.env` first if present.
pub fn load() -> ConfigResult<WorkflowConfig> {
    dotenvy::dotenv().ok();
    WorkflowConfig::from_lookup(|key| env::var(key).ok())
}
