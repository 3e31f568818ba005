//! Inbound commands to the application service.

use crate::config::MonitorConfig;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Hot-reload configuration.  Rejected if it fails validation.
    UpdateConfig(MonitorConfig),

    /// Stop polling devices (evaluation on demand still works).
    PausePolling,

    /// Resume polling devices.
    ResumePolling,
}
