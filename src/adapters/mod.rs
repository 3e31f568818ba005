//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter          | Implements     | Connects to                 |
//! |------------------|----------------|-----------------------------|
//! | `config_file`    | ConfigPort     | JSON config file            |
//! | `log_sink`       | EventSink      | `log` facade                |
//! | `memory_storage` | StoragePort    | In-process key/value map    |
//! | `memory_store`   | SensorStore    | In-process reading log      |
//! | `replay`         | DeviceSource   | Recorded device documents   |
//! | `risk_log`       | RiskEventSink  | Any StoragePort             |
//! | `time`           | Clock          | System wall clock           |

pub mod config_file;
pub mod log_sink;
pub mod memory_storage;
pub mod memory_store;
pub mod replay;
pub mod risk_log;
pub mod time;
