//! Gateway domain: configuration, errors and the delta wire format.

pub mod config;
pub mod error;
pub mod payload;

pub use config::{ConfigError, GatewayConfig};
pub use error::{ApiError, GatewayError};
pub use payload::{parse_delta_body, WireDelta, WireQuad, WireTerm};
