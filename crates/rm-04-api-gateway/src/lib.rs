//! # RM-04 API Gateway
//!
//! HTTP interface of the resource monitor.
//!
//! ## Routes
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | `POST` | `/monitor` | Watch a pattern (`MU-TAB-ID` header, `subject`/`predicate`/`object` query) |
//! | `DELETE` | `/monitor` | Stop watching a pattern |
//! | `GET` | `/monitor` | Patterns watched by the calling tab |
//! | `DELETE` | `/monitors` | Stop watching everything (tab closed) |
//! | `POST` | `/.mu/delta` | Delta notifications from the triple store |
//! | `GET` | `/`, `/health`, `/metrics` | Liveness, index statistics, Prometheus |
//!
//! A missing or empty query parameter is a wildcard.
//!
//! ## Middleware
//!
//! `TraceLayer` (one span per request) → `TimeoutLayer` →
//! `RequestBodyLimitLayer`.
//!
//! ## Usage
//!
//! ```ignore
//! use rm_04_api_gateway::{ApiGatewayService, AppState, GatewayConfig};
//!
//! let state = AppState::with_sink(sink);
//! let service = ApiGatewayService::new(GatewayConfig::from_env()?, state)?;
//! service.start(shutdown_signal()).await?;
//! ```

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{ApiError, ConfigError, GatewayConfig, GatewayError};
pub use router::{build_router, AppState, TAB_ID_HEADER};
pub use service::ApiGatewayService;
