//! # Resource Monitor Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── monitor_benchmarks.rs  # Matching and index mutation throughput
//! └── src/integration/
//!     ├── flows.rs               # registry → matcher → emitter, in process
//!     └── e2e_http.rs            # real sockets: gateway and a fake SPARQL store
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rm-tests
//! cargo bench -p rm-tests
//! ```

pub mod integration;
