//! firestore-perf: seed a Firestore emulator and time a query
//!
//! This crate generates synthetic event documents, inserts them into a
//! collection and measures how long one query takes to drain, against the
//! Firestore emulator or an in-process store.

pub mod core;
pub mod storage;
pub mod generator;
pub mod reset;
pub mod bench;

// Re-export the main types for easier use
pub use crate::core::document::{CollectionRef, Document};
pub use crate::core::errors::{PerfError, Result};
pub use crate::core::query::{Direction, QuerySpec};
pub use crate::core::store::DocumentStore;
pub use crate::core::value::Value;
pub use crate::generator::{EventFactory, SyntheticEvent, TenantMode};
pub use crate::reset::{EmulatorResetClient, HttpTransport, ReqwestTransport, EMULATOR_HOST_ENV};
pub use crate::storage::{EmulatorStore, MemoryStore};
pub use crate::bench::{BenchmarkReport, Harness, HarnessConfig, Phase};
