//! The Atlas refresh pipeline: remote feeds → candidate derivation →
//! name-keyed reconciliation against the store.
//!
//! Nothing here retries. A failed fetch or write aborts the whole refresh
//! and surfaces to the caller, who is expected to retry out-of-band.

#![allow(async_fn_in_trait)]

pub mod aggregate;
pub mod client;
pub mod error;
pub mod reconcile;

pub use error::{Error, Result, Upstream};
