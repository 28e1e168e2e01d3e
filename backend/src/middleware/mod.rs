//! Request middleware.
//!
//! Cross-cutting request lifecycle concerns that sit outside the inbound
//! adapters, currently request tracing.

pub mod trace;

pub use trace::Trace;
