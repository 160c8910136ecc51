//! Actix middleware shared by all inbound surfaces.

pub mod trace;

pub use trace::Trace;
