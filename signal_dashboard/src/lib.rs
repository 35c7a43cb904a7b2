//! Derived chart series, dataset summarization, and the analysis chat
//! session for the signal dashboard.

#![deny(missing_docs)]

pub mod analysis;
pub mod chart;
pub mod chat;
pub mod context;
