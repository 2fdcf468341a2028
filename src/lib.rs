//! Engineering calculators service: workshop electrical load estimation and
//! fuel composition analysis, exposed as a small JSON API.

pub mod api;
pub mod config;
pub mod domain;
pub mod telemetry;
