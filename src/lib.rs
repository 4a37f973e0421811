//! Voice of the Patient Pulseboard.
//!
//! Backend for a patient-voice analytics dashboard: static sample datasets,
//! a drug adverse-event lookup against OpenFDA and a search-interest-by-region
//! lookup against a trends service. Both remote lookups report a
//! [`models::FetchResult`] so each dashboard section can degrade on its own.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod utils;
