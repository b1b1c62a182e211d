//! Result fetcher: sends a submission to the checking service and validates
//! what comes back

pub mod client;
pub mod request;
pub mod response;

pub use client::{CheckService, HttpCheckService};
