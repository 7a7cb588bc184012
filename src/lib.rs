//! Downloads the rinha-de-compiler test-case files.
//!
//! A single listing request enumerates the remote files, then a fixed-width
//! pool fetches each one and rewrites it line by line into a local directory.

pub mod cli;
pub mod config;
pub mod downloader;
pub mod errors;
pub mod fetcher;
pub mod lister;
pub mod models;
pub mod pool;

pub use errors::FetchError;
pub use models::{FetchReport, Listing, RunSummary, TaskFailure};
