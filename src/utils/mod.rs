//! Utility modules for the search client

pub mod http;
