//! Shared plumbing for the podprobe command line tools.

pub mod config;
