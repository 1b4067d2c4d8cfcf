//! Data models for docpeek.

pub mod config;
pub mod extraction;
