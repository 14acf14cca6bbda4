// ABOUTME: Library crate for squash-match exposing the flows, models and CLI for testing and external use

#![allow(missing_docs)]

pub mod app;
pub mod cli;
pub mod config;
pub mod flows;
pub mod models;
