//! Imgforged - folder watcher that resizes images and writes thumbnails
//!
//! This library crate exposes the pipeline for the binary and for
//! integration testing.

pub mod config;
pub mod images;
pub mod processor;
pub mod queue;
pub mod rules;
pub mod service;
pub mod watch;
