// Copyright 2026 Caption Relay Contributors
// SPDX-License-Identifier: Apache-2.0

//! Caption relay library: scrape an image from a web page, caption it with a
//! remote vision model, and forward the model response to a validation
//! endpoint.
//!
//! The three steps live in [`acquire`], [`inference`], and [`submit`];
//! [`pipeline`] runs them in order and stops at the first failure.

pub mod acquire;
pub mod config;
pub mod data_url;
pub mod error;
pub mod http;
pub mod inference;
pub mod pipeline;
pub mod submit;

pub use acquire::ImageAsset;
pub use config::PipelineConfig;
pub use error::{RelayError, RelayResult};
pub use http::RelayClient;
