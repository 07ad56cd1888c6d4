// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for polymem.
//!
//! # Components
//!
//! - [`MockBackend`] - a stand-in for any view that either fails every call or
//!   answers every call late
//! - [`fixtures`] - ready-made chunks with entities and claims

pub mod fixtures;
pub mod mock_backend;

pub use mock_backend::MockBackend;
