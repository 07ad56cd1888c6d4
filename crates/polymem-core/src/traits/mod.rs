// SPDX-FileCopyrightText: 2026 Polymem Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend trait definitions for the three storage views.
//!
//! All backends extend the [`BackendAdapter`] base trait and use
//! `#[async_trait]` so the coordinator can hold them as trait objects.

pub mod adapter;
pub mod graph;
pub mod text;
pub mod vector;

pub use adapter::BackendAdapter;
pub use graph::GraphBackend;
pub use text::TextBackend;
pub use vector::VectorBackend;
