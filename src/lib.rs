// SPDX-License-Identifier: MPL-2.0
//! `challan_review` is the client-side core of a console for reviewing
//! traffic-violation (challan) images.
//!
//! The heavy lifting (vision analysis, OCR, registry lookups) happens in
//! an external backend. What lives here is the state the console itself
//! owns: the toast notification system used for operator feedback, and the
//! review-queue plumbing that prefetches presigned image URLs so
//! navigation stays instant.

#![doc(html_root_url = "https://docs.rs/challan_review/0.2.0")]

pub mod config;
pub mod error;
pub mod media;
pub mod notify;
pub mod ui;
