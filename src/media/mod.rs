// SPDX-License-Identifier: MPL-2.0
//! Review-queue media plumbing.
//!
//! - [`queue`] - Ordered list of challan image ids with cursor navigation
//! - [`prefetch`] - Rolling cache of presigned image URLs for the entries
//!   ahead of the cursor

pub mod prefetch;
pub mod queue;

pub use prefetch::{fetch_presigned_url, PrefetchConfig, PresignedUrl, UrlPrefetchCache};
pub use queue::{QueueInfo, ReviewQueue};
