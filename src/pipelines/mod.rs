// SPDX-License-Identifier: GPL-3.0-only

//! Processing pipelines for photo capture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌───────────────┐
//! │ Camera Frame │ ──▶ │  Photo Pipeline   │ ──▶ │ CapturedPhoto │
//! │   (RGBA)     │     │  - RGBA→RGB       │     │  (JPEG blob)  │
//! │              │     │  - JPEG encoding  │     │               │
//! └──────────────┘     └───────────────────┘     └───────────────┘
//! ```
//!
//! Encoding runs on a blocking worker so the live preview keeps updating.

pub mod photo;
