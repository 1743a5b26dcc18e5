// SPDX-License-Identifier: GPL-3.0-only

//! Backend abstraction layer for capture devices
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        App Layer (camera subscription)       │
//! └────────────────────┬────────────────────────┘
//!                      │ CameraSession
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │        CameraBackend ── CaptureStream        │
//! │              (GStreamer)                     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! - [`camera`]: Camera backend with device enumeration, frame delivery and
//!   the scoped [`camera::CameraSession`]

pub mod camera;
