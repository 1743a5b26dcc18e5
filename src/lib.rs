// SPDX-License-Identifier: GPL-3.0-only

//! Cart Admin - webcam product cataloguing for the COSMIC desktop
//!
//! Photos are captured from a live camera preview, annotated with a title,
//! quantity and unit, and collected into an in-memory product list.
//!
//! # Architecture
//!
//! - [`cart`]: The cart store (photo bucket, product draft, product catalogue)
//! - [`backends`]: Camera backend abstraction and the scoped camera session
//! - [`pipelines`]: Frame to JPEG photo capture
//! - [`app`]: COSMIC application, views and message handling
//! - [`config`]: User configuration handling
//!
//! # Example
//!
//! ```ignore
//! // This is a GUI application, typically run via:
//! // cart-admin
//! ```

pub mod app;
pub mod backends;
pub mod cart;
pub mod config;
pub mod constants;
pub mod errors;
pub mod i18n;
pub mod pipelines;

// Re-export commonly used types
pub use app::{AppModel, Message};
pub use cart::{CartAction, CartState, Phase};
pub use config::Config;
pub use constants::PhotoQuality;
pub use errors::Notice;
