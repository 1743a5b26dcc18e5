// SPDX-License-Identifier: GPL-3.0-only

//! Settings drawer: camera, photo quality, preview and theme

pub mod view;
