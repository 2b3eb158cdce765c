// SPDX-License-Identifier: MIT

//! Domain layer: pure data types shared between the UI and export logic.

pub mod gallery;
