// SPDX-License-Identifier: MIT

//! Reusable egui components structured for MVU-style updates.

pub mod admission_form;
pub mod gallery;
