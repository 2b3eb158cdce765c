// SPDX-License-Identifier: MIT

//! Business logic and capability seams kept free of egui layout code.

pub mod admission;
pub mod export;
pub mod fetch;
