//! Rackyard Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Rackyard layout
//! engine and its front ends. It includes:
//!
//! - **Geometry**: Three-dimensional positions, sizes and wall insets ([`geometry`] module)
//! - **Units**: Unit tags, raw measurements and normalization to centimeters ([`units`] module)
//! - **Colors**: CSS color validation for pallets ([`color::PalletColor`])

pub mod color;
pub mod geometry;
pub mod units;
