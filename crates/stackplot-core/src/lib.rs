//! Stackplot Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Stackplot
//! pipeline. It includes:
//!
//! - **Colors**: Color handling with CSS and matplotlib-style names ([`color::Color`])
//! - **Geometry**: Physical sizes, margins and data ranges ([`geometry`] module)
//! - **Draw**: Stroke definitions for curves, marks and legend handles ([`draw`] module)
//! - **Scene**: The renderable scene handed to a drawing surface ([`scene`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod scene;
