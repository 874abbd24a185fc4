//! Core systems for Slat.
//!
//! This crate provides the foundation the `slat` list controls are built
//! on:
//!
//! - [`Signal`] — type-safe signal/slot change notification
//! - [`geometry`] — exact-integer [`Point`], [`Size`], [`Rect`], [`Edges`]
//! - [`logging`] — `tracing` target constants for log filtering
//!
//! Everything here is deliberately free of any windowing or rendering
//! dependency; the platform boundary lives in the `slat` crate's host
//! traits.

pub mod geometry;
pub mod logging;
pub mod signal;

pub use geometry::{Edges, Point, Rect, Size};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
