//! Logging facilities for Slat.
//!
//! Slat uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // Your application code...
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Layout engine passes and ideal-size computation.
    pub const LAYOUT: &str = "slat::layout";
    /// Per-item measurement.
    pub const MEASURE: &str = "slat::measure";
    /// Hover/press/focus transitions and invalidation decisions.
    pub const STATE: &str = "slat::state";
    /// Surface-level input dispatch and scrolling.
    pub const SURFACE: &str = "slat::surface";
    /// Signal emission.
    pub const SIGNAL: &str = "slat::signal";
}
