//! The seam between the list core and its embedding.
//!
//! Everything platform-shaped — text measurement, repaint scheduling,
//! focus, tooltips, scroll plumbing — goes through [`HostServices`]. The
//! core never draws and never owns a timer; it asks the host and reacts
//! to the host's callbacks.

use slat_core::{Point, Rect, Size};

use crate::measure::TextMeasurer;
use crate::policy::VisualState;

/// Services the embedding window system provides to a list surface.
pub trait HostServices {
    /// Measurer for item captions.
    fn measurer(&self) -> &dyn TextMeasurer;

    /// Measurer for the secondary line. Hosts typically return a smaller
    /// face here; returning the caption measurer is fine.
    fn subtext_measurer(&self) -> &dyn TextMeasurer;

    /// The size of the check/radio glyph the host's renderer draws for a
    /// given visual state. Themes normally use one size for all states;
    /// measurement asks with the default state.
    fn glyph_size(&self, state: VisualState) -> Size;

    /// Request a repaint of a region in viewport coordinates.
    fn invalidate(&self, rect: Rect);

    /// Request a repaint of the whole surface.
    fn invalidate_all(&self);

    /// Flush pending repaints synchronously. Called on press so the
    /// pressed glyph appears before any click handler runs.
    fn redraw_now(&self);

    /// Ask the window system to move keyboard focus to the surface.
    fn request_focus(&self);

    /// Show a tooltip with the given text near the pointer.
    fn show_tooltip(&self, text: &str);

    /// Hide any visible tooltip.
    fn hide_tooltip(&self);

    /// Start (or restart) the tooltip hover-delay timer. The host calls
    /// back into the surface when it fires.
    fn arm_tooltip_timer(&self);

    /// Cancel a pending tooltip timer.
    fn cancel_tooltip_timer(&self);

    /// The scroll origin changed; reposition scrollbars accordingly.
    fn set_scroll_origin(&self, origin: Point);
}
