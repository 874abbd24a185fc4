//! Per-item interaction state: hover, press, keyboard focus, tooltip arming.
//!
//! The tracker is pure bookkeeping. It never talks to the host; every
//! mutation reports the smallest repaint region the change requires as a
//! [`DirtyRegion`], and the surface decides how to translate that into
//! host invalidation calls.
//!
//! Disabled items are inert here: pointing a hover or press at a disabled
//! index is a complete no-op, leaving even the previous hover in place, so
//! a disabled item behaves like background rather than like an item.

use tracing::trace;

/// The repaint consequence of a state mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirtyRegion {
    /// Nothing changed visually.
    None,
    /// Only the listed item indices need repainting.
    Items(Vec<usize>),
    /// The whole surface needs repainting.
    All,
}

impl DirtyRegion {
    /// Combine two regions into the smallest region covering both.
    pub fn merge(self, other: DirtyRegion) -> DirtyRegion {
        match (self, other) {
            (DirtyRegion::All, _) | (_, DirtyRegion::All) => DirtyRegion::All,
            (DirtyRegion::None, r) | (r, DirtyRegion::None) => r,
            (DirtyRegion::Items(mut a), DirtyRegion::Items(b)) => {
                for i in b {
                    if !a.contains(&i) {
                        a.push(i);
                    }
                }
                DirtyRegion::Items(a)
            }
        }
    }

    /// Whether this region repaints nothing.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, DirtyRegion::None)
    }
}

/// Tracks which item the pointer is over, which is pressed, and which has
/// keyboard focus.
#[derive(Debug, Default)]
pub struct InteractionState {
    hover: Option<usize>,
    pressed: Option<usize>,
    focused: Option<usize>,
    tooltip_armed: Option<usize>,
    surface_focused: bool,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    // ==== queries ====

    #[inline]
    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    #[inline]
    pub fn pressed(&self) -> Option<usize> {
        self.pressed
    }

    #[inline]
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// The item whose tooltip timer is currently armed, if any.
    #[inline]
    pub fn tooltip_armed(&self) -> Option<usize> {
        self.tooltip_armed
    }

    /// Whether the surface itself holds keyboard focus.
    #[inline]
    pub fn surface_focused(&self) -> bool {
        self.surface_focused
    }

    // ==== mutations ====

    /// Move the hover to `target`.
    ///
    /// A target pointing at a disabled item is ignored entirely: the
    /// previous hover stays, no repaint is requested, and the tooltip
    /// arming is untouched. Hovering away to `None` repaints the whole
    /// surface since hover styling can bleed into shared chrome.
    pub fn set_hover(
        &mut self,
        target: Option<usize>,
        enabled: impl Fn(usize) -> bool,
    ) -> DirtyRegion {
        if let Some(i) = target {
            if !enabled(i) {
                return DirtyRegion::None;
            }
        }
        if target == self.hover {
            return DirtyRegion::None;
        }

        let old = self.hover;
        self.hover = target;
        trace!(target: "slat::state", ?old, new = ?target, "hover changed");
        match target {
            None => {
                self.tooltip_armed = None;
                DirtyRegion::All
            }
            Some(new) => {
                self.tooltip_armed = Some(new);
                let mut items = Vec::with_capacity(2);
                if let Some(o) = old {
                    items.push(o);
                }
                items.push(new);
                DirtyRegion::Items(items)
            }
        }
    }

    /// Press an item. Disabled targets are ignored.
    pub fn set_pressed(
        &mut self,
        target: Option<usize>,
        enabled: impl Fn(usize) -> bool,
    ) -> DirtyRegion {
        if let Some(i) = target {
            if !enabled(i) {
                return DirtyRegion::None;
            }
        }
        if target == self.pressed {
            return DirtyRegion::None;
        }
        let old = self.pressed;
        self.pressed = target;
        let mut items = Vec::with_capacity(2);
        if let Some(o) = old {
            items.push(o);
        }
        if let Some(n) = target {
            items.push(n);
        }
        DirtyRegion::Items(items)
    }

    /// Release any pressed item, whatever its enabled state now is.
    ///
    /// Unconditional so that an item disabled mid-press cannot wedge the
    /// surface in a pressed look.
    pub fn clear_pressed(&mut self) -> DirtyRegion {
        match self.pressed.take() {
            Some(i) => DirtyRegion::Items(vec![i]),
            None => DirtyRegion::None,
        }
    }

    /// Move keyboard focus to `target`.
    ///
    /// Disabled targets are rejected. The stored index always updates, but
    /// a repaint is only requested while the surface itself has focus; an
    /// unfocused surface shows no focus ring so there is nothing to paint.
    pub fn set_focused(
        &mut self,
        target: Option<usize>,
        enabled: impl Fn(usize) -> bool,
    ) -> DirtyRegion {
        if let Some(i) = target {
            if !enabled(i) {
                return DirtyRegion::None;
            }
        }
        if target == self.focused {
            return DirtyRegion::None;
        }
        let old = self.focused;
        self.focused = target;
        if !self.surface_focused {
            return DirtyRegion::None;
        }
        let mut items = Vec::with_capacity(2);
        if let Some(o) = old {
            items.push(o);
        }
        if let Some(n) = target {
            items.push(n);
        }
        DirtyRegion::Items(items)
    }

    /// Record whether the surface holds keyboard focus.
    ///
    /// Gaining or losing surface focus repaints the focused item, whose
    /// focus ring appears or disappears.
    pub fn set_surface_focused(&mut self, focused: bool) -> DirtyRegion {
        if focused == self.surface_focused {
            return DirtyRegion::None;
        }
        self.surface_focused = focused;
        match self.focused {
            Some(i) => DirtyRegion::Items(vec![i]),
            None => DirtyRegion::None,
        }
    }

    /// Drop hover, press, and tooltip arming (for pointer-leave or a
    /// structural item change). Focus is left alone.
    pub fn clear_transient(&mut self) -> DirtyRegion {
        self.tooltip_armed = None;
        let had_hover = self.hover.take().is_some();
        let pressed = self.pressed.take();
        if had_hover {
            DirtyRegion::All
        } else if let Some(i) = pressed {
            DirtyRegion::Items(vec![i])
        } else {
            DirtyRegion::None
        }
    }

    /// Forget everything, including focus. Used when the item collection
    /// is reset.
    pub fn reset(&mut self) {
        *self = Self {
            surface_focused: self.surface_focused,
            ..Self::default()
        };
    }
}

/// Find the nearest enabled index after (or before) `start`.
///
/// `start = None` scans from the boundary: the first enabled index when
/// going forward, the last when going backward. There is no wrap-around;
/// running off either end yields `None`.
pub fn next_enabled_index(
    start: Option<usize>,
    forward: bool,
    count: usize,
    enabled: impl Fn(usize) -> bool,
) -> Option<usize> {
    if count == 0 {
        return None;
    }
    if forward {
        let begin = match start {
            Some(s) => s + 1,
            None => 0,
        };
        (begin..count).find(|&i| enabled(i))
    } else {
        let end = match start {
            Some(0) => return None,
            Some(s) => s,
            None => count,
        };
        (0..end).rev().find(|&i| enabled(i))
    }
}
