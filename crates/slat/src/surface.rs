//! The list surface: items + layout + interaction + host plumbing.
//!
//! [`ListSurface`] is the engine behind both list flavors. It owns the
//! item collection, runs the column layout eagerly whenever anything
//! size-affecting changes, hit-tests pointer events against the bounds
//! table, routes activations through its [`SelectionPolicy`], and turns
//! every state transition into the narrowest host invalidation it can.
//!
//! Coordinates: the bounds table and ideal size live in *content* space;
//! pointer events arrive in *viewport* space. The scroll origin is the
//! content coordinate at the viewport's top-left, so
//! `content = viewport + scroll_origin`.

use slat_core::{Edges, Point, Rect, Signal, Size};
use tracing::debug;

use crate::error::{ListError, ListResult};
use crate::events::{Key, KeyEvent, MouseButton, PointerEvent};
use crate::host::HostServices;
use crate::items::{CheckState, ItemChange, ItemList, ListItem};
use crate::layout::{ColumnLayoutEngine, ItemBoundsTable, LayoutParams, RepeatDirection};
use crate::measure::{measure_item, ContentAlignment, MeasureSpec};
use crate::policy::{OverlayState, SelectionPolicy, VisualState};
use crate::state::{next_enabled_index, DirtyRegion, InteractionState};

/// An owner-drawn button-list surface.
///
/// Generic over the host seam and the selection policy; the
/// [`CheckBoxList`](crate::CheckBoxList) and
/// [`RadioButtonList`](crate::RadioButtonList) wrappers pin the policy
/// and expose flavor-specific convenience APIs.
pub struct ListSurface<H: HostServices, P: SelectionPolicy> {
    host: H,
    policy: P,
    items: ItemList,
    params: LayoutParams,
    bounds: ItemBoundsTable,
    state: InteractionState,
    scroll_origin: Point,
    ideal_size: Size,
    layout_suspended: u32,
    layout_pending: bool,
    check_align: ContentAlignment,
    text_align: ContentAlignment,
    subtext_separator: i32,
    selection_changed: Signal<Option<usize>>,
    check_state_changed: Signal<usize>,
    item_activated: Signal<usize>,
    layout_updated: Signal<Size>,
}

impl<H: HostServices, P: SelectionPolicy> ListSurface<H, P> {
    pub fn new(host: H, policy: P) -> Self {
        Self {
            host,
            policy,
            items: ItemList::new(),
            params: LayoutParams::default(),
            bounds: ItemBoundsTable::new(),
            state: InteractionState::new(),
            scroll_origin: Point::ZERO,
            ideal_size: Size::ZERO,
            layout_suspended: 0,
            layout_pending: false,
            check_align: ContentAlignment::MiddleLeft,
            text_align: ContentAlignment::MiddleLeft,
            subtext_separator: 2,
            selection_changed: Signal::new(),
            check_state_changed: Signal::new(),
            item_activated: Signal::new(),
            layout_updated: Signal::new(),
        }
    }

    // ==== signals ====

    /// Emitted when the exclusive selection changes (radio lists). The
    /// payload is the new selected index.
    pub fn selection_changed(&self) -> &Signal<Option<usize>> {
        &self.selection_changed
    }

    /// Emitted once per item whose check state changed.
    pub fn check_state_changed(&self) -> &Signal<usize> {
        &self.check_state_changed
    }

    /// Emitted when the user activates an item (click or keyboard), even
    /// when the activation turned out to be a no-op.
    pub fn item_activated(&self) -> &Signal<usize> {
        &self.item_activated
    }

    /// Emitted after every layout pass with the new ideal content size.
    pub fn layout_updated(&self) -> &Signal<Size> {
        &self.layout_updated
    }

    // ==== accessors ====

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    #[inline]
    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    #[inline]
    pub fn items(&self) -> &ItemList {
        &self.items
    }

    /// Ideal content size from the last layout pass.
    #[inline]
    pub fn ideal_size(&self) -> Size {
        self.ideal_size
    }

    /// An item's bounds in content coordinates. `Rect::ZERO` for unknown
    /// indices.
    #[inline]
    pub fn item_bounds(&self, index: usize) -> Rect {
        self.bounds.get(index)
    }

    #[inline]
    pub fn scroll_origin(&self) -> Point {
        self.scroll_origin
    }

    /// The index holding keyboard focus, if any.
    #[inline]
    pub fn focused_index(&self) -> Option<usize> {
        self.state.focused()
    }

    /// The index under the pointer, if any.
    #[inline]
    pub fn hovered_index(&self) -> Option<usize> {
        self.state.hover()
    }

    /// The renderer-facing state of one item.
    pub fn visual_state(&self, index: usize) -> ListResult<VisualState> {
        let item = self.items.get(index).ok_or(ListError::IndexOutOfBounds {
            index,
            len: self.items.len(),
        })?;
        let overlay = if !item.is_enabled() {
            OverlayState::Disabled
        } else if self.state.pressed() == Some(index) {
            OverlayState::Pressed
        } else if self.state.hover() == Some(index) {
            OverlayState::Hot
        } else {
            OverlayState::Normal
        };
        Ok(VisualState {
            overlay,
            check: item.check_state(),
        })
    }

    // ==== configuration ====

    pub fn set_client_size(&mut self, size: Size) {
        if self.params.client_size != size {
            self.params.client_size = size;
            self.request_layout();
        }
    }

    pub fn set_columns(&mut self, columns: usize) {
        if self.params.columns != columns {
            self.params.columns = columns;
            self.request_layout();
        }
    }

    pub fn set_direction(&mut self, direction: RepeatDirection) {
        if self.params.direction != direction {
            self.params.direction = direction;
            self.request_layout();
        }
    }

    pub fn set_padding(&mut self, padding: Edges) {
        if self.params.padding != padding {
            self.params.padding = padding;
            self.request_layout();
        }
    }

    pub fn set_spacing(&mut self, horizontal: i32, vertical: i32) {
        if (self.params.horizontal_spacing, self.params.vertical_spacing) != (horizontal, vertical)
        {
            self.params.horizontal_spacing = horizontal;
            self.params.vertical_spacing = vertical;
            self.request_layout();
        }
    }

    pub fn set_space_evenly(&mut self, space_evenly: bool) {
        if self.params.space_evenly != space_evenly {
            self.params.space_evenly = space_evenly;
            self.request_layout();
        }
    }

    pub fn set_variable_column_widths(&mut self, variable: bool) {
        if self.params.variable_column_widths != variable {
            self.params.variable_column_widths = variable;
            self.request_layout();
        }
    }

    pub fn set_check_align(&mut self, align: ContentAlignment) {
        if self.check_align != align {
            self.check_align = align;
            self.request_layout();
        }
    }

    pub fn set_text_align(&mut self, align: ContentAlignment) {
        if self.text_align != align {
            self.text_align = align;
            self.request_layout();
        }
    }

    pub fn set_subtext_separator(&mut self, separator: i32) {
        if self.subtext_separator != separator {
            self.subtext_separator = separator;
            self.request_layout();
        }
    }

    /// Defer layout passes until the matching [`resume_layout`].
    ///
    /// Nests; useful when populating many items at once.
    ///
    /// [`resume_layout`]: Self::resume_layout
    pub fn suspend_layout(&mut self) {
        self.layout_suspended += 1;
    }

    /// Undo one [`suspend_layout`]; runs the deferred pass when the
    /// counter reaches zero and anything changed meanwhile.
    ///
    /// [`suspend_layout`]: Self::suspend_layout
    pub fn resume_layout(&mut self) {
        debug_assert!(self.layout_suspended > 0);
        self.layout_suspended = self.layout_suspended.saturating_sub(1);
        if self.layout_suspended == 0 && self.layout_pending {
            self.perform_layout();
        }
    }

    // ==== item collection ====

    pub fn add_item(&mut self, item: ListItem) -> usize {
        self.items.add(item);
        let index = self.items.len() - 1;
        self.request_layout();
        index
    }

    pub fn insert_item(&mut self, index: usize, item: ListItem) {
        let change = self.items.insert(index, item);
        if let ItemChange::Added(at) = change {
            let act = self.policy.item_inserted(at);

            let new_focus = match self.state.focused() {
                Some(f) if f >= at => Some(f + 1),
                other => other,
            };
            let items = &self.items;
            self.state.set_focused(new_focus, |j| items.is_enabled(j));

            if act.selection_changed {
                self.selection_changed.emit(act.selection);
            }
        }
        self.request_layout();
    }

    pub fn remove_item(&mut self, index: usize) -> ListResult<ListItem> {
        let (item, _change) = self.items.remove(index)?;
        let act = self.policy.item_removed(index);

        let new_focus = match self.state.focused() {
            Some(f) if f == index => None,
            Some(f) if f > index => Some(f - 1),
            other => other,
        };
        self.state.clear_transient();
        let items = &self.items;
        self.state.set_focused(new_focus, |j| items.is_enabled(j));
        self.host.cancel_tooltip_timer();
        self.host.hide_tooltip();

        if act.selection_changed {
            self.selection_changed.emit(act.selection);
        }
        self.request_layout();
        Ok(item)
    }

    pub fn clear_items(&mut self) {
        self.items.clear();
        let act = self.policy.reset();
        self.state.reset();
        self.host.cancel_tooltip_timer();
        self.host.hide_tooltip();
        if act.selection_changed {
            self.selection_changed.emit(None);
        }
        self.request_layout();
    }

    /// Edit an item in place. Always relayouts, since the edit may change
    /// the caption.
    pub fn modify_item(&mut self, index: usize, f: impl FnOnce(&mut ListItem)) -> ListResult<()> {
        self.items.modify(index, f)?;
        self.request_layout();
        Ok(())
    }

    /// Set an item's check state directly, reconciling the policy
    /// invariant (an exclusive policy unchecks the previous selection).
    pub fn set_check_state(&mut self, index: usize, check: CheckState) -> ListResult<()> {
        let before = self
            .items
            .get(index)
            .ok_or(ListError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            })?
            .check_state();
        if before == check {
            return Ok(());
        }
        self.items.set_check_state(index, check)?;
        let act = self.policy.item_mutated(&mut self.items, index);

        let mut affected = act.affected;
        if !affected.contains(&index) {
            affected.push(index);
        }
        self.apply_dirty(DirtyRegion::Items(affected.clone()));
        for i in affected {
            self.check_state_changed.emit(i);
        }
        if act.selection_changed {
            self.selection_changed.emit(act.selection);
        }
        Ok(())
    }

    /// Enable or disable an item. Disabling sheds any hover, press, or
    /// focus the item held.
    pub fn set_item_enabled(&mut self, index: usize, enabled: bool) -> ListResult<()> {
        self.items.set_enabled(index, enabled)?;
        let mut dirty = DirtyRegion::Items(vec![index]);
        if !enabled {
            if self.state.hover() == Some(index) || self.state.pressed() == Some(index) {
                dirty = dirty.merge(self.state.clear_transient());
                self.host.cancel_tooltip_timer();
                self.host.hide_tooltip();
            }
            if self.state.focused() == Some(index) {
                let items = &self.items;
                dirty = dirty.merge(self.state.set_focused(None, |j| items.is_enabled(j)));
            }
        }
        self.apply_dirty(dirty);
        Ok(())
    }

    // ==== geometry ====

    /// The item under a viewport-space point, if any.
    pub fn hit_test(&self, pos: Point) -> Option<usize> {
        let content = pos.offset(self.scroll_origin.x, self.scroll_origin.y);
        (0..self.bounds.len()).find(|&i| {
            let r = self.bounds.get(i);
            !r.is_empty() && r.contains(content)
        })
    }

    /// Scroll so `origin` becomes the viewport's top-left, clamped to the
    /// content extents.
    pub fn set_scroll_origin(&mut self, origin: Point) {
        let clamped = self.clamp_scroll(origin);
        if clamped != self.scroll_origin {
            self.scroll_origin = clamped;
            self.host.set_scroll_origin(clamped);
            self.host.invalidate_all();
        }
    }

    /// If an item is not fully visible, scroll so its top-left becomes
    /// the viewport origin. Deliberately the simplest snap-to-show
    /// policy, not centering.
    pub fn ensure_visible(&mut self, index: usize) {
        let r = self.bounds.get(index);
        if r.is_empty() {
            return;
        }
        let viewport = Rect::from_origin_size(self.scroll_origin, self.params.client_size);
        if viewport.contains_rect(&r) {
            return;
        }
        self.set_scroll_origin(r.origin);
    }

    // ==== pointer input ====

    /// Press: focus the surface, and if an enabled item is hit, press and
    /// focus it with an immediate repaint so the pressed glyph shows
    /// before any click handling.
    pub fn on_pointer_down(&mut self, ev: PointerEvent) -> bool {
        if ev.button != MouseButton::Left {
            return false;
        }
        self.host.request_focus();
        let Some(index) = self.hit_test(ev.pos) else {
            return false;
        };
        if !self.items.is_enabled(index) {
            return false;
        }
        let items = &self.items;
        let dirty = self
            .state
            .set_pressed(Some(index), |j| items.is_enabled(j))
            .merge(self.state.set_focused(Some(index), |j| items.is_enabled(j)));
        self.apply_dirty(dirty);
        self.host.redraw_now();
        true
    }

    /// Release: clear the press unconditionally, then activate if the
    /// release landed on the item that was pressed.
    pub fn on_pointer_up(&mut self, ev: PointerEvent) -> bool {
        if ev.button != MouseButton::Left {
            return false;
        }
        let pressed = self.state.pressed();
        let dirty = self.state.clear_pressed();
        self.apply_dirty(dirty);
        let Some(index) = pressed else {
            return false;
        };
        if self.hit_test(ev.pos) == Some(index) && self.items.is_enabled(index) {
            self.activate_item(index);
        }
        true
    }

    /// Track hover and (re)arm the tooltip timer.
    pub fn on_pointer_move(&mut self, ev: PointerEvent) {
        let hit = self.hit_test(ev.pos);
        let old = self.state.hover();
        let items = &self.items;
        let dirty = self.state.set_hover(hit, |j| items.is_enabled(j));
        let new = self.state.hover();
        if new != old {
            self.host.cancel_tooltip_timer();
            self.host.hide_tooltip();
            if new.is_some() {
                self.host.arm_tooltip_timer();
            }
        }
        self.apply_dirty(dirty);
    }

    pub fn on_pointer_leave(&mut self) {
        let dirty = self.state.clear_transient();
        self.host.cancel_tooltip_timer();
        self.host.hide_tooltip();
        self.apply_dirty(dirty);
    }

    /// Vertical wheel scroll by `delta` pixels (positive scrolls down).
    pub fn on_wheel(&mut self, delta: i32) -> bool {
        let target = self.scroll_origin.offset(0, delta);
        let before = self.scroll_origin;
        self.set_scroll_origin(target);
        self.scroll_origin != before
    }

    /// The host's tooltip hover-delay timer fired.
    ///
    /// Guarded against staleness: the tooltip only shows if the pointer
    /// is still on the item the timer was armed for.
    pub fn on_tooltip_timer(&mut self) {
        let Some(index) = self.state.tooltip_armed() else {
            return;
        };
        if self.state.hover() != Some(index) {
            return;
        }
        if let Some(text) = self.items.get(index).and_then(|item| item.tooltip()) {
            self.host.show_tooltip(text);
        }
    }

    // ==== keyboard input ====

    pub fn on_focus_in(&mut self) {
        let mut dirty = self.state.set_surface_focused(true);
        if self.state.focused().is_none() {
            let items = &self.items;
            let first = next_enabled_index(None, true, items.len(), |j| items.is_enabled(j));
            dirty = dirty.merge(self.state.set_focused(first, |j| items.is_enabled(j)));
        }
        self.apply_dirty(dirty);
    }

    pub fn on_focus_out(&mut self) {
        let dirty = self
            .state
            .set_surface_focused(false)
            .merge(self.state.clear_pressed());
        self.apply_dirty(dirty);
    }

    /// Handle a key press; returns whether the surface consumed it.
    ///
    /// Arrow keys move focus to the nearest enabled item (activating it
    /// when the policy selects on navigation) and are consumed even at
    /// the ends of the list. Tab moves focus within the list and reports
    /// unhandled at either end so the host can move focus onward.
    pub fn on_key(&mut self, ev: KeyEvent) -> bool {
        match ev.key {
            Key::Down | Key::Right => {
                self.move_focus_relative(true);
                true
            }
            Key::Up | Key::Left => {
                self.move_focus_relative(false);
                true
            }
            Key::Home => {
                self.move_focus_to_edge(true);
                true
            }
            Key::End => {
                self.move_focus_to_edge(false);
                true
            }
            Key::Space => match self.state.focused() {
                Some(index) if self.items.is_enabled(index) => {
                    self.activate_item(index);
                    true
                }
                _ => false,
            },
            Key::Tab => {
                let forward = !ev.modifiers.shift;
                let items = &self.items;
                let target = next_enabled_index(self.state.focused(), forward, items.len(), |j| {
                    items.is_enabled(j)
                });
                match target {
                    Some(index) => {
                        self.focus_item(index, false);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    // ==== internals ====

    fn move_focus_relative(&mut self, forward: bool) {
        let items = &self.items;
        let target = next_enabled_index(self.state.focused(), forward, items.len(), |j| {
            items.is_enabled(j)
        });
        if let Some(index) = target {
            self.focus_item(index, self.policy.keyboard_selects());
        }
    }

    fn move_focus_to_edge(&mut self, first: bool) {
        let items = &self.items;
        let target = next_enabled_index(None, first, items.len(), |j| items.is_enabled(j));
        if let Some(index) = target {
            if Some(index) != self.state.focused() {
                self.focus_item(index, self.policy.keyboard_selects());
            }
        }
    }

    fn focus_item(&mut self, index: usize, activate: bool) {
        let items = &self.items;
        let dirty = self.state.set_focused(Some(index), |j| items.is_enabled(j));
        self.apply_dirty(dirty);
        self.ensure_visible(index);
        if activate {
            self.activate_item(index);
        }
    }

    fn activate_item(&mut self, index: usize) {
        let act = self.policy.activate(&mut self.items, index);
        debug!(
            target: "slat::surface",
            index,
            affected = act.affected.len(),
            "item activated"
        );
        self.item_activated.emit(index);
        if !act.affected.is_empty() {
            self.apply_dirty(DirtyRegion::Items(act.affected.clone()));
            for &i in &act.affected {
                self.check_state_changed.emit(i);
            }
        }
        if act.selection_changed {
            self.selection_changed.emit(act.selection);
        }
    }

    fn clamp_scroll(&self, origin: Point) -> Point {
        let max_x = (self.ideal_size.width - self.params.client_size.width).max(0);
        let max_y = (self.ideal_size.height - self.params.client_size.height).max(0);
        Point::new(origin.x.clamp(0, max_x), origin.y.clamp(0, max_y))
    }

    fn apply_dirty(&self, dirty: DirtyRegion) {
        match dirty {
            DirtyRegion::None => {}
            DirtyRegion::All => self.host.invalidate_all(),
            DirtyRegion::Items(indices) => {
                for i in indices {
                    let r = self.bounds.get(i);
                    if !r.is_empty() {
                        self.host
                            .invalidate(r.offset(-self.scroll_origin.x, -self.scroll_origin.y));
                    }
                }
            }
        }
    }

    fn request_layout(&mut self) {
        if self.layout_suspended > 0 {
            self.layout_pending = true;
        } else {
            self.perform_layout();
        }
    }

    /// Re-measure every item and rebuild the bounds table synchronously.
    fn perform_layout(&mut self) {
        self.layout_pending = false;

        let glyph = self.host.glyph_size(VisualState::default());
        let check_align = self.check_align;
        let text_align = self.text_align;
        let separator = self.subtext_separator;
        let params = self.params;
        let count = self.items.len();

        let items = &mut self.items;
        let host = &self.host;
        let mut measure = |i: usize, max_width: i32| -> Size {
            let Some(item) = items.get(i) else {
                return Size::ZERO;
            };
            let spec = MeasureSpec {
                text: item.text(),
                subtext: item.subtext(),
                glyph_size: glyph,
                max_width,
                check_align,
                text_align,
                subtext_separator: separator,
            };
            let metrics = measure_item(&spec, host.measurer(), host.subtext_measurer());
            if let Some(item) = items.get_mut(i) {
                item.set_metrics(metrics);
            }
            metrics.size
        };
        let ideal = ColumnLayoutEngine::run(&params, count, &mut measure, &mut self.bounds);

        self.ideal_size = ideal;
        let clamped = self.clamp_scroll(self.scroll_origin);
        if clamped != self.scroll_origin {
            self.scroll_origin = clamped;
            self.host.set_scroll_origin(clamped);
        }
        self.host.invalidate_all();
        self.layout_updated.emit(ideal);
    }
}
