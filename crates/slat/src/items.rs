//! Item model and the ordered item collection.
//!
//! [`ListItem`] is plain data plus a cached measurement; [`ItemList`] is
//! the ordered collection every other module indexes into. Mutations
//! report what changed as an [`ItemChange`] so the surface can decide
//! between a full relayout and a repaint-only pass.

use std::any::Any;
use std::sync::Arc;

use crate::error::{ListError, ListResult};
use crate::measure::ItemMetrics;

/// Tri-state check value of an item.
///
/// Radio-style lists only ever use `Unchecked`/`Checked`; `Indeterminate`
/// appears in three-state checkbox lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    /// The item is not checked.
    #[default]
    Unchecked,
    /// The item is checked.
    Checked,
    /// The item is neither fully checked nor unchecked.
    Indeterminate,
}

impl CheckState {
    /// Whether the state counts as "on" (`Checked` or `Indeterminate`).
    #[inline]
    pub fn is_checked(self) -> bool {
        !matches!(self, CheckState::Unchecked)
    }

    /// Collapse to a boolean, mapping `Indeterminate` to `true`.
    #[inline]
    pub fn to_bool(self) -> bool {
        self.is_checked()
    }
}

impl From<bool> for CheckState {
    fn from(checked: bool) -> Self {
        if checked {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }
}

/// One entry in a button list.
#[derive(Clone, Default)]
pub struct ListItem {
    text: String,
    subtext: Option<String>,
    tooltip: Option<String>,
    enabled: bool,
    check_state: CheckState,
    tag: Option<Arc<dyn Any + Send + Sync>>,
    metrics: Option<ItemMetrics>,
}

impl ListItem {
    /// Create an enabled, unchecked item with the given caption.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            enabled: true,
            ..Self::default()
        }
    }

    // ==== builder-style configuration ====

    pub fn with_subtext(mut self, subtext: impl Into<String>) -> Self {
        self.subtext = Some(subtext.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_check_state(mut self, state: CheckState) -> Self {
        self.check_state = state;
        self
    }

    /// Attach an arbitrary application payload.
    pub fn with_tag(mut self, tag: Arc<dyn Any + Send + Sync>) -> Self {
        self.tag = Some(tag);
        self
    }

    // ==== accessors ====

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn subtext(&self) -> Option<&str> {
        self.subtext.as_deref()
    }

    #[inline]
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn check_state(&self) -> CheckState {
        self.check_state
    }

    #[inline]
    pub fn tag(&self) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.tag.as_ref()
    }

    /// The cached measurement from the last layout pass, if still valid.
    #[inline]
    pub fn metrics(&self) -> Option<&ItemMetrics> {
        self.metrics.as_ref()
    }

    pub(crate) fn set_metrics(&mut self, metrics: ItemMetrics) {
        self.metrics = Some(metrics);
    }

    pub(crate) fn invalidate_metrics(&mut self) {
        self.metrics = None;
    }

    pub(crate) fn set_check_state(&mut self, state: CheckState) {
        self.check_state = state;
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl std::fmt::Debug for ListItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListItem")
            .field("text", &self.text)
            .field("subtext", &self.subtext)
            .field("enabled", &self.enabled)
            .field("check_state", &self.check_state)
            .field("has_tag", &self.tag.is_some())
            .finish_non_exhaustive()
    }
}

/// What a collection mutation did, from the layout engine's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemChange {
    /// An item was inserted at the index.
    Added(usize),
    /// The item at the index was removed.
    Removed(usize),
    /// An existing item changed in place.
    Changed {
        index: usize,
        /// Whether the change can alter the item's measured size (text or
        /// subtext edits) as opposed to paint-only state.
        size_affecting: bool,
    },
    /// The collection was cleared or rebuilt wholesale.
    Reset,
}

/// Ordered collection of list items.
#[derive(Debug, Default)]
pub struct ItemList {
    items: Vec<ListItem>,
}

impl ItemList {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&ListItem> {
        self.items.get(index)
    }

    /// Whether the item at `index` exists and is enabled.
    #[inline]
    pub fn is_enabled(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|item| item.enabled)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListItem> {
        self.items.iter()
    }

    /// Index of the first item whose caption equals `text`, if any.
    pub fn index_of_text(&self, text: &str) -> Option<usize> {
        self.items.iter().position(|item| item.text == text)
    }

    // ==== mutations ====

    /// Append an item, returning the change record.
    pub fn add(&mut self, item: ListItem) -> ItemChange {
        self.items.push(item);
        ItemChange::Added(self.items.len() - 1)
    }

    /// Insert an item at `index` (clamped to the end).
    pub fn insert(&mut self, index: usize, item: ListItem) -> ItemChange {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        ItemChange::Added(index)
    }

    /// Remove the item at `index`.
    pub fn remove(&mut self, index: usize) -> ListResult<(ListItem, ItemChange)> {
        if index >= self.items.len() {
            return Err(ListError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        let item = self.items.remove(index);
        Ok((item, ItemChange::Removed(index)))
    }

    /// Drop all items.
    pub fn clear(&mut self) -> ItemChange {
        self.items.clear();
        ItemChange::Reset
    }

    /// Edit an item in place through `f`.
    ///
    /// The cached measurement is invalidated and the change is reported as
    /// size-affecting, since `f` may rewrite the caption or subtext.
    pub fn modify(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut ListItem),
    ) -> ListResult<ItemChange> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(ListError::IndexOutOfBounds { index, len })?;
        f(item);
        item.invalidate_metrics();
        Ok(ItemChange::Changed {
            index,
            size_affecting: true,
        })
    }

    /// Set an item's check state. Paint-only; measurement survives.
    pub fn set_check_state(&mut self, index: usize, state: CheckState) -> ListResult<ItemChange> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(ListError::IndexOutOfBounds { index, len })?;
        item.set_check_state(state);
        Ok(ItemChange::Changed {
            index,
            size_affecting: false,
        })
    }

    /// Enable or disable an item. Paint-only; measurement survives.
    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> ListResult<ItemChange> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(ListError::IndexOutOfBounds { index, len })?;
        item.set_enabled(enabled);
        Ok(ItemChange::Changed {
            index,
            size_affecting: false,
        })
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut ListItem> {
        self.items.get_mut(index)
    }
}

static_assertions::assert_impl_all!(ListItem: Send, Sync);
static_assertions::assert_impl_all!(ItemList: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_state_conversions() {
        assert_eq!(CheckState::from(true), CheckState::Checked);
        assert_eq!(CheckState::from(false), CheckState::Unchecked);
        assert!(CheckState::Indeterminate.is_checked());
        assert!(!CheckState::Unchecked.to_bool());
    }

    #[test]
    fn test_builder_defaults() {
        let item = ListItem::new("Alpha");
        assert_eq!(item.text(), "Alpha");
        assert!(item.is_enabled());
        assert_eq!(item.check_state(), CheckState::Unchecked);
        assert!(item.subtext().is_none());
        assert!(item.metrics().is_none());
    }

    #[test]
    fn test_add_remove_reports_changes() {
        let mut list = ItemList::new();
        assert_eq!(list.add(ListItem::new("a")), ItemChange::Added(0));
        assert_eq!(list.add(ListItem::new("b")), ItemChange::Added(1));
        assert_eq!(list.insert(0, ListItem::new("z")), ItemChange::Added(0));
        assert_eq!(list.get(0).unwrap().text(), "z");

        let (removed, change) = list.remove(0).unwrap();
        assert_eq!(removed.text(), "z");
        assert_eq!(change, ItemChange::Removed(0));

        assert!(matches!(
            list.remove(5),
            Err(ListError::IndexOutOfBounds { index: 5, len: 2 })
        ));
        assert_eq!(list.clear(), ItemChange::Reset);
        assert!(list.is_empty());
    }

    #[test]
    fn test_modify_invalidates_metrics() {
        let mut list = ItemList::new();
        list.add(ListItem::new("a"));
        list.get_mut(0).unwrap().set_metrics(ItemMetrics::default());
        assert!(list.get(0).unwrap().metrics().is_some());

        let change = list.modify(0, |item| item.set_enabled(false)).unwrap();
        assert_eq!(
            change,
            ItemChange::Changed {
                index: 0,
                size_affecting: true
            }
        );
        assert!(list.get(0).unwrap().metrics().is_none());
    }

    #[test]
    fn test_paint_only_mutations_keep_metrics() {
        let mut list = ItemList::new();
        list.add(ListItem::new("a"));
        list.get_mut(0).unwrap().set_metrics(ItemMetrics::default());

        let change = list.set_check_state(0, CheckState::Checked).unwrap();
        assert_eq!(
            change,
            ItemChange::Changed {
                index: 0,
                size_affecting: false
            }
        );
        list.set_enabled(0, false).unwrap();
        assert!(list.get(0).unwrap().metrics().is_some());
        assert!(!list.is_enabled(0));
    }

    #[test]
    fn test_mutations_report_out_of_bounds() {
        let mut list = ItemList::new();
        list.add(ListItem::new("a"));

        assert!(matches!(
            list.modify(3, |_| {}),
            Err(ListError::IndexOutOfBounds { index: 3, len: 1 })
        ));
        assert!(matches!(
            list.set_check_state(3, CheckState::Checked),
            Err(ListError::IndexOutOfBounds { index: 3, len: 1 })
        ));
        assert!(matches!(
            list.set_enabled(3, false),
            Err(ListError::IndexOutOfBounds { index: 3, len: 1 })
        ));
    }

    #[test]
    fn test_index_of_text() {
        let mut list = ItemList::new();
        list.add(ListItem::new("red"));
        list.add(ListItem::new("green"));
        list.add(ListItem::new("red"));
        assert_eq!(list.index_of_text("green"), Some(1));
        assert_eq!(list.index_of_text("red"), Some(0));
        assert_eq!(list.index_of_text("blue"), None);
    }
}
