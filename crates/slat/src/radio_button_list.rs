//! Radio-flavored list: exactly one checked item at a time.

use slat_core::Signal;

use crate::error::{ListError, ListResult};
use crate::host::HostServices;
use crate::items::{CheckState, ItemList, ListItem};
use crate::policy::ExclusivePolicy;
use crate::surface::ListSurface;

/// A list where checking one item unchecks the rest.
///
/// Thin wrapper over [`ListSurface`] with an [`ExclusivePolicy`]; the
/// full surface API is reachable through [`surface`](Self::surface) /
/// [`surface_mut`](Self::surface_mut).
pub struct RadioButtonList<H: HostServices> {
    surface: ListSurface<H, ExclusivePolicy>,
}

impl<H: HostServices> RadioButtonList<H> {
    pub fn new(host: H) -> Self {
        Self {
            surface: ListSurface::new(host, ExclusivePolicy::new()),
        }
    }

    // ==== items ====

    pub fn items(&self) -> &ItemList {
        self.surface.items()
    }

    pub fn add_item(&mut self, item: ListItem) -> usize {
        self.surface.add_item(item)
    }

    pub fn remove_item(&mut self, index: usize) -> ListResult<ListItem> {
        self.surface.remove_item(index)
    }

    pub fn clear_items(&mut self) {
        self.surface.clear_items();
    }

    // ==== selection ====

    /// The selected index, or `None` when nothing is selected yet.
    pub fn selected_index(&self) -> Option<usize> {
        self.surface.policy().selected()
    }

    /// Select an item programmatically; `None` clears the selection.
    pub fn set_selected_index(&mut self, index: Option<usize>) -> ListResult<()> {
        match index {
            Some(i) => {
                if i >= self.surface.items().len() {
                    return Err(ListError::IndexOutOfBounds {
                        index: i,
                        len: self.surface.items().len(),
                    });
                }
                self.surface.set_check_state(i, CheckState::Checked)
            }
            None => match self.selected_index() {
                Some(current) => self.surface.set_check_state(current, CheckState::Unchecked),
                None => Ok(()),
            },
        }
    }

    pub fn selected_item(&self) -> Option<&ListItem> {
        self.selected_index().and_then(|i| self.surface.items().get(i))
    }

    /// Caption of the selected item, if any.
    pub fn selected_text(&self) -> Option<&str> {
        self.selected_item().map(|item| item.text())
    }

    /// Select the first item whose caption equals `text`.
    pub fn select_text(&mut self, text: &str) -> bool {
        match self.surface.items().index_of_text(text) {
            Some(i) => self.set_selected_index(Some(i)).is_ok(),
            None => false,
        }
    }

    // ==== signals ====

    pub fn selection_changed(&self) -> &Signal<Option<usize>> {
        self.surface.selection_changed()
    }

    pub fn item_activated(&self) -> &Signal<usize> {
        self.surface.item_activated()
    }

    // ==== escape hatch ====

    pub fn surface(&self) -> &ListSurface<H, ExclusivePolicy> {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut ListSurface<H, ExclusivePolicy> {
        &mut self.surface
    }
}
