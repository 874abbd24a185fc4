//! Slat - owner-drawn button-list controls.
//!
//! This crate provides the logic core of checkbox and radio-button list
//! controls:
//!
//! - **Measurement**: glyph/text/subtext placement within one item
//! - **Column Layout**: row-major or height-balanced column-major grids
//! - **Interaction**: hover, press, keyboard focus, and tooltip arming
//! - **Selection Policies**: independent toggling vs. exclusive selection
//! - **Host Seam**: all drawing, timers, and focus go through a trait
//!
//! The crate never paints and never owns an event loop; the embedding
//! host feeds it pointer/keyboard events and implements
//! [`HostServices`](host::HostServices) for everything platform-shaped.
//!
//! # Example
//!
//! ```
//! use slat::host::HostServices;
//! use slat::measure::TextMeasurer;
//! use slat::{CheckBoxList, CheckState, ListItem, Point, Rect, Size, VisualState};
//!
//! // A headless host: fixed-advance text, no real window behind it.
//! struct Mono;
//! impl TextMeasurer for Mono {
//!     fn measure(&self, text: &str, _max_width: i32) -> Size {
//!         Size::new(8 * text.chars().count() as i32, 16)
//!     }
//! }
//!
//! struct Headless;
//! impl HostServices for Headless {
//!     fn measurer(&self) -> &dyn TextMeasurer { &Mono }
//!     fn subtext_measurer(&self) -> &dyn TextMeasurer { &Mono }
//!     fn glyph_size(&self, _state: VisualState) -> Size { Size::new(13, 13) }
//!     fn invalidate(&self, _rect: Rect) {}
//!     fn invalidate_all(&self) {}
//!     fn redraw_now(&self) {}
//!     fn request_focus(&self) {}
//!     fn show_tooltip(&self, _text: &str) {}
//!     fn hide_tooltip(&self) {}
//!     fn arm_tooltip_timer(&self) {}
//!     fn cancel_tooltip_timer(&self) {}
//!     fn set_scroll_origin(&self, _origin: Point) {}
//! }
//!
//! let mut list = CheckBoxList::new(Headless);
//! list.surface_mut().set_client_size(Size::new(200, 120));
//! list.add_item(ListItem::new("Alpha"));
//! list.add_item(ListItem::new("Beta"));
//! list.set_check_state(0, CheckState::Checked)?;
//! assert_eq!(list.checked_bits()?, 0b01);
//! # Ok::<(), slat::ListError>(())
//! ```

pub mod check_box_list;
pub mod error;
pub mod events;
pub mod host;
pub mod items;
pub mod layout;
pub mod measure;
pub mod policy;
pub mod radio_button_list;
pub mod state;
pub mod surface;

pub use check_box_list::CheckBoxList;
pub use error::{ListError, ListResult};
pub use events::{Key, KeyEvent, KeyboardModifiers, MouseButton, PointerEvent};
pub use items::{CheckState, ItemList, ListItem};
pub use layout::{LayoutParams, RepeatDirection};
pub use measure::ContentAlignment;
pub use policy::{
    Activation, ExclusivePolicy, IndependentPolicy, OverlayState, SelectionPolicy, VisualState,
};
pub use radio_button_list::RadioButtonList;
pub use surface::ListSurface;

pub use slat_core::{ConnectionGuard, ConnectionId, Edges, Point, Rect, Signal, Size};
