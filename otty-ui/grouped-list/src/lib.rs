//! Expandable grouped list model for virtualized list widgets.
//!
//! This crate is split into two layers:
//! - the model ([`GroupingList`]) that owns groups and their children and
//!   projects them onto flat visible row positions;
//! - host helpers ([`ExpandableList`], [`ToggleGuard`], [`ListObserver`]) that
//!   debounce user toggles and forward changes as range notifications.
//!
//! A group's children are visible only while the group is expanded, right
//! after the group row. Every expand/collapse returns the exact rows it
//! inserted or removed, so renderers can animate the change instead of
//! refreshing the whole list.
//!
//! The recommended flow for interactive lists:
//! 1. build a [`GroupingList`] from [`GroupSpec`] values;
//! 2. render rows using [`GroupingList::visible_count`] and
//!    [`GroupingList::item_at`];
//! 3. feed group row clicks into [`ExpandableList::toggle`];
//! 4. persist [`GroupingList::save`] around view teardown and apply it with
//!    [`GroupingList::restore`] after rebuilding.
//!
//! See `examples/grouped_list.rs` for a complete runnable example.
//!
//! # Quick Example
//!
//! ```
//! use otty_ui_grouped_list::{
//!     ExpandMode, GroupSpec, GroupingList, Item, Range, Transition,
//! };
//!
//! let mut list = GroupingList::new([
//!     GroupSpec::new("A", 1, vec!["a1", "a2"]),
//!     GroupSpec::new("B", 2, vec!["b1"]),
//! ])?;
//! assert_eq!(list.visible_count(), 2);
//!
//! let outcome = list.expand(&"A", ExpandMode::Multiple);
//! assert_eq!(
//!     outcome.primary().map(|change| change.transition),
//!     Some(Transition::Expanded(Some(Range::of_length(1, 2))))
//! );
//! assert_eq!(list.item_at(2)?, Item::Child { key: &"A", child: &"a2" });
//! assert_eq!(list.item_at(3)?, Item::Group { key: &"B" });
//! # Ok::<(), otty_ui_grouped_list::GroupingError>(())
//! ```

mod error;
mod group;
mod host;
mod index;
mod item;
mod list;
mod options;
mod range;
mod state;

pub use error::{GroupingError, Result};
pub use group::{Group, GroupProvider, GroupSpec};
pub use host::{ExpandableList, ListObserver, ToggleEvent, ToggleGuard};
pub use item::{FlatPosition, Item, ItemKind};
pub use list::{ExpandMode, ExpandOutcome, GroupChange, GroupingList};
pub use options::{DEFAULT_TOGGLE_DEBOUNCE, ExpandOptions};
pub use range::{Range, Transition};
pub use state::{EXPAND_STATE_VERSION, ExpandState};
