use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{GroupingError, Result};
use crate::group::{Group, GroupProvider, GroupSpec};
use crate::index::FlatIndex;
use crate::item::{FlatPosition, Item, ItemKind};
use crate::range::{Range, Transition};
use crate::state::ExpandState;

/// Policy applied when a group is expanded.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExpandMode {
    /// Expanding a group collapses every other expanded group first.
    #[default]
    Single,
    /// Any subset of groups may be expanded.
    Multiple,
}

/// Transition of one group produced by an expand/collapse call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupChange<G> {
    pub key: G,
    pub group_index: usize,
    pub transition: Transition,
}

/// Ordered transitions produced by one expand/collapse call.
///
/// Incidental collapses forced by [`ExpandMode::Single`] come first, the
/// transition of the requested group comes last. Every range is expressed
/// against the list as it was right after the preceding changes were
/// applied, so hosts can replay them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandOutcome<G> {
    changes: Vec<GroupChange<G>>,
}

impl<G> ExpandOutcome<G> {
    fn none() -> Self {
        Self {
            changes: Vec::new(),
        }
    }

    /// All transitions in application order.
    pub fn changes(&self) -> &[GroupChange<G>] {
        &self.changes
    }

    /// Transition of the requested group, `None` for unknown keys.
    pub fn primary(&self) -> Option<&GroupChange<G>> {
        self.changes.last()
    }

    /// Collapses forced by single-expand mode.
    pub fn incidental(&self) -> &[GroupChange<G>] {
        match self.changes.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    /// `true` when nothing in the list changed.
    pub fn is_noop(&self) -> bool {
        self.changes
            .iter()
            .all(|change| !change.transition.is_changed())
    }

    /// Non-empty transitions paired with their ranges, in application order.
    pub fn ranges(&self) -> impl Iterator<Item = (Transition, Range)> + '_ {
        self.changes.iter().filter_map(|change| {
            change
                .transition
                .range()
                .map(|range| (change.transition, range))
        })
    }
}

impl<G> Default for ExpandOutcome<G> {
    fn default() -> Self {
        Self::none()
    }
}

/// Two-level group/child model projected onto flat visible positions.
///
/// Groups keep their declaration order. A group's children occupy the rows
/// right after the group row, and only while the group is expanded. Expand
/// flags live beside the immutable [`Group`] records and the visible
/// positions are cached in a prefix-sum table that is adjusted on every
/// transition.
#[derive(Debug, Clone)]
pub struct GroupingList<G, CH> {
    groups: Vec<Group<G, CH>>,
    expanded: Vec<bool>,
    lookup: HashMap<G, usize>,
    index: FlatIndex,
}

impl<G, CH> GroupingList<G, CH>
where
    G: Eq + Hash + Clone,
{
    /// Build a list with every group collapsed.
    pub fn new(
        specs: impl IntoIterator<Item = GroupSpec<G, CH>>,
    ) -> Result<Self> {
        let mut groups = Vec::new();
        let mut lookup = HashMap::new();

        for spec in specs {
            let position = groups.len();
            if let Some(first) = lookup.insert(spec.key.clone(), position) {
                return Err(GroupingError::DuplicateKey {
                    first,
                    duplicate: position,
                });
            }
            groups.push(Group::from(spec));
        }

        let expanded = vec![false; groups.len()];
        let index = FlatIndex::build(std::iter::repeat_n(1, groups.len()));

        Ok(Self {
            groups,
            expanded,
            lookup,
            index,
        })
    }

    /// Build a list from domain objects implementing [`GroupProvider`].
    pub fn from_providers<'p, P>(
        providers: impl IntoIterator<Item = &'p P>,
    ) -> Result<Self>
    where
        P: GroupProvider<G, CH> + 'p,
    {
        Self::new(providers.into_iter().map(GroupSpec::from_provider))
    }

    /// Replace every group. All groups start collapsed; on error the current
    /// content is kept.
    pub fn replace_all(
        &mut self,
        specs: impl IntoIterator<Item = GroupSpec<G, CH>>,
    ) -> Result<()> {
        let fresh = Self::new(specs)?;
        debug!(
            "grouped list replaced: {} -> {} groups",
            self.groups.len(),
            fresh.groups.len()
        );
        *self = fresh;
        Ok(())
    }

    pub fn groups(&self) -> &[Group<G, CH>] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&Group<G, CH>> {
        self.groups.get(index)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of visible rows.
    pub fn visible_count(&self) -> usize {
        self.index.visible_count()
    }

    /// Resolve a visible position into group coordinates.
    pub fn locate(&self, position: usize) -> Result<FlatPosition> {
        self.index
            .locate(position)
            .ok_or(GroupingError::OutOfRange {
                position,
                len: self.visible_count(),
            })
    }

    pub fn item_at(&self, position: usize) -> Result<Item<'_, G, CH>> {
        let found = self.locate(position)?;
        let group = &self.groups[found.group];
        Ok(match found.child {
            Some(child) => Item::Child {
                key: group.key(),
                child: &group.children()[child],
            },
            None => Item::Group { key: group.key() },
        })
    }

    pub fn kind_at(&self, position: usize) -> Result<ItemKind> {
        Ok(self.locate(position)?.kind())
    }

    /// Group record owning the row at `position` (group row or child row).
    pub fn group_at(&self, position: usize) -> Result<&Group<G, CH>> {
        let found = self.locate(position)?;
        Ok(&self.groups[found.group])
    }

    /// Sticky identifier of the group owning the row at `position`.
    pub fn sticky_id_at(&self, position: usize) -> Result<i64> {
        Ok(self.group_at(position)?.sticky_id())
    }

    /// Index of `key` in group declaration order.
    pub fn group_index_of(&self, key: &G) -> Result<usize> {
        self.lookup.get(key).copied().ok_or(GroupingError::NotFound)
    }

    /// Visible position of the group row for `key`.
    pub fn visible_position_of(&self, key: &G) -> Result<usize> {
        let group = self.group_index_of(key)?;
        self.index.start_of(group).ok_or(GroupingError::NotFound)
    }

    /// Number of children of `key`, `0` for unknown keys.
    pub fn child_count(&self, key: &G) -> usize {
        self.lookup
            .get(key)
            .map_or(0, |group| self.groups[*group].child_count())
    }

    pub fn is_expanded(&self, key: &G) -> bool {
        self.lookup
            .get(key)
            .is_some_and(|group| self.expanded[*group])
    }

    /// Keys of expanded groups in declaration order.
    pub fn expanded_keys(&self) -> Vec<&G> {
        self.groups
            .iter()
            .zip(&self.expanded)
            .filter(|(_, expanded)| **expanded)
            .map(|(group, _)| group.key())
            .collect()
    }

    /// Set the expand flag of `key`.
    ///
    /// Unknown keys are ignored and yield an empty outcome. In
    /// [`ExpandMode::Single`] expanding a group first collapses every other
    /// expanded group.
    pub fn set_expanded(
        &mut self,
        key: &G,
        expanded: bool,
        mode: ExpandMode,
    ) -> ExpandOutcome<G> {
        let Some(&target) = self.lookup.get(key) else {
            trace!("ignoring expand change for unknown group");
            return ExpandOutcome::none();
        };

        let mut changes = Vec::new();
        if expanded && mode == ExpandMode::Single {
            for group in 0..self.groups.len() {
                if group != target && self.expanded[group] {
                    let transition = self.apply(group, false);
                    changes.push(self.change(group, transition));
                }
            }
        }

        let transition = self.apply(target, expanded);
        changes.push(self.change(target, transition));

        ExpandOutcome { changes }
    }

    pub fn expand(&mut self, key: &G, mode: ExpandMode) -> ExpandOutcome<G> {
        self.set_expanded(key, true, mode)
    }

    pub fn collapse(&mut self, key: &G) -> ExpandOutcome<G> {
        self.set_expanded(key, false, ExpandMode::Multiple)
    }

    /// Flip the expand flag of `key`.
    pub fn toggle(&mut self, key: &G, mode: ExpandMode) -> ExpandOutcome<G> {
        let expanded = self.is_expanded(key);
        self.set_expanded(key, !expanded, mode)
    }

    /// Snapshot the keys of expanded groups.
    pub fn save(&self) -> ExpandState<G> {
        ExpandState::new(self.expanded_keys().into_iter().cloned().collect())
    }

    /// Re-apply a saved state: groups whose key is in `state` become
    /// expanded, every other group collapses.
    ///
    /// Group order and content are untouched; keys missing from the list
    /// are skipped.
    pub fn restore(&mut self, state: &ExpandState<G>) {
        if !state.is_supported() {
            warn!(
                "ignoring expand state with unsupported version {}",
                state.version
            );
            return;
        }

        let wanted: HashSet<&G> = state.iter().collect();
        let mut matched = 0;
        let flags = self.expanded.iter_mut();
        for (group, flag) in self.groups.iter().zip(flags) {
            *flag = wanted.contains(group.key());
            if *flag {
                matched += 1;
            }
        }

        self.index = FlatIndex::build(
            self.groups
                .iter()
                .zip(&self.expanded)
                .map(|(group, expanded)| extent(group, *expanded)),
        );

        let skipped = wanted.len() - matched;
        debug!("expand state restored: {matched} expanded, {skipped} skipped");
    }

    /// Flip one flag and report the affected rows.
    ///
    /// Expansion ranges are computed after the index is updated, collapse
    /// ranges before, so both describe the children's rows while visible.
    fn apply(&mut self, group: usize, expanded: bool) -> Transition {
        if self.expanded[group] == expanded {
            return Transition::Unchanged;
        }

        let transition = if expanded {
            self.expanded[group] = true;
            self.index.set_extent(group, extent(&self.groups[group], true));
            Transition::Expanded(self.child_range(group))
        } else {
            let range = self.child_range(group);
            self.expanded[group] = false;
            self.index.set_extent(group, 1);
            Transition::Collapsed(range)
        };

        trace!("group {group} transition: {transition:?}");
        transition
    }

    fn child_range(&self, group: usize) -> Option<Range> {
        let count = self.groups[group].child_count();
        if count == 0 {
            return None;
        }
        let start = self.index.start_of(group)?;
        Some(Range::of_length(start + 1, count))
    }

    fn change(&self, group: usize, transition: Transition) -> GroupChange<G> {
        GroupChange {
            key: self.groups[group].key().clone(),
            group_index: group,
            transition,
        }
    }
}

impl<G, CH> Default for GroupingList<G, CH> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            expanded: Vec::new(),
            lookup: HashMap::new(),
            index: FlatIndex::default(),
        }
    }
}

fn extent<G, CH>(group: &Group<G, CH>, expanded: bool) -> usize {
    if expanded { 1 + group.child_count() } else { 1 }
}
