use crate::item::FlatPosition;

/// Prefix-sum table mapping group indices to visible positions.
///
/// `starts[i]` is the visible position of group `i`'s own row and
/// `extents[i]` is the number of rows the group occupies
/// (`1 + children` when expanded, `1` otherwise).
#[derive(Debug, Clone, Default)]
pub(crate) struct FlatIndex {
    starts: Vec<usize>,
    extents: Vec<usize>,
    total: usize,
}

impl FlatIndex {
    /// Build the table from per-group extents in declaration order.
    pub(crate) fn build(extents: impl IntoIterator<Item = usize>) -> Self {
        let mut index = Self {
            starts: Vec::new(),
            extents: extents.into_iter().collect(),
            total: 0,
        };
        index.starts = vec![0; index.extents.len()];
        index.recompute_from(0);
        index
    }

    /// Change the extent of one group and shift every later group.
    pub(crate) fn set_extent(&mut self, group: usize, extent: usize) {
        let Some(slot) = self.extents.get_mut(group) else {
            return;
        };
        if *slot == extent {
            return;
        }
        *slot = extent;
        self.recompute_from(group);
    }

    pub(crate) fn visible_count(&self) -> usize {
        self.total
    }

    pub(crate) fn start_of(&self, group: usize) -> Option<usize> {
        self.starts.get(group).copied()
    }

    /// Resolve a visible position, `None` when it is past the end.
    pub(crate) fn locate(&self, position: usize) -> Option<FlatPosition> {
        if position >= self.total {
            return None;
        }

        // Empty tables have `total == 0`, so at least one start is <= position.
        let group =
            self.starts.partition_point(|start| *start <= position) - 1;
        let offset = position - self.starts[group];
        Some(FlatPosition {
            group,
            child: offset.checked_sub(1),
        })
    }

    fn recompute_from(&mut self, group: usize) {
        let mut cursor = match group.checked_sub(1) {
            Some(prev) => self.starts[prev] + self.extents[prev],
            None => 0,
        };
        for index in group..self.extents.len() {
            self.starts[index] = cursor;
            cursor += self.extents[index];
        }
        self.total = cursor;
    }
}
