/// Contiguous span `[start, start + length)` of visible positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: usize,
    pub length: usize,
}

impl Range {
    pub fn of_length(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// First position past the span.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn contains(&self, position: usize) -> bool {
        position >= self.start && position < self.end()
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// Effect of one expand/collapse call on a single group.
///
/// The range is `None` when the group has no children: the flag still
/// flips but no visible rows are inserted or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Children became visible; the range is an insertion.
    Expanded(Option<Range>),
    /// Children were hidden; the range is a removal.
    Collapsed(Option<Range>),
    /// The group already had the requested state.
    Unchanged,
}

impl Transition {
    pub fn range(&self) -> Option<Range> {
        match self {
            Transition::Expanded(range) | Transition::Collapsed(range) => {
                *range
            },
            Transition::Unchanged => None,
        }
    }

    pub fn is_changed(&self) -> bool {
        !matches!(self, Transition::Unchanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_bounds_are_half_open() {
        let range = Range::of_length(3, 3);
        assert_eq!(range.end(), 6);
        assert!(!range.contains(2));
        assert!(range.contains(3));
        assert!(range.contains(5));
        assert!(!range.contains(6));
        assert!(!range.is_empty());
        assert!(Range::of_length(4, 0).is_empty());
    }

    #[test]
    fn transition_range_is_absent_when_unchanged() {
        let range = Range::of_length(1, 2);
        assert_eq!(Transition::Expanded(Some(range)).range(), Some(range));
        assert_eq!(Transition::Collapsed(None).range(), None);
        assert_eq!(Transition::Unchanged.range(), None);
        assert!(Transition::Collapsed(None).is_changed());
        assert!(!Transition::Unchanged.is_changed());
    }
}
