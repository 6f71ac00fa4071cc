/// Kind of a visible row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Group,
    Child,
}

/// Visible row resolved back to group coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlatPosition {
    /// Index of the owning group in declaration order.
    pub group: usize,
    /// Index of the child inside the group, `None` for the group row itself.
    pub child: Option<usize>,
}

impl FlatPosition {
    pub fn kind(&self) -> ItemKind {
        match self.child {
            Some(_) => ItemKind::Child,
            None => ItemKind::Group,
        }
    }
}

/// Borrowed row of the flat sequence.
#[derive(Debug, PartialEq, Eq)]
pub enum Item<'a, G, CH> {
    Group { key: &'a G },
    Child { key: &'a G, child: &'a CH },
}

impl<'a, G, CH> Item<'a, G, CH> {
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Group { .. } => ItemKind::Group,
            Item::Child { .. } => ItemKind::Child,
        }
    }

    /// Key of the group that owns this row.
    pub fn key(&self) -> &'a G {
        match *self {
            Item::Group { key } | Item::Child { key, .. } => key,
        }
    }

    pub fn child(&self) -> Option<&'a CH> {
        match *self {
            Item::Group { .. } => None,
            Item::Child { child, .. } => Some(child),
        }
    }
}

impl<G, CH> Clone for Item<'_, G, CH> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G, CH> Copy for Item<'_, G, CH> {}
