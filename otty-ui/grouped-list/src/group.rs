/// Input used to build one group of a [`GroupingList`](crate::GroupingList).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec<G, CH> {
    pub key: G,
    pub sticky_id: i64,
    pub children: Vec<CH>,
}

impl<G, CH> GroupSpec<G, CH> {
    pub fn new(key: G, sticky_id: i64, children: Vec<CH>) -> Self {
        Self {
            key,
            sticky_id,
            children,
        }
    }

    /// Build a spec from a domain object describing its own group.
    pub fn from_provider<P>(provider: &P) -> Self
    where
        P: GroupProvider<G, CH> + ?Sized,
    {
        Self {
            key: provider.group(),
            sticky_id: provider.sticky_id(),
            children: provider.children(),
        }
    }
}

/// Trait implemented by domain types that can describe a group directly.
pub trait GroupProvider<G, CH> {
    /// Key identifying the group.
    fn group(&self) -> G;
    /// Identifier used by sticky headers.
    fn sticky_id(&self) -> i64;
    /// Ordered children of the group.
    fn children(&self) -> Vec<CH>;
}

/// Immutable group record owned by a [`GroupingList`](crate::GroupingList).
///
/// The expanded flag is not stored here: the list keeps it separately so a
/// record never changes after it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<G, CH> {
    key: G,
    sticky_id: i64,
    children: Vec<CH>,
}

impl<G, CH> Group<G, CH> {
    pub fn key(&self) -> &G {
        &self.key
    }

    pub fn sticky_id(&self) -> i64 {
        self.sticky_id
    }

    pub fn children(&self) -> &[CH] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

impl<G, CH> From<GroupSpec<G, CH>> for Group<G, CH> {
    fn from(spec: GroupSpec<G, CH>) -> Self {
        Self {
            key: spec.key,
            sticky_id: spec.sticky_id,
            children: spec.children,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Section {
        title: &'static str,
        rows: Vec<u32>,
    }

    impl GroupProvider<String, u32> for Section {
        fn group(&self) -> String {
            self.title.to_owned()
        }

        fn sticky_id(&self) -> i64 {
            self.rows.len() as i64
        }

        fn children(&self) -> Vec<u32> {
            self.rows.clone()
        }
    }

    #[test]
    fn spec_from_provider_copies_all_fields() {
        let section = Section {
            title: "inbox",
            rows: vec![3, 1, 2],
        };

        let spec = GroupSpec::from_provider(&section);
        assert_eq!(
            spec,
            GroupSpec::new(String::from("inbox"), 3, vec![3, 1, 2])
        );
    }

    #[test]
    fn group_record_keeps_child_order() {
        let group: Group<&str, &str> =
            GroupSpec::new("a", 7, vec!["z", "y"]).into();
        assert_eq!(group.key(), &"a");
        assert_eq!(group.sticky_id(), 7);
        assert_eq!(group.children(), &["z", "y"]);
        assert_eq!(group.child_count(), 2);
    }
}
