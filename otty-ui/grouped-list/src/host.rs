use std::hash::Hash;
use std::time::{Duration, Instant};

use log::trace;

use crate::error::Result;
use crate::group::GroupSpec;
use crate::list::{ExpandMode, ExpandOutcome, GroupingList};
use crate::options::ExpandOptions;
use crate::range::{Range, Transition};
use crate::state::ExpandState;

/// Receiver of row change notifications, usually a list renderer.
pub trait ListObserver {
    /// Rows `[range.start, range.end())` became visible.
    fn range_inserted(&mut self, range: Range);
    /// Rows `[range.start, range.end())` were hidden.
    fn range_removed(&mut self, range: Range);
    /// Every row may have changed.
    fn dataset_changed(&mut self);
}

/// Drops repeated toggles of the same group that arrive within a window.
///
/// A toggle of a different group always passes and restarts the window.
/// Rejected toggles do not extend it.
#[derive(Debug, Clone)]
pub struct ToggleGuard<G> {
    window: Duration,
    last: Option<(G, Instant)>,
}

impl<G: PartialEq + Clone> ToggleGuard<G> {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Returns `true` and records the toggle when it should be handled.
    pub fn admit(&mut self, key: &G, now: Instant) -> bool {
        if let Some((last_key, at)) = &self.last {
            let elapsed = now.saturating_duration_since(*at);
            if last_key == key && elapsed < self.window {
                return false;
            }
        }

        self.last = Some((key.clone(), now));
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// What a handled toggle did to the requested group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEvent {
    Expanded { group_index: usize },
    Collapsed { group_index: usize },
}

/// Host-side controller around a [`GroupingList`].
///
/// Applies the configured [`ExpandMode`], debounces toggles and forwards
/// every change to a [`ListObserver`] as range notifications.
#[derive(Debug, Clone)]
pub struct ExpandableList<G, CH> {
    list: GroupingList<G, CH>,
    options: ExpandOptions,
    guard: ToggleGuard<G>,
}

impl<G, CH> ExpandableList<G, CH>
where
    G: Eq + Hash + Clone,
{
    pub fn new(list: GroupingList<G, CH>, options: ExpandOptions) -> Self {
        Self {
            list,
            guard: ToggleGuard::new(options.toggle_debounce),
            options,
        }
    }

    pub fn list(&self) -> &GroupingList<G, CH> {
        &self.list
    }

    pub fn options(&self) -> ExpandOptions {
        self.options
    }

    pub fn set_mode(&mut self, mode: ExpandMode) {
        self.options.mode = mode;
    }

    /// Toggle `key` in response to user input.
    ///
    /// Returns `None` when the toggle was debounced or the key is unknown.
    pub fn toggle(
        &mut self,
        key: &G,
        now: Instant,
        observer: &mut impl ListObserver,
    ) -> Option<ToggleEvent> {
        if !self.guard.admit(key, now) {
            trace!("toggle debounced");
            return None;
        }

        let outcome = self.list.toggle(key, self.options.mode);
        dispatch(&outcome, observer);

        let primary = outcome.primary()?;
        match primary.transition {
            Transition::Expanded(_) => Some(ToggleEvent::Expanded {
                group_index: primary.group_index,
            }),
            Transition::Collapsed(_) => Some(ToggleEvent::Collapsed {
                group_index: primary.group_index,
            }),
            Transition::Unchanged => None,
        }
    }

    pub fn expand(
        &mut self,
        key: &G,
        observer: &mut impl ListObserver,
    ) -> ExpandOutcome<G> {
        let outcome = self.list.expand(key, self.options.mode);
        dispatch(&outcome, observer);
        outcome
    }

    pub fn collapse(
        &mut self,
        key: &G,
        observer: &mut impl ListObserver,
    ) -> ExpandOutcome<G> {
        let outcome = self.list.collapse(key);
        dispatch(&outcome, observer);
        outcome
    }

    /// Swap the whole dataset. Expand state is not carried over.
    pub fn set_items(
        &mut self,
        specs: impl IntoIterator<Item = GroupSpec<G, CH>>,
        observer: &mut impl ListObserver,
    ) -> Result<()> {
        self.list.replace_all(specs)?;
        self.guard.reset();
        observer.dataset_changed();
        Ok(())
    }

    pub fn save(&self) -> ExpandState<G> {
        self.list.save()
    }

    pub fn restore(
        &mut self,
        state: &ExpandState<G>,
        observer: &mut impl ListObserver,
    ) {
        self.list.restore(state);
        observer.dataset_changed();
    }
}

impl<G, CH> Default for ExpandableList<G, CH>
where
    G: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(GroupingList::default(), ExpandOptions::default())
    }
}

fn dispatch<G>(outcome: &ExpandOutcome<G>, observer: &mut impl ListObserver) {
    for (transition, range) in outcome.ranges() {
        match transition {
            Transition::Expanded(_) => observer.range_inserted(range),
            Transition::Collapsed(_) => observer.range_removed(range),
            Transition::Unchanged => {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Notice {
        Inserted(usize, usize),
        Removed(usize, usize),
        Reset,
    }

    #[derive(Default)]
    struct Recorder {
        notices: Vec<Notice>,
    }

    impl ListObserver for Recorder {
        fn range_inserted(&mut self, range: Range) {
            self.notices.push(Notice::Inserted(range.start, range.length));
        }

        fn range_removed(&mut self, range: Range) {
            self.notices.push(Notice::Removed(range.start, range.length));
        }

        fn dataset_changed(&mut self) {
            self.notices.push(Notice::Reset);
        }
    }

    fn controller(mode: ExpandMode) -> ExpandableList<&'static str, u32> {
        let list = GroupingList::new([
            GroupSpec::new("A", 1, vec![1, 2]),
            GroupSpec::new("B", 2, vec![3]),
            GroupSpec::new("C", 3, Vec::new()),
        ])
        .expect("unique keys");
        ExpandableList::new(list, ExpandOptions::default().with_mode(mode))
    }

    #[test]
    fn guard_rejects_same_key_inside_window() {
        let start = Instant::now();
        let mut guard = ToggleGuard::new(Duration::from_millis(400));

        assert!(guard.admit(&"A", start));
        assert!(!guard.admit(&"A", start + Duration::from_millis(399)));
        assert!(guard.admit(&"A", start + Duration::from_millis(400)));
    }

    #[test]
    fn guard_admits_other_keys_and_restarts_window() {
        let start = Instant::now();
        let mut guard = ToggleGuard::new(Duration::from_millis(400));

        assert!(guard.admit(&"A", start));
        assert!(guard.admit(&"B", start + Duration::from_millis(10)));
        assert!(guard.admit(&"A", start + Duration::from_millis(20)));
    }

    #[test]
    fn rejected_toggles_do_not_extend_window() {
        let start = Instant::now();
        let mut guard = ToggleGuard::new(Duration::from_millis(400));

        assert!(guard.admit(&"A", start));
        assert!(!guard.admit(&"A", start + Duration::from_millis(300)));
        assert!(guard.admit(&"A", start + Duration::from_millis(450)));
    }

    #[test]
    fn toggle_dispatches_collapse_before_expand_in_single_mode() {
        let mut host = controller(ExpandMode::Single);
        let mut recorder = Recorder::default();
        let start = Instant::now();

        let first = host.toggle(&"A", start, &mut recorder);
        let second =
            host.toggle(&"B", start + Duration::from_millis(1), &mut recorder);

        assert_eq!(first, Some(ToggleEvent::Expanded { group_index: 0 }));
        assert_eq!(second, Some(ToggleEvent::Expanded { group_index: 1 }));
        assert_eq!(
            recorder.notices,
            vec![
                Notice::Inserted(1, 2),
                Notice::Removed(1, 2),
                Notice::Inserted(2, 1),
            ]
        );
        assert_eq!(host.list().visible_count(), 4);
    }

    #[test]
    fn debounced_toggle_changes_nothing() {
        let mut host = controller(ExpandMode::Multiple);
        let mut recorder = Recorder::default();
        let start = Instant::now();

        host.toggle(&"A", start, &mut recorder);
        let repeat =
            host.toggle(&"A", start + Duration::from_millis(50), &mut recorder);

        assert_eq!(repeat, None);
        assert!(host.list().is_expanded(&"A"));
        assert_eq!(recorder.notices, vec![Notice::Inserted(1, 2)]);
    }

    #[test]
    fn toggle_of_childless_group_reports_event_without_ranges() {
        let mut host = controller(ExpandMode::Multiple);
        let mut recorder = Recorder::default();

        let event = host.toggle(&"C", Instant::now(), &mut recorder);
        assert_eq!(event, Some(ToggleEvent::Expanded { group_index: 2 }));
        assert!(recorder.notices.is_empty());
    }

    #[test]
    fn toggle_of_unknown_key_reports_nothing() {
        let mut host = controller(ExpandMode::Single);
        let mut recorder = Recorder::default();

        assert_eq!(host.toggle(&"Z", Instant::now(), &mut recorder), None);
        assert!(recorder.notices.is_empty());
    }

    #[test]
    fn set_items_and_restore_request_full_refresh() {
        let mut host = controller(ExpandMode::Multiple);
        let mut recorder = Recorder::default();

        host.expand(&"B", &mut recorder);
        let saved = host.save();

        host.set_items(
            [
                GroupSpec::new("B", 2, vec![3, 4]),
                GroupSpec::new("D", 4, vec![5]),
            ],
            &mut recorder,
        )
        .expect("unique keys");
        assert!(!host.list().is_expanded(&"B"));

        host.restore(&saved, &mut recorder);
        assert!(host.list().is_expanded(&"B"));
        assert_eq!(host.list().visible_count(), 4);
        assert_eq!(
            recorder.notices,
            vec![Notice::Inserted(2, 1), Notice::Reset, Notice::Reset]
        );
    }

    #[test]
    fn collapse_dispatches_removal() {
        let mut host = controller(ExpandMode::Multiple);
        let mut recorder = Recorder::default();

        host.expand(&"A", &mut recorder);
        host.collapse(&"A", &mut recorder);
        assert_eq!(
            recorder.notices,
            vec![Notice::Inserted(1, 2), Notice::Removed(1, 2)]
        );
    }

    #[test]
    fn default_options_use_single_mode_and_400ms() {
        let host: ExpandableList<u8, u8> = ExpandableList::default();
        assert_eq!(host.options().mode, ExpandMode::Single);
        assert_eq!(
            host.options().toggle_debounce,
            Duration::from_millis(400)
        );
    }
}
