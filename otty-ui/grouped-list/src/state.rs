use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Current expand state schema version.
pub const EXPAND_STATE_VERSION: u8 = 1;

/// Persisted expand state: the keys of expanded groups in declaration
/// order.
///
/// Produced by [`GroupingList::save`](crate::GroupingList::save) and applied
/// with [`GroupingList::restore`](crate::GroupingList::restore). How keys are
/// encoded is up to `G`'s serde implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandState<G> {
    pub version: u8,
    pub expanded: Vec<G>,
}

impl<G> ExpandState<G> {
    pub fn new(expanded: Vec<G>) -> Self {
        Self {
            version: EXPAND_STATE_VERSION,
            expanded,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &G> {
        self.expanded.iter()
    }

    pub fn is_supported(&self) -> bool {
        self.version == EXPAND_STATE_VERSION
    }
}

impl<G: PartialEq> ExpandState<G> {
    pub fn contains(&self, key: &G) -> bool {
        self.expanded.contains(key)
    }
}

impl<G: Serialize> ExpandState<G> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<G: DeserializeOwned> ExpandState<G> {
    pub fn from_json(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

impl<G> Default for ExpandState<G> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GroupingError;

    #[test]
    fn json_payload_keeps_key_order() {
        let state =
            ExpandState::new(vec![String::from("b"), String::from("a")]);
        let payload = state.to_json().expect("encode");
        assert_eq!(payload, r#"{"version":1,"expanded":["b","a"]}"#);

        let decoded: ExpandState<String> =
            ExpandState::from_json(&payload).expect("decode");
        assert_eq!(decoded, state);
    }

    #[test]
    fn unknown_version_decodes_but_is_not_supported() {
        let decoded: ExpandState<u32> =
            ExpandState::from_json(r#"{"version":9,"expanded":[1]}"#)
                .expect("decode");
        assert!(!decoded.is_supported());
        assert!(decoded.contains(&1));
    }

    #[test]
    fn malformed_payload_reports_json_error() {
        let result = ExpandState::<u32>::from_json("{\"expanded\":");
        assert!(matches!(result, Err(GroupingError::Json(_))));
    }

    #[test]
    fn empty_state_is_current_version() {
        let state: ExpandState<u8> = ExpandState::default();
        assert!(state.is_empty());
        assert_eq!(state.len(), 0);
        assert!(state.is_supported());
    }
}
