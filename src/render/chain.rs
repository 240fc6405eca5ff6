use crate::post::PostResults;
use crate::types::{MessageId, PlatformName};
use std::collections::BTreeMap;

/// Last message id per platform while one event's segments are posted.
#[derive(Debug, Default, Clone)]
pub struct ReplyChain {
    last: BTreeMap<PlatformName, MessageId>,
}

impl ReplyChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parent_for(&self, platform: &str) -> Option<&str> {
        self.last.get(platform).map(String::as_str)
    }

    pub fn parents_for(&self, targets: &[PlatformName]) -> BTreeMap<PlatformName, MessageId> {
        targets
            .iter()
            .filter_map(|t| self.last.get(t).map(|id| (t.clone(), id.clone())))
            .collect()
    }

    /// Advance every target: accepted platforms move to their new id, the
    /// rest lose their parent so the next segment posts unthreaded.
    pub fn record(&mut self, targets: &[PlatformName], results: &PostResults) {
        for target in targets {
            match results.get(target) {
                Some(receipt) => {
                    self.last.insert(target.clone(), receipt.id.clone());
                }
                None => {
                    self.last.remove(target);
                }
            }
        }
    }
}
