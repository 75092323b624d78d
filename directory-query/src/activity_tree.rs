//! Activity subtree resolution.
//!
//! The subtree of an activity is the activity itself plus every activity reachable by
//! following parent to child links. Resolution never trusts the store to keep the
//! hierarchy acyclic: an id that shows up a second time is logged and its branch is
//! dropped, so a corrupt chain degrades to a partial result instead of looping.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::Arc;

use directory_repository::DirectoryRepository;
use directory_shared::types::{Activity, ActivityId};
use tracing::{debug, warn};

use crate::config::SubtreeStrategy;
use crate::errors::DirectoryError;

/// An in-memory parent to children index over a set of activities.
#[derive(Debug, Clone, Default)]
pub struct ActivityTree {
    children: HashMap<ActivityId, Vec<ActivityId>>,
}

impl ActivityTree {
    pub fn from_activities(activities: &[Activity]) -> Self {
        let mut children: HashMap<ActivityId, Vec<ActivityId>> = HashMap::new();
        for activity in activities {
            if let Some(parent_id) = activity.parent_id {
                children.entry(parent_id).or_default().push(activity.id);
            }
        }
        Self { children }
    }

    pub fn children(&self, parent_id: ActivityId) -> &[ActivityId] {
        self.children
            .get(&parent_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns `root` and all of its descendants.
    ///
    /// An id unknown to the index yields `{root}`.
    pub fn subtree(&self, root: ActivityId) -> BTreeSet<ActivityId> {
        let mut expansion = SubtreeExpansion::new(root);
        while let Some(parent_id) = expansion.next_parent() {
            for &child_id in self.children(parent_id) {
                expansion.admit(parent_id, child_id);
            }
        }
        expansion.finish()
    }
}

/// Breadth-first expansion state shared by both resolution strategies.
struct SubtreeExpansion {
    root: ActivityId,
    visited: BTreeSet<ActivityId>,
    frontier: VecDeque<ActivityId>,
}

impl SubtreeExpansion {
    fn new(root: ActivityId) -> Self {
        Self {
            root,
            visited: BTreeSet::from([root]),
            frontier: VecDeque::from([root]),
        }
    }

    fn next_parent(&mut self) -> Option<ActivityId> {
        self.frontier.pop_front()
    }

    fn admit(&mut self, parent_id: ActivityId, child_id: ActivityId) {
        if self.visited.insert(child_id) {
            self.frontier.push_back(child_id);
        } else {
            warn!(
                root_id = self.root,
                parent_id,
                activity_id = child_id,
                "Activity revisited while expanding subtree; dropping branch"
            );
        }
    }

    fn finish(self) -> BTreeSet<ActivityId> {
        self.visited
    }
}

/// Expands activity ids into their subtrees against a `DirectoryRepository`.
pub struct ActivityTreeResolver {
    repository: Arc<dyn DirectoryRepository>,
    strategy: SubtreeStrategy,
}

impl ActivityTreeResolver {
    pub fn new(repository: Arc<dyn DirectoryRepository>, strategy: SubtreeStrategy) -> Self {
        Self {
            repository,
            strategy,
        }
    }

    /// Resolve `root` into the set of ids in its subtree.
    ///
    /// The result always contains `root`. No existence check is made, so an unknown id
    /// resolves to `{root}`.
    ///
    /// # Returns
    ///
    /// * `Ok(BTreeSet<ActivityId>)` - `root` and all of its descendants, without duplicates
    /// * `Err(DirectoryError)` - If a store read fails
    pub async fn resolve_subtree(
        &self,
        root: ActivityId,
    ) -> Result<BTreeSet<ActivityId>, DirectoryError> {
        let subtree = match self.strategy {
            SubtreeStrategy::PerLevel => self.resolve_per_level(root).await?,
            SubtreeStrategy::Indexed => {
                let activities = self.repository.find_all_activities().await?;
                ActivityTree::from_activities(&activities).subtree(root)
            }
        };

        debug!(
            activity_id = root,
            strategy = ?self.strategy,
            subtree_size = subtree.len(),
            "Resolved activity subtree"
        );

        Ok(subtree)
    }

    async fn resolve_per_level(
        &self,
        root: ActivityId,
    ) -> Result<BTreeSet<ActivityId>, DirectoryError> {
        let mut expansion = SubtreeExpansion::new(root);
        while let Some(parent_id) = expansion.next_parent() {
            for child in self.repository.find_activity_children(parent_id).await? {
                expansion.admit(parent_id, child.id);
            }
        }
        Ok(expansion.finish())
    }
}
