use serde::{Deserialize, Serialize};

pub type ActivityId = i32;

/// Deepest level an activity may sit at in the taxonomy.
pub const MAX_ACTIVITY_LEVEL: i32 = 3;

/// A node of the business activity taxonomy.
///
/// Activities form a forest through `parent_id`. Roots have no parent and sit at
/// level 1; each child sits one level below its parent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    pub parent_id: Option<ActivityId>,
    pub level: i32,
}

impl Activity {
    /// Returns true if this activity has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Returns true if the stored level lies within `1..=MAX_ACTIVITY_LEVEL`.
    pub fn is_valid_level(&self) -> bool {
        (1..=MAX_ACTIVITY_LEVEL).contains(&self.level)
    }
}
