use serde::{Deserialize, Serialize};

use crate::types::GeoPoint;

pub type BuildingId = i32;

/// A building that houses organizations.
///
/// Coordinates are plain degrees with no datum attached.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Building {
    pub id: BuildingId,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Building {
    pub fn coordinates(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}
