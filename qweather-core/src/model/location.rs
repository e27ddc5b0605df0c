use serde::{Deserialize, Serialize};
use std::fmt;

use crate::envelope::Status;

/// City lookup response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationResponse {
    pub code: Status,
    pub location: Vec<LocationCandidate>,
}

impl_envelope!(LocationResponse);

/// One entry of the lookup result list, as sent upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationCandidate {
    pub name: String,
    pub id: String,
    pub lat: String,
    pub lon: String,
    pub adm2: String,
    pub adm1: String,
    pub country: String,
    pub tz: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rank: String,
    pub fx_link: String,
}

/// A resolved place, with coordinates already fixed at two decimals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub adm1: String,
    pub adm2: String,
    pub country: String,
    pub latitude: String,
    pub longitude: String,
    /// Candidate coordinates exactly as the lookup returned them. Minutely
    /// precipitation resolves finer than 0.01 degrees, so it is keyed by these.
    #[serde(skip)]
    pub raw_coordinates: Coordinates,
}

impl Location {
    /// Two-decimal pair, as used in air-quality paths.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude.clone(),
            longitude: self.longitude.clone(),
        }
    }
}

/// Latitude/longitude pair as sent to coordinate-keyed endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

impl Coordinates {
    /// `lon,lat`, the order the minutely endpoint expects.
    pub fn lon_lat(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lat={}, lon={}", self.latitude, self.longitude)
    }
}
