use serde::{Deserialize, Serialize};

use crate::envelope::Status;

closed_set! {
    /// Life index forecast horizon.
    IndexHorizon, "index days" {
        #[default]
        OneDay => "1d",
        ThreeDays => "3d",
    }
}

closed_set! {
    /// Life index selector; `0` requests every index the city supports.
    IndexType, "index type" {
        #[default]
        All => "0",
        Sports => "1",
        CarWashing => "2",
        Dressing => "3",
        Fishing => "4",
        Uv => "5",
        Travel => "6",
        Allergy => "7",
        Cold => "8",
        Comfort => "9",
        Wind => "10",
        Sunglasses => "11",
        Makeup => "12",
        Sunscreen => "13",
        Traffic => "14",
        SportsWatching => "15",
        AirPollutionDiffusion => "16",
    }
}

impl IndexType {
    pub fn label(&self) -> &'static str {
        match self {
            IndexType::All => "All index types",
            IndexType::Sports => "Sports",
            IndexType::CarWashing => "Car Washing",
            IndexType::Dressing => "Dressing",
            IndexType::Fishing => "Fishing",
            IndexType::Uv => "UV",
            IndexType::Travel => "Travel",
            IndexType::Allergy => "Allergy",
            IndexType::Cold => "Cold",
            IndexType::Comfort => "Comfort",
            IndexType::Wind => "Wind",
            IndexType::Sunglasses => "Sunglasses",
            IndexType::Makeup => "Makeup",
            IndexType::Sunscreen => "Sunscreen",
            IndexType::Traffic => "Traffic",
            IndexType::SportsWatching => "Sports Watching",
            IndexType::AirPollutionDiffusion => "Air Pollution Diffusion Conditions",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IndicesResponse {
    pub code: Status,
    pub update_time: String,
    pub fx_link: String,
    pub daily: Vec<LifeIndex>,
}

impl_envelope!(IndicesResponse);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeIndex {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub level: String,
    pub category: String,
    pub text: String,
}
