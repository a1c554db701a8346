//! Static catalog of Living Atlas feature layers.

use serde::Serialize;

use super::error::{AtlasError, AtlasResult};

/// A queryable feature layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Layer {
    /// Short name used by tool callers.
    pub name: &'static str,

    /// REST endpoint of the layer (without `/query`).
    pub url: &'static str,

    /// What the layer holds.
    pub description: &'static str,
}

pub const STATES: Layer = Layer {
    name: "states",
    url: "https://services.arcgis.com/P3ePLMYs2RVChkJx/arcgis/rest/services/USA_States_Generalized_Boundaries/FeatureServer/0",
    description: "US state boundaries (generalized)",
};

pub const COUNTIES: Layer = Layer {
    name: "counties",
    url: "https://services4.arcgis.com/QdHwhlbx61LR3TWb/arcgis/rest/services/US_Counties/FeatureServer/0",
    description: "US county boundaries",
};

pub const USGS_GAUGES: Layer = Layer {
    name: "usgs-gauges",
    url: "https://mapservices.weather.noaa.gov/eventdriven/rest/services/water/riv_gauges/MapServer/0",
    description: "NOAA/USGS river gauges with flood status",
};

pub const RIVERS: Layer = Layer {
    name: "rivers",
    url: "https://services.arcgis.com/P3ePLMYs2RVChkJx/arcgis/rest/services/USA_Rivers_and_Streams/FeatureServer/0",
    description: "USA rivers and streams",
};

pub const DAMS: Layer = Layer {
    name: "dams",
    url: "https://services2.arcgis.com/FiaPA4ga0iQKduv3/arcgis/rest/services/NID_v1/FeatureServer/0",
    description: "National Inventory of Dams",
};

pub const WATERSHEDS: Layer = Layer {
    name: "watersheds",
    url: "https://services.arcgis.com/P3ePLMYs2RVChkJx/arcgis/rest/services/USA_Watershed_Boundary_Dataset/FeatureServer/0",
    description: "USA Watershed Boundary Dataset",
};

pub const IMPAIRED_WATERS: Layer = Layer {
    name: "impaired-waters",
    url: "https://services.arcgis.com/P3ePLMYs2RVChkJx/ArcGIS/rest/services/EPA_Impaired_Waters_Y2025Q3/FeatureServer/1",
    description: "EPA impaired waters",
};

pub const WATER_QUALITY: Layer = Layer {
    name: "water-quality",
    url: "https://services.arcgis.com/P3ePLMYs2RVChkJx/arcgis/rest/services/USA_Water_Quality_Monitoring_Stations/FeatureServer/0",
    description: "USA water quality monitoring stations",
};

pub const SAMPLE_POINTS: Layer = Layer {
    name: "sample-points",
    url: "https://sampleserver6.arcgisonline.com/arcgis/rest/services/Census/MapServer/0",
    description: "Esri sample server census points",
};

/// HUC6 watershed outlines, only used by the embeddable water map.
pub const HUC6_WATERSHEDS_URL: &str = "https://hydro.nationalmap.gov/arcgis/rest/services/wbd/MapServer/3";

/// Every layer callers can query by name.
pub const LAYERS: &[Layer] = &[
    STATES,
    COUNTIES,
    USGS_GAUGES,
    RIVERS,
    DAMS,
    WATERSHEDS,
    IMPAIRED_WATERS,
    WATER_QUALITY,
    SAMPLE_POINTS,
];

impl Layer {
    /// Find a layer by its short name.
    pub fn lookup(name: &str) -> AtlasResult<&'static Layer> {
        LAYERS
            .iter()
            .find(|layer| layer.name == name)
            .ok_or_else(|| AtlasError::UnknownLayer {
                name: name.to_string(),
                available: names().join(", "),
            })
    }

    /// The layer's `/query` endpoint with `f=json`.
    pub fn query_url(&self) -> String {
        format!("{}/query?f=json", self.url)
    }
}

/// Names of every catalog layer.
pub fn names() -> Vec<&'static str> {
    LAYERS.iter().map(|layer| layer.name).collect()
}
