//! Overpass API query text and response types.
//!
//! See: <https://wiki.openstreetmap.org/wiki/Overpass_API/Overpass_QL>

use serde::Deserialize;
use voltsite_core::{GeoPoint, Site, Tags};

/// Build the fuel-station query for a circle.
///
/// Both tagged nodes and tagged ways are requested, followed by the nodes
/// that make up the ways.
pub(super) fn fuel_station_query(center: GeoPoint, radius_meters: u32, timeout_secs: u64) -> String {
    let around = format!("(around:{radius_meters},{},{})", center.lat(), center.lng());
    format!(
        "[out:json][timeout:{timeout_secs}];\
         (node[\"amenity\"=\"fuel\"]{around};way[\"amenity\"=\"fuel\"]{around};);\
         out body;>;out skel qt;"
    )
}

/// Overpass JSON response.
#[derive(Debug, Deserialize)]
pub(super) struct OverpassResponse {
    /// Returned elements in server order.
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// A single OSM element. Only nodes carry coordinates.
#[derive(Debug, Deserialize)]
pub(super) struct Element {
    /// `node`, `way` or `relation`.
    #[serde(rename = "type")]
    pub kind: String,
    /// OSM identifier.
    pub id: u64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: Tags,
}

impl OverpassResponse {
    /// Convert node elements to sites, keeping server order.
    ///
    /// Nodes with missing or out-of-range coordinates are skipped.
    pub(super) fn into_sites(self) -> Vec<Site> {
        self.elements
            .into_iter()
            .filter(|element| element.kind == "node")
            .filter_map(|element| {
                let (Some(lat), Some(lon)) = (element.lat, element.lon) else {
                    log::debug!("skipping node {} without coordinates", element.id);
                    return None;
                };
                match GeoPoint::new(lat, lon) {
                    Ok(position) => Some(Site::from_tags(position, &element.tags)),
                    Err(err) => {
                        log::debug!("skipping node {}: {err}", element.id);
                        None
                    }
                }
            })
            .collect()
    }
}
