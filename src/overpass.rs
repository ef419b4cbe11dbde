//! Overpass API adapter: fetches a drivable road network for a region.
//!
//! Queries all highway ways inside the bounding box, drops non-drivable
//! classes, expands them into directed segments (honoring `oneway` tags),
//! and restricts the result to its largest strongly-connected component.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::info;

use crate::graph::{BoundingBox, RoadGraph};
use crate::traits::{FetchError, RoadNetworkSource};

/// Highway classes excluded from the drivable network.
const NON_DRIVABLE: &str =
    "footway|cycleway|path|steps|pedestrian|corridor|bridleway|proposed|construction";

#[derive(Debug, Clone)]
pub struct OverpassConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: "https://overpass-api.de/api/interpreter".to_string(),
            timeout_secs: 180,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverpassClient {
    config: OverpassConfig,
    client: reqwest::blocking::Client,
}

impl OverpassClient {
    pub fn new(config: OverpassConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn bbox_query(&self, bbox: &BoundingBox) -> String {
        format!(
            "[out:json][timeout:{}];\
             way[\"highway\"][\"highway\"!~\"{}\"]({:.6},{:.6},{:.6},{:.6});\
             (._;>;);out body;",
            self.config.timeout_secs, NON_DRIVABLE, bbox.south, bbox.west, bbox.north, bbox.east
        )
    }
}

impl RoadNetworkSource for OverpassClient {
    type Network = RoadGraph;

    fn fetch(&self, bbox: &BoundingBox) -> Result<RoadGraph, FetchError> {
        let query = self.bbox_query(bbox);
        let response: OverpassResponse = self
            .client
            .post(&self.config.base_url)
            .form(&[("data", query.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json())?;

        let graph = build_graph(response)?;
        info!(
            nodes = graph.node_count(),
            segments = graph.edge_count(),
            "road network fetched"
        );
        Ok(graph)
    }
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Element {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
    },
    Way {
        nodes: Vec<i64>,
        #[serde(default)]
        tags: HashMap<String, String>,
    },
    #[serde(other)]
    Other,
}

/// Assemble a routable graph from raw Overpass elements, keeping only the
/// largest strongly-connected component.
fn build_graph(response: OverpassResponse) -> Result<RoadGraph, FetchError> {
    let mut graph = RoadGraph::new();

    for element in &response.elements {
        if let Element::Node { id, lat, lon } = element {
            graph.add_node(*id, *lon, *lat);
        }
    }

    for element in &response.elements {
        let Element::Way { nodes, tags } = element else {
            continue;
        };
        let oneway = tags.get("oneway").map(String::as_str);
        let forward = !matches!(oneway, Some("-1"));
        let backward = !matches!(oneway, Some("yes") | Some("true") | Some("1"));

        for pair in nodes.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            // a way may reference nodes clipped out of the bbox response
            let Some(length) = graph.segment_length(a, b) else {
                continue;
            };
            if forward {
                graph.add_segment(a, b, length);
            }
            if backward {
                graph.add_segment(b, a, length);
            }
        }
    }

    graph.retain_largest_component();
    if graph.node_count() == 0 {
        return Err(FetchError::EmptyNetwork);
    }
    Ok(graph)
}
