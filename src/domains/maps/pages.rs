//! ArcGIS Maps SDK for JavaScript pages.
//!
//! Each page is the shared [`SHELL`] wrapped around a page-specific script.
//! Scripts are rendered first and spliced into the shell, so inlined GeoJSON
//! is never scanned for placeholders.

use std::collections::HashMap;

use serde_json::Value;

use super::context::{first_feature_state, point_center};
use super::error::MapResult;
use super::template::{MapTemplate, html_text, script_json, sql_in_js};
use crate::domains::atlas::{layers, states};

pub const SDK_VERSION: &str = "4.28";

/// Center of the contiguous US, used by the embeddable map.
const US_CENTER: (f64, f64) = (-98.5795, 39.8283);

/// A rendered page and the file name it is saved under.
#[derive(Debug, Clone)]
pub struct MapPage {
    pub file_name: &'static str,
    /// State the page is filtered to, when it has one.
    pub state: Option<String>,
    pub html: String,
}

const SHELL: MapTemplate = MapTemplate::new(
    "shell",
    r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="initial-scale=1,maximum-scale=1,user-scalable=no" />
  <title>{{title}}</title>
  <link rel="stylesheet" href="https://js.arcgis.com/{{sdk}}/esri/themes/light/main.css" />
  <script src="https://js.arcgis.com/{{sdk}}/"></script>
  <style>
    html, body, #viewDiv {
      padding: 0;
      margin: 0;
      height: 100%;
      width: 100%;
    }
  </style>
</head>
<body>
  <div id="viewDiv"></div>
  <script>
    require([{{modules}}], function({{params}}) {
{{script}}
    });
  </script>
</body>
</html>
"#,
);

const GEOJSON_SCRIPT: MapTemplate = MapTemplate::new(
    "geojson",
    r#"      const geojson = {{geojson}};
      const blob = new Blob([JSON.stringify(geojson)], { type: "application/json" });
      const layer = new GeoJSONLayer({ url: URL.createObjectURL(blob) });
      const map = new Map({
        basemap: "gray-vector",
        layers: [layer]
      });
      const view = new MapView({
        container: "viewDiv",
        map: map,
        center: [{{center_lon}}, {{center_lat}}],
        zoom: 6
      });"#,
);

const RIVERS_SCRIPT: MapTemplate = MapTemplate::new(
    "rivers",
    r#"      const geojson = {{geojson}};
      const blob = new Blob([JSON.stringify(geojson)], { type: "application/json" });
      const layer = new GeoJSONLayer({ url: URL.createObjectURL(blob) });
      const riversLayer = new FeatureLayer({
        url: "{{rivers_url}}",
        definitionExpression: "State = '{{state}}'"
      });
      const map = new Map({
        basemap: "gray-vector",
        layers: [riversLayer, layer]
      });
      const view = new MapView({
        container: "viewDiv",
        map: map,
        center: [{{center_lon}}, {{center_lat}}],
        zoom: 8
      });"#,
);

/// Gauge points coloured and sized by flood status.
const GAUGE_RENDERER: &str = r#"{
          type: "unique-value",
          field: "status",
          uniqueValueInfos: [
            { value: "no_flooding", symbol: { type: "simple-marker", color: "green", size: 8, outline: { color: "black", width: 1 } } },
            { value: "action", symbol: { type: "simple-marker", color: "yellow", size: 10, outline: { color: "black", width: 2 } } },
            { value: "minor", symbol: { type: "simple-marker", color: "orange", size: 12, outline: { color: "black", width: 2 } } },
            { value: "moderate", symbol: { type: "simple-marker", color: "red", size: 14, outline: { color: "black", width: 2 } } },
            { value: "major", symbol: { type: "simple-marker", color: "purple", size: 16, outline: { color: "black", width: 2 } } }
          ],
          defaultSymbol: { type: "simple-marker", color: "gray", size: 8, outline: { color: "black", width: 1 } }
        }"#;

const GAUGE_POPUP: &str = r#"{
          title: "USGS Gaging Station",
          content: "Station: {gaugelid}<br>Location: {location}<br>Status: {status}<br>State: {state}"
        }"#;

const RIVER_RENDERER: &str = r#"{
          type: "simple",
          symbol: { type: "simple-line", color: "blue", width: 3 }
        }"#;

const RIVER_POPUP: &str = r#"{
          title: "River",
          content: "Name: {Name}<br>Feature: {Feature}<br>Miles: {Miles}"
        }"#;

/// Dams as triangles coloured by primary dam type.
const DAM_RENDERER: &str = r#"{
          type: "unique-value",
          field: "PRIMARY_DAM_TYPE",
          uniqueValueInfos: [
            { value: "Earth", symbol: { type: "simple-marker", style: "triangle", color: "saddlebrown", size: 4, outline: { color: "black", width: 1 } } },
            { value: "Concrete", symbol: { type: "simple-marker", style: "triangle", color: "gray", size: 4, outline: { color: "black", width: 1 } } },
            { value: "Rockfill", symbol: { type: "simple-marker", style: "triangle", color: "darkgray", size: 4, outline: { color: "black", width: 1 } } },
            { value: "Other", symbol: { type: "simple-marker", style: "triangle", color: "orange", size: 4, outline: { color: "black", width: 1 } } }
          ],
          defaultSymbol: { type: "simple-marker", style: "triangle", color: "orange", size: 4, outline: { color: "black", width: 1 } }
        }"#;

const DAM_POPUP: &str = r#"{
          title: "Dam",
          content: "Name: {NAME}<br>Type: {PRIMARY_DAM_TYPE}<br>Height: {NID_HEIGHT} ft<br>State: {STATE}"
        }"#;

const WATER_CONTEXT_SCRIPT: MapTemplate = MapTemplate::new(
    "water_context",
    r#"      const geojson = {{geojson}};
      const blob = new Blob([JSON.stringify(geojson)], { type: "application/json" });
      const gagesLayer = new GeoJSONLayer({
        url: URL.createObjectURL(blob),
        title: "USGS Gaging Stations",
        opacity: 0.6,
        renderer: {{gauge_renderer}},
        popupTemplate: {{gauge_popup}}
      });
      const riversLayer = new FeatureLayer({
        url: "{{rivers_url}}",
        definitionExpression: "State = '{{state}}'",
        title: "Rivers",
        opacity: 0.6,
        renderer: {{river_renderer}},
        popupTemplate: {{river_popup}}
      });
      const watershedsLayer = new FeatureLayer({
        url: "{{watersheds_url}}",
        title: "Watersheds",
        opacity: 0.8
      });
      const damsLayer = new FeatureLayer({
        url: "{{dams_url}}",
        definitionExpression: "State = '{{state}}'",
        title: "Dams",
        opacity: 0.6,
        renderer: {{dam_renderer}},
        popupTemplate: {{dam_popup}}
      });
      const map = new Map({
        basemap: "dark-gray-vector",
        layers: [watershedsLayer, riversLayer, damsLayer, gagesLayer]
      });
      const view = new MapView({
        container: "viewDiv",
        map: map,
        center: [{{center_lon}}, {{center_lat}}],
        zoom: 8
      });
      const legend = new Legend({ view: view });
      view.ui.add(legend, "bottom-right");
      const legendButton = document.createElement("button");
      legendButton.textContent = "Toggle Legend";
      legendButton.onclick = () => { legend.visible = !legend.visible; };
      view.ui.add(legendButton, "top-left");"#,
);

const EMBEDDABLE_SCRIPT: MapTemplate = MapTemplate::new(
    "embeddable",
    r#"      const gagesLayer = new FeatureLayer({
        url: "{{gauges_url}}",
        definitionExpression: "state = '{{abbreviation}}'",
        title: "USGS Gaging Stations",
        opacity: 0.6,
        renderer: {{gauge_renderer}},
        popupTemplate: {{gauge_popup}}
      });
      const riversLayer = new FeatureLayer({
        url: "{{rivers_url}}",
        definitionExpression: "State = '{{state}}'",
        title: "Rivers",
        opacity: 0.6,
        renderer: {{river_renderer}},
        popupTemplate: {{river_popup}}
      });
      const watershedsLayer = new FeatureLayer({
        url: "{{huc6_url}}",
        definitionExpression: "states LIKE '%{{abbreviation}}%'",
        title: "HUC6 Watersheds",
        opacity: 0.8,
        renderer: {
          type: "simple",
          symbol: {
            type: "simple-fill",
            color: [0, 0, 0, 0],
            outline: { color: [132, 0, 168, 255], width: 1.25 }
          }
        }
      });
      const damsLayer = new FeatureLayer({
        url: "{{dams_url}}",
        definitionExpression: "State = '{{state}}'",
        title: "Dams",
        opacity: 0.6,
        renderer: {{dam_renderer}},
        popupTemplate: {{dam_popup}}
      });
      const map = new Map({
        basemap: "dark-gray-vector",
        layers: [watershedsLayer, riversLayer, damsLayer, gagesLayer]
      });
      const view = new MapView({
        container: "viewDiv",
        map: map,
        center: [{{center_lon}}, {{center_lat}}],
        zoom: 5
      });
      view.ui.add(new Legend({ view: view }), "bottom-right");"#,
);

/// Render a page script into the shell.
fn assemble(title: &str, modules: &[(&str, &str)], script: String) -> MapResult<String> {
    let module_list = modules
        .iter()
        .map(|(path, _)| format!("\"{}\"", path))
        .collect::<Vec<_>>()
        .join(", ");
    let params = modules
        .iter()
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(", ");

    SHELL.render(&HashMap::from([
        ("title", html_text(title)),
        ("sdk", SDK_VERSION.to_string()),
        ("modules", module_list),
        ("params", params),
        ("script", script),
    ]))
}

const MAP: (&str, &str) = ("esri/Map", "Map");
const MAP_VIEW: (&str, &str) = ("esri/views/MapView", "MapView");
const GEOJSON_LAYER: (&str, &str) = ("esri/layers/GeoJSONLayer", "GeoJSONLayer");
const FEATURE_LAYER: (&str, &str) = ("esri/layers/FeatureLayer", "FeatureLayer");
const LEGEND: (&str, &str) = ("esri/widgets/Legend", "Legend");

fn center_vars(center: (f64, f64)) -> [(&'static str, String); 2] {
    [
        ("center_lon", center.0.to_string()),
        ("center_lat", center.1.to_string()),
    ]
}

fn shared_water_vars() -> [(&'static str, String); 7] {
    [
        ("rivers_url", layers::RIVERS.url.to_string()),
        ("dams_url", layers::DAMS.url.to_string()),
        ("gauge_renderer", GAUGE_RENDERER.to_string()),
        ("gauge_popup", GAUGE_POPUP.to_string()),
        ("river_renderer", RIVER_RENDERER.to_string()),
        ("river_popup", RIVER_POPUP.to_string()),
        ("dam_renderer", DAM_RENDERER.to_string()),
    ]
}

/// GeoJSON on a gray basemap, centered on the eastern US.
pub fn geojson_app(geojson: &Value) -> MapResult<MapPage> {
    let mut vars = HashMap::from([("geojson", script_json(geojson))]);
    vars.extend(center_vars(super::context::DEFAULT_CENTER));
    let script = GEOJSON_SCRIPT.render(&vars)?;

    Ok(MapPage {
        file_name: "arcgis_app.html",
        state: None,
        html: assemble(
            "GeoJSON Layer - ArcGIS JS SDK",
            &[MAP, MAP_VIEW, GEOJSON_LAYER],
            script,
        )?,
    })
}

/// GeoJSON over the rivers of the state named by its first feature.
///
/// The rivers filter uses the state value as found in the data.
pub fn geojson_with_rivers_app(geojson: &Value) -> MapResult<MapPage> {
    let state = first_feature_state(geojson)?;

    let mut vars = HashMap::from([
        ("geojson", script_json(geojson)),
        ("rivers_url", layers::RIVERS.url.to_string()),
        ("state", sql_in_js(&state)),
    ]);
    vars.extend(center_vars(point_center(geojson)));
    let script = RIVERS_SCRIPT.render(&vars)?;

    Ok(MapPage {
        file_name: "arcgis_app_with_rivers.html",
        html: assemble(
            "GeoJSON and Rivers Layer - ArcGIS JS SDK",
            &[MAP, MAP_VIEW, GEOJSON_LAYER, FEATURE_LAYER],
            script,
        )?,
        state: Some(state),
    })
}

/// Gauges from the GeoJSON with rivers, watersheds and dams for their state.
pub fn water_context_app(geojson: &Value) -> MapResult<MapPage> {
    let abbreviation = first_feature_state(geojson)?;
    let state = states::name_for_abbreviation(&abbreviation)
        .map(str::to_string)
        .unwrap_or(abbreviation);

    let mut vars = HashMap::from([
        ("geojson", script_json(geojson)),
        ("state", sql_in_js(&state)),
        ("watersheds_url", layers::WATERSHEDS.url.to_string()),
        ("dam_popup", DAM_POPUP.to_string()),
    ]);
    vars.extend(shared_water_vars());
    vars.extend(center_vars(point_center(geojson)));
    let script = WATER_CONTEXT_SCRIPT.render(&vars)?;

    Ok(MapPage {
        file_name: "water_map_context.html",
        html: assemble(
            "Water Map Context - ArcGIS JS SDK",
            &[MAP, MAP_VIEW, GEOJSON_LAYER, FEATURE_LAYER, LEGEND],
            script,
        )?,
        state: Some(state),
    })
}

/// Self-contained water map for a state, every layer queried live.
pub fn embeddable_water_map(state: &str) -> MapResult<String> {
    let abbreviation = state.trim().to_uppercase();
    let full_name = states::resolve_full_name(&abbreviation);

    let mut vars = HashMap::from([
        ("abbreviation", sql_in_js(&abbreviation)),
        ("state", sql_in_js(&full_name)),
        ("gauges_url", layers::USGS_GAUGES.url.to_string()),
        ("huc6_url", layers::HUC6_WATERSHEDS_URL.to_string()),
        ("dam_popup", DAM_POPUP.to_string()),
    ]);
    vars.extend(shared_water_vars());
    vars.extend(center_vars(US_CENTER));
    let script = EMBEDDABLE_SCRIPT.render(&vars)?;

    assemble(
        &format!("Water Map - {}", full_name),
        &[MAP, MAP_VIEW, FEATURE_LAYER, LEGEND],
        script,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::maps::MapError;
    use serde_json::json;

    fn gauges(state: &str) -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [-86.0, 42.0] },
                  "properties": { "state": state, "status": "action" } },
                { "type": "Feature", "geometry": { "type": "Point", "coordinates": [-84.0, 44.0] },
                  "properties": { "state": state, "status": "no_flooding" } }
            ]
        })
    }

    #[test]
    fn test_geojson_app() {
        let page = geojson_app(&gauges("MI")).unwrap();
        assert_eq!(page.file_name, "arcgis_app.html");
        assert!(page.state.is_none());
        assert!(page.html.contains("https://js.arcgis.com/4.28/"));
        assert!(page.html.contains("\"esri/layers/GeoJSONLayer\""));
        assert!(page.html.contains("basemap: \"gray-vector\""));
        assert!(page.html.contains("center: [-77, 39]"));
        assert!(page.html.contains("\"status\":\"action\""));
        assert!(!page.html.contains("{{"));
    }

    #[test]
    fn test_rivers_app_uses_state_and_center() {
        let page = geojson_with_rivers_app(&gauges("MI")).unwrap();
        assert_eq!(page.state.as_deref(), Some("MI"));
        assert!(page.html.contains("definitionExpression: \"State = 'MI'\""));
        assert!(page.html.contains("center: [-85, 43]"));
        assert!(page.html.contains("zoom: 8"));
        assert!(page.html.contains(layers::RIVERS.url));
    }

    #[test]
    fn test_rivers_app_requires_state() {
        let data = json!({ "features": [ { "geometry": null, "properties": {} } ] });
        assert!(matches!(
            geojson_with_rivers_app(&data),
            Err(MapError::MissingState)
        ));
    }

    #[test]
    fn test_water_context_resolves_full_name() {
        let page = water_context_app(&gauges("MI")).unwrap();
        assert_eq!(page.state.as_deref(), Some("Michigan"));
        assert!(page.html.contains("State = 'Michigan'"));
        assert!(page.html.contains("dark-gray-vector"));
        assert!(page.html.contains("Toggle Legend"));
        assert!(page.html.contains(layers::DAMS.url));
        assert!(page.html.contains(layers::WATERSHEDS.url));
    }

    #[test]
    fn test_water_context_keeps_unknown_state() {
        let page = water_context_app(&gauges("PR")).unwrap();
        assert_eq!(page.state.as_deref(), Some("PR"));
    }

    #[test]
    fn test_embeddable_water_map() {
        let html = embeddable_water_map("tx").unwrap();
        assert!(html.contains("<title>Water Map - Texas</title>"));
        assert!(html.contains("state = 'TX'"));
        assert!(html.contains("states LIKE '%TX%'"));
        assert!(html.contains("State = 'Texas'"));
        assert!(html.contains(layers::HUC6_WATERSHEDS_URL));
        assert!(html.contains("zoom: 5"));
        assert!(!html.contains("GeoJSONLayer"));
    }

    #[test]
    fn test_embeddable_escapes_quotes() {
        let html = embeddable_water_map("x'; drop").unwrap();
        assert!(html.contains("state = 'X''; DROP'"));
    }

    #[test]
    fn test_inline_geojson_cannot_close_script() {
        let data = json!({ "features": [ { "properties": { "name": "</script>" } } ] });
        let page = geojson_app(&data).unwrap();
        assert_eq!(page.html.matches("</script>").count(), 2);
    }
}
