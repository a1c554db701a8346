//! State abbreviation table resource.

use serde_json::{Map, Value};

use super::ResourceDefinition;
use crate::domains::atlas::states::STATES;
use crate::domains::resources::service::ResourceContent;

pub struct StateTableResource;

impl ResourceDefinition for StateTableResource {
    const URI: &'static str = "atlas://states";
    const NAME: &'static str = "US States";
    const DESCRIPTION: &'static str = "Postal abbreviation to full name for every state and DC";
    const MIME_TYPE: &'static str = "application/json";
    const CATALOG: bool = true;

    fn content() -> ResourceContent {
        let table: Map<String, Value> = STATES
            .iter()
            .map(|(abbr, name)| (abbr.to_string(), Value::from(*name)))
            .collect();
        ResourceContent::Json(Value::Object(table))
    }
}
