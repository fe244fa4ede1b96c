use crate::LocalizationMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CommandOptionChoice {
    pub name: Box<str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<LocalizationMap>,
    // string, integer or float depending on the owning option's type
    pub value: Value,
}
