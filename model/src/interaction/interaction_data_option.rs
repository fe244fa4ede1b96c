use crate::command::CommandOptionType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One submitted option. Structural entries nest children under
/// `options` and carry no value; leaf entries carry `value` as sent.
#[derive(Serialize, Deserialize, Debug)]
pub struct InteractionDataOption {
    pub name: Box<str>,
    pub r#type: CommandOptionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<InteractionDataOption>>,
    #[serde(default)]
    pub focused: bool,
}
