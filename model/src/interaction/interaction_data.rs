use crate::command::CommandType;
use crate::interaction::{InteractionDataOption, InteractionDataResolved};
use crate::Snowflake;
use serde::{Deserialize, Serialize};

/// The `data` object of a submitted application command interaction.
#[derive(Serialize, Deserialize, Debug)]
pub struct InteractionData {
    pub id: Snowflake,
    pub name: Box<str>,
    #[serde(rename = "type", default)]
    pub command_type: CommandType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<InteractionDataOption>,
    #[serde(default)]
    pub resolved: InteractionDataResolved,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<Snowflake>,
}
