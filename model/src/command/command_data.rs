use crate::command::{CommandOption, CommandType};
use crate::{LocalizationMap, PermissionBitSet, Snowflake};
use serde::{Deserialize, Serialize};

/// Wire form of a registered command. `default_member_permissions` is
/// present-but-null for "enabled for everyone", so it never skips
/// serialization.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CommandData {
    pub id: Snowflake,
    pub application_id: Snowflake,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    #[serde(rename = "type", default)]
    pub command_type: CommandType,
    pub name: Box<str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<LocalizationMap>,
    pub description: Box<str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_localizations: Option<LocalizationMap>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
    #[serde(default)]
    pub default_member_permissions: Option<PermissionBitSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dm_permission: Option<bool>,
    #[serde(default)]
    pub nsfw: bool,
    pub version: Snowflake,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_command() {
        let json = r#"{
            "id": "1",
            "application_id": "2",
            "name": "ping",
            "description": "pong",
            "default_member_permissions": null,
            "version": "3"
        }"#;

        let data: CommandData = serde_json::from_str(json).unwrap();
        assert_eq!(data.command_type, CommandType::Slash);
        assert!(data.default_member_permissions.is_none());
        assert!(data.options.is_empty());
        assert!(!data.nsfw);
    }
}
