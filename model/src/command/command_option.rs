use crate::channel::ChannelType;
use crate::command::CommandOptionChoice;
use crate::LocalizationMap;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;

/// One node of a command's option tree. Absent bounds mean unbounded.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CommandOption {
    pub r#type: CommandOptionType,
    pub name: Box<str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_localizations: Option<LocalizationMap>,
    pub description: Box<str>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_localizations: Option<LocalizationMap>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub autocomplete: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<CommandOptionChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<CommandOption>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub channel_types: Vec<ChannelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u16>,
}

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum CommandOptionType {
    SubCommand = 1,
    SubCommandGroup = 2,
    String = 3,
    Integer = 4,
    Boolean = 5,
    User = 6,
    Channel = 7,
    Role = 8,
    Mentionable = 9,
    Number = 10,
    Attachment = 11,
}

impl CommandOptionType {
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CommandOptionType::SubCommand | CommandOptionType::SubCommandGroup
        )
    }
}

impl TryFrom<u8> for CommandOptionType {
    type Error = Box<str>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::SubCommand,
            2 => Self::SubCommandGroup,
            3 => Self::String,
            4 => Self::Integer,
            5 => Self::Boolean,
            6 => Self::User,
            7 => Self::Channel,
            8 => Self::Role,
            9 => Self::Mentionable,
            10 => Self::Number,
            11 => Self::Attachment,
            _ => return Err(format!("invalid option type \"{}\"", value).into_boxed_str()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let json = r#"{"type":3,"name":"reason","description":"why"}"#;
        let option: CommandOption = serde_json::from_str(json).unwrap();
        assert_eq!(option.r#type, CommandOptionType::String);
        assert!(!option.required);
        assert!(option.choices.is_empty());
        assert!(option.min_value.is_none());
    }
}
