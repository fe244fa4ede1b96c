use serde_repr::{Deserialize_repr, Serialize_repr};
use std::convert::TryFrom;

#[derive(Serialize_repr, Deserialize_repr, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum CommandType {
    Slash = 1,
    User = 2,
    Message = 3,
}

impl CommandType {
    /// Context-menu commands target an entity rather than taking options.
    pub fn is_context_menu(&self) -> bool {
        matches!(self, CommandType::User | CommandType::Message)
    }
}

impl Default for CommandType {
    fn default() -> Self {
        CommandType::Slash
    }
}

impl TryFrom<u8> for CommandType {
    type Error = Box<str>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            1 => Self::Slash,
            2 => Self::User,
            3 => Self::Message,
            _ => return Err(format!("invalid command type \"{}\"", value).into_boxed_str()),
        })
    }
}
