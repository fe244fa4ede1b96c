use model::command::CommandOptionType;
use OptionType::*;

/// Value kind of a command option. The structural wire kinds have no
/// counterpart here; they shape the option tree and never carry a value.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum OptionType {
    String,
    Integer,
    Boolean,
    User,
    Channel,
    Role,
    Mentionable,
    Number,
    Attachment,
}

impl OptionType {
    pub fn supports_choices(&self) -> bool {
        matches!(self, String | Integer | Number)
    }

    /// True when the submitted value is an id into the resolved entity
    /// table.
    pub fn is_entity(&self) -> bool {
        matches!(self, User | Channel | Role | Mentionable | Attachment)
    }

    pub fn from_wire(wire: CommandOptionType) -> Option<OptionType> {
        Some(match wire {
            CommandOptionType::String => String,
            CommandOptionType::Integer => Integer,
            CommandOptionType::Boolean => Boolean,
            CommandOptionType::User => User,
            CommandOptionType::Channel => Channel,
            CommandOptionType::Role => Role,
            CommandOptionType::Mentionable => Mentionable,
            CommandOptionType::Number => Number,
            CommandOptionType::Attachment => Attachment,
            CommandOptionType::SubCommand | CommandOptionType::SubCommandGroup => return None,
        })
    }

    pub fn to_wire(self) -> CommandOptionType {
        match self {
            String => CommandOptionType::String,
            Integer => CommandOptionType::Integer,
            Boolean => CommandOptionType::Boolean,
            User => CommandOptionType::User,
            Channel => CommandOptionType::Channel,
            Role => CommandOptionType::Role,
            Mentionable => CommandOptionType::Mentionable,
            Number => CommandOptionType::Number,
            Attachment => CommandOptionType::Attachment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_support() {
        assert!(String.supports_choices());
        assert!(Integer.supports_choices());
        assert!(Number.supports_choices());
        assert!(!Boolean.supports_choices());
        assert!(!User.supports_choices());
        assert!(!Attachment.supports_choices());
    }

    #[test]
    fn test_structural_kinds_have_no_value_form() {
        assert!(OptionType::from_wire(CommandOptionType::SubCommand).is_none());
        assert!(OptionType::from_wire(CommandOptionType::SubCommandGroup).is_none());
        assert_eq!(
            OptionType::from_wire(CommandOptionType::Mentionable),
            Some(Mentionable)
        );
    }
}
