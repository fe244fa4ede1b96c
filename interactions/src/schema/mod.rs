use crate::error::{ValidationError, ValidationResult};

mod limits;
pub use limits::SchemaLimits;

mod option_type;
pub use option_type::OptionType;

mod choice;
pub use choice::{Choice, ChoiceValue};

mod option;
pub use option::{NumericBound, OptionDefinition};

mod subcommand;
pub use subcommand::{Subcommand, SubcommandGroup, SubcommandGroupRef, SubcommandRef};

mod command;
pub use command::{Command, DefaultMemberPermissions};

pub use model::command::CommandType;

// Length checks count characters, not bytes, to match the platform rules.
pub(crate) fn check_field(value: &str, field: &'static str, max: usize) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, max, len });
    }

    Ok(())
}
