mod command_data;
pub use command_data::CommandData;

mod command_type;
pub use command_type::CommandType;

mod command_option;
pub use command_option::{CommandOption, CommandOptionType};

mod command_option_choice;
pub use command_option_choice::CommandOptionChoice;
