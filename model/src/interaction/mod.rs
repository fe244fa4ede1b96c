mod interaction_data;
pub use interaction_data::InteractionData;

mod interaction_data_option;
pub use interaction_data_option::InteractionDataOption;

mod interaction_data_resolved;
pub use interaction_data_resolved::InteractionDataResolved;
