pub mod error;
pub mod schema;

mod resolved;
pub use resolved::{Mentionable, ResolvedEntity, ResolvedEntityTable};

mod mapping;
pub use mapping::{OptionMapping, OptionValue, SubmittedOption};

mod mentions;
pub use mentions::Mentions;

mod payload;
pub use payload::CommandInteractionPayload;
