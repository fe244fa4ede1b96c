use crate::schema::OptionType;
use model::Snowflake;

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

/// Schema construction violated a shape or length rule.
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} may be at most {max} characters, got {len}")]
    TooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },

    #[error("too many {what}: limit is {max}, got {len}")]
    TooMany {
        what: &'static str,
        max: usize,
        len: usize,
    },

    #[error("context menu commands cannot carry a description")]
    UnexpectedDescription,

    #[error("a command cannot mix value options with subcommands or groups")]
    MixedOptions,

    #[error("subcommands cannot nest inside other subcommands")]
    NestedSubcommand,

    #[error("subcommand group {name:?} must contain at least one subcommand")]
    EmptyGroup { name: Box<str> },

    #[error("option {name:?} is a subcommand entry, not a value option")]
    NotAValueOption { name: Box<str> },

    #[error("{kind:?} options cannot carry predefined choices")]
    ChoicesNotSupported { kind: OptionType },

    #[error("choice {name:?} does not match the {expected:?} option that owns it")]
    ChoiceTypeMismatch {
        name: Box<str>,
        expected: OptionType,
    },

    #[error("autocomplete cannot be combined with predefined choices")]
    AutocompleteWithChoices,

    #[error("{field} is not applicable to {kind:?} options")]
    FieldNotApplicable {
        field: &'static str,
        kind: OptionType,
    },

    #[error("{field} does not fit the option's {kind:?} type")]
    BoundTypeMismatch {
        field: &'static str,
        kind: OptionType,
    },

    #[error("submitted option {name:?} carries no usable value")]
    MalformedValue { name: Box<str> },

    #[error("option tree is malformed: {detail}")]
    MalformedOptionTree { detail: String },
}

/// A typed accessor was applied to an incompatible option, or a submitted
/// value would not coerce. Nothing here is transient or retryable.
#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    #[error("{accessor} is not supported for {kind:?} options")]
    TypeMismatch {
        accessor: &'static str,
        kind: OptionType,
    },

    #[error("{accessor}: id {id} resolved to a {found}")]
    EntityKindMismatch {
        accessor: &'static str,
        id: Snowflake,
        found: &'static str,
    },

    #[error("no resolved entity for id {0}")]
    UnresolvedEntity(Snowflake),

    #[error("cannot interpret {value:?} as a number")]
    NumberFormat { value: Box<str> },

    #[error("value {value} does not fit in a 32-bit integer")]
    IntegerOverflow { value: i64 },
}

impl<T> From<ValidationError> for ValidationResult<T> {
    fn from(e: ValidationError) -> Self {
        Err(e)
    }
}

impl<T> From<ResolveError> for ResolveResult<T> {
    fn from(e: ResolveError) -> Self {
        Err(e)
    }
}
