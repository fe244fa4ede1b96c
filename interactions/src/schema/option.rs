use crate::error::{ValidationError, ValidationResult};
use crate::schema::{check_field, Choice, OptionType, SchemaLimits};
use model::channel::ChannelType;
use model::command::CommandOption;
use model::LocalizationMap;
use serde_json::Number;

/// A validated value-carrying option. Structural options (subcommands and
/// groups) are modelled separately; this type refuses them outright.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDefinition {
    kind: OptionType,
    name: Box<str>,
    name_localizations: LocalizationMap,
    description: Box<str>,
    description_localizations: LocalizationMap,
    required: bool,
    autocomplete: bool,
    choices: Vec<Choice>,
    channel_types: Vec<ChannelType>,
    min_value: Option<NumericBound>,
    max_value: Option<NumericBound>,
    min_length: Option<u16>,
    max_length: Option<u16>,
}

/// Bound on an Integer or Number option, matching the owning option's type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericBound {
    Integer(i64),
    Number(f64),
}

impl OptionDefinition {
    pub fn new(
        kind: OptionType,
        name: impl Into<Box<str>>,
        description: impl Into<Box<str>>,
    ) -> ValidationResult<OptionDefinition> {
        Self::validated(kind, name.into(), description.into(), &SchemaLimits::default())
    }

    fn validated(
        kind: OptionType,
        name: Box<str>,
        description: Box<str>,
        limits: &SchemaLimits,
    ) -> ValidationResult<OptionDefinition> {
        check_field(&name, "option name", limits.name_length)?;
        check_field(&description, "option description", limits.description_length)?;

        Ok(OptionDefinition {
            kind,
            name,
            name_localizations: LocalizationMap::new(),
            description,
            description_localizations: LocalizationMap::new(),
            required: false,
            autocomplete: false,
            choices: Vec::new(),
            channel_types: Vec::new(),
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
        })
    }

    pub fn required(mut self, required: bool) -> OptionDefinition {
        self.required = required;
        self
    }

    pub fn with_localized_names(mut self, map: LocalizationMap) -> OptionDefinition {
        self.name_localizations = map;
        self
    }

    pub fn with_localized_descriptions(mut self, map: LocalizationMap) -> OptionDefinition {
        self.description_localizations = map;
        self
    }

    /// Only String, Integer and Number options take suggestions, and
    /// never together with a fixed choice list.
    pub fn autocomplete(mut self, autocomplete: bool) -> ValidationResult<OptionDefinition> {
        if autocomplete && !self.kind.supports_choices() {
            return ValidationError::FieldNotApplicable {
                field: "autocomplete",
                kind: self.kind,
            }
            .into();
        }

        if autocomplete && !self.choices.is_empty() {
            return ValidationError::AutocompleteWithChoices.into();
        }

        self.autocomplete = autocomplete;
        Ok(self)
    }

    pub fn add_choice(mut self, choice: Choice) -> ValidationResult<OptionDefinition> {
        let limits = SchemaLimits::default();

        if !self.kind.supports_choices() {
            return ValidationError::ChoicesNotSupported { kind: self.kind }.into();
        }

        if self.autocomplete {
            return ValidationError::AutocompleteWithChoices.into();
        }

        if choice.kind() != self.kind {
            return ValidationError::ChoiceTypeMismatch {
                name: choice.name().into(),
                expected: self.kind,
            }
            .into();
        }

        if self.choices.len() >= limits.choices_per_option {
            return ValidationError::TooMany {
                what: "choices",
                max: limits.choices_per_option,
                len: self.choices.len() + 1,
            }
            .into();
        }

        self.choices.push(choice);
        Ok(self)
    }

    /// Restricts a Channel option to the given channel types.
    pub fn channel_types(
        mut self,
        types: impl IntoIterator<Item = ChannelType>,
    ) -> ValidationResult<OptionDefinition> {
        if self.kind != OptionType::Channel {
            return ValidationError::FieldNotApplicable {
                field: "channel_types",
                kind: self.kind,
            }
            .into();
        }

        self.channel_types = types.into_iter().collect();
        Ok(self)
    }

    pub fn min_value(mut self, bound: NumericBound) -> ValidationResult<OptionDefinition> {
        self.min_value = Some(self.checked_bound("min_value", bound)?);
        Ok(self)
    }

    pub fn max_value(mut self, bound: NumericBound) -> ValidationResult<OptionDefinition> {
        self.max_value = Some(self.checked_bound("max_value", bound)?);
        Ok(self)
    }

    fn checked_bound(
        &self,
        field: &'static str,
        bound: NumericBound,
    ) -> ValidationResult<NumericBound> {
        let matches_kind = match (self.kind, bound) {
            (OptionType::Integer, NumericBound::Integer(_)) => true,
            (OptionType::Number, NumericBound::Number(_)) => true,
            _ => false,
        };

        if !matches_kind {
            if self.kind != OptionType::Integer && self.kind != OptionType::Number {
                return ValidationError::FieldNotApplicable { field, kind: self.kind }.into();
            }

            return ValidationError::BoundTypeMismatch { field, kind: self.kind }.into();
        }

        if let NumericBound::Number(f) = bound {
            if !f.is_finite() {
                return ValidationError::MalformedValue { name: field.into() }.into();
            }
        }

        Ok(bound)
    }

    pub fn min_length(mut self, length: u16) -> ValidationResult<OptionDefinition> {
        if self.kind != OptionType::String {
            return ValidationError::FieldNotApplicable {
                field: "min_length",
                kind: self.kind,
            }
            .into();
        }

        self.min_length = Some(length);
        Ok(self)
    }

    pub fn max_length(mut self, length: u16) -> ValidationResult<OptionDefinition> {
        if self.kind != OptionType::String {
            return ValidationError::FieldNotApplicable {
                field: "max_length",
                kind: self.kind,
            }
            .into();
        }

        self.max_length = Some(length);
        Ok(self)
    }

    pub(crate) fn from_wire(
        wire: &CommandOption,
        limits: &SchemaLimits,
    ) -> ValidationResult<OptionDefinition> {
        let kind = match OptionType::from_wire(wire.r#type) {
            Some(kind) => kind,
            None => return ValidationError::NotAValueOption { name: wire.name.clone() }.into(),
        };

        let mut option =
            Self::validated(kind, wire.name.clone(), wire.description.clone(), limits)?;
        option.required = wire.required;

        if let Some(localizations) = &wire.name_localizations {
            option.name_localizations = localizations.clone();
        }

        if let Some(localizations) = &wire.description_localizations {
            option.description_localizations = localizations.clone();
        }

        if !wire.choices.is_empty() {
            if !kind.supports_choices() {
                return ValidationError::ChoicesNotSupported { kind }.into();
            }

            if wire.choices.len() > limits.choices_per_option {
                return ValidationError::TooMany {
                    what: "choices",
                    max: limits.choices_per_option,
                    len: wire.choices.len(),
                }
                .into();
            }

            for choice in &wire.choices {
                option.choices.push(Choice::from_wire(choice, kind, limits)?);
            }
        }

        if wire.autocomplete {
            option = option.autocomplete(true)?;
        }

        if !wire.channel_types.is_empty() {
            option = option.channel_types(wire.channel_types.iter().copied())?;
        }

        if let Some(bound) = &wire.min_value {
            option = option.min_value(Self::bound_from_wire("min_value", kind, bound)?)?;
        }

        if let Some(bound) = &wire.max_value {
            option = option.max_value(Self::bound_from_wire("max_value", kind, bound)?)?;
        }

        if let Some(length) = wire.min_length {
            option = option.min_length(length)?;
        }

        if let Some(length) = wire.max_length {
            option = option.max_length(length)?;
        }

        Ok(option)
    }

    fn bound_from_wire(
        field: &'static str,
        kind: OptionType,
        raw: &Number,
    ) -> ValidationResult<NumericBound> {
        match kind {
            OptionType::Integer => raw
                .as_i64()
                .map(NumericBound::Integer)
                .ok_or(ValidationError::BoundTypeMismatch { field, kind }),
            OptionType::Number => raw
                .as_f64()
                .map(NumericBound::Number)
                .ok_or(ValidationError::BoundTypeMismatch { field, kind }),
            _ => Err(ValidationError::FieldNotApplicable { field, kind }),
        }
    }

    pub(crate) fn to_wire(&self) -> CommandOption {
        CommandOption {
            r#type: self.kind.to_wire(),
            name: self.name.clone(),
            name_localizations: if self.name_localizations.is_empty() {
                None
            } else {
                Some(self.name_localizations.clone())
            },
            description: self.description.clone(),
            description_localizations: if self.description_localizations.is_empty() {
                None
            } else {
                Some(self.description_localizations.clone())
            },
            required: self.required,
            autocomplete: self.autocomplete,
            choices: self.choices.iter().map(Choice::to_wire).collect(),
            options: None,
            channel_types: self.channel_types.clone(),
            min_value: self.min_value.as_ref().and_then(NumericBound::to_wire),
            max_value: self.max_value.as_ref().and_then(NumericBound::to_wire),
            min_length: self.min_length,
            max_length: self.max_length,
        }
    }

    pub fn kind(&self) -> OptionType {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_localizations(&self) -> &LocalizationMap {
        &self.name_localizations
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn description_localizations(&self) -> &LocalizationMap {
        &self.description_localizations
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_autocomplete(&self) -> bool {
        self.autocomplete
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn channel_type_filter(&self) -> &[ChannelType] {
        &self.channel_types
    }

    pub fn min_value_bound(&self) -> Option<NumericBound> {
        self.min_value
    }

    pub fn max_value_bound(&self) -> Option<NumericBound> {
        self.max_value
    }

    pub fn min_length_bound(&self) -> Option<u16> {
        self.min_length
    }

    pub fn max_length_bound(&self) -> Option<u16> {
        self.max_length
    }
}

impl NumericBound {
    fn to_wire(&self) -> Option<Number> {
        match self {
            NumericBound::Integer(i) => Some(Number::from(*i)),
            NumericBound::Number(f) => Number::from_f64(*f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choices_refused_on_non_choice_kind() {
        let option = OptionDefinition::new(OptionType::User, "target", "Who to act on").unwrap();
        let choice = Choice::string("a", "b").unwrap();

        assert!(matches!(
            option.add_choice(choice),
            Err(ValidationError::ChoicesNotSupported { kind: OptionType::User })
        ));
    }

    #[test]
    fn test_choice_value_type_must_match_option() {
        let option = OptionDefinition::new(OptionType::Integer, "count", "How many").unwrap();
        let choice = Choice::string("five", "5").unwrap();

        assert!(matches!(
            option.add_choice(choice),
            Err(ValidationError::ChoiceTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_autocomplete_conflicts_with_choices() {
        let option = OptionDefinition::new(OptionType::String, "query", "Search term")
            .unwrap()
            .add_choice(Choice::string("first", "1").unwrap())
            .unwrap();

        assert!(matches!(
            option.autocomplete(true),
            Err(ValidationError::AutocompleteWithChoices)
        ));
    }

    #[test]
    fn test_channel_filter_only_on_channel_options() {
        let option = OptionDefinition::new(OptionType::String, "name", "A name").unwrap();

        assert!(matches!(
            option.channel_types(vec![ChannelType::GuildText]),
            Err(ValidationError::FieldNotApplicable { field: "channel_types", .. })
        ));
    }

    #[test]
    fn test_integer_bound_must_be_whole() {
        let option = OptionDefinition::new(OptionType::Integer, "count", "How many").unwrap();

        assert!(matches!(
            option.min_value(NumericBound::Number(1.5)),
            Err(ValidationError::BoundTypeMismatch { field: "min_value", .. })
        ));
    }

    #[test]
    fn test_wire_round_trip_preserves_fields() {
        let option = OptionDefinition::new(OptionType::Integer, "count", "How many")
            .unwrap()
            .required(true)
            .add_choice(Choice::integer("one", 1).unwrap())
            .unwrap()
            .min_value(NumericBound::Integer(0))
            .unwrap()
            .max_value(NumericBound::Integer(100))
            .unwrap();

        let wire = option.to_wire();
        let parsed = OptionDefinition::from_wire(&wire, &SchemaLimits::default()).unwrap();

        assert_eq!(parsed, option);
    }
}
