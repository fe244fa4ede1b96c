use crate::error::{ResolveError, ResolveResult, ValidationError, ValidationResult};
use crate::schema::{check_field, OptionType, SchemaLimits};
use model::command::CommandOptionChoice;
use model::LocalizationMap;
use serde_json::Value;

/// A predefined (name, value) pair for a choice-supporting option. The
/// value slot is fixed by the constructor; length rules fail at
/// construction, not at serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    name: Box<str>,
    value: ChoiceValue,
    name_localizations: LocalizationMap,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceValue {
    Integer(i64),
    Number(f64),
    String(Box<str>),
}

impl Choice {
    pub fn integer(name: impl Into<Box<str>>, value: i64) -> ValidationResult<Choice> {
        Self::validated(name.into(), ChoiceValue::Integer(value), &SchemaLimits::default())
    }

    pub fn number(name: impl Into<Box<str>>, value: f64) -> ValidationResult<Choice> {
        Self::validated(name.into(), ChoiceValue::Number(value), &SchemaLimits::default())
    }

    pub fn string(
        name: impl Into<Box<str>>,
        value: impl Into<Box<str>>,
    ) -> ValidationResult<Choice> {
        Self::validated(
            name.into(),
            ChoiceValue::String(value.into()),
            &SchemaLimits::default(),
        )
    }

    pub fn with_localized_names(mut self, map: LocalizationMap) -> Choice {
        self.name_localizations = map;
        self
    }

    fn validated(
        name: Box<str>,
        value: ChoiceValue,
        limits: &SchemaLimits,
    ) -> ValidationResult<Choice> {
        check_field(&name, "choice name", limits.choice_name_length)?;

        if let ChoiceValue::String(s) = &value {
            check_field(s, "choice value", limits.choice_value_length)?;
        }

        Ok(Choice {
            name,
            value,
            name_localizations: LocalizationMap::new(),
        })
    }

    pub(crate) fn from_wire(
        wire: &CommandOptionChoice,
        owner: OptionType,
        limits: &SchemaLimits,
    ) -> ValidationResult<Choice> {
        let value = match owner {
            OptionType::Integer => wire.value.as_i64().map(ChoiceValue::Integer),
            OptionType::Number => wire.value.as_f64().map(ChoiceValue::Number),
            OptionType::String => wire.value.as_str().map(|s| ChoiceValue::String(s.into())),
            _ => None,
        }
        .ok_or_else(|| ValidationError::ChoiceTypeMismatch {
            name: wire.name.clone(),
            expected: owner,
        })?;

        let mut choice = Self::validated(wire.name.clone(), value, limits)?;
        if let Some(localizations) = &wire.name_localizations {
            choice.name_localizations = localizations.clone();
        }

        Ok(choice)
    }

    pub(crate) fn to_wire(&self) -> CommandOptionChoice {
        let value = match &self.value {
            ChoiceValue::Integer(i) => Value::from(*i),
            ChoiceValue::Number(f) => Value::from(*f),
            ChoiceValue::String(s) => Value::from(s.as_ref()),
        };

        CommandOptionChoice {
            name: self.name.clone(),
            name_localizations: if self.name_localizations.is_empty() {
                None
            } else {
                Some(self.name_localizations.clone())
            },
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_localizations(&self) -> &LocalizationMap {
        &self.name_localizations
    }

    pub fn value(&self) -> &ChoiceValue {
        &self.value
    }

    /// The option type this choice's value slot corresponds to.
    pub fn kind(&self) -> OptionType {
        match self.value {
            ChoiceValue::Integer(_) => OptionType::Integer,
            ChoiceValue::Number(_) => OptionType::Number,
            ChoiceValue::String(_) => OptionType::String,
        }
    }

    pub fn as_string(&self) -> String {
        match &self.value {
            ChoiceValue::Integer(i) => i.to_string(),
            ChoiceValue::Number(f) => f.to_string(),
            ChoiceValue::String(s) => s.to_string(),
        }
    }

    /// Integer form of the value. Number-valued choices are refused, the
    /// same way `OptionMapping::as_long` refuses Number options.
    pub fn as_long(&self) -> ResolveResult<i64> {
        match &self.value {
            ChoiceValue::Integer(i) => Ok(*i),
            ChoiceValue::Number(_) => Err(ResolveError::TypeMismatch {
                accessor: "as_long",
                kind: OptionType::Number,
            }),
            ChoiceValue::String(s) => s.parse().map_err(|_| ResolveError::NumberFormat {
                value: s.clone(),
            }),
        }
    }

    pub fn as_double(&self) -> ResolveResult<f64> {
        match &self.value {
            ChoiceValue::Integer(i) => Ok(*i as f64),
            ChoiceValue::Number(f) => Ok(*f),
            ChoiceValue::String(s) => s.parse().map_err(|_| ResolveError::NumberFormat {
                value: s.clone(),
            }),
        }
    }
}
