use crate::error::{ResolveError, ResolveResult, ValidationError, ValidationResult};
use crate::mentions::Mentions;
use crate::resolved::{Mentionable, ResolvedEntity, ResolvedEntityTable};
use crate::schema::OptionType;
use model::channel::{Attachment, Channel};
use model::guild::{Member, Role};
use model::interaction::InteractionDataOption;
use model::user::User;
use model::Snowflake;
use std::convert::TryFrom;
use std::hash::{Hash, Hasher};

/// The raw value a client submitted for one option. Entity options carry
/// the referenced id as a digit string.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    String(Box<str>),
    Integer(i64),
    Number(f64),
    Boolean(bool),
}

/// One leaf option from a submitted interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedOption {
    name: Box<str>,
    kind: OptionType,
    value: OptionValue,
}

impl SubmittedOption {
    pub(crate) fn from_wire(wire: &InteractionDataOption) -> ValidationResult<SubmittedOption> {
        let kind = match OptionType::from_wire(wire.r#type) {
            Some(kind) => kind,
            None => return ValidationError::NotAValueOption { name: wire.name.clone() }.into(),
        };

        let raw = match &wire.value {
            Some(raw) => raw,
            None => return ValidationError::MalformedValue { name: wire.name.clone() }.into(),
        };

        let value = match kind {
            OptionType::String => raw.as_str().map(|s| OptionValue::String(s.into())),
            OptionType::Integer => raw.as_i64().map(OptionValue::Integer),
            OptionType::Number => raw.as_f64().map(OptionValue::Number),
            OptionType::Boolean => raw.as_bool().map(OptionValue::Boolean),
            // Entity references arrive as string-encoded ids, though some
            // clients send plain integers.
            _ => match (raw.as_str(), raw.as_u64()) {
                (Some(s), _) if s.bytes().all(|b| b.is_ascii_digit()) && !s.is_empty() => {
                    Some(OptionValue::String(s.into()))
                }
                (None, Some(id)) => Some(OptionValue::String(id.to_string().into())),
                _ => None,
            },
        };

        match value {
            Some(value) => Ok(SubmittedOption {
                name: wire.name.clone(),
                kind,
                value,
            }),
            None => ValidationError::MalformedValue { name: wire.name.clone() }.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> OptionType {
        self.kind
    }

    pub fn value(&self) -> &OptionValue {
        &self.value
    }
}

/// A submitted option paired with its interaction's resolved entities.
/// The matrix of which accessor accepts which option type is strict;
/// anything outside it is a `TypeMismatch`.
///
/// Two mappings are equal when name and type agree. The carried value is
/// left out of equality and hashing.
#[derive(Debug, Clone, Copy)]
pub struct OptionMapping<'a> {
    option: &'a SubmittedOption,
    resolved: &'a ResolvedEntityTable,
}

impl<'a> OptionMapping<'a> {
    pub(crate) fn new(
        option: &'a SubmittedOption,
        resolved: &'a ResolvedEntityTable,
    ) -> OptionMapping<'a> {
        OptionMapping { option, resolved }
    }

    pub fn name(&self) -> &'a str {
        self.option.name()
    }

    pub fn kind(&self) -> OptionType {
        self.option.kind()
    }

    pub fn value(&self) -> &'a OptionValue {
        self.option.value()
    }

    /// Text form of the value, whatever its type.
    pub fn as_string(&self) -> String {
        match self.option.value() {
            OptionValue::String(s) => s.to_string(),
            OptionValue::Integer(i) => i.to_string(),
            OptionValue::Number(f) => f.to_string(),
            OptionValue::Boolean(b) => b.to_string(),
        }
    }

    pub fn as_boolean(&self) -> ResolveResult<bool> {
        match self.option.value() {
            OptionValue::Boolean(b) => Ok(*b),
            _ => self.mismatch("as_boolean"),
        }
    }

    /// Integer options directly, String options by parsing, entity
    /// options as their id. Number options are refused; use `as_double`.
    pub fn as_long(&self) -> ResolveResult<i64> {
        match self.option.value() {
            OptionValue::Integer(i) => Ok(*i),
            OptionValue::String(s) => {
                s.parse().map_err(|_| ResolveError::NumberFormat { value: s.clone() })
            }
            _ => self.mismatch("as_long"),
        }
    }

    pub fn as_double(&self) -> ResolveResult<f64> {
        match self.option.value() {
            OptionValue::Number(f) => Ok(*f),
            OptionValue::Integer(i) => Ok(*i as f64),
            OptionValue::String(s) if self.kind() == OptionType::String => {
                s.parse().map_err(|_| ResolveError::NumberFormat { value: s.clone() })
            }
            _ => self.mismatch("as_double"),
        }
    }

    /// `as_long` narrowed to 32 bits.
    pub fn as_int(&self) -> ResolveResult<i32> {
        let value = self.as_long()?;
        i32::try_from(value).map_err(|_| ResolveError::IntegerOverflow { value })
    }

    pub fn as_mentionable(&self) -> ResolveResult<Mentionable<'a>> {
        match self.kind() {
            OptionType::User | OptionType::Role | OptionType::Mentionable => {}
            _ => return self.mismatch("as_mentionable"),
        }

        let id = self.entity_id("as_mentionable")?;
        match self.lookup(id)? {
            ResolvedEntity::Member(member) => Ok(Mentionable::Member(member)),
            ResolvedEntity::User(user) => Ok(Mentionable::User(user)),
            ResolvedEntity::Role(role) => Ok(Mentionable::Role(role)),
            other => self.wrong_entity("as_mentionable", id, other),
        }
    }

    /// `Ok(None)` means the id resolved to a user outside the guild; an
    /// id the table has nothing for is an error.
    pub fn as_member(&self) -> ResolveResult<Option<&'a Member>> {
        match self.kind() {
            OptionType::User | OptionType::Mentionable => {}
            _ => return self.mismatch("as_member"),
        }

        let id = self.entity_id("as_member")?;
        match self.lookup(id)? {
            ResolvedEntity::Member(member) => Ok(Some(member)),
            ResolvedEntity::User(_) => Ok(None),
            other => self.wrong_entity("as_member", id, other),
        }
    }

    pub fn as_user(&self) -> ResolveResult<&'a User> {
        match self.kind() {
            OptionType::User | OptionType::Mentionable => {}
            _ => return self.mismatch("as_user"),
        }

        let id = self.entity_id("as_user")?;
        match self.lookup(id)? {
            ResolvedEntity::User(user) => Ok(user),
            ResolvedEntity::Member(member) => {
                member.user.as_ref().ok_or(ResolveError::UnresolvedEntity(id))
            }
            other => self.wrong_entity("as_user", id, other),
        }
    }

    pub fn as_role(&self) -> ResolveResult<&'a Role> {
        match self.kind() {
            OptionType::Role | OptionType::Mentionable => {}
            _ => return self.mismatch("as_role"),
        }

        let id = self.entity_id("as_role")?;
        match self.lookup(id)? {
            ResolvedEntity::Role(role) => Ok(role),
            other => self.wrong_entity("as_role", id, other),
        }
    }

    pub fn as_channel(&self) -> ResolveResult<&'a Channel> {
        if self.kind() != OptionType::Channel {
            return self.mismatch("as_channel");
        }

        let id = self.entity_id("as_channel")?;
        match self.lookup(id)? {
            ResolvedEntity::Channel(channel) => Ok(channel),
            other => self.wrong_entity("as_channel", id, other),
        }
    }

    pub fn as_attachment(&self) -> ResolveResult<&'a Attachment> {
        if self.kind() != OptionType::Attachment {
            return self.mismatch("as_attachment");
        }

        let id = self.entity_id("as_attachment")?;
        match self.lookup(id)? {
            ResolvedEntity::Attachment(attachment) => Ok(attachment),
            other => self.wrong_entity("as_attachment", id, other),
        }
    }

    /// Mention tokens inside a String option's text; other types answer
    /// with an empty set.
    pub fn mentions(&self) -> Mentions<'a> {
        match self.option.value() {
            OptionValue::String(s) if self.kind() == OptionType::String => {
                Mentions::scan(s, self.resolved)
            }
            _ => Mentions::empty(self.resolved),
        }
    }

    fn entity_id(&self, accessor: &'static str) -> ResolveResult<Snowflake> {
        match self.option.value() {
            OptionValue::String(s) => s
                .parse::<u64>()
                .map(Snowflake)
                .map_err(|_| ResolveError::NumberFormat { value: s.clone() }),
            _ => self.mismatch(accessor),
        }
    }

    fn lookup(&self, id: Snowflake) -> ResolveResult<&'a ResolvedEntity> {
        self.resolved.get(id).ok_or(ResolveError::UnresolvedEntity(id))
    }

    fn mismatch<T>(&self, accessor: &'static str) -> ResolveResult<T> {
        ResolveError::TypeMismatch {
            accessor,
            kind: self.kind(),
        }
        .into()
    }

    fn wrong_entity<T>(
        &self,
        accessor: &'static str,
        id: Snowflake,
        found: &ResolvedEntity,
    ) -> ResolveResult<T> {
        ResolveError::EntityKindMismatch {
            accessor,
            id,
            found: found.kind(),
        }
        .into()
    }
}

impl PartialEq for OptionMapping<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.kind() == other.kind()
    }
}

impl Eq for OptionMapping<'_> {}

impl Hash for OptionMapping<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
        self.kind().hash(state);
    }
}
