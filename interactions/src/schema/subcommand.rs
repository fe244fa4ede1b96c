use crate::error::{ValidationError, ValidationResult};
use crate::schema::{check_field, Command, OptionDefinition, SchemaLimits};
use model::command::{CommandOption, CommandOptionType};
use model::LocalizationMap;
use model::Snowflake;

/// A named leaf of the command tree carrying its own value options.
#[derive(Debug, Clone, PartialEq)]
pub struct Subcommand {
    name: Box<str>,
    name_localizations: LocalizationMap,
    description: Box<str>,
    description_localizations: LocalizationMap,
    options: Vec<OptionDefinition>,
}

/// One level of grouping between a command and its subcommands. Groups
/// cannot nest and cannot hold value options.
#[derive(Debug, Clone, PartialEq)]
pub struct SubcommandGroup {
    name: Box<str>,
    name_localizations: LocalizationMap,
    description: Box<str>,
    description_localizations: LocalizationMap,
    subcommands: Vec<Subcommand>,
}

impl Subcommand {
    pub fn new(
        name: impl Into<Box<str>>,
        description: impl Into<Box<str>>,
    ) -> ValidationResult<Subcommand> {
        Self::validated(name.into(), description.into(), &SchemaLimits::default())
    }

    fn validated(
        name: Box<str>,
        description: Box<str>,
        limits: &SchemaLimits,
    ) -> ValidationResult<Subcommand> {
        check_field(&name, "subcommand name", limits.name_length)?;
        check_field(&description, "subcommand description", limits.description_length)?;

        Ok(Subcommand {
            name,
            name_localizations: LocalizationMap::new(),
            description,
            description_localizations: LocalizationMap::new(),
            options: Vec::new(),
        })
    }

    pub fn add_option(mut self, option: OptionDefinition) -> ValidationResult<Subcommand> {
        let limits = SchemaLimits::default();

        if self.options.len() >= limits.options_per_level {
            return ValidationError::TooMany {
                what: "options",
                max: limits.options_per_level,
                len: self.options.len() + 1,
            }
            .into();
        }

        self.options.push(option);
        Ok(self)
    }

    pub fn with_localized_names(mut self, map: LocalizationMap) -> Subcommand {
        self.name_localizations = map;
        self
    }

    pub fn with_localized_descriptions(mut self, map: LocalizationMap) -> Subcommand {
        self.description_localizations = map;
        self
    }

    pub(crate) fn from_wire(
        wire: &CommandOption,
        limits: &SchemaLimits,
    ) -> ValidationResult<Subcommand> {
        let mut subcommand =
            Self::validated(wire.name.clone(), wire.description.clone(), limits)?;

        if let Some(localizations) = &wire.name_localizations {
            subcommand.name_localizations = localizations.clone();
        }

        if let Some(localizations) = &wire.description_localizations {
            subcommand.description_localizations = localizations.clone();
        }

        let children = wire.options.as_deref().unwrap_or(&[]);
        if children.len() > limits.options_per_level {
            return ValidationError::TooMany {
                what: "options",
                max: limits.options_per_level,
                len: children.len(),
            }
            .into();
        }

        for child in children {
            if child.r#type.is_structural() {
                return ValidationError::NestedSubcommand.into();
            }

            subcommand.options.push(OptionDefinition::from_wire(child, limits)?);
        }

        Ok(subcommand)
    }

    pub(crate) fn to_wire(&self) -> CommandOption {
        CommandOption {
            r#type: CommandOptionType::SubCommand,
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
            required: false,
            autocomplete: false,
            choices: Vec::new(),
            options: if self.options.is_empty() {
                None
            } else {
                Some(self.options.iter().map(OptionDefinition::to_wire).collect())
            },
            channel_types: Vec::new(),
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
        }
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

    pub fn options(&self) -> &[OptionDefinition] {
        &self.options
    }
}

impl SubcommandGroup {
    pub fn new(
        name: impl Into<Box<str>>,
        description: impl Into<Box<str>>,
    ) -> ValidationResult<SubcommandGroup> {
        Self::validated(name.into(), description.into(), &SchemaLimits::default())
    }

    fn validated(
        name: Box<str>,
        description: Box<str>,
        limits: &SchemaLimits,
    ) -> ValidationResult<SubcommandGroup> {
        check_field(&name, "group name", limits.name_length)?;
        check_field(&description, "group description", limits.description_length)?;

        Ok(SubcommandGroup {
            name,
            name_localizations: LocalizationMap::new(),
            description,
            description_localizations: LocalizationMap::new(),
            subcommands: Vec::new(),
        })
    }

    pub fn add_subcommand(mut self, subcommand: Subcommand) -> ValidationResult<SubcommandGroup> {
        let limits = SchemaLimits::default();

        if self.subcommands.len() >= limits.options_per_level {
            return ValidationError::TooMany {
                what: "subcommands",
                max: limits.options_per_level,
                len: self.subcommands.len() + 1,
            }
            .into();
        }

        self.subcommands.push(subcommand);
        Ok(self)
    }

    pub fn with_localized_names(mut self, map: LocalizationMap) -> SubcommandGroup {
        self.name_localizations = map;
        self
    }

    pub fn with_localized_descriptions(mut self, map: LocalizationMap) -> SubcommandGroup {
        self.description_localizations = map;
        self
    }

    pub(crate) fn from_wire(
        wire: &CommandOption,
        limits: &SchemaLimits,
    ) -> ValidationResult<SubcommandGroup> {
        let mut group = Self::validated(wire.name.clone(), wire.description.clone(), limits)?;

        if let Some(localizations) = &wire.name_localizations {
            group.name_localizations = localizations.clone();
        }

        if let Some(localizations) = &wire.description_localizations {
            group.description_localizations = localizations.clone();
        }

        let children = wire.options.as_deref().unwrap_or(&[]);
        if children.is_empty() {
            return ValidationError::EmptyGroup {
                name: group.name.clone(),
            }
            .into();
        }

        if children.len() > limits.options_per_level {
            return ValidationError::TooMany {
                what: "subcommands",
                max: limits.options_per_level,
                len: children.len(),
            }
            .into();
        }

        for child in children {
            match child.r#type {
                CommandOptionType::SubCommand => {
                    group.subcommands.push(Subcommand::from_wire(child, limits)?);
                }
                CommandOptionType::SubCommandGroup => {
                    return ValidationError::NestedSubcommand.into();
                }
                _ => {
                    return ValidationError::MalformedOptionTree {
                        detail: format!(
                            "group {} holds a value option, groups may only hold subcommands",
                            group.name
                        ),
                    }
                    .into();
                }
            }
        }

        Ok(group)
    }

    pub(crate) fn to_wire(&self) -> CommandOption {
        CommandOption {
            r#type: CommandOptionType::SubCommandGroup,
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
            required: false,
            autocomplete: false,
            choices: Vec::new(),
            options: Some(self.subcommands.iter().map(Subcommand::to_wire).collect()),
            channel_types: Vec::new(),
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
        }
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

    pub fn subcommands(&self) -> &[Subcommand] {
        &self.subcommands
    }
}

/// Borrowed view of a subcommand in the context of its owning command.
/// The command owns every node; handles never do.
#[derive(Debug, Clone, Copy)]
pub struct SubcommandRef<'a> {
    pub(crate) root: &'a Command,
    pub(crate) group: Option<&'a SubcommandGroup>,
    pub(crate) subcommand: &'a Subcommand,
}

#[derive(Debug, Clone, Copy)]
pub struct SubcommandGroupRef<'a> {
    pub(crate) root: &'a Command,
    pub(crate) group: &'a SubcommandGroup,
}

impl<'a> SubcommandRef<'a> {
    /// The root command's id; subcommands have no identity of their own.
    pub fn id(&self) -> Snowflake {
        self.root.id()
    }

    pub fn command(&self) -> &'a Command {
        self.root
    }

    pub fn group(&self) -> Option<SubcommandGroupRef<'a>> {
        self.group.map(|group| SubcommandGroupRef {
            root: self.root,
            group,
        })
    }

    pub fn name(&self) -> &'a str {
        self.subcommand.name()
    }

    pub fn description(&self) -> &'a str {
        self.subcommand.description()
    }

    pub fn options(&self) -> &'a [OptionDefinition] {
        self.subcommand.options()
    }

    /// Space-joined path from the root, e.g. `admin mod ban`.
    pub fn full_name(&self) -> String {
        match self.group {
            Some(group) => format!("{} {} {}", self.root.name(), group.name(), self.name()),
            None => format!("{} {}", self.root.name(), self.name()),
        }
    }
}

impl<'a> SubcommandGroupRef<'a> {
    pub fn id(&self) -> Snowflake {
        self.root.id()
    }

    pub fn command(&self) -> &'a Command {
        self.root
    }

    pub fn name(&self) -> &'a str {
        self.group.name()
    }

    pub fn description(&self) -> &'a str {
        self.group.description()
    }

    pub fn subcommands(&self) -> Vec<SubcommandRef<'a>> {
        self.group
            .subcommands()
            .iter()
            .map(|subcommand| SubcommandRef {
                root: self.root,
                group: Some(self.group),
                subcommand,
            })
            .collect()
    }

    pub fn subcommand(&self, name: &str) -> Option<SubcommandRef<'a>> {
        self.group
            .subcommands()
            .iter()
            .find(|subcommand| subcommand.name() == name)
            .map(|subcommand| SubcommandRef {
                root: self.root,
                group: Some(self.group),
                subcommand,
            })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.root.name(), self.group.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::OptionType;

    fn wire_subcommand(name: &str, children: Option<Vec<CommandOption>>) -> CommandOption {
        CommandOption {
            r#type: CommandOptionType::SubCommand,
            name: name.into(),
            name_localizations: None,
            description: "A subcommand".into(),
            description_localizations: None,
            required: false,
            autocomplete: false,
            choices: Vec::new(),
            options: children,
            channel_types: Vec::new(),
            min_value: None,
            max_value: None,
            min_length: None,
            max_length: None,
        }
    }

    #[test]
    fn test_nested_subcommand_rejected() {
        let inner = wire_subcommand("inner", None);
        let outer = wire_subcommand("outer", Some(vec![inner]));

        assert!(matches!(
            Subcommand::from_wire(&outer, &SchemaLimits::default()),
            Err(ValidationError::NestedSubcommand)
        ));
    }

    #[test]
    fn test_empty_group_rejected() {
        let mut wire = wire_subcommand("mod", Some(Vec::new()));
        wire.r#type = CommandOptionType::SubCommandGroup;

        assert!(matches!(
            SubcommandGroup::from_wire(&wire, &SchemaLimits::default()),
            Err(ValidationError::EmptyGroup { .. })
        ));
    }

    #[test]
    fn test_group_refuses_value_options() {
        let mut value = wire_subcommand("reason", None);
        value.r#type = CommandOptionType::String;

        let mut wire = wire_subcommand("mod", Some(vec![value]));
        wire.r#type = CommandOptionType::SubCommandGroup;

        assert!(matches!(
            SubcommandGroup::from_wire(&wire, &SchemaLimits::default()),
            Err(ValidationError::MalformedOptionTree { .. })
        ));
    }

    #[test]
    fn test_subcommand_round_trip_keeps_option_order() {
        let subcommand = Subcommand::new("ban", "Ban a user")
            .unwrap()
            .add_option(
                OptionDefinition::new(OptionType::User, "target", "Who to ban")
                    .unwrap()
                    .required(true),
            )
            .unwrap()
            .add_option(OptionDefinition::new(OptionType::String, "reason", "Why").unwrap())
            .unwrap();

        let parsed = Subcommand::from_wire(&subcommand.to_wire(), &SchemaLimits::default()).unwrap();
        let names: Vec<&str> = parsed.options().iter().map(OptionDefinition::name).collect();
        assert_eq!(names, vec!["target", "reason"]);
    }
}
