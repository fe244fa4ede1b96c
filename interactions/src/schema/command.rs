use crate::error::{ValidationError, ValidationResult};
use crate::schema::{
    check_field, CommandType, OptionDefinition, SchemaLimits, Subcommand, SubcommandGroup,
    SubcommandGroupRef, SubcommandRef,
};
use chrono::{DateTime, Utc};
use model::command::{CommandData, CommandOption, CommandOptionType};
use model::{LocalizationMap, Permission, PermissionBitSet, Snowflake};
use tracing::debug;

/// A registered application command, validated and immutable, so it can
/// be read from any number of threads without synchronization. Owns its
/// whole option tree and hands out borrowing `SubcommandRef` /
/// `SubcommandGroupRef` views. Holds either value options or
/// subcommands/groups, never both.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    id: Snowflake,
    application_id: Snowflake,
    guild_id: Option<Snowflake>,
    kind: CommandType,
    name: Box<str>,
    name_localizations: LocalizationMap,
    description: Box<str>,
    description_localizations: LocalizationMap,
    options: Vec<OptionDefinition>,
    subcommands: Vec<Subcommand>,
    groups: Vec<SubcommandGroup>,
    default_member_permissions: DefaultMemberPermissions,
    guild_only: bool,
    nsfw: bool,
    version: Snowflake,
}

/// Who may invoke a command before server overrides apply. `Disabled` is
/// the wire's zero bit set and restricts the command to administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultMemberPermissions {
    Enabled,
    Disabled,
    Restricted(PermissionBitSet),
}

impl DefaultMemberPermissions {
    pub fn restricted(permissions: &[Permission]) -> DefaultMemberPermissions {
        let bits = PermissionBitSet::of(permissions);
        if bits.is_empty() {
            DefaultMemberPermissions::Disabled
        } else {
            DefaultMemberPermissions::Restricted(bits)
        }
    }

    pub(crate) fn from_wire(raw: Option<PermissionBitSet>) -> DefaultMemberPermissions {
        match raw {
            None => DefaultMemberPermissions::Enabled,
            Some(bits) if bits.is_empty() => DefaultMemberPermissions::Disabled,
            Some(bits) => DefaultMemberPermissions::Restricted(bits),
        }
    }

    pub(crate) fn to_wire(self) -> Option<PermissionBitSet> {
        match self {
            DefaultMemberPermissions::Enabled => None,
            DefaultMemberPermissions::Disabled => Some(PermissionBitSet(0)),
            DefaultMemberPermissions::Restricted(bits) => Some(bits),
        }
    }
}

impl Command {
    pub fn from_wire(data: &CommandData) -> ValidationResult<Command> {
        Self::from_wire_with(data, &SchemaLimits::default())
    }

    #[tracing::instrument(skip(data, limits), fields(command = %data.name))]
    pub fn from_wire_with(data: &CommandData, limits: &SchemaLimits) -> ValidationResult<Command> {
        check_field(&data.name, "command name", limits.name_length)?;

        if data.command_type.is_context_menu() {
            if !data.description.is_empty() {
                return ValidationError::UnexpectedDescription.into();
            }

            if !data.options.is_empty() {
                return ValidationError::MalformedOptionTree {
                    detail: format!("context menu command {} carries options", data.name),
                }
                .into();
            }
        } else {
            check_field(&data.description, "command description", limits.description_length)?;
        }

        if data.options.len() > limits.options_per_level {
            return ValidationError::TooMany {
                what: "options",
                max: limits.options_per_level,
                len: data.options.len(),
            }
            .into();
        }

        let mut options = Vec::new();
        let mut subcommands = Vec::new();
        let mut groups = Vec::new();

        for wire in &data.options {
            match wire.r#type {
                CommandOptionType::SubCommand => {
                    subcommands.push(Subcommand::from_wire(wire, limits)?)
                }
                CommandOptionType::SubCommandGroup => {
                    groups.push(SubcommandGroup::from_wire(wire, limits)?)
                }
                _ => options.push(OptionDefinition::from_wire(wire, limits)?),
            }
        }

        if !options.is_empty() && (!subcommands.is_empty() || !groups.is_empty()) {
            return ValidationError::MixedOptions.into();
        }

        debug!(
            options = options.len(),
            subcommands = subcommands.len(),
            groups = groups.len(),
            "Validated command schema"
        );

        Ok(Command {
            id: data.id,
            application_id: data.application_id,
            guild_id: data.guild_id,
            kind: data.command_type,
            name: data.name.clone(),
            name_localizations: data.name_localizations.clone().unwrap_or_default(),
            description: data.description.clone(),
            description_localizations: data.description_localizations.clone().unwrap_or_default(),
            options,
            subcommands,
            groups,
            default_member_permissions: DefaultMemberPermissions::from_wire(
                data.default_member_permissions,
            ),
            guild_only: !data.dm_permission.unwrap_or(true),
            nsfw: data.nsfw,
            version: data.version,
        })
    }

    /// Reconstructs the wire object. Value options keep their parsed
    /// order; subcommands are emitted before groups.
    pub fn to_wire(&self) -> CommandData {
        let mut options: Vec<CommandOption> = Vec::with_capacity(
            self.options.len() + self.subcommands.len() + self.groups.len(),
        );
        options.extend(self.subcommands.iter().map(Subcommand::to_wire));
        options.extend(self.groups.iter().map(SubcommandGroup::to_wire));
        options.extend(self.options.iter().map(OptionDefinition::to_wire));

        CommandData {
            id: self.id,
            application_id: self.application_id,
            guild_id: self.guild_id,
            command_type: self.kind,
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
            options,
            default_member_permissions: self.default_member_permissions.to_wire(),
            dm_permission: if self.guild_only { Some(false) } else { None },
            nsfw: self.nsfw,
            version: self.version,
        }
    }

    pub fn id(&self) -> Snowflake {
        self.id
    }

    pub fn application_id(&self) -> Snowflake {
        self.application_id
    }

    /// `None` for globally registered commands.
    pub fn guild_id(&self) -> Option<Snowflake> {
        self.guild_id
    }

    pub fn kind(&self) -> CommandType {
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

    pub fn options(&self) -> &[OptionDefinition] {
        &self.options
    }

    pub fn default_member_permissions(&self) -> DefaultMemberPermissions {
        self.default_member_permissions
    }

    pub fn is_guild_only(&self) -> bool {
        self.guild_only
    }

    pub fn is_nsfw(&self) -> bool {
        self.nsfw
    }

    pub fn version(&self) -> Snowflake {
        self.version
    }

    /// When this version was published, read out of the version snowflake.
    pub fn version_time(&self) -> DateTime<Utc> {
        self.version.timestamp()
    }

    /// The root's full name is just its name.
    pub fn full_name(&self) -> &str {
        &self.name
    }

    pub fn subcommands(&self) -> Vec<SubcommandRef<'_>> {
        self.subcommands
            .iter()
            .map(|subcommand| SubcommandRef {
                root: self,
                group: None,
                subcommand,
            })
            .collect()
    }

    pub fn groups(&self) -> Vec<SubcommandGroupRef<'_>> {
        self.groups
            .iter()
            .map(|group| SubcommandGroupRef { root: self, group })
            .collect()
    }

    /// Looks up a direct subcommand, not one nested in a group.
    pub fn subcommand(&self, name: &str) -> Option<SubcommandRef<'_>> {
        self.subcommands
            .iter()
            .find(|subcommand| subcommand.name() == name)
            .map(|subcommand| SubcommandRef {
                root: self,
                group: None,
                subcommand,
            })
    }

    pub fn group(&self, name: &str) -> Option<SubcommandGroupRef<'_>> {
        self.groups
            .iter()
            .find(|group| group.name() == name)
            .map(|group| SubcommandGroupRef { root: self, group })
    }

    /// Resolves `[group] subcommand` the way an interaction names it.
    pub fn find_subcommand(&self, group: Option<&str>, name: &str) -> Option<SubcommandRef<'_>> {
        match group {
            Some(group) => self.group(group)?.subcommand(name),
            None => self.subcommand(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::OptionType;

    fn wire(json: serde_json::Value) -> CommandData {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_parse_flat_command() {
        let data = wire(serde_json::json!({
            "id": "1000",
            "application_id": "2000",
            "name": "ban",
            "description": "Ban a user",
            "options": [
                {"type": 6, "name": "target", "description": "Who to ban", "required": true},
                {"type": 3, "name": "reason", "description": "Why"},
            ],
            "default_member_permissions": "4",
            "version": "3000",
        }));

        let command = Command::from_wire(&data).unwrap();
        assert_eq!(command.name(), "ban");
        assert_eq!(command.kind(), CommandType::Slash);
        assert_eq!(command.options().len(), 2);
        assert_eq!(command.options()[0].kind(), OptionType::User);
        assert!(command.options()[0].is_required());
        assert_eq!(
            command.default_member_permissions(),
            DefaultMemberPermissions::Restricted(PermissionBitSet(4))
        );
    }

    #[test]
    fn test_full_name_walks_group_path() {
        let data = wire(serde_json::json!({
            "id": "1",
            "application_id": "2",
            "name": "admin",
            "description": "Admin tools",
            "options": [{
                "type": 2,
                "name": "mod",
                "description": "Moderation",
                "options": [{"type": 1, "name": "ban", "description": "Ban a user"}],
            }],
            "default_member_permissions": null,
            "version": "3",
        }));

        let command = Command::from_wire(&data).unwrap();
        let subcommand = command.find_subcommand(Some("mod"), "ban").unwrap();

        assert_eq!(subcommand.full_name(), "admin mod ban");
        assert_eq!(subcommand.id(), command.id());
        assert_eq!(subcommand.group().unwrap().full_name(), "admin mod");
        assert_eq!(command.full_name(), "admin");
    }

    #[test]
    fn test_mixed_options_rejected() {
        let data = wire(serde_json::json!({
            "id": "1",
            "application_id": "2",
            "name": "broken",
            "description": "Mixes levels",
            "options": [
                {"type": 1, "name": "sub", "description": "A subcommand"},
                {"type": 3, "name": "text", "description": "A value"},
            ],
            "default_member_permissions": null,
            "version": "3",
        }));

        assert!(matches!(
            Command::from_wire(&data),
            Err(ValidationError::MixedOptions)
        ));
    }

    #[test]
    fn test_context_menu_rejects_description() {
        let data = wire(serde_json::json!({
            "id": "1",
            "application_id": "2",
            "type": 2,
            "name": "Report User",
            "description": "should be empty",
            "default_member_permissions": null,
            "version": "3",
        }));

        assert!(matches!(
            Command::from_wire(&data),
            Err(ValidationError::UnexpectedDescription)
        ));
    }

    #[test]
    fn test_context_menu_allows_empty_description() {
        let data = wire(serde_json::json!({
            "id": "1",
            "application_id": "2",
            "type": 3,
            "name": "Pin Message",
            "description": "",
            "default_member_permissions": null,
            "version": "3",
        }));

        let command = Command::from_wire(&data).unwrap();
        assert_eq!(command.kind(), CommandType::Message);
        assert_eq!(command.description(), "");
    }

    #[test]
    fn test_empty_name_rejected() {
        let data = wire(serde_json::json!({
            "id": "1",
            "application_id": "2",
            "name": "",
            "description": "No name",
            "default_member_permissions": null,
            "version": "3",
        }));

        assert!(matches!(
            Command::from_wire(&data),
            Err(ValidationError::Empty { field: "command name" })
        ));
    }

    #[test]
    fn test_round_trip_preserves_value_option_order() {
        let data = wire(serde_json::json!({
            "id": "1",
            "application_id": "2",
            "name": "roll",
            "description": "Roll dice",
            "options": [
                {"type": 4, "name": "sides", "description": "Die sides", "choices": [
                    {"name": "d6", "value": 6},
                    {"name": "d20", "value": 20},
                ]},
                {"type": 4, "name": "count", "description": "How many"},
                {"type": 5, "name": "verbose", "description": "Show each roll"},
            ],
            "default_member_permissions": null,
            "version": "3",
        }));

        let command = Command::from_wire(&data).unwrap();
        let wire_again = command.to_wire();
        let reparsed = Command::from_wire(&wire_again).unwrap();

        assert_eq!(reparsed, command);

        let names: Vec<&str> = wire_again.options.iter().map(|o| o.name.as_ref()).collect();
        assert_eq!(names, vec!["sides", "count", "verbose"]);

        let choice_names: Vec<&str> = wire_again.options[0]
            .choices
            .iter()
            .map(|c| c.name.as_ref())
            .collect();
        assert_eq!(choice_names, vec!["d6", "d20"]);
    }

    #[test]
    fn test_permission_tri_state() {
        assert_eq!(
            DefaultMemberPermissions::from_wire(None),
            DefaultMemberPermissions::Enabled
        );
        assert_eq!(
            DefaultMemberPermissions::from_wire(Some(PermissionBitSet(0))),
            DefaultMemberPermissions::Disabled
        );
        assert_eq!(
            DefaultMemberPermissions::from_wire(Some(PermissionBitSet(8))),
            DefaultMemberPermissions::Restricted(PermissionBitSet(8))
        );
        assert_eq!(DefaultMemberPermissions::Disabled.to_wire(), Some(PermissionBitSet(0)));
    }

    #[test]
    fn test_custom_limits_apply_at_every_level() {
        let long = "x".repeat(40);
        let data = wire(serde_json::json!({
            "id": "1",
            "application_id": "2",
            "name": "admin",
            "description": "Admin tools",
            "options": [{
                "type": 2,
                "name": long.as_str(),
                "description": "Moderation",
                "options": [{
                    "type": 1,
                    "name": long.as_str(),
                    "description": "Ban a user",
                    "options": [{"type": 3, "name": long.as_str(), "description": "Why"}],
                }],
            }],
            "default_member_permissions": null,
            "version": "3",
        }));

        assert!(matches!(
            Command::from_wire(&data),
            Err(ValidationError::TooLong { max: 32, len: 40, .. })
        ));

        let relaxed = SchemaLimits {
            name_length: 64,
            ..SchemaLimits::default()
        };
        let command = Command::from_wire_with(&data, &relaxed).unwrap();
        let group = command.groups()[0];
        assert_eq!(group.name(), long.as_str());
        assert_eq!(group.subcommands()[0].name(), long.as_str());
        assert_eq!(group.subcommands()[0].options()[0].name(), long.as_str());
    }

    #[test]
    fn test_guild_only_from_dm_permission() {
        let mut data = wire(serde_json::json!({
            "id": "1",
            "application_id": "2",
            "name": "ping",
            "description": "Pong",
            "default_member_permissions": null,
            "version": "3",
        }));

        assert!(!Command::from_wire(&data).unwrap().is_guild_only());

        data.dm_permission = Some(false);
        let command = Command::from_wire(&data).unwrap();
        assert!(command.is_guild_only());
        assert_eq!(command.to_wire().dm_permission, Some(false));
    }
}
