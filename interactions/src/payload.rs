use crate::error::{ValidationError, ValidationResult};
use crate::mapping::{OptionMapping, SubmittedOption};
use crate::resolved::ResolvedEntityTable;
use crate::schema::{CommandType, OptionType};
use model::command::CommandOptionType;
use model::interaction::{InteractionData, InteractionDataOption};
use model::Snowflake;
use tracing::debug;

/// A submitted command invocation, flattened: invoked path, leaf options
/// in submission order, resolved entities. Built fresh per interaction
/// and never mutated; `OptionMapping` views borrow from it.
#[derive(Debug)]
pub struct CommandInteractionPayload {
    command_id: Snowflake,
    name: Box<str>,
    kind: CommandType,
    group_name: Option<Box<str>>,
    subcommand_name: Option<Box<str>>,
    guild_id: Option<Snowflake>,
    target_id: Option<Snowflake>,
    options: Vec<SubmittedOption>,
    resolved: ResolvedEntityTable,
}

impl CommandInteractionPayload {
    /// Peels the group and subcommand wrappers off the option tree and
    /// flattens the leaves. At most one structural wrapper per level.
    #[tracing::instrument(skip(data), fields(command = %data.name))]
    pub fn from_wire(data: &InteractionData) -> ValidationResult<CommandInteractionPayload> {
        let mut group_name = None;
        let mut subcommand_name = None;
        let mut nodes: &[InteractionDataOption] = &data.options;

        if let Some(first) = nodes.first() {
            if first.r#type == CommandOptionType::SubCommandGroup {
                if nodes.len() != 1 {
                    return ValidationError::MalformedOptionTree {
                        detail: format!(
                            "group {} must be the only top level entry, found {}",
                            first.name,
                            nodes.len()
                        ),
                    }
                    .into();
                }

                group_name = Some(first.name.clone());
                nodes = first.options.as_deref().unwrap_or(&[]);

                let valid = nodes.len() == 1 && nodes[0].r#type == CommandOptionType::SubCommand;
                if !valid {
                    return ValidationError::MalformedOptionTree {
                        detail: format!(
                            "group {} must wrap exactly one subcommand",
                            first.name
                        ),
                    }
                    .into();
                }
            }
        }

        if let Some(first) = nodes.first() {
            if first.r#type == CommandOptionType::SubCommand {
                if nodes.len() != 1 {
                    return ValidationError::MalformedOptionTree {
                        detail: format!(
                            "subcommand {} must be the only entry at its level, found {}",
                            first.name,
                            nodes.len()
                        ),
                    }
                    .into();
                }

                subcommand_name = Some(first.name.clone());
                nodes = first.options.as_deref().unwrap_or(&[]);
            }
        }

        let mut options = Vec::with_capacity(nodes.len());
        for node in nodes {
            options.push(SubmittedOption::from_wire(node)?);
        }

        let resolved = ResolvedEntityTable::from_wire(&data.resolved);
        debug!(
            options = options.len(),
            resolved = resolved.len(),
            "Flattened command interaction"
        );

        Ok(CommandInteractionPayload {
            command_id: data.id,
            name: data.name.clone(),
            kind: data.command_type,
            group_name,
            subcommand_name,
            guild_id: data.guild_id,
            target_id: data.target_id,
            options,
            resolved,
        })
    }

    pub fn command_id(&self) -> Snowflake {
        self.command_id
    }

    pub fn command_name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CommandType {
        self.kind
    }

    pub fn group_name(&self) -> Option<&str> {
        self.group_name.as_deref()
    }

    pub fn subcommand_name(&self) -> Option<&str> {
        self.subcommand_name.as_deref()
    }

    pub fn guild_id(&self) -> Option<Snowflake> {
        self.guild_id
    }

    pub fn is_guild_interaction(&self) -> bool {
        self.guild_id.is_some()
    }

    /// The entity a context menu command was used on.
    pub fn target_id(&self) -> Option<Snowflake> {
        self.target_id
    }

    pub fn resolved(&self) -> &ResolvedEntityTable {
        &self.resolved
    }

    /// All leaf options in submission order.
    pub fn options(&self) -> Vec<OptionMapping<'_>> {
        self.options
            .iter()
            .map(|option| OptionMapping::new(option, &self.resolved))
            .collect()
    }

    pub fn options_by_name<'a>(&'a self, name: &str) -> Vec<OptionMapping<'a>> {
        self.options
            .iter()
            .filter(|option| option.name() == name)
            .map(|option| OptionMapping::new(option, &self.resolved))
            .collect()
    }

    pub fn options_by_type(&self, kind: OptionType) -> Vec<OptionMapping<'_>> {
        self.options
            .iter()
            .filter(|option| option.kind() == kind)
            .map(|option| OptionMapping::new(option, &self.resolved))
            .collect()
    }

    /// First option with the given name; an absent option is `None`,
    /// never an error.
    pub fn option<'a>(&'a self, name: &str) -> Option<OptionMapping<'a>> {
        self.options
            .iter()
            .find(|option| option.name() == name)
            .map(|option| OptionMapping::new(option, &self.resolved))
    }

    /// Applies `f` to the option when present.
    pub fn option_map<'a, T>(
        &'a self,
        name: &str,
        f: impl FnOnce(OptionMapping<'a>) -> T,
    ) -> Option<T> {
        self.option(name).map(f)
    }

    /// Like `option_map` but with a ready fallback for the missing case.
    pub fn option_or<'a, T>(
        &'a self,
        name: &str,
        fallback: T,
        f: impl FnOnce(OptionMapping<'a>) -> T,
    ) -> T {
        match self.option(name) {
            Some(mapping) => f(mapping),
            None => fallback,
        }
    }

    /// Lazy-fallback variant; the supplier only runs when the option
    /// is missing.
    pub fn option_or_else<'a, T>(
        &'a self,
        name: &str,
        fallback: impl FnOnce() -> T,
        f: impl FnOnce(OptionMapping<'a>) -> T,
    ) -> T {
        match self.option(name) {
            Some(mapping) => f(mapping),
            None => fallback(),
        }
    }

    /// Space-joined invocation path, e.g. `admin mod ban`.
    pub fn full_command_name(&self) -> String {
        let mut name = String::from(&*self.name);

        if let Some(group) = &self.group_name {
            name.push(' ');
            name.push_str(group);
        }

        if let Some(subcommand) = &self.subcommand_name {
            name.push(' ');
            name.push_str(subcommand);
        }

        name
    }

    /// Chat-style rendering: `/name [group] [sub] opt:value ...`. Resolved
    /// entities render by name; anything unresolved keeps its raw value.
    pub fn command_string(&self) -> String {
        let mut out = String::from("/");
        out.push_str(&self.full_command_name());

        for mapping in self.options() {
            out.push(' ');
            out.push_str(mapping.name());
            out.push(':');
            out.push_str(&render_option(&mapping));
        }

        out
    }
}

fn render_option(mapping: &OptionMapping<'_>) -> String {
    match mapping.kind() {
        OptionType::Channel => match mapping.as_channel() {
            Ok(channel) => format!("#{}", channel.name),
            Err(_) => mapping.as_string(),
        },
        OptionType::User | OptionType::Role | OptionType::Mentionable => {
            match mapping.as_mentionable().ok().and_then(|m| m.display_name()) {
                Some(name) => format!("@{}", name),
                None => mapping.as_string(),
            }
        }
        OptionType::Attachment => match mapping.as_attachment() {
            Ok(attachment) => attachment.filename.clone(),
            Err(_) => mapping.as_string(),
        },
        _ => mapping.as_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;

    fn payload(json: serde_json::Value) -> CommandInteractionPayload {
        let data: InteractionData = serde_json::from_value(json).unwrap();
        CommandInteractionPayload::from_wire(&data).unwrap()
    }

    fn ban_interaction() -> serde_json::Value {
        serde_json::json!({
            "id": "800",
            "name": "ban",
            "type": 1,
            "guild_id": "900",
            "options": [
                {"name": "user", "type": 6, "value": "123"},
            ],
            "resolved": {
                "users": {
                    "123": {"id": "123", "username": "offender", "discriminator": "0", "avatar": null},
                },
                "members": {
                    "123": {"nick": null, "roles": [], "joined_at": "2021-06-01T12:00:00Z", "premium_since": null},
                },
            },
        })
    }

    #[test]
    fn test_ban_scenario_end_to_end() {
        let payload = payload(ban_interaction());

        assert!(payload.is_guild_interaction());
        assert_eq!(payload.full_command_name(), "ban");

        let target = payload.option("user").unwrap();
        assert_eq!(target.as_user().unwrap().id, Snowflake(123));
        let member = target.as_member().unwrap().unwrap();
        assert_eq!(member.user.as_ref().map(|u| u.id), Some(Snowflake(123)));
        assert_eq!(target.as_long().unwrap(), 123);

        assert!(payload.option("reason").is_none());
        let reason = payload.option_or("reason", "no reason".to_string(), |m| m.as_string());
        assert_eq!(reason, "no reason");
    }

    #[test]
    fn test_group_and_subcommand_are_peeled() {
        let payload = payload(serde_json::json!({
            "id": "1",
            "name": "admin",
            "options": [{
                "name": "mod",
                "type": 2,
                "options": [{
                    "name": "ban",
                    "type": 1,
                    "options": [
                        {"name": "target", "type": 6, "value": "123"},
                        {"name": "days", "type": 4, "value": 7},
                    ],
                }],
            }],
        }));

        assert_eq!(payload.group_name(), Some("mod"));
        assert_eq!(payload.subcommand_name(), Some("ban"));
        assert_eq!(payload.full_command_name(), "admin mod ban");

        let names: Vec<&str> = payload.options().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["target", "days"]);
    }

    #[test]
    fn test_group_must_wrap_exactly_one_subcommand() {
        let data: InteractionData = serde_json::from_value(serde_json::json!({
            "id": "1",
            "name": "admin",
            "options": [{
                "name": "mod",
                "type": 2,
                "options": [],
            }],
        }))
        .unwrap();

        assert!(matches!(
            CommandInteractionPayload::from_wire(&data),
            Err(ValidationError::MalformedOptionTree { .. })
        ));
    }

    #[test]
    fn test_option_lookup_and_filters() {
        let payload = payload(serde_json::json!({
            "id": "1",
            "name": "tag",
            "options": [
                {"name": "first", "type": 3, "value": "a"},
                {"name": "second", "type": 4, "value": 2},
                {"name": "first", "type": 3, "value": "b"},
            ],
        }));

        assert_eq!(payload.options().len(), 3);
        assert_eq!(payload.options_by_name("first").len(), 2);
        assert_eq!(payload.options_by_type(OptionType::String).len(), 2);
        assert_eq!(payload.option("first").unwrap().as_string(), "a");

        let doubled = payload.option_map("second", |m| m.as_long().map(|v| v * 2));
        assert_eq!(doubled.unwrap().unwrap(), 4);
    }

    #[test]
    fn test_option_or_else_supplier_is_lazy() {
        let payload = payload(serde_json::json!({
            "id": "1",
            "name": "echo",
            "options": [{"name": "text", "type": 3, "value": "hi"}],
        }));

        let value = payload.option_or_else(
            "text",
            || panic!("supplier must not run when the option is present"),
            |m| m.as_string(),
        );
        assert_eq!(value, "hi");

        let missing = payload.option_or_else("missing", || "fallback".to_string(), |m| m.as_string());
        assert_eq!(missing, "fallback");
    }

    #[test]
    fn test_command_string_renders_by_resolved_kind() {
        let payload = payload(serde_json::json!({
            "id": "1",
            "name": "audit",
            "options": [
                {"name": "who", "type": 6, "value": "123"},
                {"name": "where", "type": 7, "value": "300"},
                {"name": "limit", "type": 4, "value": 10},
                {"name": "file", "type": 11, "value": "500"},
                {"name": "ghost", "type": 8, "value": "999"},
            ],
            "resolved": {
                "users": {
                    "123": {"id": "123", "username": "octo", "global_name": "Octo Cat", "discriminator": "0", "avatar": null},
                },
                "channels": {
                    "300": {"id": "300", "type": 0, "name": "general"},
                },
                "attachments": {
                    "500": {"id": "500", "filename": "evidence.png", "size": 1024,
                            "url": "https://cdn.example.net/500/evidence.png",
                            "proxy_url": "https://media.example.net/500/evidence.png"},
                },
            },
        }));

        assert_eq!(
            payload.command_string(),
            "/audit who:@Octo Cat where:#general limit:10 file:evidence.png ghost:999"
        );
    }

    #[test]
    fn test_unresolved_entity_errors_by_id() {
        let payload = payload(serde_json::json!({
            "id": "1",
            "name": "ban",
            "options": [{"name": "target", "type": 6, "value": "404"}],
        }));

        let target = payload.option("target").unwrap();
        assert!(matches!(
            target.as_member(),
            Err(ResolveError::UnresolvedEntity(Snowflake(404)))
        ));
        assert!(matches!(
            target.as_user(),
            Err(ResolveError::UnresolvedEntity(Snowflake(404)))
        ));
    }

    #[test]
    fn test_bare_user_member_is_soft_none() {
        let payload = payload(serde_json::json!({
            "id": "1",
            "name": "whois",
            "options": [{"name": "target", "type": 6, "value": "456"}],
            "resolved": {
                "users": {
                    "456": {"id": "456", "username": "outsider", "discriminator": "0", "avatar": null},
                },
            },
        }));

        let target = payload.option("target").unwrap();
        assert!(target.as_member().unwrap().is_none());
        assert_eq!(target.as_user().unwrap().username, "outsider");
    }

    #[test]
    fn test_mentions_resolve_against_the_table() {
        let payload = payload(serde_json::json!({
            "id": "1",
            "name": "say",
            "options": [{
                "name": "text",
                "type": 3,
                "value": "ping <@123> and <@&200>, also <@999>",
            }],
            "resolved": {
                "users": {
                    "123": {"id": "123", "username": "octo", "discriminator": "0", "avatar": null},
                },
                "roles": {
                    "200": {"id": "200", "name": "mods", "color": 0, "hoist": false, "position": 1,
                            "permissions": "0", "managed": false, "mentionable": true},
                },
            },
        }));

        let text = payload.option("text").unwrap();
        let mentions = text.mentions();

        assert_eq!(mentions.user_ids(), &[Snowflake(123), Snowflake(999)]);
        assert_eq!(mentions.users().len(), 1);
        assert_eq!(mentions.roles()[0].name, "mods");
    }

    #[test]
    fn test_context_menu_payload_keeps_target() {
        let payload = payload(serde_json::json!({
            "id": "1",
            "name": "Report User",
            "type": 2,
            "target_id": "123",
            "resolved": {
                "users": {
                    "123": {"id": "123", "username": "octo", "discriminator": "0", "avatar": null},
                },
            },
        }));

        assert_eq!(payload.kind(), CommandType::User);
        assert_eq!(payload.target_id(), Some(Snowflake(123)));
        assert!(payload.options().is_empty());
        assert_eq!(payload.command_string(), "/Report User");
    }
}
