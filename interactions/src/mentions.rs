use crate::resolved::{ResolvedEntity, ResolvedEntityTable};
use model::channel::Channel;
use model::guild::{Member, Role};
use model::user::User;
use model::Snowflake;

/// Mention tokens found in a string option, ordered and distinct per
/// kind. Unresolved ids are kept; the resolving accessors skip them.
#[derive(Debug, Clone)]
pub struct Mentions<'a> {
    resolved: &'a ResolvedEntityTable,
    users: Vec<Snowflake>,
    roles: Vec<Snowflake>,
    channels: Vec<Snowflake>,
}

impl<'a> Mentions<'a> {
    pub(crate) fn empty(resolved: &'a ResolvedEntityTable) -> Mentions<'a> {
        Mentions {
            resolved,
            users: Vec::new(),
            roles: Vec::new(),
            channels: Vec::new(),
        }
    }

    /// Scans for `<@id>`, `<@!id>`, `<@&id>` and `<#id>` tokens. Anything
    /// malformed is skipped, never an error.
    pub(crate) fn scan(text: &str, resolved: &'a ResolvedEntityTable) -> Mentions<'a> {
        let mut mentions = Mentions::empty(resolved);

        let mut rest = text;
        while let Some(start) = rest.find('<') {
            rest = &rest[start + 1..];

            let (sink, body) = if let Some(body) = rest.strip_prefix("@&") {
                (&mut mentions.roles, body)
            } else if let Some(body) = rest.strip_prefix("@!") {
                (&mut mentions.users, body)
            } else if let Some(body) = rest.strip_prefix('@') {
                (&mut mentions.users, body)
            } else if let Some(body) = rest.strip_prefix('#') {
                (&mut mentions.channels, body)
            } else {
                continue;
            };

            let digits = body
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(body.len());
            if digits == 0 || !body[digits..].starts_with('>') {
                continue;
            }

            let id = match body[..digits].parse::<u64>() {
                Ok(id) => Snowflake(id),
                Err(_) => continue,
            };

            if !sink.contains(&id) {
                sink.push(id);
            }

            rest = &body[digits + 1..];
        }

        mentions
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.roles.is_empty() && self.channels.is_empty()
    }

    pub fn user_ids(&self) -> &[Snowflake] {
        &self.users
    }

    pub fn role_ids(&self) -> &[Snowflake] {
        &self.roles
    }

    pub fn channel_ids(&self) -> &[Snowflake] {
        &self.channels
    }

    /// Every mentioned user the table can produce, members included.
    pub fn users(&self) -> Vec<&'a User> {
        self.users
            .iter()
            .filter_map(|id| match self.resolved.get(*id) {
                Some(ResolvedEntity::User(user)) => Some(user),
                Some(ResolvedEntity::Member(member)) => member.user.as_ref(),
                _ => None,
            })
            .collect()
    }

    /// Only the mentioned users that resolved to guild members.
    pub fn members(&self) -> Vec<&'a Member> {
        self.users
            .iter()
            .filter_map(|id| match self.resolved.get(*id) {
                Some(ResolvedEntity::Member(member)) => Some(member),
                _ => None,
            })
            .collect()
    }

    pub fn roles(&self) -> Vec<&'a Role> {
        self.roles
            .iter()
            .filter_map(|id| match self.resolved.get(*id) {
                Some(ResolvedEntity::Role(role)) => Some(role),
                _ => None,
            })
            .collect()
    }

    pub fn channels(&self) -> Vec<&'a Channel> {
        self.channels
            .iter()
            .filter_map(|id| match self.resolved.get(*id) {
                Some(ResolvedEntity::Channel(channel)) => Some(channel),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_finds_all_four_forms() {
        let table = ResolvedEntityTable::default();
        let text = "hey <@101> and <@!102>, ping <@&200> in <#300>";
        let mentions = Mentions::scan(text, &table);

        assert_eq!(mentions.user_ids(), &[Snowflake(101), Snowflake(102)]);
        assert_eq!(mentions.role_ids(), &[Snowflake(200)]);
        assert_eq!(mentions.channel_ids(), &[Snowflake(300)]);
    }

    #[test]
    fn test_scan_skips_malformed_tokens() {
        let table = ResolvedEntityTable::default();
        let text = "<@abc> <@> <#12x> < @5> <@101 > <@101>";
        let mentions = Mentions::scan(text, &table);

        assert_eq!(mentions.user_ids(), &[Snowflake(101)]);
        assert!(mentions.role_ids().is_empty());
        assert!(mentions.channel_ids().is_empty());
    }

    #[test]
    fn test_scan_deduplicates_preserving_order() {
        let table = ResolvedEntityTable::default();
        let text = "<@7> <@8> <@7> <@!7>";
        let mentions = Mentions::scan(text, &table);

        assert_eq!(mentions.user_ids(), &[Snowflake(7), Snowflake(8)]);
    }
}
