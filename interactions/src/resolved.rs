use model::channel::{Attachment, Channel};
use model::guild::{Member, Role};
use model::interaction::InteractionDataResolved;
use model::user::User;
use model::Snowflake;
use std::collections::HashMap;

/// One entity hydrated alongside a submitted interaction. All kinds
/// share a single id space.
#[derive(Debug, Clone)]
pub enum ResolvedEntity {
    User(User),
    Member(Member),
    Role(Role),
    Channel(Channel),
    Attachment(Attachment),
}

impl ResolvedEntity {
    pub fn kind(&self) -> &'static str {
        match self {
            ResolvedEntity::User(_) => "user",
            ResolvedEntity::Member(_) => "member",
            ResolvedEntity::Role(_) => "role",
            ResolvedEntity::Channel(_) => "channel",
            ResolvedEntity::Attachment(_) => "attachment",
        }
    }
}

/// Entities referenced by an interaction's options, built once and
/// read-only afterwards. A member absorbs the bare user delivered under
/// the same id, so one id maps to one entity.
#[derive(Debug, Clone, Default)]
pub struct ResolvedEntityTable {
    entities: HashMap<Snowflake, ResolvedEntity>,
}

impl ResolvedEntityTable {
    pub fn from_wire(resolved: &InteractionDataResolved) -> ResolvedEntityTable {
        let mut entities = HashMap::with_capacity(
            resolved.users.len()
                + resolved.roles.len()
                + resolved.channels.len()
                + resolved.attachments.len(),
        );

        for (id, user) in &resolved.users {
            entities.insert(*id, ResolvedEntity::User(user.clone()));
        }

        for (id, member) in &resolved.members {
            let mut member = member.clone();
            if member.user.is_none() {
                member.user = resolved.users.get(id).cloned();
            }

            entities.insert(*id, ResolvedEntity::Member(member));
        }

        for (id, role) in &resolved.roles {
            entities.insert(*id, ResolvedEntity::Role(role.clone()));
        }

        for (id, channel) in &resolved.channels {
            entities.insert(*id, ResolvedEntity::Channel(channel.clone()));
        }

        for (id, attachment) in &resolved.attachments {
            entities.insert(*id, ResolvedEntity::Attachment(attachment.clone()));
        }

        ResolvedEntityTable { entities }
    }

    pub fn get(&self, id: Snowflake) -> Option<&ResolvedEntity> {
        self.entities.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// A resolved entity that can be addressed in chat.
#[derive(Debug, Clone, Copy)]
pub enum Mentionable<'a> {
    Member(&'a Member),
    User(&'a User),
    Role(&'a Role),
}

impl<'a> Mentionable<'a> {
    pub fn kind(&self) -> &'static str {
        match self {
            Mentionable::Member(_) => "member",
            Mentionable::User(_) => "user",
            Mentionable::Role(_) => "role",
        }
    }

    /// `None` only for a partial member whose user was never delivered.
    pub fn display_name(&self) -> Option<&'a str> {
        match self {
            Mentionable::Member(member) => member.display_name(),
            Mentionable::User(user) => Some(user.display_name()),
            Mentionable::Role(role) => Some(&role.name),
        }
    }
}
