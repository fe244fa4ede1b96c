use serde::{Deserialize, Serialize};

use crate::user::User;
use crate::{ImageHash, PermissionBitSet, Snowflake};
use chrono::{DateTime, Utc};

/// Guild member. Partial members delivered in resolved interaction data
/// omit `user`; the resolution layer joins it back in.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Member {
    pub user: Option<User>,
    pub nick: Option<Box<str>>,
    #[serde(default)]
    pub avatar: Option<ImageHash>,
    #[serde(serialize_with = "Snowflake::serialize_vec_to_ints")]
    pub roles: Vec<Snowflake>,
    pub joined_at: DateTime<Utc>,
    pub premium_since: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionBitSet>,
    #[serde(default)]
    pub pending: bool,
    #[serde(default)]
    pub deaf: bool,
    #[serde(default)]
    pub mute: bool,
}

impl Member {
    /// Nickname when set, the user's display name otherwise. `None` only
    /// for a partial member without its user.
    pub fn display_name(&self) -> Option<&str> {
        self.nick
            .as_deref()
            .or_else(|| self.user.as_ref().map(|u| u.display_name()))
    }
}
