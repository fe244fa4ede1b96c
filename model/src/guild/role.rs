use serde::{Deserialize, Serialize};

use crate::{ImageHash, PermissionBitSet, Snowflake};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Role {
    pub id: Snowflake,
    pub name: String,
    pub color: u32,
    pub hoist: bool,
    pub position: u16,
    pub permissions: PermissionBitSet,
    pub managed: bool,
    pub mentionable: bool,
    #[serde(default)]
    pub icon: Option<ImageHash>,
    #[serde(default)]
    pub unicode_emoji: Option<Box<str>>,
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
