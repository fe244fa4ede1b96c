use serde::{Deserialize, Serialize};

use super::ChannelType;
use crate::channel::ThreadMetadata;
use crate::{PermissionBitSet, Snowflake};

/// Partial channel as delivered in resolved interaction data.
/// `permissions` are the invoker's, computed for the channel.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Channel {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<Snowflake>,
    pub name: Box<str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionBitSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_metadata: Option<ThreadMetadata>,
}

impl Channel {
    pub fn is_thread(&self) -> bool {
        self.channel_type.is_thread()
    }
}

impl PartialEq for Channel {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
