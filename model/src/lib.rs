mod snowflake;
pub use snowflake::Snowflake;

mod discriminator;
pub use discriminator::Discriminator;

mod image_hash;
pub use image_hash::ImageHash;

mod permission;
pub use permission::Permission;

mod permission_bit_set;
pub use permission_bit_set::PermissionBitSet;

mod localization;
pub use localization::LocalizationMap;

pub mod channel;
pub mod command;
pub mod guild;
pub mod interaction;
pub mod user;

mod util;
