mod channel;
pub use channel::Channel;

mod channel_type;
pub use channel_type::ChannelType;

mod thread_metadata;
pub use thread_metadata::{ThreadArchiveDuration, ThreadMetadata};

mod attachment;
pub use attachment::Attachment;
