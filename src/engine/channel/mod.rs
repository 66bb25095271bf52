mod metrics;
mod response_channel;

pub use metrics::{ChannelMetrics, ChannelSnapshot};
pub use response_channel::{ResponseChannel, ResponseReceiver, ResponseSender, UpstreamMessage};
