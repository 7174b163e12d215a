use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use crate::connector::Sink;

/// Forwards every item to an unbounded channel, for callers that consume pipeline
/// output in-process.
pub struct ChannelSink<T> {
    sender: UnboundedSender<T>,
}

impl<T> ChannelSink<T> {
    pub fn channel() -> (Self, UnboundedReceiver<T>) {
        let (sender, rx) = mpsc::unbounded_channel();
        (ChannelSink { sender }, rx)
    }
}

impl<T: Send> Sink<T> for ChannelSink<T> {
    fn write(&mut self, item: T) {
        // a dropped receiver means nobody is listening any more
        let _ = self.sender.send(item);
    }
}
