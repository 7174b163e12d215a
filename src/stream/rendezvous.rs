use tokio::sync::oneshot;

/// A send on the hand-off channel resolves only once a receiver has taken the item.
///
/// The underlying channel holds at most one in-flight item and every item carries a
/// completion signal back to its sender, so a sender is never more than one item ahead
/// of the receivers. Any number of receivers may share the channel; each item goes to
/// exactly one of them.
pub fn rendezvous<T>() -> (HandoffSender<T>, HandoffReceiver<T>) {
    let (tx, rx) = async_channel::bounded(1);
    (HandoffSender { tx }, HandoffReceiver { rx })
}

struct Handoff<T> {
    item: T,
    taken: oneshot::Sender<()>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("hand-off channel has no receivers")]
pub struct SendError;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("hand-off channel has no senders")]
pub struct RecvError;

pub struct HandoffSender<T> {
    tx: async_channel::Sender<Handoff<T>>,
}

impl<T> HandoffSender<T> {
    pub async fn send(&self, item: T) -> Result<(), SendError> {
        let (taken, accepted) = oneshot::channel();
        self.tx
            .send(Handoff { item, taken })
            .await
            .map_err(|_| SendError)?;
        // the completion sender is dropped untouched if the channel is torn down first
        accepted.await.map_err(|_| SendError)
    }
}

impl<T> Clone for HandoffSender<T> {
    fn clone(&self) -> Self {
        HandoffSender { tx: self.tx.clone() }
    }
}

pub struct HandoffReceiver<T> {
    rx: async_channel::Receiver<Handoff<T>>,
}

impl<T> HandoffReceiver<T> {
    pub async fn recv(&self) -> Result<T, RecvError> {
        let Handoff { item, taken } = self.rx.recv().await.map_err(|_| RecvError)?;
        // a sender that stopped waiting still loses ownership of the item
        let _ = taken.send(());
        Ok(item)
    }
}

impl<T> Clone for HandoffReceiver<T> {
    fn clone(&self) -> Self {
        HandoffReceiver { rx: self.rx.clone() }
    }
}
