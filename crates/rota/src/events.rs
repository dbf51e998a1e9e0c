use async_channel::Sender;
use spindle::protocol::{Reply, Request};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A client request; the answer goes back through `reply`.
    Request {
        request: Request,
        reply: Sender<Reply>,
    },
    SpinFinished(u64),
    ConfigReload,
}
