use crux_core::capability::{CapabilityContext, Operation};
use crux_core::macros::Capability;
use serde::{Deserialize, Serialize};

/// Visibility observation of a marker element against the scrollable viewport,
/// zero intersection threshold.
///
/// `Observe` (re)starts observation; the shell reports the current
/// intersection state right away and then every change as
/// `Event::SentinelIntersectionChanged`. `Disconnect` stops all callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewportOperation {
    Observe { target: String },
    Disconnect { target: String },
}

impl Operation for ViewportOperation {
    type Output = ();
}

#[derive(Capability)]
pub struct Viewport<Ev> {
    context: CapabilityContext<ViewportOperation, Ev>,
}

impl<Ev> Viewport<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<ViewportOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn observe(&self, target: impl Into<String>) {
        self.notify(ViewportOperation::Observe {
            target: target.into(),
        });
    }

    pub fn disconnect(&self, target: impl Into<String>) {
        self.notify(ViewportOperation::Disconnect {
            target: target.into(),
        });
    }

    fn notify(&self, operation: ViewportOperation) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(operation).await;
        });
    }
}
