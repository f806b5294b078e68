use serde::{Deserialize, Serialize};

/// What the viewport capability should do with the load-more marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentinelCommand {
    Observe,
    Disconnect,
}

/// Edge detector for the load-more marker.
///
/// The shell reports raw intersection states; only a transition into
/// "intersecting" while armed counts as a continue signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sentinel {
    armed: bool,
    intersecting: bool,
}

impl Sentinel {
    /// (Re)starts observation. The last known intersection is forgotten so
    /// that the report following a re-observe counts as a fresh entry.
    pub fn arm(&mut self) -> SentinelCommand {
        self.armed = true;
        self.intersecting = false;
        SentinelCommand::Observe
    }

    pub fn disarm(&mut self) -> Option<SentinelCommand> {
        if !self.armed {
            return None;
        }
        self.armed = false;
        self.intersecting = false;
        Some(SentinelCommand::Disconnect)
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns `true` when the marker just entered the viewport.
    pub fn on_intersection(&mut self, intersecting: bool) -> bool {
        if !self.armed {
            return false;
        }
        let entered = intersecting && !self.intersecting;
        self.intersecting = intersecting;
        entered
    }
}
