use crux_core::capability::{CapabilityContext, Operation};
use crux_core::macros::Capability;
use serde::{Deserialize, Serialize};

use crate::cards::AttractionCard;

/// Instructions for the attraction grid. `Replace` clears the grid first;
/// `ShowMessage` puts a text in place of the cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridOperation {
    Replace { cards: Vec<AttractionCard> },
    Append { cards: Vec<AttractionCard> },
    ShowMessage { text: String },
}

impl Operation for GridOperation {
    type Output = ();
}

#[derive(Capability)]
pub struct Grid<Ev> {
    context: CapabilityContext<GridOperation, Ev>,
}

impl<Ev> Grid<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<GridOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn replace(&self, cards: Vec<AttractionCard>) {
        self.notify(GridOperation::Replace { cards });
    }

    pub fn append(&self, cards: Vec<AttractionCard>) {
        self.notify(GridOperation::Append { cards });
    }

    pub fn show_message(&self, text: impl Into<String>) {
        self.notify(GridOperation::ShowMessage { text: text.into() });
    }

    fn notify(&self, operation: GridOperation) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(operation).await;
        });
    }
}
