//! Posting lifecycle: draft to posted to reversed.
//!
//! Stateless transition checks over the journal entry aggregate. Each
//! operation returns an action struct describing the mutation the
//! storage layer must apply; the checks themselves never touch storage.

mod error;
mod reversal;
mod state;

pub use error::PostingError;
pub use reversal::{
    REVERSAL_DESCRIPTION_PREFIX, REVERSAL_PARTICULARS_PREFIX, ReversalPlan, ReversalService,
    ReversedLine,
};
pub use state::{PostAction, PostingService};
