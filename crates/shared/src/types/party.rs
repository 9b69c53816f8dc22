//! Party references for subsidiary-ledger tagging.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id::{CustomerId, SupplierId};

/// Optional tagged party reference on a journal entry line.
///
/// A line may be tagged with a customer (accounts receivable) or a supplier
/// (accounts payable), never both. Modelling the tag as a sum type makes the
/// mutual exclusivity explicit even though the storage schema keeps two
/// nullable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum PartyRef {
    /// The line belongs to a customer's subsidiary ledger.
    Customer(CustomerId),
    /// The line belongs to a supplier's subsidiary ledger.
    Supplier(SupplierId),
}

impl PartyRef {
    /// Builds a party reference from the two nullable storage columns.
    ///
    /// Customer wins when both are set, matching the receivable-first
    /// convention of the subsidiary ledger reports.
    #[must_use]
    pub fn from_columns(customer_id: Option<Uuid>, supplier_id: Option<Uuid>) -> Option<Self> {
        match (customer_id, supplier_id) {
            (Some(c), _) => Some(Self::Customer(CustomerId::from_uuid(c))),
            (None, Some(s)) => Some(Self::Supplier(SupplierId::from_uuid(s))),
            (None, None) => None,
        }
    }

    /// Splits the reference back into the two nullable storage columns.
    #[must_use]
    pub fn into_columns(party: Option<Self>) -> (Option<Uuid>, Option<Uuid>) {
        match party {
            Some(Self::Customer(c)) => (Some(c.into_inner()), None),
            Some(Self::Supplier(s)) => (None, Some(s.into_inner())),
            None => (None, None),
        }
    }

    /// Returns the customer id if this is a customer reference.
    #[must_use]
    pub fn customer(self) -> Option<CustomerId> {
        match self {
            Self::Customer(c) => Some(c),
            Self::Supplier(_) => None,
        }
    }

    /// Returns the supplier id if this is a supplier reference.
    #[must_use]
    pub fn supplier(self) -> Option<SupplierId> {
        match self {
            Self::Supplier(s) => Some(s),
            Self::Customer(_) => None,
        }
    }
}
