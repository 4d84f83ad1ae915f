//! Organization entity.

use super::values::{BankDetails, Requisites};
use super::EntityId;

/// The employing organization.
///
/// The UI expects exactly one organization record, but nothing here enforces
/// that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: EntityId,
    pub name: String,
    pub short_name: Option<String>,
    pub legal_address: Option<String>,
    pub actual_address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub requisites: Requisites,
    pub bank: BankDetails,
}
