//! [`Query`] collection related to a single [`Lead`].

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::domain::{lead, Lead};

use super::StoreQuery;

/// Queries a single [`Lead`] by its [`lead::Id`].
pub type ById = StoreQuery<By<Option<Lead>, lead::Id>>;
