//! [`Query`] collection related to the multiple [`ImportJob`]s.

use common::operations::By;

#[cfg(doc)]
use crate::{domain::ImportJob, Query};
use crate::read;

use super::StoreQuery;

/// Queries a list of [`ImportJob`]s.
pub type List =
    StoreQuery<By<read::import::list::Page, read::import::list::Selector>>;

/// Queries total count of [`ImportJob`]s.
pub type TotalCount = StoreQuery<By<read::import::list::TotalCount, ()>>;
