//! [`Query`] collection related to the multiple [`Lead`]s.

use common::operations::By;

#[cfg(doc)]
use crate::{domain::Lead, Query};
use crate::read;

use super::StoreQuery;

/// Queries a list of [`Lead`]s.
pub type List =
    StoreQuery<By<read::lead::list::Page, read::lead::list::Selector>>;

/// Queries total count of [`Lead`]s passing a [`read::lead::list::Filter`].
pub type TotalCount = StoreQuery<
    By<read::lead::list::TotalCount, read::lead::list::Filter>,
>;

/// Queries [`read::lead::Facets`] of the whole [`Lead`] collection.
pub type Facets = StoreQuery<By<read::lead::Facets, ()>>;
