//! [`Query`] collection related to [`ImportError`]s.

use common::operations::By;

#[cfg(doc)]
use crate::Query;
use crate::domain::{import, ImportError};

use super::StoreQuery;

/// Queries the error report of an [`ImportJob`] by its [`import::Id`].
///
/// [`ImportJob`]: crate::domain::ImportJob
pub type ForJob = StoreQuery<By<Vec<ImportError>, import::Id>>;
