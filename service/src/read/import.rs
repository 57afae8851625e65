//! [`ImportJob`]-related read definitions.

#[cfg(doc)]
use crate::domain::ImportJob;

pub mod list {
    //! [`ImportJob`] list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::ImportJob;

    define_pagination!(ImportJob, (), ());

    /// Total count of [`ImportJob`] list items.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(usize);
}
