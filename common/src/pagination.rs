//! Abstractions for page-number pagination.

use std::num::NonZeroUsize;

use derive_more::{Display, Error};

use crate::define_kind;

/// Page of `N`odes sliced out of a larger collection.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Page<N> {
    /// Nodes of this [`Page`].
    pub nodes: Vec<N>,

    /// 1-based number of this [`Page`].
    pub number: usize,

    /// Total number of pages in the collection.
    ///
    /// Never less than 1, even for an empty collection.
    pub total_pages: usize,

    /// Total number of nodes in the collection.
    pub total_count: usize,
}

impl<N> Page<N> {
    /// Slices the page requested by the [`Request`] out of the provided
    /// `nodes`.
    ///
    /// A [`Request`] pointing outside `1..=total_pages` is not clamped and
    /// produces an empty [`Page`]: callers are expected to reset to the first
    /// page whenever the underlying collection shrinks.
    #[must_use]
    pub fn paginate(nodes: Vec<N>, request: Request) -> Self {
        let total_count = nodes.len();
        let size = request.size.get();
        let total_pages = total_count.div_ceil(size).max(1);

        let nodes = match request.number.checked_sub(1) {
            Some(before) => nodes
                .into_iter()
                .skip(before.saturating_mul(size))
                .take(size)
                .collect(),
            None => Vec::new(),
        };

        Self {
            nodes,
            number: request.number,
            total_pages,
            total_count,
        }
    }

    /// Returns the number of nodes on this [`Page`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Indicates whether this [`Page`] has no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Request of a specific [`Page`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Request {
    /// 1-based number of the requested [`Page`].
    pub number: usize,

    /// [`Size`] of the requested [`Page`].
    pub size: Size,
}

impl Request {
    /// Creates a new [`Request`] of the page with the provided `number`.
    #[must_use]
    pub fn new(number: usize, size: Size) -> Self {
        Self { number, size }
    }

    /// Creates a new [`Request`] of the first page.
    #[must_use]
    pub fn first(size: Size) -> Self {
        Self { number: 1, size }
    }
}

/// Size of a [`Page`].
///
/// Guaranteed to be positive.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Size(NonZeroUsize);

impl Size {
    /// Creates a new [`Size`] out of the provided `size`.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidSize`] error if the `size` is zero.
    pub fn new(size: usize) -> Result<Self, InvalidSize> {
        NonZeroUsize::new(size).map(Self).ok_or(InvalidSize)
    }

    /// Returns this [`Size`] as a [`usize`].
    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// Error of constructing a zero [`Size`].
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("page size must be a positive number")]
pub struct InvalidSize;

/// [`Page`] selector.
#[derive(Clone, Debug)]
pub struct Selector<F, S> {
    /// [`Request`] of the page to select.
    pub request: Request,

    /// Filter being applied to the collection before slicing.
    pub filter: F,

    /// Sorting being applied to the collection before slicing.
    pub sorting: S,
}

define_kind! {
    #[doc = "Order of sorting."]
    enum Order {
        #[doc = "Ascending order."]
        Ascending = 1,

        #[doc = "Descending order."]
        Descending = 2,
    }
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty, $sorting:ty) => {
        #[doc = "A [`Page`] of [`$node`]s."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter, $sorting>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Page, Request, Size};

    fn size(n: usize) -> Size {
        Size::new(n).unwrap()
    }

    #[test]
    fn rejects_zero_size() {
        assert!(Size::new(0).is_err());
        assert!(Size::new(1).is_ok());
    }

    #[test]
    fn splits_ten_nodes_into_pages_of_eight() {
        let nodes: Vec<u32> = (0..10).collect();

        let first = Page::paginate(nodes.clone(), Request::new(1, size(8)));
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.total_count, 10);
        assert_eq!(first.nodes, (0..8).collect::<Vec<_>>());

        let second = Page::paginate(nodes, Request::new(2, size(8)));
        assert_eq!(second.total_pages, 2);
        assert_eq!(second.nodes, vec![8, 9]);
    }

    #[test]
    fn empty_collection_still_has_one_page() {
        let page = Page::<u32>::paginate(vec![], Request::first(size(8)));
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_count, 0);
        assert!(page.is_empty());
    }

    #[test]
    fn out_of_range_request_is_not_clamped() {
        let nodes: Vec<u32> = (0..3).collect();

        let past_end = Page::paginate(nodes.clone(), Request::new(5, size(8)));
        assert!(past_end.is_empty());
        assert_eq!(past_end.total_pages, 1);

        let zeroth = Page::paginate(nodes, Request::new(0, size(8)));
        assert!(zeroth.is_empty());
    }

    #[test]
    fn concatenated_pages_reproduce_the_collection() {
        let nodes: Vec<u32> = (0..23).collect();
        let size = size(5);

        let total_pages =
            Page::paginate(nodes.clone(), Request::first(size)).total_pages;
        let concatenated: Vec<u32> = (1..=total_pages)
            .flat_map(|number| {
                Page::paginate(nodes.clone(), Request::new(number, size)).nodes
            })
            .collect();

        assert_eq!(concatenated, nodes);
    }

    #[test]
    fn only_the_last_page_may_be_short() {
        let nodes: Vec<u32> = (0..23).collect();
        let size = size(5);

        for number in 1..=4 {
            let page =
                Page::paginate(nodes.clone(), Request::new(number, size));
            assert_eq!(page.len(), 5, "page {number} must be full");
        }
        let last = Page::paginate(nodes, Request::new(5, size));
        assert_eq!(last.len(), 3);
    }
}
