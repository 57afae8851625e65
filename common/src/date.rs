//! Calendar date utilities.

use std::{cmp::Ordering, fmt, marker::PhantomData, str::FromStr};

use derive_more::{Debug, Display, Error};

/// Untyped calendar date.
pub type Date = DateOf;

/// Calendar date without a time-of-day component.
///
/// The canonical textual form is the `DD/MM/YYYY` one used by the data
/// sources feeding the system.
#[derive(Debug)]
pub struct DateOf<Of: ?Sized = ()> {
    /// Inner representation of the date.
    inner: time::Date,

    /// Type parameter describing the kind of date.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateOf<Of> {
    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// [`None`] is returned if the components don't form a valid date.
    #[must_use]
    pub fn from_calendar(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = time::Month::try_from(month).ok()?;
        Some(Self {
            inner: time::Date::from_calendar_date(year, month, day).ok()?,
            _of: PhantomData,
        })
    }

    /// Parses a [`Date`] out of its `DD/MM/YYYY` textual form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid `DD/MM/YYYY` date.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        use ParseError as E;

        let mut parts = input.splitn(3, '/');
        let (day, month, year) = parts
            .next()
            .zip(parts.next())
            .zip(parts.next())
            .map(|((d, m), y)| (d, m, y))
            .ok_or(E::Format)?;

        let day = day.parse::<u8>().map_err(|_| E::Format)?;
        let month = month.parse::<u8>().map_err(|_| E::Format)?;
        let year = year.parse::<i32>().map_err(|_| E::Format)?;

        let month = time::Month::try_from(month).map_err(E::ComponentRange)?;
        Ok(Self {
            inner: time::Date::from_calendar_date(year, month, day)
                .map_err(E::ComponentRange)?,
            _of: PhantomData,
        })
    }

    /// Coerces one kind of [`Date`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateOf<NewOf> {
        DateOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> fmt::Display for DateOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:02}/{:04}",
            self.inner.day(),
            u8::from(self.inner.month()),
            self.inner.year(),
        )
    }
}

impl<Of: ?Sized> FromStr for DateOf<Of> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error of parsing a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum ParseError {
    /// The string is not in the `DD/MM/YYYY` form.
    #[display("not a `DD/MM/YYYY` date")]
    Format,

    /// Parsed [`Date`] has an out of range component.
    ComponentRange(time::error::ComponentRange),
}

impl<Of: ?Sized> Copy for DateOf<Of> {}
impl<Of: ?Sized> Clone for DateOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateOf<Of> {}
impl<Of: ?Sized> PartialEq for DateOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Inclusive range of [`Date`]s with optional bounds.
///
/// Absent bounds don't constrain: a [`Range`] with both bounds absent
/// contains every date.
#[derive(Debug)]
pub struct Range<Of: ?Sized = ()> {
    /// Lower bound of this [`Range`], if any.
    pub from: Option<DateOf<Of>>,

    /// Upper bound of this [`Range`], if any.
    pub to: Option<DateOf<Of>>,
}

impl<Of: ?Sized> Range<Of> {
    /// Creates a new [`Range`] with the provided bounds.
    #[must_use]
    pub fn new(from: Option<DateOf<Of>>, to: Option<DateOf<Of>>) -> Self {
        Self { from, to }
    }

    /// Indicates whether this [`Range`] has no bounds at all.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Checks whether the given `date` lies within this [`Range`].
    ///
    /// Both bounds are inclusive.
    #[must_use]
    pub fn contains(&self, date: DateOf<Of>) -> bool {
        self.from.is_none_or(|from| date >= from)
            && self.to.is_none_or(|to| date <= to)
    }
}

impl<Of: ?Sized> Copy for Range<Of> {}
impl<Of: ?Sized> Clone for Range<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Default for Range<Of> {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
        }
    }
}

impl<Of: ?Sized> Eq for Range<Of> {}
impl<Of: ?Sized> PartialEq for Range<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{
        de::Error as _, Deserialize, Deserializer, Serialize, Serializer,
    };

    use super::DateOf;

    impl<Of: ?Sized> Serialize for DateOf<Of> {
        fn serialize<S: Serializer>(
            &self,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de, Of: ?Sized> Deserialize<'de> for DateOf<Of> {
        fn deserialize<D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Self::parse(&s).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Date, ParseError, Range};

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    #[test]
    fn parses_br_form() {
        let d = date("15/12/2024");
        assert_eq!(d.to_string(), "15/12/2024");

        let d = date("1/2/2024");
        assert_eq!(d.to_string(), "01/02/2024");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(Date::parse("15-12-2024"), Err(ParseError::Format)));
        assert!(matches!(Date::parse("15/12"), Err(ParseError::Format)));
        assert!(matches!(Date::parse(""), Err(ParseError::Format)));
        assert!(matches!(
            Date::parse("32/12/2024"),
            Err(ParseError::ComponentRange(_)),
        ));
        assert!(matches!(
            Date::parse("15/13/2024"),
            Err(ParseError::ComponentRange(_)),
        ));
    }

    #[test]
    fn orders_calendar_wise() {
        assert!(date("15/12/2024") > date("09/12/2024"));
        assert!(date("01/01/2025") > date("31/12/2024"));
        assert_eq!(date("15/12/2024"), date("15/12/2024"));
    }

    #[test]
    fn unbounded_range_contains_everything() {
        let range = Range::default();
        assert!(range.is_unbounded());
        assert!(range.contains(date("15/12/2024")));
        assert!(range.contains(date("01/01/1970")));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range =
            Range::new(Some(date("01/12/2024")), Some(date("31/12/2024")));
        assert!(range.contains(date("01/12/2024")));
        assert!(range.contains(date("15/12/2024")));
        assert!(range.contains(date("31/12/2024")));
        assert!(!range.contains(date("30/11/2024")));
        assert!(!range.contains(date("01/01/2025")));
    }

    #[test]
    fn half_open_range() {
        let until = Range::new(None, Some(date("10/12/2024")));
        assert!(until.contains(date("10/12/2024")));
        assert!(!until.contains(date("15/12/2024")));

        let since = Range::new(Some(date("10/12/2024")), None);
        assert!(since.contains(date("15/12/2024")));
        assert!(!since.contains(date("09/12/2024")));
    }
}
