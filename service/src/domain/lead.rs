//! [`Lead`] definitions.

use std::{str::FromStr, sync::LazyLock};

use common::{define_kind, unit, DateOf};
use derive_more::{AsRef, Display, Into};
use regex::Regex;

use crate::domain::import;

/// Prospective customer record.
///
/// [`Lead`]s are produced by import jobs (or seeded demonstration data) and
/// are read-only from the perspective of the listing engine: nothing in this
/// crate ever mutates or deletes one.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Lead {
    /// ID of this [`Lead`].
    pub id: Id,

    /// [`Cpf`] of this [`Lead`].
    pub cpf: Cpf,

    /// [`Name`] of this [`Lead`].
    pub name: Name,

    /// [`Phone`]s of this [`Lead`], each carrying its own [`Temperature`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub phones: Vec<Phone>,

    /// [`Temperature`] of this [`Lead`].
    pub temperature: Temperature,

    /// [`Eligibility`] of this [`Lead`].
    pub eligibility: Eligibility,

    /// [`Reason`] explaining the [`Eligibility`] of this [`Lead`].
    pub reason: Reason,

    /// [`Origin`] that produced this [`Lead`].
    pub origin: Origin,

    /// Total balance of this [`Lead`].
    pub balance: common::Money,

    /// Released amount of this [`Lead`].
    ///
    /// Well-formed data keeps it within [`Lead::balance`], but nothing
    /// enforces that: see [`Lead::released_within_balance()`].
    pub released: common::Money,

    /// [`Date`] when this [`Lead`] was last updated.
    ///
    /// [`Date`]: common::Date
    pub updated_at: UpdateDate,

    /// [`Date`] when this [`Lead`] was born, if known.
    ///
    /// [`Date`]: common::Date
    #[cfg_attr(feature = "serde", serde(default))]
    pub birth_date: Option<BirthDate>,

    /// [`Contract`]s signed by this [`Lead`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub contracts: Vec<Contract>,

    /// History of imports this [`Lead`] went through.
    #[cfg_attr(feature = "serde", serde(default))]
    pub import_history: Vec<ImportRecord>,
}

impl Lead {
    /// Returns the number of [`Contract`]s signed by this [`Lead`].
    #[must_use]
    pub fn contract_count(&self) -> usize {
        self.contracts.len()
    }

    /// Checks whether the released amount of this [`Lead`] stays within its
    /// balance.
    ///
    /// The invariant is not enforced anywhere, so imported data may violate
    /// it: this check only makes the violation observable.
    #[must_use]
    pub fn released_within_balance(&self) -> bool {
        self.released.currency == self.balance.currency
            && self.released.amount <= self.balance.amount
    }
}

/// ID of a [`Lead`].
///
/// Opaque and unique within a collection.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Into, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`Id`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        id.trim() == id && !id.is_empty() && id.len() <= 64
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Id`")
    }
}

impl TryFrom<String> for Id {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Id`")
    }
}

/// Brazilian taxpayer ID of a [`Lead`] in its canonical punctuated
/// `ddd.ddd.ddd-dd` form.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Into, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub struct Cpf(String);

impl Cpf {
    /// Creates a new [`Cpf`] if the given `cpf` is already in the canonical
    /// punctuated form.
    #[must_use]
    pub fn new(cpf: impl Into<String>) -> Option<Self> {
        let cpf = cpf.into();
        Self::check(&cpf).then_some(Self(cpf))
    }

    /// Returns the canonical punctuated form of this [`Cpf`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Re-formats a free-form token into the canonical punctuated form.
    ///
    /// All non-digit characters are stripped first. When at least 11 digits
    /// remain, the first 11 are grouped as `ddd.ddd.ddd-dd` and any surplus
    /// digits are carried through unchanged (such a token can never match a
    /// canonical [`Cpf`], mirroring how the data sources treat overly long
    /// entries). Tokens with fewer than 11 digits are returned as-is,
    /// unformatted, rather than rejected.
    #[must_use]
    pub fn canonicalize(token: &str) -> String {
        /// Matches everything but ASCII digits.
        static NON_DIGITS: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\D").expect("valid regex"));

        let digits = NON_DIGITS.replace_all(token, "");
        if digits.len() < 11 {
            return token.to_owned();
        }

        format!(
            "{}.{}.{}-{}{}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..11],
            &digits[11..],
        )
    }

    /// Checks whether the given `cpf` is in the canonical punctuated form.
    fn check(cpf: impl AsRef<str>) -> bool {
        /// Matches the canonical `ddd.ddd.ddd-dd` form.
        static CANONICAL: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").expect("valid regex")
        });

        CANONICAL.is_match(cpf.as_ref())
    }
}

impl FromStr for Cpf {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Cpf`")
    }
}

impl TryFrom<String> for Cpf {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Cpf`")
    }
}

/// Full name of a [`Lead`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Into, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Returns this [`Name`] as a [`str`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

impl TryFrom<String> for Name {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Phone of a [`Lead`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Phone {
    /// [`PhoneNumber`] of this [`Phone`].
    pub number: PhoneNumber,

    /// [`Temperature`] of this [`Phone`].
    pub temperature: Temperature,
}

/// Number of a [`Phone`] in whatever punctuation the data source used.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Into, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Creates a new [`PhoneNumber`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Returns this [`PhoneNumber`] as a [`str`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the digit-only form of this [`PhoneNumber`].
    #[must_use]
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }

    /// Checks whether the given `number` is a valid [`PhoneNumber`].
    fn check(number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        number.trim() == number
            && !number.is_empty()
            && number.len() <= 32
            && number.chars().any(|c| c.is_ascii_digit())
    }
}

impl FromStr for PhoneNumber {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `PhoneNumber`")
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `PhoneNumber`")
    }
}

define_kind! {
    #[doc = "Temperature classification of a [`Lead`] or a [`Phone`]."]
    enum Temperature {
        #[doc = "A hot lead, worth contacting first."]
        Hot = 1,

        #[doc = "A cold lead."]
        Cold = 2,
    }
}

define_kind! {
    #[doc = "Qualification of a [`Lead`] for further processing."]
    enum Eligibility {
        #[doc = "The lead qualifies."]
        Eligible = 1,

        #[doc = "The lead doesn't qualify."]
        Ineligible = 2,
    }
}

/// Free-text code explaining the [`Eligibility`] outcome of a [`Lead`].
#[derive(
    AsRef, Clone, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[as_ref(str, String)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub struct Reason(String);

impl Reason {
    /// Creates a new [`Reason`] if the given `reason` is valid.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Option<Self> {
        let reason = reason.into();
        Self::check(&reason).then_some(Self(reason))
    }

    /// Returns this [`Reason`] as a [`str`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether the given `reason` is a valid [`Reason`].
    fn check(reason: impl AsRef<str>) -> bool {
        let reason = reason.as_ref();
        reason.trim() == reason && !reason.is_empty() && reason.len() <= 512
    }
}

impl FromStr for Reason {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Reason`")
    }
}

impl TryFrom<String> for Reason {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Reason`")
    }
}

/// Free-text tag identifying the data source that produced a [`Lead`].
#[derive(
    AsRef, Clone, Debug, Display, Eq, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[as_ref(str, String)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub struct Origin(String);

impl Origin {
    /// Creates a new [`Origin`] if the given `origin` is valid.
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Option<Self> {
        let origin = origin.into();
        Self::check(&origin).then_some(Self(origin))
    }

    /// Returns this [`Origin`] as a [`str`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether the given `origin` is a valid [`Origin`].
    fn check(origin: impl AsRef<str>) -> bool {
        let origin = origin.as_ref();
        origin.trim() == origin && !origin.is_empty() && origin.len() <= 512
    }
}

impl FromStr for Origin {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Origin`")
    }
}

impl TryFrom<String> for Origin {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Origin`")
    }
}

/// Contract signed by a [`Lead`].
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Contract {
    /// [`Date`] when this [`Contract`] was signed.
    ///
    /// [`Date`]: common::Date
    pub signed_at: SigningDate,

    /// [`Salesperson`] who closed this [`Contract`].
    pub salesperson: Salesperson,
}

/// Name of the salesperson who closed a [`Contract`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Into, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub struct Salesperson(String);

impl Salesperson {
    /// Creates a new [`Salesperson`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Salesperson`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for Salesperson {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Salesperson`")
    }
}

impl TryFrom<String> for Salesperson {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `Salesperson`")
    }
}

/// Record of a past import a [`Lead`] went through.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct ImportRecord {
    /// [`import::Kind`] of the import.
    pub kind: import::Kind,

    /// [`Origin`] the import pulled data from.
    pub origin: Origin,

    /// [`Date`] when the import happened.
    ///
    /// [`Date`]: common::Date
    pub imported_at: ImportDate,
}

/// [`Date`] when a [`Lead`] was last updated.
///
/// [`Date`]: common::Date
pub type UpdateDate = DateOf<(Lead, unit::Update)>;

/// [`Date`] when a [`Lead`] was born.
///
/// [`Date`]: common::Date
pub type BirthDate = DateOf<(Lead, unit::Birth)>;

/// [`Date`] when a [`Contract`] was signed.
///
/// [`Date`]: common::Date
pub type SigningDate = DateOf<(Contract, unit::Signing)>;

/// [`Date`] when an [`ImportRecord`] happened.
///
/// [`Date`]: common::Date
pub type ImportDate = DateOf<(ImportRecord, unit::Import)>;

#[cfg(test)]
mod spec {
    use super::Cpf;

    #[test]
    fn accepts_canonical_form_only() {
        assert!(Cpf::new("123.456.789-01").is_some());
        assert!(Cpf::new("12345678901").is_none());
        assert!(Cpf::new("123.456.789-0").is_none());
        assert!(Cpf::new("abc.def.ghi-jk").is_none());
    }

    #[test]
    fn canonicalizes_bare_digits() {
        assert_eq!(Cpf::canonicalize("98765432102"), "987.654.321-02");
        assert_eq!(Cpf::canonicalize("123.456.789-01"), "123.456.789-01");
        assert_eq!(Cpf::canonicalize(" 987 654 321 02 "), "987.654.321-02");
    }

    #[test]
    fn passes_short_tokens_through_unchanged() {
        assert_eq!(Cpf::canonicalize("1234567890"), "1234567890");
        assert_eq!(Cpf::canonicalize("abc"), "abc");
        assert_eq!(Cpf::canonicalize(""), "");
    }

    #[test]
    fn carries_surplus_digits_through() {
        assert_eq!(Cpf::canonicalize("123456789012"), "123.456.789-012");
    }
}
