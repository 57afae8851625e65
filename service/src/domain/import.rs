//! [`ImportJob`] and [`ImportError`] definitions.

use std::str::FromStr;

use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, Into};

/// Bulk import run that loaded [`Lead`]s into the system.
///
/// [`Lead`]: crate::domain::Lead
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct ImportJob {
    /// ID of this [`ImportJob`].
    pub id: Id,

    /// [`FileName`] of the file this [`ImportJob`] processed.
    pub file_name: FileName,

    /// [`Kind`] of this [`ImportJob`].
    pub kind: Kind,

    /// [`Status`] of this [`ImportJob`].
    pub status: Status,

    /// Number of rows this [`ImportJob`] failed to process.
    pub error_count: ErrorCount,

    /// [`DateTime`] when this [`ImportJob`] finished, if it did.
    ///
    /// [`DateTime`]: common::DateTime
    #[cfg_attr(feature = "serde", serde(default))]
    pub finished_at: Option<FinishDateTime>,

    /// [`UserName`] of the user who launched this [`ImportJob`].
    pub imported_by: UserName,
}

impl ImportJob {
    /// Indicates whether the error report of this [`ImportJob`] is ready to
    /// be fetched.
    ///
    /// Reports of still running [`ImportJob`]s are not.
    #[must_use]
    pub fn report_ready(&self) -> bool {
        !matches!(self.status, Status::InProgress)
    }
}

/// ID of an [`ImportJob`].
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct Id(i64);

impl FromStr for Id {
    type Err = <i64 as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Name of the file processed by an [`ImportJob`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Into, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub struct FileName(String);

impl FileName {
    /// Creates a new [`FileName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`FileName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 255
    }
}

impl FromStr for FileName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `FileName`")
    }
}

impl TryFrom<String> for FileName {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `FileName`")
    }
}

define_kind! {
    #[doc = "Kind of an [`ImportJob`]."]
    enum Kind {
        #[doc = "Import registering new leads."]
        Registration = 1,

        #[doc = "Import cleansing already registered leads."]
        Cleansing = 2,
    }
}

define_kind! {
    #[doc = "Status of an [`ImportJob`]."]
    enum Status {
        #[doc = "The job has finished successfully."]
        Completed = 1,

        #[doc = "The job has finished with a failure."]
        Failed = 2,

        #[doc = "The job is still running."]
        InProgress = 3,
    }
}

/// Number of rows an [`ImportJob`] failed to process.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct ErrorCount(u32);

/// Name of the user who launched an [`ImportJob`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Into, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub struct UserName(String);

impl UserName {
    /// Creates a new [`UserName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`UserName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 512
    }
}

impl FromStr for UserName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `UserName`")
    }
}

impl TryFrom<String> for UserName {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `UserName`")
    }
}

/// Row-level error produced by an [`ImportJob`].
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct ImportError {
    /// ID of this [`ImportError`].
    pub id: ErrorId,

    /// ID of the [`ImportJob`] this [`ImportError`] belongs to.
    pub job_id: Id,

    /// Number of the file row this [`ImportError`] points at.
    pub row: RowNumber,

    /// Name of the file column this [`ImportError`] points at.
    pub column: ColumnName,

    /// Human-readable [`Message`] of this [`ImportError`].
    pub message: Message,
}

/// ID of an [`ImportError`].
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct ErrorId(i64);

/// 1-based number of the file row an [`ImportError`] points at.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct RowNumber(u32);

/// Name of the file column an [`ImportError`] points at.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Into, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub struct ColumnName(String);

impl ColumnName {
    /// Creates a new [`ColumnName`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`ColumnName`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 255
    }
}

impl FromStr for ColumnName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ColumnName`")
    }
}

impl TryFrom<String> for ColumnName {
    type Error = &'static str;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s).ok_or("invalid `ColumnName`")
    }
}

/// Human-readable message of an [`ImportError`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, Into, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct Message(String);

/// [`DateTime`] when an [`ImportJob`] finished.
///
/// [`DateTime`]: common::DateTime
pub type FinishDateTime = DateTimeOf<(ImportJob, unit::Finish)>;
