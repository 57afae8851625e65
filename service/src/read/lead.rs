//! [`Lead`]-related read definitions.

use std::cmp::Ordering;

use common::{define_kind, pagination};
use derive_more::{AsRef, Display, Into};

use crate::domain::{lead, Lead};
#[cfg(doc)]
use crate::domain::lead::Contract;

/// Free-text term searched across a [`Lead`]'s name, CPF and phone numbers.
///
/// Name matching is case-insensitive, while the CPF and phone numbers are
/// matched against the raw term as typed (phone numbers additionally by
/// their digit-only form).
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Into, PartialEq)]
#[as_ref(str, String)]
pub struct Search(String);

impl Search {
    /// Creates a new [`Search`] term, unless the given `term` is blank.
    #[must_use]
    pub fn new(term: impl Into<String>) -> Option<Self> {
        let term = term.into();
        (!term.trim().is_empty()).then_some(Self(term))
    }

    /// Checks whether the given [`Lead`] matches this [`Search`] term.
    #[must_use]
    pub fn matches(&self, lead: &Lead) -> bool {
        let term = self.0.as_str();
        lead.name.as_str().to_lowercase().contains(&term.to_lowercase())
            || lead.cpf.as_str().contains(term)
            || lead.phones.iter().any(|p| {
                p.number.as_str().contains(term)
                    || p.number.digits().contains(term)
            })
    }
}

/// Selector of [`Lead`]s by their [`lead::Eligibility`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum EligibilitySelector {
    /// Any [`Lead`], regardless of its [`lead::Eligibility`].
    #[default]
    All,

    /// [`lead::Eligibility::Eligible`] [`Lead`]s only.
    EligibleOnly,

    /// [`lead::Eligibility::Ineligible`] [`Lead`]s only.
    IneligibleOnly,
}

impl EligibilitySelector {
    /// Checks whether the given [`Lead`] passes this [`EligibilitySelector`].
    #[must_use]
    pub fn matches(self, lead: &Lead) -> bool {
        match self {
            Self::All => true,
            Self::EligibleOnly => {
                lead.eligibility == lead::Eligibility::Eligible
            }
            Self::IneligibleOnly => {
                lead.eligibility == lead::Eligibility::Ineligible
            }
        }
    }
}

/// Selector of [`Lead`]s by how many [`Contract`]s they've signed.
///
/// The bucket boundary sits at 3 signed [`Contract`]s.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ContractBucket {
    /// Any [`Lead`], regardless of its [`Contract`]s.
    #[default]
    All,

    /// [`Lead`]s having signed 3 or more [`Contract`]s.
    ThreeOrMore,

    /// [`Lead`]s having signed fewer than 3 [`Contract`]s.
    FewerThanThree,
}

impl ContractBucket {
    /// Boundary between the two non-trivial buckets.
    const BOUNDARY: usize = 3;

    /// Checks whether the given [`Lead`] falls into this [`ContractBucket`].
    #[must_use]
    pub fn matches(self, lead: &Lead) -> bool {
        match self {
            Self::All => true,
            Self::ThreeOrMore => lead.contract_count() >= Self::BOUNDARY,
            Self::FewerThanThree => lead.contract_count() < Self::BOUNDARY,
        }
    }
}

/// Bulk list of CPFs to select [`Lead`]s by.
///
/// An empty [`CpfList`] doesn't constrain the selection.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct CpfList(Vec<String>);

impl CpfList {
    /// Parses a [`CpfList`] out of a free-form `input`.
    ///
    /// Entries are separated by commas, semicolons or newlines, and each one
    /// is re-formatted into the canonical punctuated form via
    /// [`lead::Cpf::canonicalize()`].
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self(tokens(input).map(lead::Cpf::canonicalize).collect())
    }

    /// Indicates whether this [`CpfList`] has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether the given [`Lead`] matches this [`CpfList`].
    #[must_use]
    pub fn matches(&self, lead: &Lead) -> bool {
        self.is_empty() || self.0.iter().any(|c| c == lead.cpf.as_str())
    }
}

/// Bulk list of names to select [`Lead`]s by.
///
/// Every entry matches as a case-insensitive substring, and an empty
/// [`NameList`] doesn't constrain the selection.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct NameList(Vec<String>);

impl NameList {
    /// Parses a [`NameList`] out of a free-form `input`.
    ///
    /// Entries are separated by commas, semicolons or newlines.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self(tokens(input).map(str::to_lowercase).collect())
    }

    /// Indicates whether this [`NameList`] has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether the given [`Lead`] matches this [`NameList`].
    #[must_use]
    pub fn matches(&self, lead: &Lead) -> bool {
        if self.is_empty() {
            return true;
        }
        let name = lead.name.as_str().to_lowercase();
        self.0.iter().any(|n| name.contains(n))
    }
}

/// Bulk list of phone numbers to select [`Lead`]s by.
///
/// Entries are kept in digit-only form and match any of a [`Lead`]'s phone
/// numbers by digit containment. An empty [`PhoneList`] doesn't constrain the
/// selection.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct PhoneList(Vec<String>);

impl PhoneList {
    /// Parses a [`PhoneList`] out of a free-form `input`.
    ///
    /// Entries are separated by commas, semicolons or newlines. Punctuation
    /// is stripped from every entry, and entries carrying no digits at all
    /// are dropped.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self(
            tokens(input)
                .map(|t| t.chars().filter(char::is_ascii_digit).collect())
                .filter(|t: &String| !t.is_empty())
                .collect(),
        )
    }

    /// Indicates whether this [`PhoneList`] has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether the given [`Lead`] matches this [`PhoneList`].
    #[must_use]
    pub fn matches(&self, lead: &Lead) -> bool {
        if self.is_empty() {
            return true;
        }
        lead.phones.iter().any(|phone| {
            let digits = phone.number.digits();
            self.0.iter().any(|t| digits.contains(t))
        })
    }
}

/// Splits a free-form bulk `input` into non-blank trimmed tokens.
fn tokens(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(|c| matches!(c, ',' | ';' | '\n' | '\r'))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Facets of a [`Lead`] collection, listing the distinct values its filters
/// may select by.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct Facets {
    /// Distinct [`lead::Reason`]s of the collection, sorted.
    pub reasons: Vec<lead::Reason>,

    /// Distinct [`lead::Origin`]s of the collection, sorted.
    pub origins: Vec<lead::Origin>,
}

/// Sorting of a [`Lead`] list.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Sorting {
    /// [`Field`] to sort by.
    pub field: Field,

    /// [`pagination::Order`] to sort in.
    pub order: pagination::Order,
}

impl Sorting {
    /// Compares two [`Lead`]s according to this [`Sorting`].
    ///
    /// Textual fields compare case-insensitively, monetary ones by their
    /// amount, and the rest by their natural order.
    #[must_use]
    pub fn compare(&self, a: &Lead, b: &Lead) -> Ordering {
        let ordering = match self.field {
            Field::Cpf => a.cpf.as_str().cmp(b.cpf.as_str()),
            Field::Name => {
                a.name.as_str().to_lowercase().cmp(&b.name.as_str().to_lowercase())
            }
            Field::Temperature => a.temperature.cmp(&b.temperature),
            Field::Eligibility => a.eligibility.cmp(&b.eligibility),
            Field::Reason => {
                a.reason.as_str().to_lowercase().cmp(&b.reason.as_str().to_lowercase())
            }
            Field::Balance => a.balance.amount.cmp(&b.balance.amount),
            Field::Released => a.released.amount.cmp(&b.released.amount),
            Field::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            Field::ContractCount => {
                a.contract_count().cmp(&b.contract_count())
            }
            Field::Origin => {
                a.origin.as_str().to_lowercase().cmp(&b.origin.as_str().to_lowercase())
            }
        };
        match self.order {
            pagination::Order::Ascending => ordering,
            pagination::Order::Descending => ordering.reverse(),
        }
    }
}

define_kind! {
    #[doc = "Field of a [`Lead`] to sort a list by."]
    enum Field {
        #[doc = "Sorting by [`lead::Cpf`]."]
        Cpf = 1,

        #[doc = "Sorting by [`lead::Name`]."]
        Name = 2,

        #[doc = "Sorting by [`lead::Temperature`]."]
        Temperature = 3,

        #[doc = "Sorting by [`lead::Eligibility`]."]
        Eligibility = 4,

        #[doc = "Sorting by [`lead::Reason`]."]
        Reason = 5,

        #[doc = "Sorting by balance."]
        Balance = 6,

        #[doc = "Sorting by released amount."]
        Released = 7,

        #[doc = "Sorting by the last update date."]
        UpdatedAt = 8,

        #[doc = "Sorting by [`lead::Origin`]."]
        Origin = 9,

        #[doc = "Sorting by the number of signed contracts."]
        ContractCount = 10,
    }
}

pub mod list {
    //! [`Lead`] list definitions.

    use std::collections::HashSet;

    use common::{date, define_pagination, unit};
    use derive_more::{From, Into};

    use crate::domain::{
        lead::{self, Contract},
        Lead,
    };

    use super::{
        ContractBucket, CpfList, EligibilitySelector, NameList, PhoneList,
        Search, Sorting,
    };

    define_pagination!(Lead, Filter, Option<Sorting>);

    /// Filter for [`Selector`].
    ///
    /// All the constraints are conjunctive: a [`Lead`] has to pass every one
    /// of them. The [`Default`] filter passes every [`Lead`] through.
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// Free-text [`Search`] term.
        pub search: Option<Search>,

        /// [`EligibilitySelector`] being applied.
        pub eligibility: EligibilitySelector,

        /// [`ContractBucket`] being applied.
        pub contracts: ContractBucket,

        /// [`lead::Reason`]s to select by, any of them matching.
        ///
        /// An empty set doesn't constrain.
        pub reasons: HashSet<lead::Reason>,

        /// [`lead::Origin`]s to select by, any of them matching.
        ///
        /// An empty set doesn't constrain.
        pub origins: HashSet<lead::Origin>,

        /// Bulk [`CpfList`] being applied.
        pub cpfs: CpfList,

        /// Bulk [`NameList`] being applied.
        pub names: NameList,

        /// Bulk [`PhoneList`] being applied.
        pub phones: PhoneList,

        /// [`date::Range`] the last update of a [`Lead`] must fall into.
        pub updated: date::Range<(Lead, unit::Update)>,

        /// [`date::Range`] at least one signed [`Contract`] of a [`Lead`]
        /// must fall into.
        pub signed: date::Range<(Contract, unit::Signing)>,
    }

    impl Filter {
        /// Checks whether the given [`Lead`] passes this [`Filter`].
        #[must_use]
        pub fn matches(&self, lead: &Lead) -> bool {
            self.search.as_ref().is_none_or(|s| s.matches(lead))
                && self.eligibility.matches(lead)
                && self.contracts.matches(lead)
                && (self.reasons.is_empty()
                    || self.reasons.contains(&lead.reason))
                && (self.origins.is_empty()
                    || self.origins.contains(&lead.origin))
                && self.cpfs.matches(lead)
                && self.names.matches(lead)
                && self.phones.matches(lead)
                && self.updated.contains(lead.updated_at)
                && (self.signed.is_unbounded()
                    || lead
                        .contracts
                        .iter()
                        .any(|c| self.signed.contains(c.signed_at)))
        }

        /// Indicates whether this [`Filter`] constrains anything at all.
        #[must_use]
        pub fn is_active(&self) -> bool {
            *self != Self::default()
        }

        /// Resets this [`Filter`] to the pass-through [`Default`] one.
        pub fn clear(&mut self) {
            *self = Self::default();
        }
    }

    /// Total count of [`Lead`] list items.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(usize);
}

#[cfg(test)]
mod spec {
    use common::{date, pagination::Order, Money};
    use rust_decimal::Decimal;

    use crate::domain::{import, lead, Lead};

    use super::{
        list::Filter, ContractBucket, CpfList, EligibilitySelector, Field,
        NameList, PhoneList, Search, Sorting,
    };

    fn lead(
        id: &str,
        cpf: &str,
        name: &str,
        phones: &[&str],
        eligibility: lead::Eligibility,
        reason: &str,
        origin: &str,
        balance: i64,
        updated_at: &str,
        contract_dates: &[&str],
    ) -> Lead {
        Lead {
            id: lead::Id::new(id).unwrap(),
            cpf: lead::Cpf::new(cpf).unwrap(),
            name: lead::Name::new(name).unwrap(),
            phones: phones
                .iter()
                .map(|n| lead::Phone {
                    number: lead::PhoneNumber::new(*n).unwrap(),
                    temperature: lead::Temperature::Hot,
                })
                .collect(),
            temperature: lead::Temperature::Hot,
            eligibility,
            reason: lead::Reason::new(reason).unwrap(),
            origin: lead::Origin::new(origin).unwrap(),
            balance: Money::brl(Decimal::new(balance, 2)),
            released: Money::brl(Decimal::new(balance / 2, 2)),
            updated_at: updated_at.parse().unwrap(),
            birth_date: None,
            contracts: contract_dates
                .iter()
                .map(|d| lead::Contract {
                    signed_at: d.parse().unwrap(),
                    salesperson: lead::Salesperson::new("Carlos Lima")
                        .unwrap(),
                })
                .collect(),
            import_history: vec![lead::ImportRecord {
                kind: import::Kind::Registration,
                origin: lead::Origin::new(origin).unwrap(),
                imported_at: updated_at.parse().unwrap(),
            }],
        }
    }

    fn fixture() -> Vec<Lead> {
        vec![
            lead(
                "1",
                "123.456.789-01",
                "Ana Souza",
                &["(11) 98888-0001"],
                lead::Eligibility::Eligible,
                "Apto",
                "Internal System",
                2_500_050,
                "15/12/2024",
                &["10/12/2024"],
            ),
            lead(
                "2",
                "987.654.321-02",
                "Bruno Mariana Lima",
                &["(21) 97777-0002", "(21) 96666-0003"],
                lead::Eligibility::Ineligible,
                "Saldo insuficiente",
                "Spreadsheet",
                120_000,
                "09/12/2024",
                &[],
            ),
            lead(
                "3",
                "111.222.333-44",
                "Carla Mendes",
                &["(31) 95555-0004"],
                lead::Eligibility::Eligible,
                "Apto",
                "External API",
                9_800_000,
                "01/11/2024",
                &["05/01/2024", "20/06/2024", "02/12/2024"],
            ),
        ]
    }

    #[test]
    fn default_filter_passes_everything() {
        let filter = Filter::default();
        assert!(!filter.is_active());
        assert!(fixture().iter().all(|l| filter.matches(l)));
    }

    #[test]
    fn search_covers_name_cpf_and_phones() {
        let leads = fixture();

        let by_name = Search::new("ana").unwrap();
        let matched: Vec<_> = leads
            .iter()
            .filter(|l| by_name.matches(l))
            .map(|l| l.id.to_string())
            .collect();
        assert_eq!(matched, ["1", "2"]);

        let by_cpf = Search::new("987.654").unwrap();
        assert!(by_cpf.matches(&leads[1]));
        assert!(!by_cpf.matches(&leads[0]));

        let by_phone = Search::new("96666").unwrap();
        assert!(by_phone.matches(&leads[1]));
        assert!(!by_phone.matches(&leads[2]));
    }

    #[test]
    fn blank_search_is_rejected() {
        assert!(Search::new("").is_none());
        assert!(Search::new("   ").is_none());
    }

    #[test]
    fn eligibility_and_reason_conjunction() {
        let filter = Filter {
            eligibility: EligibilitySelector::IneligibleOnly,
            reasons: [lead::Reason::new("Saldo insuficiente").unwrap()]
                .into(),
            ..Filter::default()
        };
        assert!(filter.is_active());

        let matched: Vec<_> = fixture()
            .into_iter()
            .filter(|l| filter.matches(l))
            .map(|l| l.id.to_string())
            .collect();
        assert_eq!(matched, ["2"]);
    }

    #[test]
    fn contract_buckets_split_at_three() {
        let leads = fixture();

        assert!(leads.iter().all(|l| ContractBucket::All.matches(l)));
        assert!(ContractBucket::FewerThanThree.matches(&leads[0]));
        assert!(ContractBucket::FewerThanThree.matches(&leads[1]));
        assert!(!ContractBucket::FewerThanThree.matches(&leads[2]));
        assert!(ContractBucket::ThreeOrMore.matches(&leads[2]));
    }

    #[test]
    fn bulk_cpf_list_matches_exactly() {
        let list = CpfList::parse("123.456.789-01\n98765432102");
        let matched: Vec<_> = fixture()
            .into_iter()
            .filter(|l| list.matches(l))
            .map(|l| l.id.to_string())
            .collect();
        assert_eq!(matched, ["1", "2"]);
    }

    #[test]
    fn bulk_name_list_matches_substrings() {
        let list = NameList::parse("MARIANA; carla");
        let matched: Vec<_> = fixture()
            .into_iter()
            .filter(|l| list.matches(l))
            .map(|l| l.id.to_string())
            .collect();
        assert_eq!(matched, ["2", "3"]);
    }

    #[test]
    fn bulk_phone_list_ignores_punctuation() {
        let list = PhoneList::parse("(21) 97777-0002, +-/");
        let matched: Vec<_> = fixture()
            .into_iter()
            .filter(|l| list.matches(l))
            .map(|l| l.id.to_string())
            .collect();
        assert_eq!(matched, ["2"]);
    }

    #[test]
    fn update_date_range_is_inclusive() {
        let filter = Filter {
            updated: date::Range::new(
                Some("09/12/2024".parse().unwrap()),
                Some("15/12/2024".parse().unwrap()),
            ),
            ..Filter::default()
        };

        let matched: Vec<_> = fixture()
            .into_iter()
            .filter(|l| filter.matches(l))
            .map(|l| l.id.to_string())
            .collect();
        assert_eq!(matched, ["1", "2"]);
    }

    #[test]
    fn signing_date_range_matches_any_contract() {
        let filter = Filter {
            signed: date::Range::new(
                Some("01/12/2024".parse().unwrap()),
                None,
            ),
            ..Filter::default()
        };

        // Lead 2 has no contracts at all, so a bounded range excludes it.
        let matched: Vec<_> = fixture()
            .into_iter()
            .filter(|l| filter.matches(l))
            .map(|l| l.id.to_string())
            .collect();
        assert_eq!(matched, ["1", "3"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let filter = Filter {
            eligibility: EligibilitySelector::EligibleOnly,
            ..Filter::default()
        };

        let once: Vec<_> = fixture()
            .into_iter()
            .filter(|l| filter.matches(l))
            .map(|l| l.id.to_string())
            .collect();
        let twice: Vec<_> = fixture()
            .into_iter()
            .filter(|l| filter.matches(l))
            .filter(|l| filter.matches(l))
            .map(|l| l.id.to_string())
            .collect();

        assert_eq!(once, twice);
    }

    #[test]
    fn cleared_filter_is_inactive_again() {
        let mut filter = Filter {
            search: Search::new("ana"),
            ..Filter::default()
        };
        assert!(filter.is_active());

        filter.clear();
        assert!(!filter.is_active());
        assert_eq!(filter, Filter::default());
    }

    #[test]
    fn sorts_names_case_insensitively() {
        let mut leads = fixture();
        leads[0].name = lead::Name::new("ana souza").unwrap();

        let sorting = Sorting {
            field: Field::Name,
            order: Order::Ascending,
        };
        leads.sort_by(|a, b| sorting.compare(a, b));

        let names: Vec<_> =
            leads.iter().map(|l| l.name.to_string()).collect();
        assert_eq!(names, ["ana souza", "Bruno Mariana Lima", "Carla Mendes"]);
    }

    #[test]
    fn sorts_balances_by_amount() {
        let mut leads = fixture();

        let sorting = Sorting {
            field: Field::Balance,
            order: Order::Descending,
        };
        leads.sort_by(|a, b| sorting.compare(a, b));

        let ids: Vec<_> = leads.iter().map(|l| l.id.to_string()).collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn sorts_update_dates_calendar_wise() {
        let mut leads = fixture();

        let sorting = Sorting {
            field: Field::UpdatedAt,
            order: Order::Ascending,
        };
        leads.sort_by(|a, b| sorting.compare(a, b));

        let ids: Vec<_> = leads.iter().map(|l| l.id.to_string()).collect();
        assert_eq!(ids, ["3", "2", "1"]);
    }

    #[test]
    fn sorting_keeps_input_order_for_equal_keys() {
        // Every fixture lead is `Temperature::Hot`, so the keys all compare
        // equal and the input order must survive the sort.
        let mut leads = fixture();

        let sorting = Sorting {
            field: Field::Temperature,
            order: Order::Ascending,
        };
        leads.sort_by(|a, b| sorting.compare(a, b));

        let ids: Vec<_> = leads.iter().map(|l| l.id.to_string()).collect();
        assert_eq!(ids, ["1", "2", "3"]);

        leads.sort_by(|a, b| sorting.compare(a, b));
        let again: Vec<_> = leads.iter().map(|l| l.id.to_string()).collect();
        assert_eq!(again, ids);
    }
}
