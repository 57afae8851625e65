//! In-memory [`Store`] implementation.

use common::{
    operations::{By, Select},
    pagination,
};
use derive_more::{Display, Error as StdError};
use itertools::Itertools as _;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{import, lead, ImportError, ImportJob, Lead},
    infra::{self, Store},
    read,
};

/// In-memory [`Store`] holding a fixed collection of records.
///
/// Loaded once from a [`Snapshot`] and never mutated afterwards, which makes
/// every operation on it a pure function of the snapshot.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// [`Lead`]s of this [`Memory`] store, in their input order.
    leads: Vec<Lead>,

    /// [`ImportJob`]s of this [`Memory`] store, in their input order.
    jobs: Vec<ImportJob>,

    /// [`ImportError`]s of this [`Memory`] store.
    errors: Vec<ImportError>,
}

impl Memory {
    /// Creates a new [`Memory`] store out of the provided [`Snapshot`].
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            leads: snapshot.leads,
            jobs: snapshot.import_jobs,
            errors: snapshot.import_errors,
        }
    }
}

/// Serialized contents of a [`Memory`] store.
#[derive(Clone, Debug, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Snapshot {
    /// [`Lead`]s to load.
    #[cfg_attr(feature = "serde", serde(default))]
    pub leads: Vec<Lead>,

    /// [`ImportJob`]s to load.
    #[cfg_attr(feature = "serde", serde(default))]
    pub import_jobs: Vec<ImportJob>,

    /// [`ImportError`]s to load.
    #[cfg_attr(feature = "serde", serde(default))]
    pub import_errors: Vec<ImportError>,
}

/// [`Memory`] store error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// No [`ImportJob`] with the requested ID exists.
    #[display("no import job `{_0}` exists")]
    UnknownJob(#[error(not(source))] import::Id),

    /// The requested [`ImportJob`] hasn't finished yet, so its error report
    /// cannot be fetched.
    #[display("error report of import job `{_0}` is not ready yet")]
    ReportNotReady(#[error(not(source))] import::Id),
}

impl Store<Select<By<read::lead::list::Page, read::lead::list::Selector>>>
    for Memory
{
    type Ok = read::lead::list::Page;
    type Err = Traced<infra::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::lead::list::Page, read::lead::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();

        let mut leads: Vec<Lead> = self
            .leads
            .iter()
            .filter(|l| selector.filter.matches(l))
            .cloned()
            .collect();
        if let Some(sorting) = selector.sorting {
            // `sort_by` is stable: equal leads keep their input order.
            leads.sort_by(|a, b| sorting.compare(a, b));
        }

        log::debug!(
            matched = leads.len(),
            page = selector.request.number,
            "leads selected",
        );

        Ok(pagination::Page::paginate(leads, selector.request))
    }
}

impl Store<Select<By<read::lead::list::TotalCount, read::lead::list::Filter>>>
    for Memory
{
    type Ok = read::lead::list::TotalCount;
    type Err = Traced<infra::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::lead::list::TotalCount, read::lead::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();
        Ok(self.leads.iter().filter(|l| filter.matches(l)).count().into())
    }
}

impl Store<Select<By<Option<Lead>, lead::Id>>> for Memory {
    type Ok = Option<Lead>;
    type Err = Traced<infra::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Lead>, lead::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.leads.iter().find(|l| l.id == id).cloned())
    }
}

impl Store<Select<By<read::lead::Facets, ()>>> for Memory {
    type Ok = read::lead::Facets;
    type Err = Traced<infra::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::lead::Facets, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(read::lead::Facets {
            reasons: self
                .leads
                .iter()
                .map(|l| l.reason.clone())
                .unique()
                .sorted()
                .collect(),
            origins: self
                .leads
                .iter()
                .map(|l| l.origin.clone())
                .unique()
                .sorted()
                .collect(),
        })
    }
}

impl Store<Select<By<read::import::list::Page, read::import::list::Selector>>>
    for Memory
{
    type Ok = read::import::list::Page;
    type Err = Traced<infra::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::import::list::Page, read::import::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();
        Ok(pagination::Page::paginate(
            self.jobs.clone(),
            selector.request,
        ))
    }
}

impl Store<Select<By<read::import::list::TotalCount, ()>>> for Memory {
    type Ok = read::import::list::TotalCount;
    type Err = Traced<infra::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::import::list::TotalCount, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.jobs.len().into())
    }
}

impl Store<Select<By<Vec<ImportError>, import::Id>>> for Memory {
    type Ok = Vec<ImportError>;
    type Err = Traced<infra::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<ImportError>, import::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let job_id = by.into_inner();

        let job = self
            .jobs
            .iter()
            .find(|j| j.id == job_id)
            .ok_or_else(|| tracerr::new!(Error::UnknownJob(job_id)))
            .map_err(tracerr::map_from)?;
        if !job.report_ready() {
            return Err(tracerr::new!(Error::ReportNotReady(job_id)))
                .map_err(tracerr::map_from);
        }

        Ok(self
            .errors
            .iter()
            .filter(|e| e.job_id == job_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod spec {
    use common::{pagination, Money};
    use rust_decimal::Decimal;

    use crate::{
        domain::{import, lead, ImportError, ImportJob, Lead},
        infra::{self, Store as _},
        read,
    };

    use super::{Error, Memory, Snapshot};

    fn lead(n: usize) -> Lead {
        Lead {
            id: lead::Id::new(n.to_string()).unwrap(),
            cpf: lead::Cpf::new(format!("{n:03}.000.000-00")).unwrap(),
            name: lead::Name::new(format!("Lead {n:02}")).unwrap(),
            phones: vec![],
            temperature: lead::Temperature::Cold,
            eligibility: if n % 2 == 0 {
                lead::Eligibility::Eligible
            } else {
                lead::Eligibility::Ineligible
            },
            reason: lead::Reason::new(if n % 2 == 0 {
                "Apto"
            } else {
                "Saldo insuficiente"
            })
            .unwrap(),
            origin: lead::Origin::new("Internal System").unwrap(),
            balance: Money::brl(Decimal::new(1000, 2)),
            released: Money::brl(Decimal::new(500, 2)),
            updated_at: "15/12/2024".parse().unwrap(),
            birth_date: None,
            contracts: vec![],
            import_history: vec![],
        }
    }

    fn job(id: i64, status: import::Status) -> ImportJob {
        ImportJob {
            id: id.into(),
            file_name: import::FileName::new(format!("batch_{id}.csv"))
                .unwrap(),
            kind: import::Kind::Registration,
            status,
            error_count: 2.into(),
            finished_at: None,
            imported_by: import::UserName::new("Maria Santos").unwrap(),
        }
    }

    fn store() -> Memory {
        Memory::new(Snapshot {
            leads: (1..=10).map(lead).collect(),
            import_jobs: vec![
                job(1, import::Status::Completed),
                job(2, import::Status::InProgress),
            ],
            import_errors: vec![
                ImportError {
                    id: 1.into(),
                    job_id: 1.into(),
                    row: 4.into(),
                    column: import::ColumnName::new("cpf").unwrap(),
                    message: "CPF inválido".to_owned().into(),
                },
                ImportError {
                    id: 2.into(),
                    job_id: 1.into(),
                    row: 9.into(),
                    column: import::ColumnName::new("telefone").unwrap(),
                    message: "Telefone em branco".to_owned().into(),
                },
            ],
        })
    }

    fn selector(number: usize) -> read::lead::list::Selector {
        read::lead::list::Selector {
            request: pagination::Request::new(
                number,
                pagination::Size::new(8).unwrap(),
            ),
            filter: read::lead::list::Filter::default(),
            sorting: None,
        }
    }

    #[tokio::test]
    async fn paginates_leads_in_input_order() {
        let store = store();

        let first = store.execute(query(selector(1))).await.unwrap();
        assert_eq!(first.total_count, 10);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.len(), 8);
        assert_eq!(first.nodes[0].id.to_string(), "1");

        let second = store.execute(query(selector(2))).await.unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second.nodes[0].id.to_string(), "9");
    }

    #[tokio::test]
    async fn filtered_page_agrees_with_total_count() {
        let store = store();

        let filter = read::lead::list::Filter {
            eligibility: read::lead::EligibilitySelector::EligibleOnly,
            ..read::lead::list::Filter::default()
        };

        let page: read::lead::list::Page = store
            .execute(query(read::lead::list::Selector {
                filter: filter.clone(),
                ..selector(1)
            }))
            .await
            .unwrap();
        let count: read::lead::list::TotalCount =
            store.execute(query(filter)).await.unwrap();

        assert_eq!(page.total_count, usize::from(count));
        assert_eq!(page.total_count, 5);
        assert!(page
            .nodes
            .iter()
            .all(|l| l.eligibility == lead::Eligibility::Eligible));
    }

    #[tokio::test]
    async fn finds_lead_by_id() {
        let store = store();

        let found: Option<Lead> = store
            .execute(query(lead::Id::new("7").unwrap()))
            .await
            .unwrap();
        assert_eq!(found.unwrap().id.to_string(), "7");

        let missing: Option<Lead> = store
            .execute(query(lead::Id::new("42").unwrap()))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn facets_are_distinct_and_sorted() {
        let store = store();

        let facets = store
            .execute(query::<read::lead::Facets, _>(()))
            .await
            .unwrap();

        assert_eq!(
            facets.reasons.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["Apto", "Saldo insuficiente"],
        );
        assert_eq!(
            facets.origins.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["Internal System"],
        );
    }

    #[tokio::test]
    async fn lists_import_jobs() {
        let store = store();

        let page: read::import::list::Page = store
            .execute(query(read::import::list::Selector {
                request: pagination::Request::first(
                    pagination::Size::new(8).unwrap(),
                ),
                filter: (),
                sorting: (),
            }))
            .await
            .unwrap();

        assert_eq!(page.total_count, 2);
        assert_eq!(page.nodes[0].id, 1.into());

        let total = store
            .execute(query::<read::import::list::TotalCount, _>(()))
            .await
            .unwrap();
        assert_eq!(usize::from(total), 2);
    }

    #[tokio::test]
    async fn fetches_error_report_of_a_finished_job() {
        let store = store();

        let errors: Vec<ImportError> = store
            .execute(query(import::Id::from(1)))
            .await
            .unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(u32::from(errors[0].row), 4);
    }

    #[tokio::test]
    async fn refuses_error_report_of_an_unknown_job() {
        let store = store();

        let result: Result<Vec<ImportError>, _> =
            store.execute(query(import::Id::from(99))).await;
        assert!(matches!(
            result.unwrap_err().as_ref(),
            infra::Error::Memory(Error::UnknownJob(_)),
        ));
    }

    #[tokio::test]
    async fn refuses_error_report_of_a_running_job() {
        let store = store();

        let result: Result<Vec<ImportError>, _> =
            store.execute(query(import::Id::from(2))).await;
        assert!(matches!(
            result.unwrap_err().as_ref(),
            infra::Error::Memory(Error::ReportNotReady(_)),
        ));
    }

    fn query<W, B>(
        by: B,
    ) -> common::operations::Select<common::operations::By<W, B>> {
        common::operations::Select(common::operations::By::new(by))
    }
}
