//! [`Args`] definitions.

use clap::{Parser, Subcommand, ValueEnum};
use service::{
    domain::{import, lead},
    read,
};

/// Command line interface of the lead management system.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// [`Command`] to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to execute.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lists leads, optionally filtered and sorted.
    Leads {
        /// 1-based number of the page to list.
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Print the total count of matching leads instead of a page.
        #[arg(long)]
        count: bool,

        /// Field to sort the leads by (e.g. `NAME`, `UPDATED_AT`).
        #[arg(long)]
        sort_by: Option<read::lead::Field>,

        /// Order to sort the leads in (`ASCENDING` or `DESCENDING`).
        #[arg(long)]
        order: Option<common::pagination::Order>,

        /// Filtering arguments.
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Prints the distinct reasons and origins of the lead collection.
    Facets,

    /// Prints a single lead by its ID.
    Lead {
        /// ID of the lead to print.
        id: lead::Id,
    },

    /// Lists import jobs.
    Jobs {
        /// 1-based number of the page to list.
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Prints the error report of a finished import job.
    Errors {
        /// ID of the import job to print the error report of.
        job: import::Id,
    },
}

/// Filtering arguments of [`Command::Leads`].
#[derive(Debug, Default, clap::Args)]
pub struct FilterArgs {
    /// Free-text term searched across names, CPFs and phone numbers.
    #[arg(long)]
    pub search: Option<String>,

    /// Eligibility to select by.
    #[arg(long, value_enum)]
    pub eligibility: Option<EligibilityArg>,

    /// Signed contracts bucket to select by.
    #[arg(long, value_enum)]
    pub contracts: Option<ContractsArg>,

    /// Reasons to select by, any of them matching.
    #[arg(long)]
    pub reason: Vec<lead::Reason>,

    /// Origins to select by, any of them matching.
    #[arg(long)]
    pub origin: Vec<lead::Origin>,

    /// Bulk list of CPFs, separated by commas, semicolons or newlines.
    #[arg(long)]
    pub cpfs: Option<String>,

    /// Bulk list of names, separated by commas, semicolons or newlines.
    #[arg(long)]
    pub names: Option<String>,

    /// Bulk list of phone numbers, separated by commas, semicolons or
    /// newlines.
    #[arg(long)]
    pub phones: Option<String>,

    /// Earliest last update date to select by, as `DD/MM/YYYY`.
    #[arg(long)]
    pub updated_from: Option<lead::UpdateDate>,

    /// Latest last update date to select by, as `DD/MM/YYYY`.
    #[arg(long)]
    pub updated_to: Option<lead::UpdateDate>,

    /// Earliest contract signing date to select by, as `DD/MM/YYYY`.
    #[arg(long)]
    pub signed_from: Option<lead::SigningDate>,

    /// Latest contract signing date to select by, as `DD/MM/YYYY`.
    #[arg(long)]
    pub signed_to: Option<lead::SigningDate>,
}

impl From<FilterArgs> for read::lead::list::Filter {
    fn from(value: FilterArgs) -> Self {
        let FilterArgs {
            search,
            eligibility,
            contracts,
            reason,
            origin,
            cpfs,
            names,
            phones,
            updated_from,
            updated_to,
            signed_from,
            signed_to,
        } = value;

        Self {
            search: search.and_then(read::lead::Search::new),
            eligibility: eligibility.map(Into::into).unwrap_or_default(),
            contracts: contracts.map(Into::into).unwrap_or_default(),
            reasons: reason.into_iter().collect(),
            origins: origin.into_iter().collect(),
            cpfs: cpfs
                .as_deref()
                .map(read::lead::CpfList::parse)
                .unwrap_or_default(),
            names: names
                .as_deref()
                .map(read::lead::NameList::parse)
                .unwrap_or_default(),
            phones: phones
                .as_deref()
                .map(read::lead::PhoneList::parse)
                .unwrap_or_default(),
            updated: common::date::Range::new(updated_from, updated_to),
            signed: common::date::Range::new(signed_from, signed_to),
        }
    }
}

/// Eligibility selector argument.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum EligibilityArg {
    /// Any lead, regardless of its eligibility.
    All,

    /// Eligible leads only.
    Eligible,

    /// Ineligible leads only.
    Ineligible,
}

impl From<EligibilityArg> for read::lead::EligibilitySelector {
    fn from(value: EligibilityArg) -> Self {
        match value {
            EligibilityArg::All => Self::All,
            EligibilityArg::Eligible => Self::EligibleOnly,
            EligibilityArg::Ineligible => Self::IneligibleOnly,
        }
    }
}

/// Signed contracts bucket argument.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ContractsArg {
    /// Any lead, regardless of its contracts.
    All,

    /// Leads having signed 3 or more contracts.
    ThreeOrMore,

    /// Leads having signed fewer than 3 contracts.
    FewerThanThree,
}

impl From<ContractsArg> for read::lead::ContractBucket {
    fn from(value: ContractsArg) -> Self {
        match value {
            ContractsArg::All => Self::All,
            ContractsArg::ThreeOrMore => Self::ThreeOrMore,
            ContractsArg::FewerThanThree => Self::FewerThanThree,
        }
    }
}
