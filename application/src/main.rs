use std::{fs, io, sync::OnceLock};

use application::{args::Command, seed, Args, Config, Service};
use common::pagination;
use serde::Serialize;
use service::{infra::Memory, query, read, Query as _};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args { config, command } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        data,
        pagination: page_conf,
        log,
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let page_size =
        pagination::Size::new(page_conf.page_size).map_err(|e| {
            log::error!("invalid `pagination.page_size`: {e}");
        })?;

    let snapshot = match &data.snapshot {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|e| {
                log::error!("failed to read snapshot `{path}`: {e}");
            })?;
            serde_json::from_str(&raw).map_err(|e| {
                log::error!("failed to parse snapshot `{path}`: {e}");
            })?
        }
        None => seed::snapshot().map_err(|e| {
            log::error!("failed to parse the built-in snapshot: {e}");
        })?,
    };

    let service = Service::new(
        service::Config {
            default_page_size: page_size,
        },
        Memory::new(snapshot),
    );

    match command {
        Command::Leads {
            page,
            count,
            sort_by,
            order,
            filter,
        } => {
            let filter: read::lead::list::Filter = filter.into();
            if count {
                let total = service
                    .execute(query::leads::TotalCount::by(filter))
                    .await
                    .map_err(|e| log::error!("failed to count leads: {e}"))?;
                println!("{}", usize::from(total));
                Ok(())
            } else {
                let selector = read::lead::list::Selector {
                    request: pagination::Request::new(
                        page,
                        service.config().default_page_size,
                    ),
                    filter,
                    sorting: sort_by.map(|field| read::lead::Sorting {
                        field,
                        order: order.unwrap_or(pagination::Order::Ascending),
                    }),
                };
                let page = service
                    .execute(query::leads::List::by(selector))
                    .await
                    .map_err(|e| log::error!("failed to list leads: {e}"))?;
                print(&page)
            }
        }

        Command::Facets => {
            let facets = service
                .execute(query::leads::Facets::by(()))
                .await
                .map_err(|e| log::error!("failed to query facets: {e}"))?;
            print(&facets)
        }

        Command::Lead { id } => {
            let lead = service
                .execute(query::lead::ById::by(id))
                .await
                .map_err(|e| log::error!("failed to query the lead: {e}"))?;
            print(&lead)
        }

        Command::Jobs { page } => {
            let selector = read::import::list::Selector {
                request: pagination::Request::new(
                    page,
                    service.config().default_page_size,
                ),
                filter: (),
                sorting: (),
            };
            let page = service
                .execute(query::import_jobs::List::by(selector))
                .await
                .map_err(|e| {
                    log::error!("failed to list import jobs: {e}");
                })?;
            print(&page)
        }

        Command::Errors { job } => {
            let errors = service
                .execute(query::import_errors::ForJob::by(job))
                .await
                .map_err(|e| {
                    log::error!("failed to fetch the error report: {e}");
                })?;
            print(&errors)
        }
    }
}

/// Renders the given `value` as pretty-printed JSON onto stdout.
fn print<T: Serialize>(value: &T) -> Result<(), ()> {
    serde_json::to_string_pretty(value)
        .map(|rendered| println!("{rendered}"))
        .map_err(|e| log::error!("failed to render the response: {e}"))
}
