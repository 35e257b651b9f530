//! Paginated relationship collection.
//!
//! Drives cursor-based pagination over one relationship edge until the API
//! reports the last page. Any fault along the way stops the walk but keeps
//! what was gathered: a truncated list is still useful for the report.

mod page;

use log::{error, info, warn};
use strum_macros::EnumIter;

use crate::error_handling::{CollectionFault, ScrapeError};
use crate::fetch::{Endpoints, RequestExecutor};

pub use page::EdgePage;

/// The two relationship directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
pub enum EdgeKind {
    /// Accounts following the user
    Followers,
    /// Accounts the user follows
    Following,
}

impl EdgeKind {
    /// Key of this edge's collection in the GraphQL user object.
    pub fn edge_key(&self) -> &'static str {
        match self {
            EdgeKind::Followers => "edge_followed_by",
            EdgeKind::Following => "edge_follow",
        }
    }

    /// Lowercase name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Followers => "followers",
            EdgeKind::Following => "following",
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a collection ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionOutcome {
    /// The API reported the last page
    Complete,
    /// Pagination stopped early; the list holds everything before the fault
    Partial(CollectionFault),
}

/// A relationship list for one edge, in page arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    /// Edge that was walked
    pub kind: EdgeKind,
    /// Usernames in arrival order, duplicates included
    pub usernames: Vec<String>,
    /// Pages successfully consumed
    pub pages: usize,
    /// Whether the walk finished or stopped on a fault
    pub outcome: CollectionOutcome,
}

impl Collection {
    /// True when every page was fetched.
    pub fn is_complete(&self) -> bool {
        self.outcome == CollectionOutcome::Complete
    }

    /// The fault that cut the walk short, if any.
    pub fn fault(&self) -> Option<&CollectionFault> {
        match &self.outcome {
            CollectionOutcome::Complete => None,
            CollectionOutcome::Partial(fault) => Some(fault),
        }
    }
}

/// Walks relationship edges page by page through a [`RequestExecutor`].
pub struct Collector<'a> {
    executor: &'a RequestExecutor,
    endpoints: &'a Endpoints,
    page_size: u32,
}

impl<'a> Collector<'a> {
    /// Creates a collector requesting `page_size` edges per page.
    pub fn new(executor: &'a RequestExecutor, endpoints: &'a Endpoints, page_size: u32) -> Self {
        Self {
            executor,
            endpoints,
            page_size,
        }
    }

    /// Collects every username on `kind` for `user_id`.
    ///
    /// Request failures and malformed pages end the walk with
    /// [`CollectionOutcome::Partial`]; they are logged, not returned as errors.
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError::InvalidUrl` only if a page URL cannot be built,
    /// which means the endpoints were misconfigured.
    pub async fn collect(&self, user_id: &str, kind: EdgeKind) -> Result<Collection, ScrapeError> {
        let mut cursor = String::new();
        let mut usernames: Vec<String> = Vec::new();
        let mut pages = 0usize;

        info!("Collecting {kind} for user id {user_id}");

        let outcome = loop {
            let url = self
                .endpoints
                .edge_page_url(kind, user_id, self.page_size, &cursor)?;

            let body = match self.executor.fetch(url.as_str()).await {
                Ok(body) => body,
                Err(e) => {
                    error!("Stopping {kind} collection after {pages} pages: {e}");
                    break CollectionOutcome::Partial(CollectionFault::RequestFailed(
                        e.to_string(),
                    ));
                }
            };

            let page = match EdgePage::parse(&body, kind) {
                Ok(page) => page,
                Err(fault) => {
                    error!(
                        "Stopping {kind} collection after {pages} pages: {fault} (page {})",
                        pages + 1
                    );
                    break CollectionOutcome::Partial(fault);
                }
            };

            pages += 1;
            let added = page.usernames.len();
            usernames.extend(page.usernames);
            info!(
                "{kind} page {pages}: +{added} accounts (total {})",
                usernames.len()
            );

            if !page.has_next_page {
                break CollectionOutcome::Complete;
            }
            if page.end_cursor.is_empty() || page.end_cursor == cursor {
                warn!(
                    "{kind} page {pages} reports more pages but the cursor did not advance ('{}')",
                    page.end_cursor
                );
                break CollectionOutcome::Partial(CollectionFault::StalledCursor(page.end_cursor));
            }
            cursor = page.end_cursor;
        };

        match &outcome {
            CollectionOutcome::Complete => {
                info!("Collected {} {kind} in {pages} pages", usernames.len())
            }
            CollectionOutcome::Partial(fault) => warn!(
                "{kind} list is incomplete ({} accounts in {pages} pages): {fault}",
                usernames.len()
            ),
        }

        Ok(Collection {
            kind,
            usernames,
            pages,
            outcome,
        })
    }
}
