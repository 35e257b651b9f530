//! Set-difference analysis over the two relationship lists.

use std::collections::{BTreeSet, HashSet};

use log::{debug, info, warn};

use crate::collect::{Collection, Collector, EdgeKind};
use crate::config::{Config, BASE_API_HEADERS};
use crate::error_handling::{CollectionFault, RequestStats, ScrapeError};
use crate::fetch::{Endpoints, RequestExecutor, SessionToken};
use crate::initialization::{init_client, init_profile_client};
use crate::resolve::{validate_handle, UserResolver};
use crate::user_agent::IdentityRotator;

/// Result of one analysis run.
///
/// Counts are over distinct usernames; duplicated edges across pages are
/// absorbed by the set operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonFollowerReport {
    /// Handle that was analysed
    pub handle: String,
    /// Its resolved user id
    pub user_id: String,
    /// Distinct followers
    pub followers_count: usize,
    /// Distinct accounts followed
    pub following_count: usize,
    /// Accounts in both lists
    pub mutual: BTreeSet<String>,
    /// Accounts followed that do not follow back
    pub non_followers: BTreeSet<String>,
    /// Lists that stopped early, with the reason
    pub incomplete: Vec<(EdgeKind, CollectionFault)>,
}

impl NonFollowerReport {
    /// Builds a report from the two raw lists.
    pub fn from_lists(
        handle: impl Into<String>,
        user_id: impl Into<String>,
        followers: &[String],
        following: &[String],
    ) -> Self {
        let followers: HashSet<&str> = followers.iter().map(String::as_str).collect();
        let following: HashSet<&str> = following.iter().map(String::as_str).collect();

        let (mutual, non_followers): (BTreeSet<String>, BTreeSet<String>) = following
            .iter()
            .map(|name| name.to_string())
            .partition(|name| followers.contains(name.as_str()));

        Self {
            handle: handle.into(),
            user_id: user_id.into(),
            followers_count: followers.len(),
            following_count: following.len(),
            mutual,
            non_followers,
            incomplete: Vec::new(),
        }
    }

    /// Builds a report from two collections, recording any that stopped early.
    pub fn from_collections(
        handle: impl Into<String>,
        user_id: impl Into<String>,
        followers: &Collection,
        following: &Collection,
    ) -> Self {
        let mut report = Self::from_lists(
            handle,
            user_id,
            &followers.usernames,
            &following.usernames,
        );
        report.incomplete = [followers, following]
            .into_iter()
            .filter_map(|c| c.fault().map(|fault| (c.kind, fault.clone())))
            .collect();
        report
    }

    /// Number of accounts in both lists.
    pub fn mutual_count(&self) -> usize {
        self.mutual.len()
    }

    /// Number of accounts that do not follow back.
    pub fn non_follower_count(&self) -> usize {
        self.non_followers.len()
    }

    /// Non-followers in lexicographic order.
    pub fn sorted_non_followers(&self) -> Vec<String> {
        self.non_followers.iter().cloned().collect()
    }

    /// True when both lists were collected to the last page.
    pub fn is_complete(&self) -> bool {
        self.incomplete.is_empty()
    }
}

/// Runs resolution, both collections and the set difference.
#[derive(Debug)]
pub struct Analyzer {
    executor: RequestExecutor,
    endpoints: Endpoints,
    resolver: UserResolver,
    page_size: u32,
}

impl Analyzer {
    /// Wires up the engine from a configuration and a session credential.
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError::Configuration` for an invalid configuration, an
    /// empty identity pool or an HTTP client that cannot be built, and
    /// `ScrapeError::InvalidUrl` for an unusable base URL.
    pub fn new(config: &Config, session: SessionToken) -> Result<Self, ScrapeError> {
        config
            .validate()
            .map_err(|e| ScrapeError::Configuration(e.to_string()))?;

        let identities = IdentityRotator::new(&config.user_agent_pool(), BASE_API_HEADERS)?;
        debug!("Rotating between {} User-Agents", identities.pool_size());
        let endpoints = Endpoints::from_config(config)?;

        let client = init_client(config)
            .map_err(|e| ScrapeError::Configuration(format!("HTTP client: {e}")))?;
        let profile_client = init_profile_client(config)
            .map_err(|e| ScrapeError::Configuration(format!("HTTP client: {e}")))?;

        let executor = RequestExecutor::new(
            client,
            identities.clone(),
            session,
            config.max_retries,
            config.max_rate_limit_waits,
            config.pacing(),
        );
        let resolver = UserResolver::new(profile_client, identities, endpoints.clone());

        Ok(Self {
            executor,
            endpoints,
            resolver,
            page_size: config.page_size,
        })
    }

    /// Computes the non-follower report for `handle`.
    ///
    /// # Errors
    ///
    /// Fails only when the handle is invalid or cannot be resolved. Collection
    /// faults are recorded in [`NonFollowerReport::incomplete`] instead.
    pub async fn analyze(&self, handle: &str) -> Result<NonFollowerReport, ScrapeError> {
        let handle = validate_handle(handle)?;
        let user_id = self.resolver.resolve(&handle).await?;

        let collector = Collector::new(&self.executor, &self.endpoints, self.page_size);
        let followers = collector.collect(&user_id, EdgeKind::Followers).await?;
        let following = collector.collect(&user_id, EdgeKind::Following).await?;

        let report = NonFollowerReport::from_collections(handle, user_id, &followers, &following);
        info!(
            "Analysis of '{}': {} followers, {} following, {} mutual, {} not following back",
            report.handle,
            report.followers_count,
            report.following_count,
            report.mutual_count(),
            report.non_follower_count()
        );
        if !report.is_complete() {
            warn!("Report for '{}' is based on incomplete lists", report.handle);
        }
        Ok(report)
    }

    /// Counters of every request attempt made by the executor.
    pub fn request_stats(&self) -> &RequestStats {
        self.executor.stats()
    }
}
