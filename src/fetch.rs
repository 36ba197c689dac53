use log::{debug, info};
use rayon::prelude::*;
use reqwest::blocking::Client;
use reqwest::{Method, header};
use serde_json::Value;

use crate::error::{Result, TopLangsError};
use crate::repolist::{ApiError, LanguagesResponse, ListingResponse, RepoDescriptor};
use crate::totals::RawTotals;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const PAGE_SIZE: usize = 100;

const USER_AGENT: &str = concat!("top_langs/", env!("CARGO_PKG_VERSION"));

/// Issues a single authenticated-or-not GET and hands back the decoded body.
pub trait Transport: Sync {
    fn get(&self, url: &str, credential: Option<&str>) -> Result<Value>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, credential: Option<&str>) -> Result<Value> {
        let mut request = self
            .client
            .request(Method::GET, url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = credential {
            request = request.header(header::AUTHORIZATION, format!("token {token}"));
        }

        let resp = request
            .send()
            .map_err(|e| TopLangsError::Remote(format!("request to {url} failed: {e}")))?;
        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| TopLangsError::Remote(format!("reading {url} failed: {e}")))?;

        if !status.is_success() {
            // GitHub explains most failures with a `{"message": ...}` body.
            return Err(match serde_json::from_str::<ApiError>(&body) {
                Ok(api) => TopLangsError::Remote(api.message),
                Err(_) => TopLangsError::Remote(format!("{url} returned {status}")),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| TopLangsError::Remote(format!("invalid JSON from {url}: {e}")))
    }
}

fn overflow() -> TopLangsError {
    TopLangsError::Remote("language byte counts overflow a u64".to_string())
}

/// Walks a user's repository listing and sums every repository's language
/// breakdown.
pub struct Fetcher<T> {
    transport: T,
    api_base: String,
    workers: usize,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            api_base: DEFAULT_API_BASE.to_string(),
            workers: 1,
        }
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// More than one worker fans language requests for a page out over a
    /// bounded thread pool.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn fetch_totals(&self, identity: &str, credential: Option<&str>) -> Result<RawTotals> {
        let pool = if self.workers > 1 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(self.workers)
                    .build()
                    .map_err(|e| {
                        TopLangsError::Config(format!(
                            "could not start {} fetch workers: {e}",
                            self.workers
                        ))
                    })?,
            )
        } else {
            None
        };

        let mut totals = RawTotals::new();
        let mut page = 1;
        loop {
            let repos = self.list_page(identity, credential, page)?;
            if repos.is_empty() {
                break;
            }
            info!("Page {page}: {} repositories", repos.len());

            let page_totals = match &pool {
                Some(pool) => pool.install(|| {
                    repos
                        .par_iter()
                        .map(|repo| self.fetch_languages(repo, credential))
                        .try_reduce(RawTotals::new, |mut acc, part| {
                            acc.checked_merge(part).ok_or_else(overflow)?;
                            Ok(acc)
                        })
                })?,
                None => {
                    let mut acc = RawTotals::new();
                    for repo in &repos {
                        acc.checked_merge(self.fetch_languages(repo, credential)?)
                            .ok_or_else(overflow)?;
                    }
                    acc
                }
            };
            totals.checked_merge(page_totals).ok_or_else(overflow)?;
            page += 1;
        }

        info!(
            "Fetched {} languages ({} bytes) for {identity}",
            totals.len(),
            totals.total()
        );
        Ok(totals)
    }

    fn list_page(
        &self,
        identity: &str,
        credential: Option<&str>,
        page: usize,
    ) -> Result<Vec<RepoDescriptor>> {
        let url = format!(
            "{}/users/{identity}/repos?per_page={PAGE_SIZE}&page={page}",
            self.api_base
        );
        debug!("GET {url}");
        let body = self.transport.get(&url, credential)?;
        match serde_json::from_value::<ListingResponse>(body) {
            Ok(ListingResponse::Repos(repos)) => Ok(repos),
            Ok(ListingResponse::Error(err)) => Err(TopLangsError::Remote(err.message)),
            Err(e) => Err(TopLangsError::Remote(format!(
                "unexpected repository listing from {url}: {e}"
            ))),
        }
    }

    fn fetch_languages(&self, repo: &RepoDescriptor, credential: Option<&str>) -> Result<RawTotals> {
        debug!("Fetching languages for {}", repo.full_name);
        let body = self.transport.get(&repo.languages_url, credential)?;
        match serde_json::from_value::<LanguagesResponse>(body) {
            Ok(LanguagesResponse::Languages(langs)) => Ok(langs),
            Ok(LanguagesResponse::Error(err)) => Err(TopLangsError::Remote(format!(
                "{}: {}",
                repo.full_name, err.message
            ))),
            Err(e) => Err(TopLangsError::Remote(format!(
                "unexpected language breakdown for {}: {e}",
                repo.full_name
            ))),
        }
    }
}
