//! Paginated dataset fetcher
//!
//! Main page-walk loop.
//!
//! # Overview
//!
//! `DatasetFetcher` sends the query's fixed parameters plus `page=<n>` to the
//! endpoint, one request at a time, and merges every page into a [`Dataset`]:
//!
//! - status >= 400 aborts the whole fetch with `Error::Request`
//! - status 204 ends the walk successfully
//! - JSON pages end the walk when `pagination.next` is null
//! - CSV pages always advance, so a CSV walk ends on a 204

mod types;

pub use types::{Dataset, FetchStats, CSV_PAGE_SEPARATOR};

use crate::config::FetcherConfig;
use crate::decode::decoder_for;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{paginator_for, PaginationState};
use crate::query::{default_structure, Filters, Query, Structure};
use crate::types::{Record, ResponseFormat};
use reqwest::StatusCode;
use std::time::Instant;
use tracing::{debug, info};
use types::DatasetBuilder;

/// Public data endpoint of the UK coronavirus dashboard API
pub const DEFAULT_ENDPOINT: &str = "https://api.coronavirus.data.gov.uk/v1/data";

/// Fetches every page of a query and aggregates the result
#[derive(Debug, Clone)]
pub struct DatasetFetcher {
    /// HTTP client
    client: HttpClient,
    /// Dataset endpoint
    endpoint: String,
}

impl DatasetFetcher {
    /// Create a fetcher for the public endpoint with default settings
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(HttpClient::new()?, DEFAULT_ENDPOINT))
    }

    /// Create a fetcher from an existing client
    pub fn with_client(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Create a fetcher from configuration
    pub fn from_config(config: &FetcherConfig) -> Result<Self> {
        let client = HttpClient::with_config(config.http_config())?;
        Ok(Self::with_client(client, config.endpoint.clone()))
    }

    /// Get the dataset endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get the HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Fetch every page of `query`
    pub async fn fetch(&self, query: &Query) -> Result<Dataset> {
        let (dataset, _) = self.fetch_with_stats(query).await?;
        Ok(dataset)
    }

    /// Fetch every page of `query`, also reporting request and page counts.
    ///
    /// Any error discards the pages merged so far.
    pub async fn fetch_with_stats(&self, query: &Query) -> Result<(Dataset, FetchStats)> {
        let start = Instant::now();
        let fixed_params = query.params()?;
        let decoder = decoder_for(query.format);
        let paginator = paginator_for(query.format);

        let mut state = PaginationState::new();
        let mut builder = DatasetBuilder::new(query.format);
        let mut stats = FetchStats::new();

        debug!(
            "Fetching {} dataset from {} (filters: {})",
            query.format,
            self.endpoint,
            query.filters.joined()
        );

        loop {
            let request = RequestConfig::new()
                .queries(fixed_params.iter().cloned())
                .queries(paginator.page_params(&state));

            let response = self.client.get_with_config(&self.endpoint, request).await?;
            stats.add_request();

            if response.status() == StatusCode::NO_CONTENT {
                debug!("Page {}: no content, stopping", state.page);
                paginator.no_content(&mut state);
                break;
            }

            let body = self.client.text(response).await?;
            let page = decoder.decode(&body, state.page)?;
            let page_len = page.len();
            debug!("Page {}: fetched {page_len} records", state.page);

            let next = paginator.process_page(&page, &mut state);
            builder.push(page)?;

            if next.is_done() {
                break;
            }
        }

        stats.record_pagination(&state);
        stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            "Fetched {} records in {} pages ({} requests)",
            stats.records, stats.pages, stats.requests
        );

        Ok((builder.finish(), stats))
    }

    /// Fetch with the `as_csv` switch selecting the body format
    pub async fn get_paginated_dataset(
        &self,
        filters: impl Into<Filters>,
        structure: Structure,
        as_csv: bool,
    ) -> Result<Dataset> {
        let query = Query::new(filters, structure).with_format(ResponseFormat::from_csv_flag(as_csv));
        self.fetch(&query).await
    }

    /// Fetch every JSON page and return the merged records
    pub async fn fetch_json(
        &self,
        filters: impl Into<Filters>,
        structure: Structure,
    ) -> Result<Vec<Record>> {
        self.get_paginated_dataset(filters, structure, false)
            .await?
            .into_records()
    }

    /// Fetch every CSV page and return the merged text
    pub async fn fetch_csv(&self, filters: impl Into<Filters>, structure: Structure) -> Result<String> {
        self.get_paginated_dataset(filters, structure, true)
            .await?
            .into_csv()
    }

    /// JSON fetch defaulting to `areaType=region` and the default structure
    pub async fn get_latest_data(
        &self,
        filters: Option<Filters>,
        structure: Option<Structure>,
    ) -> Result<Vec<Record>> {
        let filters = filters.unwrap_or_else(Filters::default_region);
        let structure = structure.unwrap_or_else(|| default_structure().clone());
        self.fetch_json(filters, structure).await
    }
}
