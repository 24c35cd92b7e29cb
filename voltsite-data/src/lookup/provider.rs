//! HTTP-based `PoiLookup` using the Overpass API.
//!
//! The [`PoiLookup`] trait is synchronous so the planner stays embeddable in
//! synchronous contexts. This adapter bridges the async HTTP call to the
//! sync interface by blocking on a Tokio runtime.

use std::time::Duration;

use reqwest::Client;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;
use voltsite_core::{GeoPoint, PoiLookup, PoiLookupError, Site};

use super::overpass::{OverpassResponse, fuel_station_query};

/// Error type for [`OverpassPoiLookup`] construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// The endpoint was not an absolute HTTP(S) URL.
    InvalidEndpoint(url::ParseError),
    /// The endpoint used a scheme other than `http` or `https`.
    UnsupportedScheme(String),
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEndpoint(err) => write!(f, "invalid Overpass endpoint: {err}"),
            Self::UnsupportedScheme(scheme) => {
                write!(f, "unsupported Overpass endpoint scheme {scheme:?}")
            }
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidEndpoint(err) => Some(err),
            Self::UnsupportedScheme(_) => None,
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Public Overpass interpreter.
pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Default user agent for Overpass requests.
pub const DEFAULT_USER_AGENT: &str = "voltsite-overpass/0.1";

/// Matches the query's own `[timeout:25]` budget.
const DEFAULT_TIMEOUT_SECS: u64 = 25;

/// Configuration for [`OverpassPoiLookup`].
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Interpreter endpoint, e.g. `"https://overpass-api.de/api/interpreter"`.
    pub endpoint: String,
    /// Request timeout; also sent as the query's server-side timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OverpassConfig {
    /// Create a configuration for the given endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Fuel-station lookup against an Overpass API endpoint.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the lookup blocks on its own current-thread
/// runtime. Inside a multi-threaded runtime (detected with
/// [`Handle::try_current()`]) it uses that runtime's handle with
/// [`tokio::task::block_in_place`]. A `current_thread` runtime cannot be
/// blocked from within, so there the request runs on the owned runtime from a
/// scoped helper thread while the caller's thread waits.
pub struct OverpassPoiLookup {
    client: Client,
    endpoint: Url,
    config: OverpassConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for OverpassPoiLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverpassPoiLookup")
            .field("endpoint", &self.endpoint.as_str())
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl OverpassPoiLookup {
    /// Create a lookup for `endpoint` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OverpassConfig::new(endpoint))
    }

    /// Create a lookup with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: OverpassConfig) -> Result<Self, ProviderBuildError> {
        let endpoint = Url::parse(&config.endpoint).map_err(ProviderBuildError::InvalidEndpoint)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ProviderBuildError::UnsupportedScheme(
                endpoint.scheme().to_owned(),
            ));
        }
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            endpoint,
            config,
            runtime,
        })
    }

    /// The validated endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn query(&self, center: GeoPoint, radius_meters: u32) -> String {
        fuel_station_query(center, radius_meters, self.config.timeout.as_secs().max(1))
    }

    async fn fetch_sites_async(
        &self,
        center: GeoPoint,
        radius_meters: u32,
    ) -> Result<Vec<Site>, PoiLookupError> {
        let url = self.endpoint.as_str();
        let response = self
            .client
            .post(self.endpoint.clone())
            .body(self.query(center, radius_meters))
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        let body: OverpassResponse =
            response
                .json()
                .await
                .map_err(|err| PoiLookupError::Parse {
                    message: err.to_string(),
                })?;
        let sites = body.into_sites();
        log::debug!(
            "Overpass returned {} sites within {radius_meters} m of ({}, {})",
            sites.len(),
            center.lat(),
            center.lng()
        );
        Ok(sites)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> PoiLookupError {
        if error.is_timeout() {
            return PoiLookupError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return PoiLookupError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        if error.is_decode() {
            return PoiLookupError::Parse {
                message: error.to_string(),
            };
        }
        PoiLookupError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl PoiLookup for OverpassPoiLookup {
    fn find_sites(
        &self,
        center: GeoPoint,
        radius_meters: u32,
    ) -> Result<Vec<Site>, PoiLookupError> {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| {
                    handle.block_on(self.fetch_sites_async(center, radius_meters))
                })
            }
            // Nested block_on panics on a runtime thread.
            Ok(_) => std::thread::scope(|scope| {
                scope
                    .spawn(|| {
                        self.runtime
                            .block_on(self.fetch_sites_async(center, radius_meters))
                    })
                    .join()
                    .unwrap_or_else(|_| {
                        Err(PoiLookupError::Network {
                            url: self.endpoint.to_string(),
                            message: "lookup thread panicked".to_owned(),
                        })
                    })
            }),
            Err(_) => self
                .runtime
                .block_on(self.fetch_sites_async(center, radius_meters)),
        }
    }
}
