use crate::core::errors::{Error, Result};
use crate::core::filter::Filter;
use crate::core::ip_ranges::IpRanges;
use crate::core::json::{self, RangeDocument};
use log::{debug, info, warn};
use reqwest::StatusCode;
use std::env;
use std::{thread, time};

/*-------------------------------------------------------------------------------------------------
  Simple Interface
-------------------------------------------------------------------------------------------------*/

/// _**Simple library interface**_ retrieves the Atlassian IP Ranges using the default client
/// configuration and returns the inbound (`ingress`) CIDR blocks for Confluence and Jira.
///
/// ```no_run
/// let ip_ranges = atlassianipranges::get_ranges()?;
///
/// println!("Sync Token: {}", ip_ranges.id());
/// for cidr in ip_ranges.ipv4_cidr_blocks() {
///     println!("{cidr}");
/// }
/// # Ok::<(), atlassianipranges::Error>(())
/// ```
pub fn get_ranges() -> Result<Box<IpRanges>> {
    Client::new().get_ranges()
}

/// Retrieve and decode the IP Ranges document published at `url` with a single attempt.
///
/// Uses the [ClientBuilder::default] configuration; the `ATLASSIANIPRANGES_*` environment
/// variables are not consulted.
///
/// ```no_run
/// let document = atlassianipranges::fetch("https://ip-ranges.atlassian.com/")?;
/// println!("{} IP ranges", document.items.len());
/// # Ok::<(), atlassianipranges::Error>(())
/// ```
pub fn fetch(url: &str) -> Result<RangeDocument> {
    ClientBuilder::default().url(url).build().fetch()
}

/*-------------------------------------------------------------------------------------------------
  Client Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [Client] struct that allows you to customize the client configuration.
///
/// ```
/// let client = atlassianipranges::ClientBuilder::new()
///     .url("https://ip-ranges.atlassian.com/")
///     .timeout(10_000) // 10 seconds
///     .retry_count(3)
///     .retry_initial_delay(200) // 200 ms
///     .retry_backoff_factor(2)
///     .build();
/// ```
///
/// The [ClientBuilder::new] method attempts to source configuration values from environment
/// variables when set and uses default values when the environment variables are not set.
///
/// If you want to use the default configuration values, ignoring any environment variables, use
/// the [ClientBuilder::default] method to create a new [ClientBuilder] instance.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    url: String,
    timeout: u64,
    retry_count: u32,
    retry_initial_delay: u64,
    retry_backoff_factor: u64,
}

/*--------------------------------------------------------------------------------------
  Client Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for ClientBuilder {
    /// Create a new [ClientBuilder] with default configuration values.
    ///
    /// ```
    /// let client = atlassianipranges::ClientBuilder::default().build();
    ///
    /// assert_eq!(client.url(), "https://ip-ranges.atlassian.com/");
    /// assert_eq!(client.timeout(), 30000);
    /// assert_eq!(client.retry_count(), 1);
    /// assert_eq!(client.retry_initial_delay(), 200);
    /// assert_eq!(client.retry_backoff_factor(), 2);
    /// ```
    fn default() -> Self {
        Self {
            url: "https://ip-ranges.atlassian.com/".to_string(),
            timeout: 30_000,
            retry_count: 1,
            retry_initial_delay: 200,
            retry_backoff_factor: 2,
        }
    }
}

impl ClientBuilder {
    /// Create a new [ClientBuilder] reading initial configuration values from
    /// environment variables when set and default values when the environment
    /// variables are not set.
    ///
    /// The environment variables used to set the initial configuration values
    /// are:
    /// - `ATLASSIANIPRANGES_URL`
    /// - `ATLASSIANIPRANGES_TIMEOUT`
    /// - `ATLASSIANIPRANGES_RETRY_COUNT`
    /// - `ATLASSIANIPRANGES_RETRY_INITIAL_DELAY`
    /// - `ATLASSIANIPRANGES_RETRY_BACKOFF_FACTOR`
    pub fn new() -> Self {
        let default = ClientBuilder::default();

        Self {
            url: get_env_var("ATLASSIANIPRANGES_URL", default.url),
            timeout: get_env_var("ATLASSIANIPRANGES_TIMEOUT", default.timeout),
            retry_count: get_env_var("ATLASSIANIPRANGES_RETRY_COUNT", default.retry_count),
            retry_initial_delay: get_env_var(
                "ATLASSIANIPRANGES_RETRY_INITIAL_DELAY",
                default.retry_initial_delay,
            ),
            retry_backoff_factor: get_env_var(
                "ATLASSIANIPRANGES_RETRY_BACKOFF_FACTOR",
                default.retry_backoff_factor,
            ),
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the URL used to retrieve the Atlassian IP Ranges; defaults to
    /// `https://ip-ranges.atlassian.com/`.
    pub fn url(&mut self, url: &str) -> &mut Self {
        self.url = url.to_string();
        self
    }

    /// Set the maximum time (in milliseconds) to wait for a single request
    /// to the IP Ranges URL to complete; defaults to `30000` milliseconds.
    pub fn timeout(&mut self, timeout: u64) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of attempts made to retrieve the IP Ranges JSON from
    /// the URL; defaults to `1` (no retries). Only transport failures are
    /// retried.
    pub fn retry_count(&mut self, retry_count: u32) -> &mut Self {
        self.retry_count = retry_count;
        self
    }

    /// Set the initial delay (in milliseconds) between retry attempts;
    /// defaults to `200` milliseconds.
    ///
    /// The delay between retry attempts is calculated as:
    /// `retry_initial_delay * (retry_backoff_factor ^ attempt)`.
    pub fn retry_initial_delay(&mut self, retry_initial_delay: u64) -> &mut Self {
        self.retry_initial_delay = retry_initial_delay;
        self
    }

    /// Set the backoff factor used to increase the delay between retry
    /// attempts; defaults to `2`.
    pub fn retry_backoff_factor(&mut self, retry_backoff_factor: u64) -> &mut Self {
        self.retry_backoff_factor = retry_backoff_factor;
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> Client {
        Client {
            url: self.url.clone(),
            timeout: self.timeout,
            retry_count: self.retry_count,
            retry_initial_delay: self.retry_initial_delay,
            retry_backoff_factor: self.retry_backoff_factor,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Client
-------------------------------------------------------------------------------------------------*/

/// A client for retrieving the Atlassian IP Ranges. Every call issues a fresh request; nothing
/// is cached between calls.
///
/// The [Client::new] method attempts to source configuration values from environment variables
/// when set and uses default values when the environment variables are not set.
///
/// ```no_run
/// let client = atlassianipranges::Client::new();
/// let ip_ranges = client.get_ranges()?;
/// # Ok::<(), atlassianipranges::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    timeout: u64,
    retry_count: u32,
    retry_initial_delay: u64,
    retry_backoff_factor: u64,
}

/*--------------------------------------------------------------------------------------
  Client Implementation
--------------------------------------------------------------------------------------*/

impl Default for Client {
    fn default() -> Self {
        ClientBuilder::default().build()
    }
}

impl Client {
    pub fn new() -> Self {
        ClientBuilder::new().build()
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Get the URL used to retrieve the Atlassian IP Ranges.
    /// Defaults to `https://ip-ranges.atlassian.com/`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the per-request timeout in milliseconds. Defaults to 30000.
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    /// Get the number of attempts made to retrieve the IP Ranges JSON.
    /// Defaults to 1.
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn retry_initial_delay(&self) -> u64 {
        self.retry_initial_delay
    }

    pub fn retry_backoff_factor(&self) -> u64 {
        self.retry_backoff_factor
    }

    /*-------------------------------------------------------------------------
      Get Ranges
    -------------------------------------------------------------------------*/

    /// Retrieve the IP Ranges and return the inbound (`ingress`) CIDR blocks for Confluence
    /// and Jira.
    pub fn get_ranges(&self) -> Result<Box<IpRanges>> {
        self.get_filtered_ranges(&Filter::default())
    }

    /// Retrieve the IP Ranges and return the CIDR blocks included by `filter`.
    pub fn get_filtered_ranges(&self, filter: &Filter) -> Result<Box<IpRanges>> {
        let document = self.fetch()?;
        Ok(Box::new(IpRanges::from_document(&document, filter)))
    }

    /// Retrieve and decode the IP Ranges document.
    pub fn fetch(&self) -> Result<RangeDocument> {
        let json = self.get_json()?;
        json::parse(&json)
    }

    /*-------------------------------------------------------------------------
      Private Methods
    -------------------------------------------------------------------------*/

    /// Get the IP Ranges JSON from the URL, retrying transport failures.
    fn get_json(&self) -> Result<String> {
        let http = reqwest::blocking::Client::builder()
            .timeout(time::Duration::from_millis(self.timeout))
            .build()?;

        let mut attempt: u32 = 0;
        loop {
            info!("Get IP Ranges from URL; Attempt {}: GET {}", attempt, self.url);

            match self.get_json_from_url(&http) {
                Ok(json) => {
                    info!("Get IP Ranges from URL; Attempt {}: Ok", attempt);
                    break Ok(json);
                }
                Err(error) => {
                    log::error!(
                        "Get IP Ranges from URL; Attempt {}: FAILED: {}",
                        attempt,
                        error
                    );

                    let delay = self.retry_delay(attempt);
                    attempt += 1;

                    if error.is_transient() && attempt < self.retry_count {
                        thread::sleep(delay);
                        continue;
                    } else {
                        break Err(error);
                    }
                }
            }
        }
    }

    /// Issue a single GET request and read the response body.
    fn get_json_from_url(&self, http: &reqwest::blocking::Client) -> Result<String> {
        let response = http.get(&self.url).send()?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound);
        }

        let json = response.text()?;
        debug!("IP Ranges response JSON: {}", json);
        Ok(json)
    }

    fn retry_delay(&self, attempt: u32) -> time::Duration {
        time::Duration::from_millis(
            self.retry_initial_delay
                .saturating_mul(self.retry_backoff_factor.saturating_pow(attempt)),
        )
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Get and parse an environment variable value or return a default value.
fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
