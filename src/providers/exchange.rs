//! Currency rates from the apilayer `currency_data` service.

use crate::core::config::ExchangeConfig;
use crate::core::{Accumulator, ExchangeError, GatherError, ParserFactory};
use crate::parsers::parser_factory;
use reqwest::{Client, Method, Response, StatusCode, Url};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument};

pub const CURRENCY_API_ENDPOINT: &str = "https://api.apilayer.com";
pub const CURRENCY_API_RESOURCE: &str = "/currency_data/live";

/// Name given to metrics decoded from the response body.
const METRIC_NAME: &str = "exchange";

/// A fully formed request. The API key travels as a header, never in the URL.
#[derive(Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: Url,
    apikey: String,
}

impl RequestDescriptor {
    pub fn url_string(&self) -> String {
        self.url.to_string()
    }

    fn into_request(self, client: &Client) -> reqwest::RequestBuilder {
        client
            .request(self.method, self.url)
            .header("apikey", self.apikey)
    }
}

/// Parses an endpoint host that the resource path can be appended to.
pub fn parse_endpoint(endpoint: &str) -> Result<Url, ExchangeError> {
    let url = Url::parse(endpoint).map_err(|e| {
        ExchangeError::Configuration(format!("invalid endpoint '{endpoint}': {e}"))
    })?;
    if url.cannot_be_a_base() {
        return Err(ExchangeError::Configuration(format!(
            "invalid endpoint '{endpoint}': not a base URL"
        )));
    }
    Ok(url)
}

/// Builds the live rates request. Target currencies are joined in the given
/// order, duplicates included.
pub fn build_request(
    endpoint: &str,
    config: &ExchangeConfig,
) -> Result<RequestDescriptor, ExchangeError> {
    Ok(request_for(parse_endpoint(endpoint)?, config))
}

fn request_for(mut url: Url, config: &ExchangeConfig) -> RequestDescriptor {
    url.set_path(CURRENCY_API_RESOURCE);
    url.query_pairs_mut()
        .clear()
        .append_pair("currencies", &config.target_currencies.join(","))
        .append_pair("source", &config.base_currency);

    RequestDescriptor {
        method: Method::GET,
        url,
        apikey: config.apikey.clone(),
    }
}

/// `quotes_USDEUR` becomes `USDEUR`; keys without `quotes` are dropped.
pub fn transform_key(key: &str) -> Option<String> {
    if key.contains("quotes") {
        Some(key.replace("quotes_", ""))
    } else {
        None
    }
}

/// Validates the response, decodes its body with a freshly built parser and
/// writes one single-field point per quote field.
///
/// The response is consumed here, so its body is released on every path.
pub async fn process_response(
    response: Response,
    url: &str,
    new_parser: &ParserFactory,
    acc: &dyn Accumulator,
) -> Result<(), ExchangeError> {
    let status = response.status();
    debug!(%status, "Received exchange response");
    if status != StatusCode::OK {
        return Err(ExchangeError::Upstream {
            status: status.to_string(),
            url: url.to_string(),
        });
    }

    let body = response.bytes().await.map_err(ExchangeError::Read)?;

    let mut parser = new_parser().map_err(ExchangeError::Parse)?;
    let metrics = parser.parse(&body).map_err(ExchangeError::Parse)?;

    let mut written = 0;
    for metric in &metrics {
        for field in metric.field_list() {
            if let Some(name) = transform_key(&field.key) {
                let fields = BTreeMap::from([(name.clone(), field.value.clone())]);
                acc.add_fields(&name, fields, None);
                written += 1;
            }
        }
    }
    debug!(metrics = metrics.len(), points = written, "Emitted exchange points");

    Ok(())
}

/// Fetches live rates once per [`gather`](Self::gather) call.
///
/// Holds only read-only state, so overlapping calls are safe.
pub struct ExchangeInput {
    config: ExchangeConfig,
    endpoint: Url,
    new_parser: ParserFactory,
    client: Client,
}

impl ExchangeInput {
    /// Validates `config` before anything touches the network.
    pub fn new(config: ExchangeConfig, new_parser: ParserFactory) -> Result<Self, ExchangeError> {
        config.validate()?;

        let endpoint = parse_endpoint(
            config
                .endpoint
                .as_deref()
                .unwrap_or(CURRENCY_API_ENDPOINT),
        )?;

        let client = Client::builder()
            .user_agent("fxgather/1.0")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ExchangeError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(ExchangeInput {
            config,
            endpoint,
            new_parser,
            client,
        })
    }

    /// Uses the parser named by `data_format`.
    pub fn from_config(config: ExchangeConfig) -> Result<Self, ExchangeError> {
        let new_parser = parser_factory(&config.data_format, METRIC_NAME)?;
        Self::new(config, new_parser)
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    #[instrument(
        name = "ExchangeGather",
        skip(self, acc),
        fields(base = %self.config.base_currency)
    )]
    pub async fn gather(&self, acc: &dyn Accumulator) -> Result<(), GatherError> {
        let request = request_for(self.endpoint.clone(), &self.config);
        let url = request.url_string();
        debug!("Requesting exchange rates from {}", url);

        let response = request
            .into_request(&self.client)
            .send()
            .await
            .map_err(|e| GatherError::new(&url, ExchangeError::Transport(e)))?;

        process_response(response, &url, &self.new_parser, acc)
            .await
            .map_err(|e| GatherError::new(&url, e))
    }
}
