use crate::api::error::FetchError;
use crate::config::{ApiConfig, Config, HttpConfig};
use crate::{ConfigError, CrawlerError};
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, ORIGIN, REFERER,
};
use reqwest::{Client, Proxy};
use serde::de::Error as _;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// The Android web-view user agent the platform's app sends
const USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10; GM1910 Build/QKQ1.190716.003; wv) \
AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/85.0.4183.101 Mobile Safari/537.36\
kWebUserAgent.bsapp_android";

const WEB_ORIGIN: &str = "https://static.chocolateswap.com";

/// App-identifying header value
const REQUESTED_WITH: &str = "com.caes.choco.bs";

/// The three upstream endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    CityInfo,
    StationList,
    StationDetail,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::CityInfo => "/ps-base-api/area/manage/queryCityInfo",
            Self::StationList => "/station/search/queryStationList",
            Self::StationDetail => "/station/search/queryStationDetail",
        }
    }

    /// Page of the web front end that issues this request
    fn referer(&self) -> &'static str {
        match self {
            Self::CityInfo => {
                "https://static.chocolateswap.com/pages/subPackageFeature/city-select/index"
            }
            Self::StationList => "https://static.chocolateswap.com/pages/home/index",
            Self::StationDetail => "https://static.chocolateswap.com/pages/station-details/index",
        }
    }
}

/// Builds the HTTP client shared by every stage of a run
///
/// # Arguments
///
/// * `config` - The HTTP transport configuration
///
/// # Returns
///
/// * `Ok(Client)` - Client with the platform's header set, timeout, and proxy
/// * `Err(CrawlerError)` - The proxy address or TLS backend was rejected
pub fn build_http_client(config: &HttpConfig) -> Result<Client, CrawlerError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ORIGIN, HeaderValue::from_static(WEB_ORIGIN));
    headers.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static(REQUESTED_WITH),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("same-site"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("cors"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("empty"),
    );

    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(config.timeout())
        .danger_accept_invalid_certs(!config.verify_tls)
        .gzip(true)
        .brotli(true);

    if config.use_proxy {
        let address = proxy_address(&config.proxy_url);
        let proxy = Proxy::all(address.as_str()).map_err(|source| CrawlerError::Proxy {
            url: address.clone(),
            source,
        })?;
        builder = builder.proxy(proxy);
    } else {
        builder = builder.no_proxy();
    }

    Ok(builder.build()?)
}

/// Proxy addresses are configured as `host:port`; reqwest wants a scheme
fn proxy_address(raw: &str) -> String {
    let raw = raw.trim();
    if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    }
}

/// Splits a response into success or a business failure
///
/// Only a numeric `code` equal to `success_code` counts as success; `10000`
/// and `10000.0` both match, the string `"10000"` does not.
pub fn check_business_code(body: Value, success_code: i64) -> Result<Value, FetchError> {
    if !body.is_object() {
        return Err(FetchError::Malformed(serde_json::Error::custom(
            "expected a JSON object",
        )));
    }

    if body.get("code").is_some_and(|code| is_success(code, success_code)) {
        return Ok(body);
    }

    let code = body.get("code").cloned().unwrap_or(Value::Null);
    let message = match body.get("msg") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "None".to_string(),
        Some(other) => other.to_string(),
    };
    Err(FetchError::Business { code, message })
}

fn is_success(code: &Value, success_code: i64) -> bool {
    match code.as_i64() {
        Some(code) => code == success_code,
        None => code.as_f64() == Some(success_code as f64),
    }
}

/// Client for the platform gateway
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    api: ApiConfig,
}

impl ApiClient {
    /// Creates a client from the run configuration
    pub fn new(config: &Config) -> Result<Self, CrawlerError> {
        let client = build_http_client(&config.http)?;
        Self::with_client(client, &config.http.base_url, config.api.clone())
    }

    /// Creates a client around an existing reqwest client
    pub fn with_client(
        client: Client,
        base_url: &str,
        api: ApiConfig,
    ) -> Result<Self, CrawlerError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;
        Ok(Self {
            client,
            base_url,
            api,
        })
    }

    /// Fixed request parameters sent alongside every query
    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(endpoint.path());
        url
    }

    /// POSTs a JSON body and returns the full response on business success
    ///
    /// # Errors
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Connection refused, DNS, timeout | `Transport` |
    /// | Non-2xx HTTP status | `Transport` |
    /// | Body is not a JSON object | `Malformed` |
    /// | `code` differs from the success code | `Business` |
    pub async fn post<T>(&self, endpoint: Endpoint, payload: &T) -> Result<Value, FetchError>
    where
        T: Serialize + ?Sized,
    {
        let mut request = self
            .client
            .post(self.endpoint_url(endpoint))
            .header(REFERER, endpoint.referer())
            .json(payload);

        if endpoint == Endpoint::CityInfo {
            request = request.header("ps-mode-type", "1");
        }

        let response = request.send().await?.error_for_status()?;
        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;

        check_business_code(body, self.api.success_code)
    }
}
