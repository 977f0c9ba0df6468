use std::num::{NonZeroU32, NonZeroU64, NonZeroUsize};
use std::time::Duration;

use url::{Host, Url};

use crate::error::{ProbeError, ValidationError};

/// A validated probe target. Only `http` and `https` URLs with a host are
/// accepted; everything else is rejected before any network work starts.
#[derive(Debug, Clone)]
pub struct Target {
    url: Url,
}

impl Target {
    /// Parses and validates a raw URL string.
    ///
    /// # Errors
    ///
    /// Returns an error when the string is not a URL, uses a scheme other
    /// than `http` or `https`, or has no host component.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let url = Url::parse(raw).map_err(|err| ValidationError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ValidationError::UnsupportedScheme {
                    scheme: other.to_owned(),
                });
            }
        }
        if url.host_str().is_none() {
            return Err(ValidationError::UrlMissingHost);
        }
        Ok(Self { url })
    }

    /// Host component as the resolver and TLS verification expect it, so an
    /// IPv6 literal comes back without its URL brackets.
    #[must_use]
    pub fn host(&self) -> String {
        match self.url.host() {
            Some(Host::Domain(domain)) => domain.to_owned(),
            Some(Host::Ipv4(address)) => address.to_string(),
            Some(Host::Ipv6(address)) => address.to_string(),
            None => String::new(),
        }
    }

    /// The explicit port, or the scheme default (80 or 443).
    #[must_use]
    pub fn port(&self) -> u16 {
        self.url.port_or_known_default().unwrap_or(80)
    }

    /// `host:port` in URL form, IPv6 hosts bracketed.
    #[must_use]
    pub fn authority(&self) -> String {
        format!(
            "{}:{}",
            self.url.host_str().unwrap_or_default(),
            self.port()
        )
    }

    #[must_use]
    pub fn is_tls(&self) -> bool {
        self.url.scheme() == "https"
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

/// Everything a probe run needs to know, resolved from the CLI arguments.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub target: Target,
    /// Attempts per operation, including the first one.
    pub retries: NonZeroU32,
    /// Wall-clock allowance for the whole run.
    pub deadline: Duration,
    /// Maximum load-test requests in flight at once.
    pub concurrency: NonZeroUsize,
    /// Total load-test requests to issue.
    pub requests: NonZeroU64,
}

impl ProbeConfig {
    /// A single request is plain probing; anything more is a load test.
    #[must_use]
    pub const fn load_requested(&self) -> bool {
        self.requests.get() > 1
    }
}

/// The four network layers a target is checked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Dns,
    Tcp,
    Tls,
    Http,
}

impl Layer {
    /// Stable position of this layer in rendered output, lowest first.
    #[must_use]
    pub const fn order(self) -> u8 {
        match self {
            Self::Dns => 1,
            Self::Tcp => 2,
            Self::Tls => 3,
            Self::Http => 4,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dns => "DNS lookup",
            Self::Tcp => "TCP connect",
            Self::Tls => "TLS handshake",
            Self::Http => "HTTP request",
        }
    }
}

/// Result of probing one layer. A probe always produces a report; failures
/// are carried in `error` instead of being propagated.
#[derive(Debug)]
pub struct LayerReport {
    pub layer: Layer,
    /// Wall-clock duration of the final attempt, whether or not it succeeded.
    pub duration_ms: u64,
    pub error: Option<ProbeError>,
    /// Extra detail for successful checks, such as the HTTP status line.
    pub note: Option<String>,
}

impl LayerReport {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, AppResult};

    #[test]
    fn parse_accepts_http_and_https() -> AppResult<()> {
        let plain = Target::parse("http://example.com/health").map_err(AppError::from)?;
        if plain.is_tls() {
            return Err(AppError::validation("Expected http target to not use TLS"));
        }
        if plain.port() != 80 {
            return Err(AppError::validation("Expected default port 80 for http"));
        }

        let secure = Target::parse("https://example.com").map_err(AppError::from)?;
        if !secure.is_tls() {
            return Err(AppError::validation("Expected https target to use TLS"));
        }
        if secure.port() != 443 {
            return Err(AppError::validation("Expected default port 443 for https"));
        }
        if secure.authority() != "example.com:443" {
            return Err(AppError::validation(format!(
                "Unexpected authority: {}",
                secure.authority()
            )));
        }
        Ok(())
    }

    #[test]
    fn parse_keeps_explicit_port() -> AppResult<()> {
        let target = Target::parse("http://localhost:8080/api").map_err(AppError::from)?;
        if target.port() != 8080 {
            return Err(AppError::validation("Expected explicit port to be kept"));
        }
        if target.host() != "localhost" {
            return Err(AppError::validation(format!(
                "Unexpected host: {}",
                target.host()
            )));
        }
        Ok(())
    }

    #[test]
    fn ipv6_hosts_keep_brackets_only_in_the_authority() -> AppResult<()> {
        let target = Target::parse("http://[::1]:8080/").map_err(AppError::from)?;
        if target.host() != "::1" {
            return Err(AppError::validation(format!(
                "Expected an unbracketed host, got {}",
                target.host()
            )));
        }
        if target.authority() != "[::1]:8080" {
            return Err(AppError::validation(format!(
                "Expected a bracketed authority, got {}",
                target.authority()
            )));
        }
        if target.port() != 8080 {
            return Err(AppError::validation("Expected the explicit port to be kept"));
        }
        Ok(())
    }

    #[test]
    fn parse_rejects_unsupported_scheme() -> AppResult<()> {
        if Target::parse("ftp://example.com").is_ok() {
            return Err(AppError::validation("Expected ftp scheme to be rejected"));
        }
        if Target::parse("not a url").is_ok() {
            return Err(AppError::validation("Expected garbage input to be rejected"));
        }
        Ok(())
    }

    #[test]
    fn layer_order_is_stable() -> AppResult<()> {
        let layers = [Layer::Http, Layer::Tls, Layer::Tcp, Layer::Dns];
        let mut orders: Vec<u8> = layers.iter().map(|layer| layer.order()).collect();
        orders.sort_unstable();
        if orders != [1, 2, 3, 4] {
            return Err(AppError::validation("Expected layer orders 1 through 4"));
        }
        if Layer::Dns.label() != "DNS lookup" {
            return Err(AppError::validation("Unexpected DNS label"));
        }
        if Layer::Http.label() != "HTTP request" {
            return Err(AppError::validation("Unexpected HTTP label"));
        }
        Ok(())
    }
}
