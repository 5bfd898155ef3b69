use crate::url::PROBE_SCHEME;
use crate::{UrlError, UrlResult};
use std::fmt;
use url::Url;

/// A bare website domain, the unit of work for one site
///
/// The name keeps an optional `:port` suffix so that sites served on a
/// non-default port can be probed as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain {
    name: String,
    base: Url,
    input: String,
}

impl Domain {
    /// Parses a raw domain string from the input list
    ///
    /// Leading and trailing whitespace is removed, the value is lowercased,
    /// and an accidental `http://` / `https://` prefix or trailing `/` is
    /// stripped. Anything that still carries a path, query, credentials or
    /// another scheme is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use address_trawl::url::Domain;
    ///
    /// let domain = Domain::parse(" Example.COM/ ").unwrap();
    /// assert_eq!(domain.as_str(), "example.com");
    /// assert_eq!(domain.base_url().as_str(), "http://example.com/");
    /// ```
    pub fn parse(raw: &str) -> UrlResult<Self> {
        let input = raw.trim().to_string();
        let mut name = input.to_lowercase();

        for prefix in ["http://", "https://"] {
            if let Some(rest) = name.strip_prefix(prefix) {
                name = rest.to_string();
                break;
            }
        }

        let name = name.trim_end_matches('/').to_string();

        if name.is_empty() {
            return Err(UrlError::MissingDomain);
        }

        if name.contains("://") {
            return Err(UrlError::InvalidScheme(input));
        }

        if name.contains(['/', '?', '#', '@']) || name.chars().any(char::is_whitespace) {
            return Err(UrlError::Malformed(input));
        }

        let base = Url::parse(&format!("{}://{}/", PROBE_SCHEME, name))
            .map_err(|e| UrlError::Parse(format!("{}: {}", name, e)))?;

        if base.host_str().map_or(true, str::is_empty) {
            return Err(UrlError::MissingDomain);
        }

        Ok(Self { name, base, input })
    }

    /// Returns the normalized domain name (with port, if any)
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Returns the value as it appeared in the input list, without
    /// surrounding whitespace
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the site root, `http://{domain}/`
    pub fn base_url(&self) -> &Url {
        &self.base
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
