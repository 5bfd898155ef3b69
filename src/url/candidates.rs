use crate::url::Domain;
use url::Url;

/// Page paths probed on every site, in priority order
pub const DEFAULT_PROBE_PATHS: &[&str] = &["homepage", "home", "contact", "index.php/contact"];

/// Builds the ordered list of URLs to probe for one domain
///
/// Each path is joined onto `http://{domain}/`. The output order follows
/// `paths` exactly; it is the probe order and the order in which per-page
/// addresses are reported.
///
/// # Examples
///
/// ```
/// use address_trawl::url::{candidate_urls, Domain, DEFAULT_PROBE_PATHS};
///
/// let domain = Domain::parse("example.com").unwrap();
/// let urls = candidate_urls(&domain, DEFAULT_PROBE_PATHS);
/// assert_eq!(urls[0].as_str(), "http://example.com/homepage");
/// assert_eq!(urls[3].as_str(), "http://example.com/index.php/contact");
/// ```
pub fn candidate_urls<S: AsRef<str>>(domain: &Domain, paths: &[S]) -> Vec<Url> {
    paths
        .iter()
        .filter_map(|path| match domain.base_url().join(path.as_ref()) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!("Skipping probe path '{}' for {}: {}", path.as_ref(), domain, e);
                None
            }
        })
        .collect()
}

/// Returns true if `path` stays on the probed site when joined onto its root
///
/// Absolute URLs and scheme-relative (`//host`) references would send the
/// probe to a different host and are refused.
pub fn is_relative_probe_path(path: &str) -> bool {
    let path = path.trim();
    !path.is_empty() && !path.contains("://") && !path.starts_with("//") && !path.contains('\\')
}
