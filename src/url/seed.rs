use crate::{UrlError, UrlResult};
use url::Url;

/// Characters that may not open the authority of a seed URL
const FORBIDDEN_HOST_START: &[char] = &['/', '$', '.', '?', '#'];

/// Validates the seed URL given on the command line
///
/// # Validation Rules
///
/// 1. No whitespace anywhere in the input
/// 2. Scheme must be `http://` or `https://`
/// 3. The host must not start with `/`, `$`, `.`, `?` or `#`
/// 4. The input must parse as an absolute URL with a non-empty host
///
/// # Examples
///
/// ```
/// use wiki_trawl::url::validate_seed;
///
/// let seed = validate_seed("https://en.wikipedia.org/wiki/Rust").unwrap();
/// assert_eq!(seed.host_str(), Some("en.wikipedia.org"));
/// assert!(validate_seed("not-a-url").is_err());
/// ```
pub fn validate_seed(input: &str) -> UrlResult<Url> {
    if input.chars().any(char::is_whitespace) {
        return Err(UrlError::Malformed(format!(
            "seed URL must not contain whitespace: '{}'",
            input
        )));
    }

    let authority = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
        .ok_or_else(|| {
            UrlError::InvalidScheme(format!(
                "seed URL must start with http:// or https://, got '{}'",
                input
            ))
        })?;

    match authority.chars().next() {
        None => return Err(UrlError::MissingHost),
        Some(c) if FORBIDDEN_HOST_START.contains(&c) => {
            return Err(UrlError::Malformed(format!(
                "seed URL host cannot start with '{}': '{}'",
                c, input
            )));
        }
        Some(_) => {}
    }

    let url = Url::parse(input).map_err(|e| UrlError::Parse(format!("{}: {}", input, e)))?;

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Returns the origin (`scheme://host[:port]/`) of a URL
///
/// Article links are joined against this origin, never against the page
/// they were found on.
pub fn origin_of(url: &Url) -> UrlResult<Url> {
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(UrlError::MissingHost);
    }

    Url::parse(&origin.ascii_serialization()).map_err(|e| UrlError::Parse(e.to_string()))
}
