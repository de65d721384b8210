use crate::{UrlError, UrlResult};
use percent_encoding::percent_decode_str;
use url::Url;

/// Resolves a raw href into an absolute URL on the base origin
///
/// # Resolution Steps
///
/// 1. Percent-decode the raw link (invalid UTF-8 is replaced, not rejected)
/// 2. Join it against `base` with standard relative-reference rules
/// 3. Reject the result if its scheme, host or port differ from `base`
///
/// The joined URL is re-serialized by `url`, so two spellings of the same
/// article (`/wiki/Caf%C3%A9` and `/wiki/Café`) resolve to the same string.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wiki_trawl::url::resolve_link;
///
/// let base = Url::parse("https://en.wikipedia.org").unwrap();
/// let url = resolve_link("/wiki/C%2B%2B", &base).unwrap();
/// assert_eq!(url.as_str(), "https://en.wikipedia.org/wiki/C++");
/// ```
pub fn resolve_link(raw: &str, base: &Url) -> UrlResult<Url> {
    let decoded = percent_decode_str(raw).decode_utf8_lossy();

    let resolved = base
        .join(&decoded)
        .map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    if resolved.origin() != base.origin() {
        return Err(UrlError::CrossOrigin {
            link: resolved.to_string(),
            origin: base.origin().ascii_serialization(),
        });
    }

    Ok(resolved)
}
