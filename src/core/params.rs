//! Query parameter encoding and request URL building

use std::fmt::Display;
use url::Url;

use crate::core::errors::Result;
use crate::core::models::LanguagePair;

/// Query prefixes in the order the service documents them
pub const PARAM_API_KEY: &str = "key=";
pub const PARAM_LANG_PAIR: &str = "&langpair=";
pub const PARAM_TEXT: &str = "&q=";

/// Encode values as a JSON array literal of quoted strings, e.g. `["a","b"]`.
///
/// `None` and empty values are skipped. Quotes and backslashes inside values
/// are NOT escaped; callers must pass values that are already safe.
pub fn encode_array<T: Display>(values: &[Option<T>]) -> String {
    let mut out = String::from("[");
    let mut first = true;

    for value in values.iter().flatten() {
        let value = value.to_string();
        if value.is_empty() {
            continue;
        }
        if !first {
            out.push(',');
        }
        out.push('"');
        out.push_str(&value);
        out.push('"');
        first = false;
    }

    out.push(']');
    out
}

/// Build `<endpoint>?key=..&langpair=..&q=..` with percent-encoded values
pub fn build_query_url(
    endpoint: &str,
    api_key: &str,
    pair: &LanguagePair,
    text: &str,
) -> Result<Url> {
    let mut url = Url::parse(endpoint)?;
    url.query_pairs_mut()
        .append_pair(param_name(PARAM_API_KEY), api_key)
        .append_pair(param_name(PARAM_LANG_PAIR), &pair.to_string())
        .append_pair(param_name(PARAM_TEXT), text);
    Ok(url)
}

/// `&q=` -> `q`, `key=` -> `key`
fn param_name(prefix: &str) -> &str {
    prefix.trim_start_matches('&').trim_end_matches('=')
}
