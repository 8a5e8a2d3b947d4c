//! Endpoint templates and URL assembly.

use crate::{CryptomusError, Result};

pub const CREATE_RECURRENCE: &str = "/recurrence/create";
pub const RECURRENCE_INFO: &str = "/recurrence/info";
pub const RECURRENCE_LIST: &str = "/recurrence/list";
pub const RECURRENCE_CANCEL: &str = "/recurrence/cancel";
pub const EXCHANGE_RATE_LIST: &str = "/exchange-rate/{currency}/list";

/// Substitute `{name}` placeholders in `template` with `args`.
///
/// Every argument must name a placeholder, every placeholder must be filled,
/// and values may not contain characters that would change the path shape.
///
/// ```
/// use cryptomus_lib::endpoint::{interpolate, EXCHANGE_RATE_LIST};
///
/// let path = interpolate(EXCHANGE_RATE_LIST, &[("currency", "USDT")]).unwrap();
/// assert_eq!(path, "/exchange-rate/USDT/list");
/// ```
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> Result<String> {
    let mut path = template.to_string();

    for (name, value) in args {
        let placeholder = format!("{{{}}}", name);
        if !path.contains(&placeholder) {
            return Err(CryptomusError::invalid_data(
                *name,
                format!("not a parameter of endpoint {}", template),
            ));
        }
        if value.is_empty() {
            return Err(CryptomusError::invalid_data(*name, "path argument is empty"));
        }
        if value
            .chars()
            .any(|c| matches!(c, '/' | '?' | '#' | '{' | '}' | '%') || c.is_whitespace())
        {
            return Err(CryptomusError::invalid_data(
                *name,
                format!("'{}' is not a valid path segment", value),
            ));
        }
        path = path.replace(&placeholder, value);
    }

    if let Some(start) = path.find('{') {
        let rest = &path[start + 1..];
        let name = rest.split('}').next().unwrap_or(rest);
        return Err(CryptomusError::invalid_data(
            name,
            format!("missing path argument for endpoint {}", template),
        ));
    }

    Ok(path)
}

/// Join the API root and an endpoint path with exactly one `/` between them.
///
/// Path segments already present in `base` (such as `/v1`) are kept.
pub fn join_url(base: &str, endpoint: &str) -> String {
    let base = base.trim_end_matches('/');
    let endpoint = endpoint.trim_start_matches('/');
    if endpoint.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_currency() {
        assert_eq!(
            interpolate(EXCHANGE_RATE_LIST, &[("currency", "ETH")]).unwrap(),
            "/exchange-rate/ETH/list"
        );
    }

    #[test]
    fn test_interpolate_without_placeholders() {
        assert_eq!(interpolate(CREATE_RECURRENCE, &[]).unwrap(), CREATE_RECURRENCE);
    }

    #[test]
    fn test_interpolate_missing_argument() {
        let err = interpolate(EXCHANGE_RATE_LIST, &[]).unwrap_err();
        match err {
            CryptomusError::InvalidData { field, .. } => assert_eq!(field, "currency"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_interpolate_unknown_argument() {
        assert!(interpolate(RECURRENCE_LIST, &[("currency", "ETH")]).is_err());
    }

    #[test]
    fn test_interpolate_rejects_path_breaking_values() {
        for value in ["US/DT", "USDT?x=1", "US DT", "a#b", "", "%2F"] {
            assert!(
                interpolate(EXCHANGE_RATE_LIST, &[("currency", value)]).is_err(),
                "accepted {value:?}"
            );
        }
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("https://api.cryptomus.com/v1", "/recurrence/create"),
            "https://api.cryptomus.com/v1/recurrence/create"
        );
        assert_eq!(
            join_url("https://api.cryptomus.com/v1/", "/recurrence/create"),
            "https://api.cryptomus.com/v1/recurrence/create"
        );
        assert_eq!(
            join_url("https://api.cryptomus.com/v1//", "recurrence/create"),
            "https://api.cryptomus.com/v1/recurrence/create"
        );
        assert_eq!(
            join_url("http://127.0.0.1:8080", "/exchange-rate/USDT/list"),
            "http://127.0.0.1:8080/exchange-rate/USDT/list"
        );
    }
}
