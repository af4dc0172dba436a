use crate::ipc::error::err;
use crate::ipc::types::Request;
use crate::query::PageRequest;
use serde::de::DeserializeOwned;

pub fn required_str(req: &Request, key: &str) -> Result<String, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

/// Optional string param; blank strings count as absent.
pub fn optional_str(req: &Request, key: &str) -> Result<Option<String>, serde_json::Value> {
    match req.params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => match v.as_str() {
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => Ok(Some(s.to_string())),
            None => Err(err(
                &req.id,
                "bad_params",
                format!("{} must be a string", key),
                None,
            )),
        },
    }
}

pub fn optional_i64(req: &Request, key: &str) -> Result<Option<i64>, serde_json::Value> {
    match req.params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => v.as_i64().map(Some).ok_or_else(|| {
            err(
                &req.id,
                "bad_params",
                format!("{} must be an integer", key),
                None,
            )
        }),
    }
}

pub fn page_request(req: &Request) -> Result<PageRequest, serde_json::Value> {
    Ok(PageRequest::new(
        optional_i64(req, "page")?,
        optional_i64(req, "limit")?,
    ))
}

/// `limit` for ranked reports: missing or non-positive means `default`.
pub fn report_limit(req: &Request, default: usize) -> Result<usize, serde_json::Value> {
    Ok(match optional_i64(req, "limit")? {
        Some(n) if n > 0 => usize::try_from(n).unwrap_or(default),
        _ => default,
    })
}

pub fn parse_payload<T: DeserializeOwned>(
    req: &Request,
    value: serde_json::Value,
) -> Result<T, serde_json::Value> {
    serde_json::from_value(value).map_err(|e| err(&req.id, "bad_params", e.to_string(), None))
}
