//! Pagination utilities for list endpoints.
//!
//! `PageRequest::parse` turns the raw `limit` / `page` query values into a
//! validated request, `Page` carries one page of results plus the totals, and
//! `Page::links` renders the previous/next URLs returned to the caller.

use configs::MAX_PAGE_LIMIT;
use serde::Serialize;

use crate::errors::ServiceError;

/// Validated pagination parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page index
    pub page: u64,
    /// items per page, at most [`MAX_PAGE_LIMIT`]
    pub per_page: u64,
}

impl PageRequest {
    /// Missing values fall back to page 1 and `default_limit`. Limits above the
    /// cap are clamped; values below 1 or non-integers are rejected.
    pub fn parse(limit: Option<&str>, page: Option<&str>, default_limit: u64) -> Result<Self, ServiceError> {
        let per_page = match parse_positive("Limit", limit)? {
            Some(l) => l.min(MAX_PAGE_LIMIT),
            None => default_limit.clamp(1, MAX_PAGE_LIMIT),
        };
        let page = parse_positive("Page", page)?.unwrap_or(1);
        Ok(Self { page, per_page })
    }

    /// 0-based index as used by the ORM paginator.
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

fn parse_positive(name: &str, raw: Option<&str>) -> Result<Option<u64>, ServiceError> {
    let raw = match raw.map(str::trim).filter(|r| !r.is_empty()) {
        Some(r) => r,
        None => return Ok(None),
    };
    let n: i64 = match raw.parse() {
        Ok(n) => n,
        // too many digits for i64 but still a whole number: saturate
        Err(_) if is_digits(raw.strip_prefix('+').unwrap_or(raw)) => i64::MAX,
        Err(_) => return Err(ServiceError::Validation(format!("{} must be an integer", name))),
    };
    if n < 1 {
        return Err(ServiceError::Validation("Page or Limit cannot be negative values".into()));
    }
    Ok(Some(n as u64))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// One page of results.
#[derive(Clone, Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub pages: u64,
    pub page: u64,
    pub per_page: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            pages: self.pages,
            page: self.page,
            per_page: self.per_page,
        }
    }

    /// The first page links back to itself without a page number.
    pub fn links(&self, path: &str, q: Option<&str>) -> PageLinks {
        let search = q
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("&q={}", encode_query(q)))
            .unwrap_or_default();
        let prev_page = if self.page <= 1 {
            format!("{}?limit={}{}", path, self.per_page, search)
        } else {
            format!("{}?limit={}&page={}{}", path, self.per_page, self.page - 1, search)
        };
        let next_page = (self.page < self.pages)
            .then(|| format!("{}?limit={}&page={}{}", path, self.per_page, self.page + 1, search));
        PageLinks { prev_page: Some(prev_page), next_page }
    }
}

/// Form-style encoding for a query value.
fn encode_query(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(b as char),
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
