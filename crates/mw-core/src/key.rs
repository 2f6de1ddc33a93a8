//! Domain key normalization.
//!
//! Probes report the same domain in different shapes (`https://www.Example.com/`,
//! `example.com`, `http://example.com/path`). A [`NormalizedKey`] is the
//! comparable form: trimmed, lower-cased, without scheme, without a leading
//! `www.`, without trailing slashes. Normalization is applied until the value
//! stops changing, so it is idempotent by construction.

use serde::{Deserialize, Serialize};
use std::fmt;

const SCHEMES: [&str; 2] = ["https://", "http://"];
const WWW: &str = "www.";

/// Public suffixes that need three labels to name a registrable domain.
const COMPOUND_SUFFIXES: [&str; 13] = [
    "co.uk", "org.uk", "ac.uk", "co.jp", "co.kr", "co.nz", "co.au", "com.au", "net.au", "com.br",
    "com.mx", "com.ar", "com.ve",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    /// Normalize a raw domain or URL.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let mut current = raw.trim().to_lowercase();
        loop {
            let next = strip_once(&current);
            if next == current {
                return Self(current);
            }
            current = next;
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty key means the record had no usable domain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The host part of the key: everything before the first `/`, `?` or `#`.
    #[must_use]
    pub fn host(&self) -> &str {
        self.0
            .split(['/', '?', '#'])
            .next()
            .unwrap_or(self.0.as_str())
    }

    /// Registrable domain of the host (`news.bbc.co.uk` -> `bbc.co.uk`,
    /// `m.facebook.com` -> `facebook.com`). Ports are dropped.
    #[must_use]
    pub fn base_domain(&self) -> String {
        let host = self.host();
        let host = host.split(':').next().unwrap_or(host);
        let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
        if labels.len() <= 2 {
            return labels.join(".");
        }

        let last_two = labels[labels.len() - 2..].join(".");
        if COMPOUND_SUFFIXES.contains(&last_two.as_str()) {
            labels[labels.len() - 3..].join(".")
        } else {
            last_two
        }
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Shorthand for [`NormalizedKey::new`].
#[must_use]
pub fn normalize(raw: &str) -> NormalizedKey {
    NormalizedKey::new(raw)
}

fn strip_once(value: &str) -> String {
    let mut rest = value.trim();
    for scheme in SCHEMES {
        if let Some(stripped) = rest.strip_prefix(scheme) {
            rest = stripped;
            break;
        }
    }
    if let Some(stripped) = rest.strip_prefix(WWW) {
        rest = stripped;
    }
    rest.trim_end_matches('/').trim().to_string()
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
