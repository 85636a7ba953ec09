// Monitoring session cookies
//
// The login endpoint answers with `Set-Cookie` headers. They are captured
// into a per-login `Jar` and handed explicitly to the RPC call, so no two
// queries ever share cookie state in memory. Persisting to disk is optional
// and only mirrors the latest login for external tools.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderMap, HeaderValue, SET_COOKIE};
use url::Url;

use crate::error::Error;

/// Cookies returned by one login.
pub struct Session {
    jar: Arc<Jar>,
    set_cookie: Vec<String>,
}

impl Session {
    /// Capture every `Set-Cookie` header of a login response issued for `url`.
    pub fn from_headers(headers: &HeaderMap, url: &Url) -> Self {
        let jar = Jar::default();
        let set_cookie: Vec<String> = headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(String::from)
            .collect();
        for raw in &set_cookie {
            jar.add_cookie_str(raw, url);
        }
        Self {
            jar: Arc::new(jar),
            set_cookie,
        }
    }

    /// A session with no cookies (login answered without any).
    pub fn empty() -> Self {
        Self {
            jar: Arc::new(Jar::default()),
            set_cookie: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.set_cookie.is_empty()
    }

    /// `Cookie` header value for a request to `url`, if any cookie applies.
    pub fn cookie_header(&self, url: &Url) -> Option<HeaderValue> {
        self.jar.cookies(url)
    }

    /// Write the raw `Set-Cookie` lines to `path`, replacing its contents.
    ///
    /// The file uses the header-line format that `curl -b` reads. It is
    /// written to a sibling temp file first and renamed into place.
    pub fn persist(&self, path: &Path) -> Result<(), Error> {
        let mut contents = String::new();
        for raw in &self.set_cookie {
            contents.push_str("Set-Cookie: ");
            contents.push_str(raw);
            contents.push('\n');
        }

        let tmp = temp_path(path);
        let jar_err = |source| Error::CookieJar {
            path: path.to_path_buf(),
            source,
        };
        std::fs::write(&tmp, contents).map_err(jar_err)?;
        std::fs::rename(&tmp, path).map_err(jar_err)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("cookies", &self.set_cookie.len())
            .finish_non_exhaustive()
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
