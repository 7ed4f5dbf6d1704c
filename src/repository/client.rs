// src/repository/client.rs

//! Index and archive host client
//!
//! Fetches the package listing, per-package metadata and package
//! archives. Requests are issued strictly one at a time and are never
//! retried; the first failure aborts the whole call.

use crate::error::{Error, Result};
use crate::model::Package;
use crate::progress::{ProgressEvent, ProgressSink, Stage};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info};

use super::metadata::{IndexListing, PackageResponse};
use super::transport::{HttpResponse, HttpTransport, Transport};

/// Default package index endpoint
pub const DEFAULT_INDEX_URL: &str = "https://packages.gleam.run/api/packages";

/// Default archive host serving `<name>-<version>.tar`
pub const DEFAULT_ARCHIVE_URL: &str = "https://repo.hex.pm/tarballs";

const STATUS_OK: u16 = 200;
const STATUS_NOT_FOUND: u16 = 404;

/// Outcome of an archive request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveFetch {
    /// Archive bytes (HTTP 200)
    Found(Vec<u8>),
    /// Listed in the index but gone from the archive host (HTTP 404)
    Missing,
}

/// Client for the package index and archive host
#[derive(Clone)]
pub struct IndexClient {
    transport: Arc<dyn Transport>,
    index_url: String,
    archive_url: String,
}

impl IndexClient {
    /// Create a client using the reqwest transport and default endpoints
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new()?)))
    }

    /// Create a client on top of an arbitrary transport
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            index_url: DEFAULT_INDEX_URL.to_string(),
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
        }
    }

    pub fn with_index_url(mut self, url: impl Into<String>) -> Self {
        self.index_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_archive_url(mut self, url: impl Into<String>) -> Self {
        self.archive_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn index_url(&self) -> &str {
        &self.index_url
    }

    pub fn archive_url(&self) -> &str {
        &self.archive_url
    }

    /// Fetch the full package list with metadata for every package
    ///
    /// Emits `Progress { current: i + 1, total }` after each package.
    /// Nothing is returned unless every request succeeds.
    pub fn fetch_index(&self, progress: &dyn ProgressSink) -> Result<Vec<Package>> {
        info!("Fetching package index from {}", self.index_url);

        let listing: IndexListing = self.get_json(&self.index_url)?;
        let total = listing.data.len();
        progress.emit(ProgressEvent::Started {
            stage: Stage::Index,
            total,
        });

        let mut packages = Vec::with_capacity(total);
        for (i, entry) in listing.data.into_iter().enumerate() {
            let url = format!("{}/{}", self.index_url, entry.name);
            let response: PackageResponse = self.get_json(&url)?;
            progress.emit(ProgressEvent::Progress {
                stage: Stage::Index,
                name: entry.name,
                current: i + 1,
                total,
            });
            packages.push(response.data);
        }

        progress.emit(ProgressEvent::Done { stage: Stage::Index });
        info!("Fetched metadata for {} packages", packages.len());
        Ok(packages)
    }

    /// Fetch the archive for a package's latest version
    pub fn fetch_archive(&self, package: &Package) -> Result<ArchiveFetch> {
        let url = self.archive_url_for(package);
        let response = self.transport.get(&url)?;

        match response.status {
            STATUS_OK => {
                debug!("Downloaded {} ({} bytes)", url, response.body.len());
                Ok(ArchiveFetch::Found(response.body))
            }
            STATUS_NOT_FOUND => Ok(ArchiveFetch::Missing),
            status => Err(Error::UnexpectedStatus { url, status }),
        }
    }

    /// URL of the archive for a package's latest version
    pub fn archive_url_for(&self, package: &Package) -> String {
        format!("{}/{}", self.archive_url, package.archive_name())
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let HttpResponse { status, body } = self.transport.get(url)?;
        if status != STATUS_OK {
            return Err(Error::UnexpectedStatus {
                url: url.to_string(),
                status,
            });
        }

        serde_json::from_slice(&body).map_err(|source| Error::InvalidResponseBody {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::{CallbackProgress, SilentProgress};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Transport answering from a fixed table; unknown URLs get a 404
    struct TableTransport {
        routes: HashMap<String, HttpResponse>,
        requests: Mutex<Vec<String>>,
    }

    impl TableTransport {
        fn new(routes: &[(&str, u16, &str)]) -> Arc<Self> {
            Arc::new(Self {
                routes: routes
                    .iter()
                    .map(|(url, status, body)| (url.to_string(), HttpResponse::new(*status, *body)))
                    .collect(),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    impl Transport for TableTransport {
        fn get(&self, url: &str) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(url.to_string());
            Ok(self
                .routes
                .get(url)
                .cloned()
                .unwrap_or_else(|| HttpResponse::new(404, Vec::new())))
        }
    }

    const PKG_A: &str = r#"{"data":{"name":"a","description":"A","latest-version":"1.0.0","repository":null,"updated-at":1,"releases":[{"version":"1.0.0","downloads":3,"updated-at":1}]}}"#;
    const PKG_B: &str = r#"{"data":{"name":"b","description":"B","latest-version":"0.2.0","repository":"https://github.com/x/b","updated-at":2,"releases":[]}}"#;

    fn client(transport: Arc<TableTransport>) -> IndexClient {
        IndexClient::with_transport(transport)
            .with_index_url("http://index/")
            .with_archive_url("http://archive")
    }

    #[test]
    fn test_fetch_index() {
        let transport = TableTransport::new(&[
            ("http://index", 200, r#"{"data":[{"name":"a"},{"name":"b","extra":1}]}"#),
            ("http://index/a", 200, PKG_A),
            ("http://index/b", 200, PKG_B),
        ]);

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink_events = events.clone();
        let sink = CallbackProgress::new(move |e| sink_events.lock().unwrap().push(e));

        let packages = client(transport.clone()).fetch_index(&sink).unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "a");
        assert_eq!(packages[0].repository, None);
        assert_eq!(packages[1].repository.as_deref(), Some("https://github.com/x/b"));

        let progress: Vec<_> = events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Progress { current, total, .. } => Some((*current, *total)),
                _ => None,
            })
            .collect();
        assert_eq!(progress, vec![(1, 2), (2, 2)]);
        assert_eq!(transport.requests.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_fetch_index_aborts_on_first_failure() {
        let transport = TableTransport::new(&[
            ("http://index", 200, r#"{"data":[{"name":"a"},{"name":"b"},{"name":"c"}]}"#),
            ("http://index/a", 200, PKG_A),
            ("http://index/b", 503, ""),
            ("http://index/c", 200, PKG_A),
        ]);

        let err = client(transport.clone()).fetch_index(&SilentProgress).unwrap_err();
        assert!(matches!(err, Error::UnexpectedStatus { status: 503, .. }));
        // "c" is never requested
        assert_eq!(transport.requests.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_fetch_index_bad_body() {
        let transport = TableTransport::new(&[("http://index", 200, r#"{"items":[]}"#)]);
        let err = client(transport).fetch_index(&SilentProgress).unwrap_err();
        assert!(matches!(err, Error::InvalidResponseBody { .. }));
    }

    #[test]
    fn test_fetch_archive_statuses() {
        let transport = TableTransport::new(&[
            ("http://archive/a-1.0.0.tar", 200, "tarball"),
            ("http://archive/b-0.2.0.tar", 500, ""),
        ]);
        let client = client(transport);
        let a: PackageResponse = serde_json::from_str(PKG_A).unwrap();
        let b: PackageResponse = serde_json::from_str(PKG_B).unwrap();
        let mut gone = a.data.clone();
        gone.name = "gone".to_string();

        assert_eq!(
            client.fetch_archive(&a.data).unwrap(),
            ArchiveFetch::Found(b"tarball".to_vec())
        );
        assert_eq!(client.fetch_archive(&gone).unwrap(), ArchiveFetch::Missing);
        assert!(matches!(
            client.fetch_archive(&b.data),
            Err(Error::UnexpectedStatus { status: 500, .. })
        ));
    }
}
