// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use flate2::write::GzEncoder;
use flate2::Compression;
use pack::{HttpResponse, IndexClient, Package, Release, Transport};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

pub const INDEX_URL: &str = "http://index.test/api/packages";
pub const ARCHIVE_URL: &str = "http://archive.test/tarballs";

/// In-memory transport answering from a mutable route table.
///
/// Unknown URLs answer 404. Every request is recorded.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, HttpResponse>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn route(&self, url: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.into(), HttpResponse::new(status, body));
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    /// Serve an index listing `packages` and their metadata
    pub fn serve_index(&self, packages: &[Package]) {
        let names: Vec<_> = packages
            .iter()
            .map(|p| serde_json::json!({ "name": p.name }))
            .collect();
        self.route(
            INDEX_URL,
            200,
            serde_json::to_vec(&serde_json::json!({ "data": names })).unwrap(),
        );
        for package in packages {
            self.route(
                format!("{}/{}", INDEX_URL, package.name),
                200,
                serde_json::to_vec(&serde_json::json!({ "data": package })).unwrap(),
            );
        }
    }

    /// Serve the archive for a package's latest version
    pub fn serve_archive(&self, package: &Package, status: u16, body: Vec<u8>) {
        self.route(archive_url(package), status, body);
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str) -> pack::Result<HttpResponse> {
        self.requests.lock().unwrap().push(url.to_string());
        Ok(self
            .routes
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| HttpResponse::new(404, Vec::new())))
    }
}

/// Transport whose every request fails before a status is received
pub struct UnreachableTransport;

impl Transport for UnreachableTransport {
    fn get(&self, url: &str) -> pack::Result<HttpResponse> {
        Err(pack::Error::RequestFailed {
            url: url.to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

pub fn unreachable_client() -> IndexClient {
    IndexClient::with_transport(Arc::new(UnreachableTransport))
        .with_index_url(INDEX_URL)
        .with_archive_url(ARCHIVE_URL)
}

pub fn client(transport: &Arc<ScriptedTransport>) -> IndexClient {
    IndexClient::with_transport(transport.clone())
        .with_index_url(INDEX_URL)
        .with_archive_url(ARCHIVE_URL)
}

pub fn archive_url(package: &Package) -> String {
    format!("{}/{}", ARCHIVE_URL, package.archive_name())
}

pub fn package(name: &str, version: &str) -> Package {
    Package {
        name: name.to_string(),
        description: format!("The {} package", name),
        latest_version: version.to_string(),
        repository: Some(format!("https://github.com/example/{}", name)),
        updated_at: 1_700_000_000,
        releases: vec![Release {
            version: version.to_string(),
            downloads: 42,
            updated_at: 1_700_000_000,
        }],
    }
}

pub fn tarball(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (path, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, path, *data).unwrap();
    }
    builder.into_inner().unwrap()
}

/// Build an archive-host tarball: outer tar holding `contents.tar.gz`
pub fn nested_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&tarball(files)).unwrap();
    let contents = encoder.finish().unwrap();

    tarball(&[
        ("VERSION", b"3"),
        ("CHECKSUM", b"0000"),
        ("contents.tar.gz", &contents),
    ])
}
