//! Fixtures shared by the CLI unit and behaviour tests.

use std::fs;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::json;
use tempfile::TempDir;
use voltsite_core::{GeoPoint, PoiLookup, PoiLookupError, Site, SiteCategory};
use voltsite_data::OverpassConfig;
use voltsite_data::lookup::test_support::StubPoiLookup;

use crate::CliError;
use crate::sources::LookupBuilder;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, contents).expect("write file");
}

/// Temporary directory with UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write a plan request for a straight route north from Delhi.
    pub(super) fn write_plan_request(&self, ev_model: &str, distance_km: f64) -> Utf8PathBuf {
        let path = self.path("request.json");
        let payload = json!({
            "route": {
                "distance": distance_km,
                "coordinates": [[28.6, 77.2], [28.9, 77.3], [29.2, 77.4]],
            },
            "evModel": ev_model,
            "currentCharge": 80,
        });
        write_utf8(&path, payload.to_string().as_bytes());
        path
    }
}

pub(super) fn point(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(lat, lng).expect("valid point")
}

/// A branded, always-open station well away from the NCR areas.
pub(super) fn highway_station() -> Site {
    Site::new(point(28.9, 77.3), SiteCategory::Office, "Highway Hub")
}

/// Hands out stub lookups and records the configurations it saw.
#[derive(Debug, Clone)]
pub(super) struct StubLookupBuilder {
    response: Result<Vec<Site>, PoiLookupError>,
    seen: Arc<std::sync::Mutex<Vec<String>>>,
}

impl StubLookupBuilder {
    pub(super) fn with_sites(sites: Vec<Site>) -> Self {
        Self {
            response: Ok(sites),
            seen: Arc::default(),
        }
    }

    pub(super) fn with_error(error: PoiLookupError) -> Self {
        Self {
            response: Err(error),
            seen: Arc::default(),
        }
    }

    /// Endpoints the builder was asked to connect to.
    pub(super) fn endpoints(&self) -> Vec<String> {
        self.seen.lock().expect("endpoint log").clone()
    }
}

impl LookupBuilder for StubLookupBuilder {
    fn build(&self, config: &OverpassConfig) -> Result<Box<dyn PoiLookup>, CliError> {
        self.seen
            .lock()
            .expect("endpoint log")
            .push(config.endpoint.clone());
        let lookup = match &self.response {
            Ok(sites) => StubPoiLookup::with_sites(sites.clone()),
            Err(error) => StubPoiLookup::with_error(error.clone()),
        };
        Ok(Box::new(lookup))
    }
}
