//! Test helpers for temporary workspaces and stub collaborators.

use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use std::fs;
use tempfile::TempDir;
use tourloop_core::{
    RouteGeometryProvider, Stop, TravelTable, TravelTimeError, TravelTimeProvider,
};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).unwrap_or_else(|err| panic!("write {path}: {err}"));
}

/// A temporary directory addressed through UTF-8 paths.
pub(super) fn utf8_workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Routing double: symmetric costs equal to the index gap, straight paths.
#[derive(Debug, Default)]
pub(super) struct StubRouting {
    pub(super) unreachable: bool,
}

impl TravelTimeProvider for StubRouting {
    fn get_travel_time_matrix(&self, stops: &[Stop]) -> Result<TravelTable, TravelTimeError> {
        if stops.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }
        if self.unreachable {
            return Err(TravelTimeError::NetworkError {
                url: "http://osrm.invalid/table/v1/driving".to_owned(),
                message: "connection refused".to_owned(),
            });
        }
        let n = stops.len();
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|i| (0..n).map(|j| i.abs_diff(j) as f64 * 60.0).collect())
            .collect();
        let distances = rows
            .iter()
            .map(|row| row.iter().map(|secs| secs * 10.0).collect())
            .collect();
        Ok(TravelTable::new(rows, distances))
    }
}

impl RouteGeometryProvider for StubRouting {
    fn route_geometry(
        &self,
        stops: &[Stop],
        order: &[usize],
    ) -> Result<Vec<Coord<f64>>, TravelTimeError> {
        order
            .iter()
            .map(|&index| {
                stops
                    .get(index)
                    .map(|stop| stop.location)
                    .ok_or(TravelTimeError::UnknownStop {
                        index,
                        stops: stops.len(),
                    })
            })
            .collect()
    }
}
