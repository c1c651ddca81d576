use super::scan::Scan;
use crate::error::PressureError;
use std::sync::Arc;

/// Ordered scans sharing one grid topology.
///
/// `cyclic` marks periodic data where the last scan is followed by the first.
#[derive(Clone, Debug, Default)]
pub struct Sequence {
    scans: Vec<Scan>,
    cyclic: bool,
}

impl Sequence {
    pub fn new(cyclic: bool) -> Self {
        Self {
            scans: Vec::new(),
            cyclic,
        }
    }

    pub fn add_scan(&mut self, scan: Scan) -> Result<(), PressureError> {
        let expected = scan.grid.total_cells();
        if scan.cells.len() != expected {
            return Err(PressureError::CellCountMismatch {
                cells: scan.cells.len(),
                expected,
            });
        }
        if let Some(last) = self.scans.last() {
            if !Arc::ptr_eq(&last.grid, &scan.grid) && *last.grid != *scan.grid {
                return Err(PressureError::TopologyMismatch);
            }
            if scan.scan_time <= last.scan_time {
                return Err(PressureError::InvalidScanTime {
                    time: scan.scan_time,
                    previous: last.scan_time,
                });
            }
        }
        self.scans.push(scan);
        Ok(())
    }

    pub fn with_scan(mut self, scan: Scan) -> Result<Self, PressureError> {
        self.add_scan(scan)?;
        Ok(self)
    }

    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    pub fn len(&self) -> usize {
        self.scans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }

    pub fn scan(&self, index: usize) -> Result<&Scan, PressureError> {
        let total = self.scans.len();
        self.scans
            .get(index)
            .ok_or(PressureError::ScanOutOfRange { index, total })
    }

    pub fn scan_mut(&mut self, index: usize) -> Result<&mut Scan, PressureError> {
        let total = self.scans.len();
        self.scans
            .get_mut(index)
            .ok_or(PressureError::ScanOutOfRange { index, total })
    }

    pub fn scans(&self) -> &[Scan] {
        &self.scans
    }

    pub fn scans_mut(&mut self) -> &mut [Scan] {
        &mut self.scans
    }
}
