use crate::error::PressureError;
use crate::flow::{Scan, ThresholdCriteria};
use crate::numerics::MATH_ZERO;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisitState {
    Unvisited,
    VisitedEligible,
    VisitedExcluded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloodFillReport {
    pub eligible_cells: usize,
    pub visited_cells: usize,
    /// Number of seeds, including the initial one.
    pub components: usize,
}

/// Path integration of the pressure gradient over a scan.
///
/// Cells are eligible when they are inner, moving, and (if given) meet the
/// `eligibility` criteria. Ineligible cells keep their relative pressure.
pub struct FloodFill<'a> {
    scan: &'a mut Scan,
    state: Vec<VisitState>,
    frontier: VecDeque<usize>,
    eligible_cells: usize,
}

impl<'a> FloodFill<'a> {
    pub fn new(scan: &'a mut Scan, eligibility: Option<&ThresholdCriteria>) -> Self {
        let state: Vec<VisitState> = (0..scan.total_cells())
            .map(|idx| {
                let cell = &scan.cells[idx];
                let eligible = scan.is_inner_cell(idx)
                    && cell.velocity.length() > MATH_ZERO
                    && eligibility.is_none_or(|c| c.meets(cell));
                if eligible {
                    VisitState::Unvisited
                } else {
                    VisitState::VisitedExcluded
                }
            })
            .collect();
        let eligible_cells = state.iter().filter(|s| **s == VisitState::Unvisited).count();

        Self {
            scan,
            state,
            frontier: VecDeque::new(),
            eligible_cells,
        }
    }

    /// Integrate from `seed` (or the first eligible cell) with pressure `reference`.
    pub fn run(
        mut self,
        seed: Option<usize>,
        reference: f64,
    ) -> Result<FloodFillReport, PressureError> {
        let total = self.state.len();
        let seed = match seed {
            Some(cell) if cell >= total => {
                return Err(PressureError::CellOutOfRange { index: cell, total });
            }
            Some(cell) if self.state[cell] != VisitState::Unvisited => {
                return Err(PressureError::IneligibleSeed(cell));
            }
            Some(cell) => Some(cell),
            None => self.first_unvisited(),
        };

        let Some(seed) = seed else {
            log::warn!("Flood fill: no eligible cells");
            return Ok(self.report(0));
        };

        log::debug!("Flood fill started at cell {seed} ({} eligible)", self.eligible_cells);
        let mut components = 1;
        let mut current = seed;
        self.visit(current);
        self.scan.cells[current].relative_pressure = reference;

        let mut visited = 1;
        let mut percent_reported = 0;
        loop {
            visited += self.expand(current);
            let progress = visited * 100 / self.eligible_cells.max(1);
            if progress / 10 > percent_reported {
                percent_reported = progress / 10;
                log::debug!("Flood fill status: {progress}%");
            }

            current = match self.next_from_frontier() {
                Some(cell) => cell,
                None => match self.first_unvisited() {
                    Some(cell) => {
                        components += 1;
                        visited += 1;
                        self.visit(cell);
                        self.scan.cells[cell].relative_pressure = 0.0;
                        cell
                    }
                    None => break,
                },
            };
        }

        self.scan.has_relative_pressure = true;
        Ok(self.report(components))
    }

    fn visit(&mut self, cell: usize) {
        self.state[cell] = VisitState::VisitedEligible;
    }

    /// Assign pressures to all unvisited neighbours of `current` and queue them.
    fn expand(&mut self, current: usize) -> usize {
        let grid = self.scan.grid.clone();
        let base = self.scan.cells[current].relative_pressure;
        let here = self.scan.cells[current].position;
        let grad_here = self.scan.cells[current].pressure_gradient;

        let mut added = 0;
        for cell in grid.neighbors(current).into_iter().flatten() {
            if self.state[cell] != VisitState::Unvisited {
                continue;
            }
            self.visit(cell);
            let neighbor = &mut self.scan.cells[cell];
            let avg_gradient = 0.5 * (grad_here + neighbor.pressure_gradient);
            neighbor.relative_pressure = base + avg_gradient.dot(neighbor.position - here);
            self.frontier.push_back(cell);
            added += 1;
        }
        added
    }

    fn has_unvisited_neighbor(&self, cell: usize) -> bool {
        self.scan
            .grid
            .neighbors(cell)
            .into_iter()
            .flatten()
            .any(|n| self.state[n] == VisitState::Unvisited)
    }

    /// Take the first frontier entry that can still grow. Entries in front of
    /// it are dropped along with it.
    fn next_from_frontier(&mut self) -> Option<usize> {
        let pos = self.frontier.iter().position(|&cell| {
            self.state[cell] == VisitState::VisitedEligible && self.has_unvisited_neighbor(cell)
        })?;
        let cell = self.frontier[pos];
        self.frontier.drain(..=pos);
        Some(cell)
    }

    fn first_unvisited(&self) -> Option<usize> {
        self.state.iter().position(|s| *s == VisitState::Unvisited)
    }

    fn report(&self, components: usize) -> FloodFillReport {
        FloodFillReport {
            eligible_cells: self.eligible_cells,
            visited_cells: self
                .state
                .iter()
                .filter(|s| **s == VisitState::VisitedEligible)
                .count(),
            components,
        }
    }
}

/// Integrate the pressure gradient of `scan` into its relative pressure.
pub fn eval_relative_pressure(
    scan: &mut Scan,
    seed: Option<usize>,
    reference: f64,
    eligibility: Option<&ThresholdCriteria>,
) -> Result<FloodFillReport, PressureError> {
    FloodFill::new(scan, eligibility).run(seed, reference)
}
