//! Fixed-timestep driver and the tick itself
//!
//! One tick, every pass finishing for all chunks before the next starts:
//! 1. absorb  - edits made since the last tick join the dirty rects
//! 2. scan    - the rule visits each chunk's dirty rect and only queues work
//! 3. apply   - pending writes, then arbitrated moves, for every chunk
//! 4. rotate  - intermediate rect becomes the next dirty rect
//! 5. purge   - chunks with no filled cells are dropped
//!
//! The grid is only mutated in step 3, so no scan ever sees another scan's result.

use tracing::warn;

use super::ChunkManager;
use crate::core::{TickCounters, TickPhase, TickProfiler};
use crate::domain::Cell;
use crate::spatial::chunk::PendingMove;
use crate::spatial::ChunkId;
use crate::systems::worker::{scan_chunk, CellRule};

impl ChunkManager {
    /// Advance simulated time by `delta` seconds, running whole ticks of
    /// `time_step`. At most `max_substeps` ticks run per call; time beyond that
    /// is dropped. Returns the number of ticks run.
    pub fn update<R: CellRule + ?Sized>(&mut self, delta: f32, rule: &R, profiler: &mut TickProfiler) -> u32 {
        if !delta.is_finite() || delta <= 0.0 {
            return 0;
        }

        self.accumulator += delta;

        let mut ran = 0;
        while self.accumulator >= self.time_step {
            if ran == self.max_substeps {
                warn!(
                    backlog_s = self.accumulator,
                    max_substeps = self.max_substeps,
                    "simulation falling behind, dropping accumulated time"
                );
                self.accumulator %= self.time_step;
                break;
            }
            self.step(rule, profiler);
            self.accumulator -= self.time_step;
            ran += 1;
        }
        ran
    }

    /// Run exactly one tick.
    pub fn step<R: CellRule + ?Sized>(&mut self, rule: &R, profiler: &mut TickProfiler) {
        profiler.begin_tick();
        self.counters = TickCounters::default();

        for &id in &self.order {
            if let Some(chunk) = self.slots[id.0].as_mut() {
                chunk.absorb_pending_rect();
            }
        }

        profiler.time(TickPhase::Scan, || self.scan_all(rule));
        profiler.time(TickPhase::Apply, || self.apply_all());
        profiler.time(TickPhase::Rotate, || self.rotate_all());
        profiler.time(TickPhase::Purge, || self.remove_empty_chunks());

        self.ticks += 1;
        self.counters.live_chunks = self.order.len() as u32;
        profiler.end_tick(self.counters);
    }

    fn scan_all<R: CellRule + ?Sized>(&mut self, rule: &R) {
        // Chunks created while scanning are appended to `order`; they join from
        // the apply pass on and are first scanned next tick.
        let mut ids = std::mem::take(&mut self.scan_ids);
        ids.clear();
        ids.extend_from_slice(&self.order);

        let delta = self.time_step;
        let reverse_x = self.ticks % 2 == 1;
        for &id in &ids {
            let visited = scan_chunk(self, id, rule, delta, reverse_x);
            if visited > 0 {
                self.counters.chunks_scanned += 1;
                self.counters.cells_visited += visited;
            }
        }

        self.scan_ids = ids;
    }

    fn apply_all(&mut self) {
        let mut ids = std::mem::take(&mut self.scan_ids);
        ids.clear();
        ids.extend_from_slice(&self.order);

        // writes first, so a move carries the value its rule left behind
        let mut edges = std::mem::take(&mut self.edges);
        for &id in &ids {
            let Some(chunk) = self.slots[id.0].as_mut() else {
                continue;
            };
            edges.clear();
            self.counters.writes_applied += chunk.apply_pending_writes(&mut edges);
            let coord = chunk.coord();
            for &local in &edges {
                self.wake_neighbours(coord, local);
            }
        }
        self.edges = edges;

        let mut winners = std::mem::take(&mut self.winners);
        for &id in &ids {
            winners.clear();
            if let Some(chunk) = self.slots[id.0].as_mut() {
                self.counters.moves_dropped += chunk.resolve_moves(&mut self.rng, &mut winners);
            }
            for &mv in &winners {
                self.apply_move(id, mv);
            }
        }
        self.winners = winners;

        self.scan_ids = ids;
    }

    /// Destination := source. Source := Empty, or the destination's old value for
    /// swaps. An Empty source and a move onto itself are skipped.
    fn apply_move(&mut self, dest: ChunkId, mv: PendingMove) {
        if mv.source == dest && mv.src_index == mv.dst_index {
            self.counters.moves_skipped += 1;
            return;
        }
        let Some(source_cell) = self.chunk(mv.source).map(|c| *c.cell_at(mv.src_index)) else {
            self.counters.moves_skipped += 1;
            return;
        };
        if source_cell.is_empty() {
            self.counters.moves_skipped += 1;
            return;
        }
        let Some(old_dest) = self.chunk(dest).map(|c| *c.cell_at(mv.dst_index)) else {
            self.counters.moves_skipped += 1;
            return;
        };

        self.write_index(dest, mv.dst_index, source_cell);
        let back = if mv.swap { old_dest } else { Cell::EMPTY };
        self.write_index(mv.source, mv.src_index, back);
        self.counters.moves_applied += 1;
    }

    fn rotate_all(&mut self) {
        for &id in &self.order {
            if let Some(chunk) = self.slots[id.0].as_mut() {
                chunk.update_rect();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ChunkDims, IntRect, Point, SimulationSettings};
    use crate::domain::CellType;
    use crate::systems::worker::UpdateContext;

    fn manager() -> ChunkManager {
        ChunkManager::new(&SimulationSettings {
            chunk: ChunkDims::new(8, 8, 1),
            ..SimulationSettings::default()
        })
    }

    fn idle(_: &mut UpdateContext) {}

    #[test]
    fn queued_move_applies_after_one_tick() {
        let mut m = manager();
        let mut profiler = TickProfiler::new();
        m.set_cell(2, 2, Cell::sand());
        m.move_cell(Point::new(2, 2), Point::new(2, 3), false);

        m.step(&idle, &mut profiler);

        assert!(m.is_empty(2, 2));
        assert_eq!(m.kind_at(2, 3), Some(CellType::Sand));
        assert_eq!(m.chunk_at(Point::ZERO).unwrap().filled_cells(), 1);
        assert_eq!(m.counters().moves_applied, 1);
    }

    #[test]
    fn move_across_chunk_border_updates_both_counts() {
        let mut m = manager();
        let mut profiler = TickProfiler::new();
        m.set_cell(7, 0, Cell::water());
        m.set_cell(3, 3, Cell::stone());
        m.move_cell(Point::new(7, 0), Point::new(8, 0), false);

        m.step(&idle, &mut profiler);

        assert_eq!(m.chunk_at(Point::new(0, 0)).unwrap().filled_cells(), 1);
        assert_eq!(m.chunk_at(Point::new(1, 0)).unwrap().filled_cells(), 1);
        assert_eq!(m.kind_at(8, 0), Some(CellType::Water));
        assert!(m.is_empty(7, 0));
    }

    #[test]
    fn move_from_empty_source_never_populates() {
        let mut m = manager();
        let mut profiler = TickProfiler::new();
        m.set_cell(0, 7, Cell::stone());
        m.move_cell(Point::new(1, 1), Point::new(1, 2), false);

        m.step(&idle, &mut profiler);

        assert!(m.is_empty(1, 2));
        assert_eq!(m.counters().moves_skipped, 1);
        assert_eq!(m.counters().moves_applied, 0);
    }

    #[test]
    fn contending_moves_move_exactly_one_source() {
        for seed in 0..16 {
            let mut m = ChunkManager::new(&SimulationSettings {
                chunk: ChunkDims::new(8, 8, 1),
                seed,
                ..SimulationSettings::default()
            });
            let mut profiler = TickProfiler::new();
            m.set_cell(1, 1, Cell::sand());
            m.set_cell(3, 1, Cell::water());
            m.move_cell(Point::new(1, 1), Point::new(2, 2), false);
            m.move_cell(Point::new(3, 1), Point::new(2, 2), false);

            m.step(&idle, &mut profiler);

            let moved = m.kind_at(2, 2).unwrap();
            match moved {
                CellType::Sand => {
                    assert!(m.is_empty(1, 1));
                    assert_eq!(m.kind_at(3, 1), Some(CellType::Water));
                }
                CellType::Water => {
                    assert!(m.is_empty(3, 1));
                    assert_eq!(m.kind_at(1, 1), Some(CellType::Sand));
                }
                other => panic!("unexpected {other:?} at destination"),
            }
            assert_eq!(m.filled_cells(), 2);
            assert_eq!(m.counters().moves_dropped, 1);
        }
    }

    #[test]
    fn move_onto_itself_keeps_the_cell() {
        let mut m = manager();
        let mut profiler = TickProfiler::new();
        m.set_cell(2, 2, Cell::sand());
        m.set_cell(5, 5, Cell::water());
        m.move_cell(Point::new(2, 2), Point::new(2, 2), false);
        m.move_cell(Point::new(5, 5), Point::new(5, 5), true);

        m.step(&idle, &mut profiler);

        assert_eq!(m.kind_at(2, 2), Some(CellType::Sand));
        assert_eq!(m.kind_at(5, 5), Some(CellType::Water));
        assert_eq!(m.filled_cells(), 2);
        assert_eq!(m.counters().moves_applied, 0);
        assert_eq!(m.counters().moves_skipped, 2);
    }

    #[test]
    fn swap_writes_destination_back_into_source() {
        let mut m = manager();
        let mut profiler = TickProfiler::new();
        m.set_cell(4, 4, Cell::sand());
        m.set_cell(4, 5, Cell::water());
        m.move_cell(Point::new(4, 4), Point::new(4, 5), true);

        m.step(&idle, &mut profiler);

        assert_eq!(m.kind_at(4, 5), Some(CellType::Sand));
        assert_eq!(m.kind_at(4, 4), Some(CellType::Water));
        assert_eq!(m.filled_cells(), 2);
    }

    #[test]
    fn wake_up_during_a_tick_is_scanned_next_tick() {
        use std::cell::RefCell;

        let mut m = manager();
        let mut profiler = TickProfiler::new();
        m.set_cell(1, 1, Cell::stone());
        m.step(&idle, &mut profiler);
        m.step(&idle, &mut profiler);
        // stone has settled: nothing left to scan
        assert!(m.chunk_at(Point::ZERO).unwrap().dirty_rect().is_empty());

        let visited = RefCell::new(Vec::new());
        let woke = RefCell::new(false);
        let rule = |ctx: &mut UpdateContext| {
            visited.borrow_mut().push((ctx.x, ctx.y));
            if !*woke.borrow() {
                *woke.borrow_mut() = true;
                ctx.wake_up(6, 6);
            }
        };

        // put the stone back in the scan set for tick N only
        m.wake_up(1, 1);
        m.step(&rule, &mut profiler);
        assert!(!visited.borrow().contains(&(6, 6)));
        assert_eq!(
            m.chunk_at(Point::ZERO).unwrap().dirty_rect(),
            IntRect::new(4, 4, 7, 7)
        );

        m.set_cell(6, 6, Cell::stone());
        visited.borrow_mut().clear();
        // the set_cell above is absorbed too, so scan N+1 must include (6, 6)
        m.step(&rule, &mut profiler);
        assert!(visited.borrow().contains(&(6, 6)));
    }

    #[test]
    fn emptied_chunk_is_purged_in_that_tick() {
        let mut m = manager();
        let mut profiler = TickProfiler::new();
        m.set_cell(9, 9, Cell::stone());
        m.set_cell(10, 9, Cell::stone());
        m.set_cell(1, 1, Cell::stone());
        m.step(&idle, &mut profiler);
        assert!(m.contains_chunk(Point::new(1, 1)));

        m.set_cell(9, 9, Cell::EMPTY);
        m.step(&idle, &mut profiler);
        assert!(m.contains_chunk(Point::new(1, 1)));

        m.set_cell(10, 9, Cell::EMPTY);
        m.step(&idle, &mut profiler);
        assert!(!m.contains_chunk(Point::new(1, 1)));
        assert_eq!(m.chunk_ids().len(), 1);
        assert_eq!(m.counters().chunks_removed, 1);
    }

    #[test]
    fn accumulator_runs_whole_steps_and_caps_substeps() {
        // binary-exact step so the arithmetic below has no rounding
        let mut m = ChunkManager::new(&SimulationSettings {
            time_step: 0.25,
            ..SimulationSettings::default()
        });
        let mut profiler = TickProfiler::new();
        let dt = m.time_step();

        assert_eq!(m.update(dt * 0.5, &idle, &mut profiler), 0);
        assert_eq!(m.update(dt * 0.5, &idle, &mut profiler), 1);
        assert_eq!(m.update(dt * 3.0, &idle, &mut profiler), 3);

        // far behind: clamped to max_substeps, backlog dropped
        assert_eq!(m.update(dt * 100.0, &idle, &mut profiler), 8);
        assert!(m.accumulator() < dt);
        assert_eq!(m.ticks(), 12);

        assert_eq!(m.update(-1.0, &idle, &mut profiler), 0);
        assert_eq!(m.update(f32::NAN, &idle, &mut profiler), 0);
    }

    #[test]
    fn profiler_sees_each_tick() {
        let mut m = manager();
        let mut profiler = TickProfiler::enabled();
        m.set_cell(0, 0, Cell::sand());
        m.move_cell(Point::new(0, 0), Point::new(0, 1), false);
        m.step(&idle, &mut profiler);
        assert_eq!(profiler.ticks_recorded(), 1);
        assert_eq!(profiler.last().counters.moves_applied, 1);
        assert_eq!(profiler.last().counters.live_chunks, 1);
    }
}
