use super::perf_stats::PerfStats;
use super::WorldCore;

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.profiler.set_enabled(enabled);
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    PerfStats::from_tick(
        world.profiler.last(),
        world.last_substeps,
        world.manager.filled_cells(),
        world.profiler.ticks_recorded(),
    )
}
