use tracing::info;

use crate::core::{SimulationSettings, TickProfiler};
use crate::spatial::ChunkManager;
use crate::systems::BehaviorRegistry;

use super::framebuffer::Framebuffer;
use super::WorldCore;

/// Settings are assumed validated.
pub(super) fn create_world_core(settings: SimulationSettings) -> WorldCore {
    info!(
        chunk_width = settings.chunk.width,
        chunk_height = settings.chunk.height,
        cell_size = settings.chunk.cell_size,
        time_step = settings.time_step,
        "creating world"
    );

    WorldCore {
        manager: ChunkManager::new(&settings),
        behaviors: BehaviorRegistry::new(),
        profiler: TickProfiler::new(),
        framebuffer: Framebuffer::new(),
        frame: 0,
        last_substeps: 0,
        settings,
    }
}
