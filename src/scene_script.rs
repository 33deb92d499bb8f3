use anyhow::{Context, Result};
use secretdoors_core::{BlockData, BlockPos, SignText, SimTick};
use secretdoors_openable::Interaction;
use secretdoors_world::MemoryWorld;
use serde::Deserialize;
use std::{collections::VecDeque, fs, path::Path};

#[derive(Debug, Deserialize)]
struct SceneScriptFile {
    #[serde(default)]
    blocks: Vec<BlockDef>,
    steps: Vec<SceneStepDef>,
}

#[derive(Debug, Clone, Deserialize)]
struct BlockDef {
    pos: BlockPos,
    block: BlockData,
    #[serde(default)]
    sign: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
struct SceneStepDef {
    tick: u64,
    #[serde(flatten)]
    interaction: Interaction,
}

#[derive(Debug, Clone)]
pub struct SceneStep {
    pub tick: SimTick,
    pub interaction: Interaction,
}

/// Deterministic interaction scene.
///
/// A scene lists the blocks of the starting world followed by `{tick, ...interaction}`
/// steps, executed in file order.
#[derive(Debug)]
pub struct SceneScript {
    blocks: Vec<BlockDef>,
    pending: VecDeque<SceneStep>,
}

impl SceneScript {
    /// Load a scene from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene {}", path.display()))?;
        Self::from_str(&contents)
    }

    /// Load a scene from an in-memory JSON string.
    pub fn from_str(contents: &str) -> Result<Self> {
        let file: SceneScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            anyhow::bail!("scene contains no steps");
        }

        let mut pending = VecDeque::with_capacity(file.steps.len());
        let mut last_tick: Option<u64> = None;
        for step in file.steps {
            if let Some(prev) = last_tick {
                if step.tick < prev {
                    anyhow::bail!("scene steps must be sorted by tick");
                }
            }
            last_tick = Some(step.tick);

            pending.push_back(SceneStep {
                tick: SimTick(step.tick),
                interaction: step.interaction,
            });
        }

        Ok(Self {
            blocks: file.blocks,
            pending,
        })
    }

    /// Place the scene's starting blocks into `world`.
    pub fn populate(&self, world: &mut MemoryWorld) -> Result<()> {
        for def in &self.blocks {
            match &def.sign {
                Some(lines) => {
                    if !world.catalog().is_any_sign(def.block.material()) {
                        anyhow::bail!("{} at {} is not a sign", def.block, def.pos);
                    }
                    world.place_sign(def.pos, def.block.clone(), SignText::from_lines(lines));
                }
                None => world.place(def.pos, def.block.clone()),
            }
        }
        Ok(())
    }

    /// Tick of the next pending step.
    pub fn next_tick(&self) -> Option<SimTick> {
        self.pending.front().map(|step| step.tick)
    }

    /// Drain and return all steps scheduled for ticks `<= tick`.
    pub fn drain_ready(&mut self, tick: SimTick) -> Vec<SceneStep> {
        let mut steps = Vec::new();
        while let Some(step) = self.pending.front() {
            if step.tick > tick {
                break;
            }
            if let Some(step) = self.pending.pop_front() {
                steps.push(step);
            }
        }
        steps
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }
}
