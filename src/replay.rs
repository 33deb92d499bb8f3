//! Headless scene replay: dispatch each scripted click against a
//! [`MemoryWorld`] and let the host's native use run when allowed.

use anyhow::Result;
use secretdoors_core::SimTick;
use secretdoors_openable::{Action, InteractionDispatcher, NativeHandling, OutcomeAction};
use secretdoors_testkit::{EventRecord, JsonlSink};
use secretdoors_world::{native_use, MemoryWorld, NativeUse};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use crate::scene_script::SceneScript;

/// Counters reported once a scene has been replayed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub steps: usize,
    pub opened: usize,
    pub closed: usize,
    pub ignored: usize,
    pub native_uses: usize,
    pub effects: usize,
    pub closed_at_shutdown: usize,
}

pub fn run(
    script: &mut SceneScript,
    world: &mut MemoryWorld,
    dispatcher: &mut InteractionDispatcher,
    mut sink: Option<&mut JsonlSink>,
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();
    let mut tick = SimTick::ZERO;
    // Scene population is not part of any step.
    world.take_dirty_chunks();

    while let Some(next) = script.next_tick() {
        tick = next;
        for step in script.drain_ready(tick) {
            let interaction = step.interaction;
            let outcome = dispatcher.handle(world, &interaction);
            // The host only uses blocks on a right click.
            let native = match outcome.native {
                NativeHandling::Allow if interaction.action == Action::RightClickBlock => {
                    let catalog = dispatcher.catalog().clone();
                    native_use(world, &catalog, interaction.clicked)?
                }
                _ => NativeUse::None,
            };
            let effects = world.take_effects();
            let chunks = world.take_dirty_chunks();

            summary.steps += 1;
            summary.effects += effects.len();
            if native != NativeUse::None {
                summary.native_uses += 1;
            }
            match outcome.action {
                OutcomeAction::Opened { .. } => summary.opened += 1,
                OutcomeAction::Closed { .. } => summary.closed += 1,
                OutcomeAction::Ignored => summary.ignored += 1,
            }
            debug!(tick = tick.0, clicked = %interaction.clicked, ?outcome, ?native, "replayed step");

            if let Some(sink) = sink.as_deref_mut() {
                sink.write(&EventRecord {
                    tick,
                    kind: "interaction",
                    payload: json!({
                        "interaction": interaction,
                        "outcome": outcome,
                        "native": native,
                        "effects": effects,
                        "chunks": chunks,
                    }),
                })?;
            }
        }
    }

    summary.closed_at_shutdown = dispatcher.close_all(world);
    let effects = world.take_effects();
    summary.effects += effects.len();
    if let Some(sink) = sink.as_deref_mut() {
        sink.write(&EventRecord {
            tick,
            kind: "shutdown",
            payload: json!({
                "closed": summary.closed_at_shutdown,
                "effects": effects,
            }),
        })?;
    }

    info!(
        steps = summary.steps,
        opened = summary.opened,
        closed = summary.closed,
        closed_at_shutdown = summary.closed_at_shutdown,
        "scene replay finished"
    );
    Ok(summary)
}
