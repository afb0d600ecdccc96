//! Hitbox compiler

use crate::domain::repositories::DocumentSource;
use crate::domain::value_objects::{ResourceRef, ScreenId};
use crate::stage::{Rect, Region, SharedStage};
use crate::types::hitbox::{Hitbox, HitboxSpec};
use std::sync::Arc;

/// What happened to one hitbox application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitboxOutcome {
    /// Regions were materialized (possibly zero)
    Applied(usize),
    /// The document could not be fetched or decoded; the screen was left without regions
    Failed,
    /// Another navigation overtook this one; the result was discarded
    Stale,
    /// The stage has no surface for the screen
    MissingSurface,
}

/// Turns hitbox documents into interactive regions on the stage
pub struct HitboxCompiler {
    source: Arc<dyn DocumentSource>,
}

impl HitboxCompiler {
    pub fn new(source: Arc<dyn DocumentSource>) -> Self {
        Self { source }
    }

    /// Fetch `hitbox_ref` and materialize it on `screen`.
    ///
    /// Never fails: errors are logged. The stage is only touched if the
    /// navigation captured in `generation` is still the current one.
    pub async fn apply(
        &self,
        stage: &SharedStage,
        hitbox_ref: &ResourceRef,
        screen: &ScreenId,
        generation: u64,
    ) -> HitboxOutcome {
        let fetched = self.source.fetch_json(hitbox_ref.as_str()).await;

        let mut stage = stage.borrow_mut();
        if !stage.is_current(generation, screen) {
            log::debug!(
                "[hitboxes] discarding stale {} for {} (generation {})",
                hitbox_ref,
                screen,
                generation
            );
            return HitboxOutcome::Stale;
        }

        let spec = match fetched {
            Ok(doc) => HitboxSpec::from_document(&doc),
            Err(e) => {
                log::error!("[hitboxes] hitbox error on {}: {}", screen, e);
                stage.replace_regions(screen, Vec::new());
                return HitboxOutcome::Failed;
            }
        };

        let regions: Vec<Region> = spec.hitboxes.iter().map(materialize).collect();
        let count = regions.len();
        if !stage.replace_regions(screen, regions) {
            log::warn!("[hitboxes] no region container for {}", screen);
            return HitboxOutcome::MissingSurface;
        }

        log::debug!("[hitboxes] {} regions on {}", count, screen);
        HitboxOutcome::Applied(count)
    }
}

fn materialize(hitbox: &Hitbox) -> Region {
    Region {
        label: hitbox.id.clone().unwrap_or_else(|| "hitbox".to_string()),
        rect: Rect::new(hitbox.x, hitbox.y, hitbox.w, hitbox.h),
        action: hitbox.action.clone(),
        arg: hitbox.arg.clone(),
    }
}
