use std::sync::Arc;

use gourd_data::damage::DamageType;
use gourd_data::flags::BlockFlags;
use gourd_util::math::boundingbox::BoundingBox;
use gourd_util::math::position::BlockPos;
use gourd_util::math::vector3::Vector3;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::plugin::block::explode::BlockExplodeEvent;

use super::World;

pub struct Explosion {
    pub power: f32,
    pub pos: Vector3<f64>,
}

impl Explosion {
    #[must_use]
    pub const fn new(power: f32, pos: Vector3<f64>) -> Self {
        Self { power, pos }
    }

    /// Collects the blocks the blast reaches by marching rays from the
    /// center towards a 16x16x16 grid of directions. Each ray loses
    /// strength per step and extra strength per block it passes through,
    /// scaled by the block's blast resistance.
    async fn blocks_to_destroy(&self, world: &World) -> Vec<BlockPos> {
        let mut destroyed = FxHashSet::default();

        for x in 0..16 {
            for y in 0..16 {
                for z in 0..16 {
                    // Only the outer shell of the grid gives distinct rays.
                    if x != 0 && x != 15 && y != 0 && y != 15 && z != 0 && z != 15 {
                        continue;
                    }

                    let direction = Vector3::new(
                        f64::from(x) / 15.0 * 2.0 - 1.0,
                        f64::from(y) / 15.0 * 2.0 - 1.0,
                        f64::from(z) / 15.0 * 2.0 - 1.0,
                    )
                    .normalize();

                    // Drawn inline: a thread-local rng must not live across
                    // the block-state awaits below.
                    let mut strength = self.power * (0.7 + rand::random::<f32>() * 0.6);
                    let mut current = self.pos;

                    while strength > 0.0 {
                        let position = BlockPos::floored_v(current);
                        let state = world.get_block_state(&position).await;
                        if !state.is_air() {
                            let block = world.get_block(&position).await;
                            strength -= (block.blast_resistance + 0.3) * 0.3;
                            if strength > 0.0 {
                                destroyed.insert(position);
                            }
                        }
                        current = current.add(&direction.multiply(0.3, 0.3, 0.3));
                        strength -= 0.225_000_01;
                    }
                }
            }
        }

        destroyed.into_iter().collect()
    }

    /// Runs the explosion: fires [`BlockExplodeEvent`], removes whatever
    /// block list the handlers left in it, and damages and knocks back
    /// nearby entities.
    pub async fn explode(&self, world: &Arc<World>) {
        let blocks = self.blocks_to_destroy(world).await;
        let origin = BlockPos::floored_v(self.pos);
        let yield_rate = if self.power >= 2.0 {
            1.0 / self.power
        } else {
            1.0
        };

        let (blocks, yield_rate) = if let Some(server) = world.server.upgrade() {
            let event = BlockExplodeEvent::new(
                world.get_block(&origin).await,
                origin,
                world.uuid,
                blocks,
                yield_rate,
            );
            let event = server.plugin_manager.fire::<BlockExplodeEvent>(event).await;
            if event.cancelled {
                return;
            }
            (event.blocks, event.yield_rate)
        } else {
            (blocks, yield_rate)
        };

        debug!("Explosion at {origin} destroys {} blocks", blocks.len());
        for position in &blocks {
            // Each block rolls against the yield rate the handlers left in
            // the event; losing the roll drops nothing.
            let mut flags = BlockFlags::NOTIFY_ALL;
            if rand::random::<f32>() >= yield_rate {
                flags |= BlockFlags::SKIP_DROPS;
            }
            world.break_block(position, None, flags).await;
        }

        self.damage_entities(world).await;
    }

    async fn damage_entities(&self, world: &Arc<World>) {
        let diameter = f64::from(self.power) * 2.0;
        let reach = diameter + 1.0;
        let sweep = BoundingBox::new(
            Vector3::new(self.pos.x - reach, self.pos.y - reach, self.pos.z - reach),
            Vector3::new(self.pos.x + reach, self.pos.y + reach, self.pos.z + reach),
        );

        for entity in world.get_all_at_box(&sweep).await {
            let base = entity.get_entity();
            let distance = base.pos.load().sub(&self.pos).length() / diameter;
            if distance > 1.0 {
                continue;
            }

            let offset = base.get_eye_pos().sub(&self.pos);
            if offset.length() == 0.0 {
                continue;
            }
            let direction = offset.normalize();

            let impact = 1.0 - distance;
            let damage = ((impact * impact + impact) / 2.0).mul_add(7.0 * diameter, 1.0);
            if let Some(living) = entity.get_living_entity() {
                living.damage(damage as f32, &DamageType::EXPLOSION).await;
            }

            base.add_velocity(direction.multiply(impact, impact, impact));
        }
    }
}
