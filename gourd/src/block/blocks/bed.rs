use std::sync::Arc;

use gourd_data::block_properties::{
    BedLikeProperties, BedPart, BlockProperties, HorizontalFacing,
};
use gourd_data::entity::EntityType;
use gourd_data::flags::BlockFlags;
use gourd_data::translation;
use gourd_data::{Block, BlockStateId};
use gourd_macros::gourd_block_from_tag;
use gourd_util::GameMode;
use gourd_util::math::boundingbox::BoundingBox;
use gourd_util::math::position::BlockPos;
use gourd_util::math::vector3::Vector3;
use gourd_util::text::TextComponent;

use crate::block::{
    BlockActionResult, BlockBehaviour, BrokenArgs, CanPlaceAtArgs, NormalUseArgs, OnPlaceArgs,
    PlacedArgs,
};
use crate::entity::EntityBase;
use crate::entity::living::LivingEntity;
use crate::plugin::BoxFuture;
use crate::plugin::player::bed_enter::PlayerBedEnterEvent;
use crate::plugin::player::bed_fail_enter::{BedFailReason, PlayerBedFailEnterEvent};
use crate::world::World;

type BedProperties = BedLikeProperties;

/// Entity types that keep players from sleeping while they are nearby.
/// Phantoms are hostile but do not count.
const NO_SLEEP_IDS: &[u16] = &[
    EntityType::ZOMBIE.id,
    EntityType::HUSK.id,
    EntityType::ZOMBIE_VILLAGER.id,
    EntityType::SKELETON.id,
    EntityType::STRAY.id,
    EntityType::CREEPER.id,
    EntityType::SPIDER.id,
    EntityType::CAVE_SPIDER.id,
    EntityType::DROWNED.id,
    EntityType::ENDERMAN.id,
    EntityType::WITCH.id,
    EntityType::PILLAGER.id,
    EntityType::VINDICATOR.id,
    EntityType::SILVERFISH.id,
    EntityType::WARDEN.id,
];

#[gourd_block_from_tag("minecraft:beds")]
pub struct BedBlock;

impl BedBlock {
    /// Writes the occupied bit into both halves of the bed.
    pub async fn set_occupied(
        occupied: bool,
        world: &Arc<World>,
        block: &'static Block,
        position: &BlockPos,
        state_id: BlockStateId,
    ) {
        let mut props = BedProperties::from_state_id(state_id, block);
        props.occupied = occupied;
        world
            .set_block_state(
                position,
                props.to_state_id(block),
                BlockFlags::NOTIFY_LISTENERS | BlockFlags::SKIP_BLOCK_ADDED_CALLBACK,
            )
            .await;

        let other_half_pos = Self::other_half(position, props);
        let (other_block, other_state_id) = world.get_block_and_state_id(&other_half_pos).await;
        if other_block == block {
            let mut other_props = BedProperties::from_state_id(other_state_id, other_block);
            if other_props.part != props.part {
                other_props.occupied = occupied;
                world
                    .set_block_state(
                        &other_half_pos,
                        other_props.to_state_id(other_block),
                        BlockFlags::NOTIFY_LISTENERS | BlockFlags::SKIP_BLOCK_ADDED_CALLBACK,
                    )
                    .await;
            }
        }
    }

    /// The position of the bed's other half.
    fn other_half(position: &BlockPos, props: BedProperties) -> BlockPos {
        if props.part == BedPart::Head {
            position.offset(props.facing.opposite().to_offset())
        } else {
            position.offset(props.facing.to_offset())
        }
    }

    /// Fires the fail event and applies what the handlers left in it.
    ///
    /// Cancelling drops both follow-up effects. Otherwise the bed explodes
    /// if `will_explode` is still set, and the message, if any, goes to the
    /// player's action bar.
    async fn fail(
        args: &NormalUseArgs<'_>,
        head_pos: &BlockPos,
        foot_pos: &BlockPos,
        fail_reason: BedFailReason,
        message: Option<TextComponent>,
        will_explode: bool,
    ) {
        let event = PlayerBedFailEnterEvent::new(
            args.player.clone(),
            fail_reason,
            args.block,
            *head_pos,
            will_explode,
            message,
        );
        let event = args
            .server
            .plugin_manager
            .fire::<PlayerBedFailEnterEvent>(event)
            .await;

        if event.cancelled {
            return;
        }

        if event.will_explode {
            args.world
                .break_block(foot_pos, None, BlockFlags::SKIP_DROPS)
                .await;
            args.world
                .break_block(head_pos, None, BlockFlags::SKIP_DROPS)
                .await;
            args.world.explode(head_pos.to_centered_f64(), 5.0).await;
        }

        if let Some(message) = event.message {
            args.player.send_system_message_raw(&message, true).await;
        }
    }

    /// Either half counts, so a solid block over the foot blocks entry too.
    /// Non-solid blocks leave enough room to get in.
    async fn is_obstructed(world: &Arc<World>, head_pos: &BlockPos, foot_pos: &BlockPos) -> bool {
        world.get_block_state(&head_pos.up()).await.is_solid()
            || world.get_block_state(&foot_pos.up()).await.is_solid()
    }

    fn is_close_enough(player_pos: Vector3<f64>, head_pos: &BlockPos, foot_pos: &BlockPos) -> bool {
        player_pos.is_within_bounds(head_pos.to_centered_f64(), 3.0, 2.0, 3.0)
            || player_pos.is_within_bounds(foot_pos.to_centered_f64(), 3.0, 2.0, 3.0)
    }

    /// Sleeping is allowed through any thunderstorm, and at night, where
    /// rain widens the window a little.
    async fn can_sleep(world: &Arc<World>) -> bool {
        let time_of_day = world.level_time.lock().await.time_of_day;
        let weather = world.weather.lock().await;

        if weather.thundering {
            true
        } else if weather.raining {
            time_of_day > 12010 && time_of_day < 23991
        } else {
            time_of_day > 12542 && time_of_day < 23459
        }
    }

    fn entity_prevents_sleep(entity: &dyn EntityBase) -> bool {
        NO_SLEEP_IDS.contains(&entity.get_entity().entity_type.id)
            && entity
                .get_living_entity()
                .is_some_and(LivingEntity::is_alive)
    }

    async fn monsters_nearby(world: &Arc<World>, head_pos: &BlockPos, foot_pos: &BlockPos) -> bool {
        for position in [head_pos, foot_pos] {
            let center = position.to_centered_f64();
            let sweep = BoundingBox::new(
                Vector3::new(center.x - 8.0, center.y - 5.0, center.z - 8.0),
                Vector3::new(center.x + 8.0, center.y + 5.0, center.z + 8.0),
            );
            for entity in world.get_all_at_box(&sweep).await {
                if Self::entity_prevents_sleep(entity.as_ref()) {
                    return true;
                }
            }
        }
        false
    }
}

impl BlockBehaviour for BedBlock {
    fn can_place_at<'a>(&'a self, args: CanPlaceAtArgs<'a>) -> BoxFuture<'a, bool> {
        Box::pin(async move {
            let facing = args.player.map_or(HorizontalFacing::North, |player| {
                player.get_entity().get_horizontal_facing()
            });
            let head_pos = args.position.offset(facing.to_offset());
            args.block_accessor
                .get_block_state(&head_pos)
                .await
                .replaceable()
        })
    }

    fn on_place<'a>(&'a self, args: OnPlaceArgs<'a>) -> BoxFuture<'a, BlockStateId> {
        Box::pin(async move {
            let mut props = BedProperties::default(args.block);
            props.facing = args.player.get_entity().get_horizontal_facing();
            props.part = BedPart::Foot;
            props.occupied = false;
            props.to_state_id(args.block)
        })
    }

    fn placed<'a>(&'a self, args: PlacedArgs<'a>) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            let props = BedProperties::from_state_id(args.state_id, args.block);
            // The foot half drags its head half into the world with it.
            if props.part == BedPart::Foot {
                let mut head_props = props;
                head_props.part = BedPart::Head;
                let head_pos = args.position.offset(props.facing.to_offset());
                args.world
                    .set_block_state(
                        &head_pos,
                        head_props.to_state_id(args.block),
                        BlockFlags::NOTIFY_ALL | BlockFlags::SKIP_BLOCK_ADDED_CALLBACK,
                    )
                    .await;
            }
        })
    }

    fn broken<'a>(&'a self, args: BrokenArgs<'a>) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            let props = BedProperties::from_state_id(args.state.id, args.block);
            let other_half_pos = Self::other_half(args.position, props);

            let (other_block, other_state_id) =
                args.world.get_block_and_state_id(&other_half_pos).await;
            if other_block == args.block {
                let other_props = BedProperties::from_state_id(other_state_id, other_block);
                if other_props.part != props.part {
                    let creative = args
                        .player
                        .is_some_and(|player| player.gamemode.load() == GameMode::Creative);
                    let flags = if creative {
                        BlockFlags::NOTIFY_NEIGHBORS | BlockFlags::SKIP_DROPS
                    } else {
                        BlockFlags::NOTIFY_NEIGHBORS
                    };
                    args.world
                        .break_block(&other_half_pos, args.player.cloned(), flags)
                        .await;
                }
            }
        })
    }

    fn normal_use<'a>(&'a self, args: NormalUseArgs<'a>) -> BoxFuture<'a, BlockActionResult> {
        Box::pin(async move {
            let world = args.world;
            let state_id = world.get_block_state_id(args.position).await;
            let props = BedProperties::from_state_id(state_id, args.block);

            let (head_pos, foot_pos) = if props.part == BedPart::Head {
                (*args.position, Self::other_half(args.position, props))
            } else {
                (Self::other_half(args.position, props), *args.position)
            };

            if !world.dimension.bed_works {
                Self::fail(
                    &args,
                    &head_pos,
                    &foot_pos,
                    BedFailReason::NotPossibleHere,
                    None,
                    true,
                )
                .await;
                return BlockActionResult::SuccessServer;
            }

            if Self::is_obstructed(world, &head_pos, &foot_pos).await {
                Self::fail(
                    &args,
                    &head_pos,
                    &foot_pos,
                    BedFailReason::Obstructed,
                    Some(TextComponent::translate(
                        translation::BLOCK_MINECRAFT_BED_OBSTRUCTED,
                        [],
                    )),
                    false,
                )
                .await;
                return BlockActionResult::SuccessServer;
            }

            if props.occupied {
                Self::fail(
                    &args,
                    &head_pos,
                    &foot_pos,
                    BedFailReason::OtherProblem,
                    Some(TextComponent::translate(
                        translation::BLOCK_MINECRAFT_BED_OCCUPIED,
                        [],
                    )),
                    false,
                )
                .await;
                return BlockActionResult::SuccessServer;
            }

            if !Self::is_close_enough(args.player.position(), &head_pos, &foot_pos) {
                Self::fail(
                    &args,
                    &head_pos,
                    &foot_pos,
                    BedFailReason::TooFarAway,
                    Some(TextComponent::translate(
                        translation::BLOCK_MINECRAFT_BED_TOO_FAR_AWAY,
                        [],
                    )),
                    false,
                )
                .await;
                return BlockActionResult::SuccessServer;
            }

            // The spawn point sticks even when sleeping itself then fails.
            let yaw = args.player.get_entity().yaw.load();
            if args
                .player
                .set_respawn_point(world.dimension, head_pos, yaw)
            {
                args.player
                    .send_system_message(&TextComponent::translate(
                        translation::BLOCK_MINECRAFT_SET_SPAWN,
                        [],
                    ))
                    .await;
            }

            if !Self::can_sleep(world).await {
                Self::fail(
                    &args,
                    &head_pos,
                    &foot_pos,
                    BedFailReason::NotPossibleNow,
                    Some(TextComponent::translate(
                        translation::BLOCK_MINECRAFT_BED_NO_SLEEP,
                        [],
                    )),
                    false,
                )
                .await;
                return BlockActionResult::SuccessServer;
            }

            if Self::monsters_nearby(world, &head_pos, &foot_pos).await {
                Self::fail(
                    &args,
                    &head_pos,
                    &foot_pos,
                    BedFailReason::NotSafe,
                    Some(TextComponent::translate(
                        translation::BLOCK_MINECRAFT_BED_NOT_SAFE,
                        [],
                    )),
                    false,
                )
                .await;
                return BlockActionResult::SuccessServer;
            }

            let enter_event = args
                .server
                .plugin_manager
                .fire::<PlayerBedEnterEvent>(PlayerBedEnterEvent::new(
                    args.player.clone(),
                    head_pos.to_f64(),
                ))
                .await;
            if enter_event.cancelled {
                return BlockActionResult::SuccessServer;
            }

            args.player.sleep(head_pos).await;
            Self::set_occupied(true, world, args.block, args.position, state_id).await;
            BlockActionResult::SuccessServer
        })
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use gourd_config::BasicConfiguration;
    use gourd_data::Block;
    use gourd_data::block_properties::{
        BedLikeProperties, BedPart, BlockProperties, HorizontalFacing,
    };
    use gourd_data::dimension::Dimension;
    use gourd_data::entity::{EntityPose, EntityType};
    use gourd_data::flags::BlockFlags;
    use gourd_data::translation;
    use gourd_util::math::position::BlockPos;
    use gourd_util::math::vector3::Vector3;
    use gourd_util::text::TextComponent;
    use tokio::sync::Mutex;

    use crate::block::BlockActionResult;
    use crate::entity::from_type;
    use crate::entity::player::Player;
    use crate::plugin::player::bed_enter::PlayerBedEnterEvent;
    use crate::plugin::player::bed_fail_enter::{BedFailReason, PlayerBedFailEnterEvent};
    use crate::plugin::player::bed_leave::PlayerBedLeaveEvent;
    use crate::plugin::{BoxFuture, EventHandler, EventPriority};
    use crate::server::Server;
    use crate::world::World;

    async fn night_server(dimension: Dimension) -> (Arc<Server>, Arc<World>, Arc<Player>) {
        let server = Server::new(BasicConfiguration::default());
        server
            .plugin_manager
            .set_self_ref(server.plugin_manager.clone())
            .await;
        server.plugin_manager.set_server(server.clone()).await;

        let world = server.create_world(dimension).await;
        world.level_time.lock().await.set_time(13_000);
        {
            let mut weather = world.weather.lock().await;
            weather.raining = false;
            weather.thundering = false;
        }

        let player = server.create_player(&world, "steve").await;
        (server, world, player)
    }

    /// Places a red bed with its foot at `foot` for a south-facing player.
    async fn place_bed(
        world: &Arc<World>,
        player: &Arc<Player>,
        foot: BlockPos,
    ) -> (BlockPos, BlockPos) {
        assert!(
            world
                .block_registry
                .place_block(world, player, &Block::RED_BED, &foot)
                .await
        );
        (foot.offset(HorizontalFacing::South.to_offset()), foot)
    }

    async fn use_bed(
        server: &Arc<Server>,
        world: &Arc<World>,
        player: &Arc<Player>,
        position: &BlockPos,
    ) -> BlockActionResult {
        let block = world.get_block(position).await;
        world
            .block_registry
            .on_use(block, player, position, server, world)
            .await
    }

    async fn bed_props(world: &Arc<World>, position: &BlockPos) -> BedLikeProperties {
        let (block, state_id) = world.get_block_and_state_id(position).await;
        BedLikeProperties::from_state_id(state_id, block)
    }

    #[tokio::test]
    async fn placing_a_bed_creates_both_halves() {
        let (_server, world, player) = night_server(Dimension::OVERWORLD).await;
        let (head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;

        assert_eq!(head, BlockPos::new(0, 64, 2));
        assert_eq!(world.get_block(&foot).await, &Block::RED_BED);
        assert_eq!(world.get_block(&head).await, &Block::RED_BED);

        let foot_props = bed_props(&world, &foot).await;
        let head_props = bed_props(&world, &head).await;
        assert_eq!(foot_props.part, BedPart::Foot);
        assert_eq!(head_props.part, BedPart::Head);
        assert_eq!(foot_props.facing, HorizontalFacing::South);
        assert!(!foot_props.occupied);
    }

    #[tokio::test]
    async fn sleeping_at_night_occupies_the_bed() {
        let (server, world, player) = night_server(Dimension::OVERWORLD).await;
        let (head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;

        let result = use_bed(&server, &world, &player, &foot).await;
        assert_eq!(result, BlockActionResult::SuccessServer);

        assert_eq!(
            player.living_entity.entity.pose.load(),
            EntityPose::Sleeping
        );
        assert_eq!(player.sleeping_since.load(), Some(0));
        assert!(bed_props(&world, &foot).await.occupied);
        assert!(bed_props(&world, &head).await.occupied);

        let respawn = player.respawn_point.load().unwrap();
        assert_eq!(respawn.position, head);

        let messages = player.take_messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].0.get_text(),
            translation::BLOCK_MINECRAFT_SET_SPAWN
        );
    }

    #[tokio::test]
    async fn using_the_head_half_works_too() {
        let (server, world, player) = night_server(Dimension::OVERWORLD).await;
        let (head, _foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;

        use_bed(&server, &world, &player, &head).await;
        assert_eq!(player.sleeping_since.load(), Some(0));
        assert_eq!(player.respawn_point.load().unwrap().position, head);
    }

    struct RecordingHandler {
        seen: Arc<Mutex<Vec<(BedFailReason, bool, Option<String>)>>>,
    }

    impl EventHandler<PlayerBedFailEnterEvent> for RecordingHandler {
        fn handle_blocking<'a>(
            &'a self,
            _server: &'a Arc<Server>,
            event: &'a mut PlayerBedFailEnterEvent,
        ) -> BoxFuture<'a, ()> {
            Box::pin(async move {
                self.seen.lock().await.push((
                    event.fail_reason,
                    event.will_explode,
                    event.message.as_ref().map(TextComponent::get_text),
                ));
            })
        }
    }

    async fn record_failures(server: &Arc<Server>) -> Arc<Mutex<Vec<(BedFailReason, bool, Option<String>)>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        server
            .plugin_manager
            .register::<PlayerBedFailEnterEvent, _>(
                Arc::new(RecordingHandler { seen: seen.clone() }),
                EventPriority::Normal,
                true,
            )
            .await;
        seen
    }

    #[tokio::test]
    async fn daytime_fails_with_not_possible_now() {
        let (server, world, player) = night_server(Dimension::OVERWORLD).await;
        world.level_time.lock().await.set_time(1000);
        let seen = record_failures(&server).await;
        let (_head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;

        use_bed(&server, &world, &player, &foot).await;

        assert_eq!(
            player.living_entity.entity.pose.load(),
            EntityPose::Standing
        );
        assert!(!bed_props(&world, &foot).await.occupied);
        // The spawn point still sticks on a daytime click.
        assert!(player.respawn_point.load().is_some());

        let seen = seen.lock().await;
        assert_eq!(seen.len(), 1);
        let (reason, will_explode, message) = &seen[0];
        assert_eq!(*reason, BedFailReason::NotPossibleNow);
        assert!(!will_explode);
        assert_eq!(
            message.as_deref(),
            Some(translation::BLOCK_MINECRAFT_BED_NO_SLEEP)
        );

        // The message reached the player's action bar, after the spawn one.
        let messages = player.take_messages().await;
        assert_eq!(messages.len(), 2);
        assert!(messages[1].1);
        assert_eq!(
            messages[1].0.get_text(),
            translation::BLOCK_MINECRAFT_BED_NO_SLEEP
        );
    }

    #[tokio::test]
    async fn a_thunderstorm_allows_sleeping_at_any_hour() {
        let (server, world, player) = night_server(Dimension::OVERWORLD).await;
        world.level_time.lock().await.set_time(6000);
        {
            let mut weather = world.weather.lock().await;
            weather.raining = true;
            weather.thundering = true;
        }
        let (_head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;

        use_bed(&server, &world, &player, &foot).await;
        assert_eq!(player.sleeping_since.load(), Some(0));
    }

    #[tokio::test]
    async fn an_occupied_bed_reports_other_problem() {
        let (server, world, steve) = night_server(Dimension::OVERWORLD).await;
        let alex = server.create_player(&world, "alex").await;
        let (_head, foot) = place_bed(&world, &steve, BlockPos::new(0, 64, 1)).await;

        use_bed(&server, &world, &steve, &foot).await;
        assert_eq!(steve.sleeping_since.load(), Some(0));

        let seen = record_failures(&server).await;
        use_bed(&server, &world, &alex, &foot).await;

        assert_eq!(alex.sleeping_since.load(), None);
        assert_eq!(seen.lock().await[0].0, BedFailReason::OtherProblem);
    }

    #[tokio::test]
    async fn a_block_over_the_head_obstructs_the_bed() {
        let (server, world, player) = night_server(Dimension::OVERWORLD).await;
        let (head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;
        world
            .set_block_state(&head.up(), Block::STONE.default_state.id, BlockFlags::NOTIFY_ALL)
            .await;

        let seen = record_failures(&server).await;
        use_bed(&server, &world, &player, &foot).await;

        assert_eq!(seen.lock().await[0].0, BedFailReason::Obstructed);
        assert!(player.respawn_point.load().is_none());
    }

    #[tokio::test]
    async fn a_block_over_the_foot_obstructs_the_bed_as_well() {
        let (server, world, player) = night_server(Dimension::OVERWORLD).await;
        let (_head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;
        world
            .set_block_state(&foot.up(), Block::STONE.default_state.id, BlockFlags::NOTIFY_ALL)
            .await;

        let seen = record_failures(&server).await;
        use_bed(&server, &world, &player, &foot).await;

        assert_eq!(seen.lock().await[0].0, BedFailReason::Obstructed);
    }

    #[tokio::test]
    async fn a_non_solid_block_overhead_does_not_obstruct() {
        let (server, world, player) = night_server(Dimension::OVERWORLD).await;
        let (head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;

        // A lone bed head is not solid, so it leaves room to get in.
        let mut props = BedLikeProperties::default(&Block::WHITE_BED);
        props.part = BedPart::Head;
        world
            .set_block_state(
                &head.up(),
                props.to_state_id(&Block::WHITE_BED),
                BlockFlags::NOTIFY_LISTENERS | BlockFlags::SKIP_BLOCK_ADDED_CALLBACK,
            )
            .await;

        let seen = record_failures(&server).await;
        use_bed(&server, &world, &player, &foot).await;

        assert!(seen.lock().await.is_empty());
        assert_eq!(player.sleeping_since.load(), Some(0));
    }

    #[tokio::test]
    async fn a_distant_player_is_too_far_away() {
        let (server, world, player) = night_server(Dimension::OVERWORLD).await;
        let (_head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;
        player
            .living_entity
            .entity
            .set_pos(Vector3::new(10.5, 64.0, 0.5));

        let seen = record_failures(&server).await;
        use_bed(&server, &world, &player, &foot).await;

        assert_eq!(seen.lock().await[0].0, BedFailReason::TooFarAway);
        // Too far to claim the spawn either.
        assert!(player.respawn_point.load().is_none());
    }

    #[tokio::test]
    async fn nearby_monsters_make_the_bed_unsafe() {
        let (server, world, player) = night_server(Dimension::OVERWORLD).await;
        let (_head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;
        world
            .spawn_entity(from_type(
                &EntityType::ZOMBIE,
                world.clone(),
                Vector3::new(3.5, 64.0, 2.5),
            ))
            .await;

        let seen = record_failures(&server).await;
        use_bed(&server, &world, &player, &foot).await;

        assert_eq!(player.sleeping_since.load(), None);
        assert_eq!(seen.lock().await[0].0, BedFailReason::NotSafe);
    }

    #[tokio::test]
    async fn dead_monsters_and_grazing_cows_do_not_prevent_sleep() {
        let (server, world, player) = night_server(Dimension::OVERWORLD).await;
        let (_head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;

        let zombie = from_type(
            &EntityType::ZOMBIE,
            world.clone(),
            Vector3::new(3.5, 64.0, 2.5),
        );
        zombie.living_entity.health.store(0.0);
        world.spawn_entity(zombie).await;
        world
            .spawn_entity(from_type(
                &EntityType::COW,
                world.clone(),
                Vector3::new(2.5, 64.0, 2.5),
            ))
            .await;

        use_bed(&server, &world, &player, &foot).await;
        assert_eq!(player.sleeping_since.load(), Some(0));
    }

    #[tokio::test]
    async fn a_bed_in_the_nether_explodes() {
        let (server, world, player) = night_server(Dimension::NETHER).await;
        let (head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;

        let seen = record_failures(&server).await;
        use_bed(&server, &world, &player, &foot).await;

        {
            let seen = seen.lock().await;
            let (reason, will_explode, message) = &seen[0];
            assert_eq!(*reason, BedFailReason::NotPossibleHere);
            assert!(*will_explode);
            assert!(message.is_none());
        }

        // Both halves are gone and nothing was sent to the player.
        assert!(world.get_block_state(&foot).await.is_air());
        assert!(world.get_block_state(&head).await.is_air());
        assert!(player.take_messages().await.is_empty());
        assert!(player.respawn_point.load().is_none());
    }

    struct CancelFailHandler;

    impl EventHandler<PlayerBedFailEnterEvent> for CancelFailHandler {
        fn handle_blocking<'a>(
            &'a self,
            _server: &'a Arc<Server>,
            event: &'a mut PlayerBedFailEnterEvent,
        ) -> BoxFuture<'a, ()> {
            Box::pin(async move {
                event.cancelled = true;
            })
        }
    }

    #[tokio::test]
    async fn cancelling_the_fail_event_suppresses_the_fallout() {
        let (server, world, player) = night_server(Dimension::NETHER).await;
        server
            .plugin_manager
            .register::<PlayerBedFailEnterEvent, _>(
                Arc::new(CancelFailHandler),
                EventPriority::Normal,
                true,
            )
            .await;
        let (head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;

        use_bed(&server, &world, &player, &foot).await;

        // The bed survives, but the player still failed to enter it.
        assert_eq!(world.get_block(&foot).await, &Block::RED_BED);
        assert_eq!(world.get_block(&head).await, &Block::RED_BED);
        assert_eq!(player.sleeping_since.load(), None);
        assert!(player.take_messages().await.is_empty());
    }

    struct DefuseHandler;

    impl EventHandler<PlayerBedFailEnterEvent> for DefuseHandler {
        fn handle_blocking<'a>(
            &'a self,
            _server: &'a Arc<Server>,
            event: &'a mut PlayerBedFailEnterEvent,
        ) -> BoxFuture<'a, ()> {
            Box::pin(async move {
                event.will_explode = false;
                event.message = Some(TextComponent::text("no fireworks tonight"));
            })
        }
    }

    #[tokio::test]
    async fn handlers_can_defuse_the_explosion_and_reword_the_message() {
        let (server, world, player) = night_server(Dimension::NETHER).await;
        server
            .plugin_manager
            .register::<PlayerBedFailEnterEvent, _>(
                Arc::new(DefuseHandler),
                EventPriority::Normal,
                true,
            )
            .await;
        let (_head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;

        use_bed(&server, &world, &player, &foot).await;

        assert_eq!(world.get_block(&foot).await, &Block::RED_BED);
        let messages = player.take_messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0.get_text(), "no fireworks tonight");
        assert!(messages[0].1);
    }

    struct SilenceHandler;

    impl EventHandler<PlayerBedFailEnterEvent> for SilenceHandler {
        fn handle_blocking<'a>(
            &'a self,
            _server: &'a Arc<Server>,
            event: &'a mut PlayerBedFailEnterEvent,
        ) -> BoxFuture<'a, ()> {
            Box::pin(async move {
                event.message = None;
            })
        }
    }

    #[tokio::test]
    async fn handlers_can_silence_the_failure_message() {
        let (server, world, player) = night_server(Dimension::OVERWORLD).await;
        world.level_time.lock().await.set_time(1000);
        server
            .plugin_manager
            .register::<PlayerBedFailEnterEvent, _>(
                Arc::new(SilenceHandler),
                EventPriority::Normal,
                true,
            )
            .await;
        let (_head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;

        use_bed(&server, &world, &player, &foot).await;

        // Only the spawn-point message arrives.
        let messages = player.take_messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].0.get_text(),
            translation::BLOCK_MINECRAFT_SET_SPAWN
        );
    }

    struct CancelEnterHandler;

    impl EventHandler<PlayerBedEnterEvent> for CancelEnterHandler {
        fn handle_blocking<'a>(
            &'a self,
            _server: &'a Arc<Server>,
            event: &'a mut PlayerBedEnterEvent,
        ) -> BoxFuture<'a, ()> {
            Box::pin(async move {
                event.cancelled = true;
            })
        }
    }

    #[tokio::test]
    async fn a_cancelled_enter_event_keeps_the_player_up() {
        let (server, world, player) = night_server(Dimension::OVERWORLD).await;
        server
            .plugin_manager
            .register::<PlayerBedEnterEvent, _>(
                Arc::new(CancelEnterHandler),
                EventPriority::Normal,
                true,
            )
            .await;
        let (_head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;

        use_bed(&server, &world, &player, &foot).await;

        assert_eq!(player.sleeping_since.load(), None);
        assert!(!bed_props(&world, &foot).await.occupied);
        // The spawn point was claimed before the event fired.
        assert!(player.respawn_point.load().is_some());
    }

    #[tokio::test]
    async fn breaking_one_half_removes_the_other() {
        let (_server, world, player) = night_server(Dimension::OVERWORLD).await;
        let (head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;

        world
            .break_block(&head, Some(player.clone()), BlockFlags::NOTIFY_ALL)
            .await;

        assert!(world.get_block_state(&head).await.is_air());
        assert!(world.get_block_state(&foot).await.is_air());
    }

    struct LeaveCounter {
        count: Arc<std::sync::atomic::AtomicU32>,
    }

    impl EventHandler<PlayerBedLeaveEvent> for LeaveCounter {
        fn handle_blocking<'a>(
            &'a self,
            _server: &'a Arc<Server>,
            _event: &'a mut PlayerBedLeaveEvent,
        ) -> BoxFuture<'a, ()> {
            Box::pin(async move {
                self.count.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            })
        }
    }

    #[tokio::test]
    async fn waking_up_frees_the_bed_and_fires_the_leave_event() {
        let (server, world, player) = night_server(Dimension::OVERWORLD).await;
        let count = Arc::new(std::sync::atomic::AtomicU32::new(0));
        server
            .plugin_manager
            .register::<PlayerBedLeaveEvent, _>(
                Arc::new(LeaveCounter { count: count.clone() }),
                EventPriority::Normal,
                true,
            )
            .await;
        let (head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;

        use_bed(&server, &world, &player, &foot).await;
        assert!(bed_props(&world, &head).await.occupied);

        player.wake_up().await;

        assert_eq!(
            player.living_entity.entity.pose.load(),
            EntityPose::Standing
        );
        assert!(!bed_props(&world, &head).await.occupied);
        assert!(!bed_props(&world, &foot).await.occupied);
        assert_eq!(count.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sleeping_through_the_night_skips_to_morning() {
        let (server, world, player) = night_server(Dimension::OVERWORLD).await;
        let (_head, foot) = place_bed(&world, &player, BlockPos::new(0, 64, 1)).await;

        use_bed(&server, &world, &player, &foot).await;
        for _ in 0..100 {
            world.tick().await;
        }

        assert_eq!(world.level_time.lock().await.time_of_day, 0);
        assert_eq!(player.sleeping_since.load(), None);
        assert!(!bed_props(&world, &foot).await.occupied);
        assert_eq!(
            player.living_entity.entity.pose.load(),
            EntityPose::Standing
        );
    }
}
