//! Properties that hold after every tick, whatever the seed, mode or frame pacing.

use arena::{Config, GameState, ModeKind, PlayerCommands};
use glam::Vec2;
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = ModeKind> {
    prop_oneof![
        Just(ModeKind::Classic),
        Just(ModeKind::Teams),
        Just(ModeKind::BattleRoyale),
    ]
}

fn small_config(mode: ModeKind, seed: u64) -> Config {
    let mut config = Config::default();
    config.session.mode = mode;
    config.session.seed = seed;
    config.world.width = 800.0;
    config.world.height = 600.0;
    config.food.target = 60;
    config.enemy.target = 8;
    config.enemy.team_initial = 8;
    config.enemy.royale_initial = 8;
    config.enemy.split_chance = 0.05;
    config.enemy.wander_chance = 0.05;
    config
}

fn check_invariants(game: &GameState) -> Result<(), TestCaseError> {
    let world = game.world();
    for cell in world.iter_cells() {
        let r = cell.radius();
        prop_assert!(cell.mass() > 0.0, "cell {} kept with mass {}", cell.id, cell.mass());
        prop_assert!((r - cell.mass().sqrt()).abs() < 1e-3);
        prop_assert!(cell.position.x >= r - 1e-3 && cell.position.x <= world.width - r + 1e-3);
        prop_assert!(cell.position.y >= r - 1e-3 && cell.position.y <= world.height - r + 1e-3);
        prop_assert!(cell.split_cooldown >= 0.0);
        prop_assert!(cell.weapon_cooldown >= 0.0);
    }
    for bullet in &world.bullets {
        prop_assert!(!bullet.is_out_of_bounds(world.width, world.height));
    }
    prop_assert_eq!(world.food_total(), game.config().food.target);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn tick_preserves_invariants(
        seed in any::<u64>(),
        mode in mode_strategy(),
        frames in prop::collection::vec((0.0f32..0.1, 0.0f32..800.0, 0.0f32..600.0, any::<bool>()), 1..150),
    ) {
        let mut game = GameState::new(small_config(mode, seed)).unwrap();
        check_invariants(&game)?;

        for (dt, x, y, split) in frames {
            let mut commands = PlayerCommands {
                target: Some(Vec2::new(x, y)),
                split,
                ..PlayerCommands::default()
            };
            game.tick(dt, &mut commands);
            prop_assert_eq!(&commands, &PlayerCommands::default());
            check_invariants(&game)?;
        }
    }

    #[test]
    fn terminal_state_is_final(seed in any::<u64>(), ticks in 1usize..200) {
        let mut config = small_config(ModeKind::Teams, seed);
        config.session.match_duration = 0.5;
        let mut game = GameState::new(config).unwrap();

        let mut commands = PlayerCommands::default();
        for _ in 0..ticks {
            game.tick(0.05, &mut commands);
        }
        if game.state().is_terminal() {
            let state = game.state();
            let count = game.tick_count();
            game.tick(0.05, &mut commands);
            prop_assert_eq!(game.state(), state);
            prop_assert_eq!(game.tick_count(), count);
        }
    }
}
