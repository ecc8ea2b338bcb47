//! End-to-end tick scenarios.

use arena::entity::{Food, Team, WeaponKind};
use arena::{Config, GameState, MatchState, ModeKind, PlayerCommands};
use glam::Vec2;

/// No food, no population upkeep, stationary autonomous cells.
fn quiet(mode: ModeKind) -> Config {
    let mut config = Config::default();
    config.session.mode = mode;
    config.food.target = 0;
    config.enemy.target = 0;
    config.enemy.speed = 0.0;
    config.enemy.wander_chance = 0.0;
    config.enemy.split_chance = 0.0;
    config
}

fn run(game: &mut GameState, dt: f32, ticks: usize) {
    let mut commands = PlayerCommands::default();
    for _ in 0..ticks {
        game.tick(dt, &mut commands);
    }
}

fn mass_of(game: &GameState, id: u32) -> f32 {
    game.world().get_cell(id).map(|c| c.mass()).unwrap_or(0.0)
}

#[test]
fn larger_cell_absorbs_smaller() {
    let mut game = GameState::empty(quiet(ModeKind::Classic)).unwrap();
    let player = game.place_player_cell(Vec2::new(500.0, 500.0), 400.0);
    let enemy = game.place_enemy(Vec2::new(525.0, 500.0), 100.0, None);

    let report = game.tick(0.01, &mut PlayerCommands::default());

    assert!(game.world().get_cell(enemy).is_none());
    assert_eq!(mass_of(&game, player), 500.0);
    let radius = game.world().get_cell(player).unwrap().radius();
    assert!((radius - 500.0_f32.sqrt()).abs() < 1e-4);
    assert_eq!(report.eliminated, 1);
    assert_eq!(report.state, MatchState::Running);
}

#[test]
fn near_equal_cells_stand_off() {
    let mut game = GameState::empty(quiet(ModeKind::Classic)).unwrap();
    let player = game.place_player_cell(Vec2::new(500.0, 500.0), 400.0);
    let enemy = game.place_enemy(Vec2::new(525.0, 500.0), 361.0, None);

    run(&mut game, 0.01, 10);

    assert_eq!(mass_of(&game, player), 400.0);
    assert_eq!(mass_of(&game, enemy), 361.0);
}

#[test]
fn classic_ends_when_player_is_absorbed() {
    let mut game = GameState::empty(quiet(ModeKind::Classic)).unwrap();
    let player = game.place_player_cell(Vec2::new(500.0, 500.0), 100.0);
    let enemy = game.place_enemy(Vec2::new(510.0, 500.0), 1600.0, None);

    let report = game.tick(0.01, &mut PlayerCommands::default());
    assert_eq!(report.state, MatchState::Eliminated);
    assert!(game.world().get_cell(player).is_none());
    assert_eq!(mass_of(&game, enemy), 1700.0);

    // Finished matches stay frozen
    let report = game.tick(0.01, &mut PlayerCommands::default());
    assert_eq!(report.state, MatchState::Eliminated);
    assert_eq!(game.tick_count(), 1);
}

#[test]
fn zone_damage_scales_with_stage() {
    let mut game = GameState::empty(quiet(ModeKind::BattleRoyale)).unwrap();
    {
        let zone = game.zone_mut().unwrap();
        zone.center = Vec2::new(1000.0, 1000.0);
        zone.radius = 1000.0;
        zone.stage = 2;
        zone.shrink_timer = 20.0;
    }
    let offset = 1200.0 / 2.0_f32.sqrt();
    let player = game.place_player_cell(Vec2::new(1000.0 + offset, 1000.0 + offset), 100.0);

    game.tick(1.0, &mut PlayerCommands::default());

    assert!((mass_of(&game, player) - 90.0).abs() < 1e-3);
    let zone = game.zone().unwrap();
    assert_eq!(zone.stage, 2);
    assert!((zone.shrink_timer - 19.0).abs() < 1e-4);
}

#[test]
fn battle_royale_is_won_by_outlasting_everyone() {
    let mut game = GameState::empty(quiet(ModeKind::BattleRoyale)).unwrap();
    game.place_player_cell(Vec2::new(1000.0, 1000.0), 400.0);
    let enemy = game.place_enemy(Vec2::new(1020.0, 1000.0), 100.0, None);
    assert_eq!(game.players_left(), 2);

    let report = game.tick(0.01, &mut PlayerCommands::default());
    assert!(game.world().get_cell(enemy).is_none());
    assert_eq!(game.players_left(), 1);
    assert_eq!(report.state, MatchState::ZoneCleared);
}

#[test]
fn battle_royale_never_replenishes() {
    let mut config = quiet(ModeKind::BattleRoyale);
    config.enemy.royale_initial = 3;
    config.enemy.target = 15;
    let mut game = GameState::new(config).unwrap();
    assert_eq!(game.world().enemy_count(), 3);

    let victim = game
        .world()
        .iter_cells()
        .find(|c| !c.is_player())
        .map(|c| c.id)
        .unwrap();
    game.world_mut().remove_cell(victim);

    run(&mut game, 0.016, 30);
    assert!(game.world().enemy_count() <= 2);
}

#[test]
fn classic_keeps_population_at_target() {
    let mut config = quiet(ModeKind::Classic);
    config.enemy.target = 6;
    let mut game = GameState::new(config).unwrap();
    assert_eq!(game.world().enemy_count(), 6);

    let victims: Vec<_> = game
        .world()
        .iter_cells()
        .filter(|c| !c.is_player())
        .take(4)
        .map(|c| c.id)
        .collect();
    for id in victims {
        game.world_mut().remove_cell(id);
    }
    game.tick(0.016, &mut PlayerCommands::default());
    assert_eq!(game.world().enemy_count(), 6);
}

#[test]
fn food_stays_at_target() {
    let mut config = quiet(ModeKind::Classic);
    config.food.target = 200;
    let mut game = GameState::empty(config).unwrap();
    let player = game.place_player_cell(Vec2::new(1000.0, 1000.0), 40_000.0);

    let corners = [
        Vec2::new(0.0, 0.0),
        Vec2::new(2000.0, 0.0),
        Vec2::new(2000.0, 2000.0),
        Vec2::new(0.0, 2000.0),
    ];
    let mut saw_respawning = false;
    for i in 0..1000 {
        let mut commands = PlayerCommands::steer(corners[(i / 150) % corners.len()]);
        game.tick(1.0 / 60.0, &mut commands);
        assert_eq!(game.world().food_total(), 200);
        saw_respawning |= !game.world().respawning.is_empty();
    }
    assert!(saw_respawning);
    assert!(mass_of(&game, player) > 40_000.0);
}

#[test]
fn eaten_food_respawns_after_delay() {
    let mut config = quiet(ModeKind::Classic);
    config.food.target = 1;
    let mut game = GameState::empty(config).unwrap();
    let player = game.place_player_cell(Vec2::new(500.0, 500.0), 100.0);
    game.world_mut().food.push(Food::new(Vec2::new(503.0, 500.0), 4.0));

    game.tick(0.1, &mut PlayerCommands::default());
    assert_eq!(mass_of(&game, player), 116.0);
    assert!(game.world().food.is_empty());
    assert_eq!(game.world().respawning.len(), 1);

    run(&mut game, 0.1, 47);
    assert_eq!(game.world().respawning.len(), 1);

    run(&mut game, 0.1, 3);
    assert_eq!(game.world().respawning.len(), 0);
    assert_eq!(game.world().food.len(), 1);
}

#[test]
fn zero_dt_changes_nothing() {
    let mut game = GameState::new(Config::default()).unwrap();
    let before: Vec<_> = game
        .cells()
        .iter()
        .map(|c| (c.id, c.position, c.mass))
        .collect();
    let food_before = game.food();

    for dt in [0.0, 0.0, -0.5] {
        let mut commands = PlayerCommands {
            target: Some(Vec2::new(0.0, 0.0)),
            split: true,
            toggle_lock: true,
            ..PlayerCommands::default()
        };
        game.tick(dt, &mut commands);
        assert_eq!(commands, PlayerCommands::default());
    }

    let after: Vec<_> = game
        .cells()
        .iter()
        .map(|c| (c.id, c.position, c.mass))
        .collect();
    assert_eq!(before, after);
    assert_eq!(food_before, game.food());
    assert_eq!(game.tick_count(), 0);
}

#[test]
fn same_seed_same_history() {
    let play = || {
        let mut game = GameState::new(Config::default()).unwrap();
        for i in 0..500 {
            let mut commands = PlayerCommands::steer(Vec2::new(1000.0, 1000.0));
            commands.split = i % 100 == 0;
            game.tick(1.0 / 60.0, &mut commands);
        }
        let cells: Vec<_> = game
            .cells()
            .iter()
            .map(|c| (c.id, c.owner, c.name.to_string(), c.position, c.mass))
            .collect();
        (cells, game.food(), game.state())
    };
    assert_eq!(play(), play());
}

#[test]
fn split_halves_mass_and_respects_cooldown() {
    let mut game = GameState::empty(quiet(ModeKind::Classic)).unwrap();
    let player = game.place_player_cell(Vec2::new(500.0, 500.0), 800.0);

    let mut commands = PlayerCommands {
        target: Some(Vec2::new(900.0, 500.0)),
        split: true,
        ..PlayerCommands::default()
    };
    let report = game.tick(0.016, &mut commands);
    assert_eq!(report.split_cells, 1);

    let cells = game.cells();
    assert_eq!(cells.len(), 2);
    for cell in &cells {
        assert_eq!(cell.mass, 400.0);
        assert!(cell.is_player);
    }
    let child = cells.iter().find(|c| c.id != player).unwrap();
    assert!(child.position.x > game.world().get_cell(player).unwrap().position.x);

    // Still cooling down
    let report = game.tick(0.016, &mut PlayerCommands { split: true, ..PlayerCommands::default() });
    assert_eq!(report.split_cells, 0);
    assert_eq!(game.cells().len(), 2);
}

#[test]
fn split_obeys_cell_cap() {
    let mut config = quiet(ModeKind::Classic);
    config.player.max_cells = 3;
    let mut game = GameState::empty(config).unwrap();
    game.place_player_cell(Vec2::new(300.0, 300.0), 800.0);
    game.place_player_cell(Vec2::new(1500.0, 1500.0), 800.0);

    let report = game.tick(0.016, &mut PlayerCommands { split: true, ..PlayerCommands::default() });
    assert_eq!(report.split_cells, 1);
    assert_eq!(game.world().player_cells().len(), 3);
}

#[test]
fn own_cells_merge_after_cooldown() {
    let mut game = GameState::empty(quiet(ModeKind::Classic)).unwrap();
    let a = game.place_player_cell(Vec2::new(500.0, 500.0), 400.0);
    let b = game.place_player_cell(Vec2::new(520.0, 500.0), 300.0);
    for id in [a, b] {
        game.world_mut().get_cell_mut(id).unwrap().split_cooldown = 0.5;
    }

    run(&mut game, 0.1, 3);
    assert_eq!(game.world().player_cells().len(), 2);

    run(&mut game, 0.1, 3);
    assert_eq!(game.world().player_cells().len(), 1);
    assert_eq!(game.player_mass(), 700.0);
    assert_eq!(game.state(), MatchState::Running);
}

#[test]
fn bullets_damage_rivals_only() {
    let mut config = quiet(ModeKind::Classic);
    config.player.speed = 0.0;
    let mut game = GameState::empty(config).unwrap();
    let player = game.place_player_cell(Vec2::new(500.0, 500.0), 1000.0);
    game.world_mut().get_cell_mut(player).unwrap().weapon = Some(WeaponKind::Gun);
    let enemy = game.place_enemy(Vec2::new(700.0, 500.0), 400.0, None);

    let mut commands = PlayerCommands {
        shoot_at: Some(Vec2::new(700.0, 500.0)),
        ..PlayerCommands::default()
    };
    let report = game.tick(0.05, &mut commands);
    assert_eq!(report.shots_fired, 1);
    assert_eq!(mass_of(&game, player), 990.0);
    assert_eq!(game.bullets().len(), 1);
    assert_eq!(game.bullets_near(game.bullets()[0].position).len(), 1);

    run(&mut game, 0.05, 10);
    assert_eq!(mass_of(&game, enemy), 250.0);
    assert!(game.bullets().is_empty());
}

#[test]
fn bullets_leaving_the_world_are_discarded() {
    let mut game = GameState::empty(quiet(ModeKind::Classic)).unwrap();
    let player = game.place_player_cell(Vec2::new(60.0, 500.0), 1000.0);
    game.world_mut().get_cell_mut(player).unwrap().weapon = Some(WeaponKind::Rpg);

    let mut commands = PlayerCommands {
        shoot_at: Some(Vec2::new(0.0, 500.0)),
        ..PlayerCommands::default()
    };
    assert_eq!(game.tick(0.01, &mut commands).shots_fired, 1);
    run(&mut game, 0.05, 5);
    assert!(game.bullets().is_empty());
}

#[test]
fn weapon_choice_arms_player() {
    let mut game = GameState::empty(quiet(ModeKind::Classic)).unwrap();
    game.place_player_cell(Vec2::new(500.0, 500.0), 6000.0);
    assert!(game.weapon_choice_available());

    let mut commands = PlayerCommands {
        choose_weapon: Some(WeaponKind::Rpg),
        ..PlayerCommands::default()
    };
    let report = game.tick(0.016, &mut commands);
    assert_eq!(report.weapon_chosen, Some(WeaponKind::Rpg));
    assert_eq!(game.player_mass(), 3000.0);
    assert!(game.cells().iter().all(|c| c.weapon == Some(WeaponKind::Rpg)));
    assert!(!game.weapon_choice_available());

    let mut commands = PlayerCommands {
        choose_weapon: Some(WeaponKind::Gun),
        ..PlayerCommands::default()
    };
    assert_eq!(game.tick(0.016, &mut commands).weapon_chosen, None);
}

#[test]
fn lock_keeps_heading() {
    let mut game = GameState::empty(quiet(ModeKind::Classic)).unwrap();
    let player = game.place_player_cell(Vec2::new(500.0, 500.0), 400.0);

    game.tick(0.1, &mut PlayerCommands::steer(Vec2::new(1500.0, 500.0)));
    let report = game.tick(0.1, &mut PlayerCommands { toggle_lock: true, ..PlayerCommands::default() });
    assert_eq!(report.lock_toggled, Some(true));

    let x_before = game.world().get_cell(player).unwrap().position.x;
    game.tick(0.1, &mut PlayerCommands::steer(Vec2::new(0.0, 500.0)));
    let x_after = game.world().get_cell(player).unwrap().position.x;
    assert!(x_after > x_before);

    let report = game.tick(0.1, &mut PlayerCommands { toggle_lock: true, ..PlayerCommands::default() });
    assert_eq!(report.lock_toggled, Some(false));
    game.tick(0.1, &mut PlayerCommands::default());
    assert!(game.world().get_cell(player).unwrap().position.x < x_after);
}

#[test]
fn teams_share_nothing_but_score() {
    let mut config = quiet(ModeKind::Teams);
    config.player.team = Some(Team::Red);
    config.food.target = 1;
    let mut game = GameState::empty(config).unwrap();
    let player = game.place_player_cell(Vec2::new(500.0, 500.0), 100.0);
    game.place_enemy(Vec2::new(505.0, 500.0), 1600.0, Some(Team::Red));
    game.world_mut().food.push(Food::new(Vec2::new(700.0, 500.0), 4.0));

    run(&mut game, 0.01, 5);
    assert_eq!(mass_of(&game, player), 100.0);

    // Food under the player's center
    game.world_mut().food.clear();
    game.world_mut().respawning.clear();
    game.world_mut().food.push(Food::new(Vec2::new(502.0, 500.0), 4.0));
    game.tick(0.01, &mut PlayerCommands::default());
    assert_eq!(mass_of(&game, player), 116.0);
    assert_eq!(game.team_scores().get(Team::Red), 16.0);
    assert_eq!(game.leading_team(), Some(Team::Red));
}

#[test]
fn teams_run_until_the_clock_expires() {
    let mut config = quiet(ModeKind::Teams);
    config.session.match_duration = 1.0;
    let mut game = GameState::empty(config).unwrap();
    let player = game.place_player_cell(Vec2::new(500.0, 500.0), 100.0);
    game.place_enemy(Vec2::new(505.0, 500.0), 1600.0, Some(Team::Blue));

    // Losing every cell does not end a teams match
    let report = game.tick(0.1, &mut PlayerCommands::default());
    assert!(game.world().get_cell(player).is_none());
    assert_eq!(report.state, MatchState::Running);

    run(&mut game, 0.1, 8);
    assert_eq!(game.state(), MatchState::Running);
    run(&mut game, 0.1, 2);
    assert_eq!(game.state(), MatchState::TimeExpired);
    assert_eq!(game.time_remaining(), Some(0.0));
}

#[test]
fn leaderboard_orders_by_mass() {
    let mut game = GameState::empty(quiet(ModeKind::Classic)).unwrap();
    game.place_player_cell(Vec2::new(100.0, 100.0), 900.0);
    game.place_enemy(Vec2::new(1000.0, 1000.0), 1600.0, None);
    game.place_enemy(Vec2::new(1500.0, 1500.0), 400.0, None);

    let board = game.leaderboard(2);
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].mass, 1600.0);
    assert!(!board[0].is_player);
    assert_eq!(board[1].name, "Player");
    assert!(board[1].is_player);
}

#[test]
fn reset_restores_a_fresh_session() {
    let mut config = Config::default();
    config.session.mode = ModeKind::Teams;
    config.player.team = Some(Team::Blue);
    let mut game = GameState::new(config).unwrap();
    assert_eq!(game.world().enemy_count(), 40);

    run(&mut game, 1.0 / 30.0, 120);
    game.reset();

    assert_eq!(game.state(), MatchState::Running);
    assert_eq!(game.tick_count(), 0);
    assert_eq!(game.world().enemy_count(), 40);
    assert_eq!(game.world().player_cells().len(), 1);
    assert_eq!(game.world().food_total(), 200);
    assert_eq!(game.time_remaining(), Some(300.0));
    assert!(Team::ALL.iter().all(|&t| game.team_scores().get(t) == 0.0));
    for team in Team::ALL {
        assert_eq!(game.world().team_enemy_count(team), 10);
    }
}

#[test]
fn teamed_bots_share_one_split_cap() {
    let mut config = quiet(ModeKind::Teams);
    config.enemy.split_chance = 1.0;
    let mut game = GameState::empty(config).unwrap();

    // Red is already over the four-cell cap, Blue is not
    let red = game.place_enemy(Vec2::new(200.0, 200.0), 800.0, Some(Team::Red));
    for i in 1..6 {
        game.place_enemy(Vec2::new(200.0 + 250.0 * i as f32, 200.0), 400.0, Some(Team::Red));
    }
    game.place_enemy(Vec2::new(1000.0, 1500.0), 800.0, Some(Team::Blue));

    game.tick(0.016, &mut PlayerCommands::default());

    assert_eq!(game.world().team_enemy_count(Team::Red), 6);
    assert_eq!(mass_of(&game, red), 800.0);
    assert_eq!(game.world().team_enemy_count(Team::Blue), 2);
}

#[test]
fn one_absorption_per_cell_per_tick() {
    let mut game = GameState::empty(quiet(ModeKind::Classic)).unwrap();
    let player = game.place_player_cell(Vec2::new(500.0, 500.0), 1600.0);
    game.place_enemy(Vec2::new(520.0, 500.0), 100.0, None);
    game.place_enemy(Vec2::new(480.0, 500.0), 100.0, None);

    let report = game.tick(0.01, &mut PlayerCommands::default());
    assert_eq!(report.eliminated, 1);
    assert_eq!(game.world().enemy_count(), 1);
    assert_eq!(mass_of(&game, player), 1700.0);

    let report = game.tick(0.01, &mut PlayerCommands::default());
    assert_eq!(report.eliminated, 1);
    assert_eq!(game.world().enemy_count(), 0);
    assert_eq!(mass_of(&game, player), 1800.0);
}

#[test]
fn bullets_pass_through_own_cells_and_teammates() {
    let mut config = quiet(ModeKind::Teams);
    config.player.team = Some(Team::Red);
    config.player.speed = 0.0;
    let mut game = GameState::empty(config).unwrap();

    let shooter = game.place_player_cell(Vec2::new(500.0, 500.0), 1000.0);
    game.world_mut().get_cell_mut(shooter).unwrap().weapon = Some(WeaponKind::Gun);
    let own = game.place_player_cell(Vec2::new(600.0, 500.0), 400.0);
    let mate = game.place_enemy(Vec2::new(700.0, 500.0), 400.0, Some(Team::Red));
    let rival = game.place_enemy(Vec2::new(900.0, 500.0), 400.0, Some(Team::Blue));

    let mut commands = PlayerCommands {
        shoot_at: Some(Vec2::new(900.0, 500.0)),
        ..PlayerCommands::default()
    };
    assert_eq!(game.tick(0.05, &mut commands).shots_fired, 1);
    run(&mut game, 0.05, 20);

    assert_eq!(mass_of(&game, own), 400.0);
    assert_eq!(mass_of(&game, mate), 400.0);
    assert_eq!(mass_of(&game, rival), 250.0);
    assert!(game.bullets().is_empty());
}

#[test]
fn absorber_team_is_credited_with_victim_mass() {
    let mut config = quiet(ModeKind::Teams);
    config.player.team = Some(Team::Red);
    let mut game = GameState::empty(config).unwrap();
    game.place_player_cell(Vec2::new(500.0, 500.0), 100.0);
    let blue = game.place_enemy(Vec2::new(505.0, 500.0), 1600.0, Some(Team::Blue));

    game.tick(0.01, &mut PlayerCommands::default());

    assert_eq!(mass_of(&game, blue), 1700.0);
    assert_eq!(game.team_scores().get(Team::Blue), 100.0);
    assert_eq!(game.team_scores().get(Team::Red), 0.0);
    assert_eq!(game.leading_team(), Some(Team::Blue));
}

#[test]
fn classic_player_starts_at_center() {
    let game = GameState::new(Config::default()).unwrap();
    let player = game.world().player_cells()[0];
    assert_eq!(game.world().get_cell(player).unwrap().position, Vec2::new(1000.0, 1000.0));
}
