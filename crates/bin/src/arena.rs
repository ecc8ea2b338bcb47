//! Arena - headless simulation driver.
//!
//! Runs one session at a fixed tick rate with a simple autopilot standing in
//! for the human player, and logs progress until the match ends.

use arena::entity::WeaponKind;
use arena::{Config, GameState, PlayerCommands, TickReport};
use glam::Vec2;
use rand::Rng;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Log a status line every this many ticks.
const STATUS_INTERVAL: u64 = 250;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Arena v{}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::var("ARENA_CONFIG").unwrap_or_else(|_| "arena.toml".to_string());
    // 0 runs until the match ends
    let max_ticks = tick_limit_arg()
        .or_else(|| std::env::var("ARENA_TICKS").ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);

    let config = Config::load(&config_path)?;
    info!("Loaded configuration from {}", config_path);
    info!("  Mode: {:?}", config.session.mode);
    info!("  World: {}x{}", config.world.width, config.world.height);
    info!("  Tick interval: {}ms", config.session.tick_interval_ms);

    let tick_interval_ms = config.session.tick_interval_ms.max(1);
    let mut game = GameState::new(config)?;
    run(&mut game, tick_interval_ms, max_ticks).await;

    print_summary(&game);
    Ok(())
}

/// Value of `--ticks N` or `--ticks=N`.
fn tick_limit_arg() -> Option<String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--ticks" {
            return args.next();
        }
        if let Some(value) = arg.strip_prefix("--ticks=") {
            return Some(value.to_string());
        }
    }
    None
}

async fn run(game: &mut GameState, tick_interval_ms: u64, max_ticks: u64) {
    let period = Duration::from_millis(tick_interval_ms);
    let dt = period.as_secs_f32();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut autopilot = Autopilot::new();
    loop {
        ticker.tick().await;

        let mut commands = autopilot.commands(game);
        let tick_start = std::time::Instant::now();
        let report = game.tick(dt, &mut commands);
        let tick_ms = tick_start.elapsed().as_secs_f64() * 1000.0;

        let tick_budget = tick_interval_ms as f64 * 0.9;
        if tick_ms > tick_budget {
            warn!(
                "Slow tick #{}: {:.3}ms (budget: {:.1}ms) - {} cells, {} bullets",
                game.tick_count(),
                tick_ms,
                tick_budget,
                game.world().cell_count(),
                game.world().bullets.len()
            );
        }
        log_report(game, &report);

        if report.state.is_terminal() {
            break;
        }
        if max_ticks > 0 && game.tick_count() >= max_ticks {
            info!("Tick limit {} reached", max_ticks);
            break;
        }
    }
}

fn log_report(game: &GameState, report: &TickReport) {
    if report.split_cells > 0 {
        debug!("Player split into {} new cells", report.split_cells);
    }
    if let Some(kind) = report.weapon_chosen {
        info!("Player bought a {}", kind.name());
    }
    if game.tick_count() % STATUS_INTERVAL != 0 {
        return;
    }
    let mut line = format!(
        "Tick #{}: player {:.0} mass in {} cells, {} owners left, {} food",
        game.tick_count(),
        game.player_mass(),
        game.world().player_cells().len(),
        game.players_left(),
        game.world().food.len()
    );
    if let Some(zone) = game.zone() {
        line.push_str(&format!(", zone stage {} radius {:.0}", zone.stage, zone.radius));
    }
    if let Some(remaining) = game.time_remaining() {
        line.push_str(&format!(", {:.0}s left", remaining));
    }
    info!("{}", line);
}

fn print_summary(game: &GameState) {
    info!("Match finished: {:?} after {} ticks", game.state(), game.tick_count());
    for (rank, entry) in game.leaderboard(10).iter().enumerate() {
        info!(
            "  {:>2}. {:<12} {:>8.0}{}",
            rank + 1,
            entry.name,
            entry.mass,
            if entry.is_player { "  <- player" } else { "" }
        );
    }
    if let Some(team) = game.leading_team() {
        info!("Leading team: {} ({:.0})", team.name(), game.team_scores().get(team));
    }
}

/// Steers the player toward food, splits when large and fires at the nearest rival.
struct Autopilot {
    rng: rand::rngs::ThreadRng,
}

impl Autopilot {
    fn new() -> Self {
        Self { rng: rand::rng() }
    }

    fn commands(&mut self, game: &GameState) -> PlayerCommands {
        let mut commands = PlayerCommands::default();
        let cells = game.cells();
        let Some(lead) = cells
            .iter()
            .filter(|c| c.is_player)
            .max_by(|a, b| a.mass.total_cmp(&b.mass))
        else {
            return commands;
        };

        let nearest_food = game
            .food()
            .into_iter()
            .map(|f| f.position)
            .min_by(|a, b| a.distance_squared(lead.position).total_cmp(&b.distance_squared(lead.position)));
        let nearest_rival = cells
            .iter()
            .filter(|c| c.owner != lead.owner && (c.team.is_none() || c.team != lead.team))
            .min_by(|a, b| {
                a.position
                    .distance_squared(lead.position)
                    .total_cmp(&b.position.distance_squared(lead.position))
            });

        let target = match (nearest_rival, nearest_food) {
            // Chase prey that is clearly smaller and close
            (Some(rival), _)
                if rival.radius * game.config().cells.absorb_margin < lead.radius
                    && rival.position.distance(lead.position) < lead.radius * 4.0 =>
            {
                rival.position
            }
            (_, Some(food)) => food,
            _ => game.world().center(),
        };
        commands.target = Some(jitter(&mut self.rng, target));

        let player_cells = game.world().player_cells().len();
        commands.split = lead.mass >= game.config().cells.split_mass * 4.0
            && player_cells < game.config().player.max_cells / 2;

        if game.weapon_choice_available() {
            commands.choose_weapon = Some(WeaponKind::Gun);
        }
        if lead.weapon.is_some() {
            commands.shoot_at = nearest_rival.map(|rival| rival.position);
        }
        commands
    }
}

fn jitter(rng: &mut impl Rng, point: Vec2) -> Vec2 {
    point + Vec2::new(rng.random_range(-2.0..=2.0), rng.random_range(-2.0..=2.0))
}
