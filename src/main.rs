mod app;
mod assets;
mod event;
mod gamestate;
mod player;
mod raycast;
mod worldgen;

use std::sync::Arc;
use std::time::Instant;

use clap::Parser;

use scree_blocks::{HotbarConfig, MaterialCatalog};
use scree_geom::Vec3;
use scree_world::WorldStore;

use crate::app::App;
use crate::event::{Event, MoveDir};
use crate::worldgen::{Mode, WorldGenConfig};

#[derive(Parser, Debug)]
#[command(
    name = "scree",
    about = "Headless voxel-world core: generate terrain, run a scripted player through it, report what ended up visible"
)]
struct Args {
    /// Directory containing assets/ (falls back to SCREE_ASSETS, then a search upward)
    #[arg(long)]
    assets: Option<String>,
    /// Override the worldgen seed
    #[arg(long)]
    seed: Option<u64>,
    /// Override the worldgen mode (classic | rolling)
    #[arg(long)]
    mode: Option<String>,
    /// Ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// Deferred world ops applied per tick
    #[arg(long, default_value_t = app::DEFAULT_DRAIN_BUDGET)]
    budget: usize,
    /// Skip the scripted input and just idle
    #[arg(long, default_value_t = false)]
    idle: bool,
}

fn main() {
    let args = Args::parse();

    let mut builder = env_logger::Builder::new();
    builder
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG");
    builder.init();

    let root = assets::resolve_assets_root(args.assets.clone());
    log::info!("assets root: {}", root.display());

    let catalog = match MaterialCatalog::from_path(assets::materials_path(&root)) {
        Ok(cat) => cat,
        Err(e) => {
            log::warn!("materials catalog unavailable ({}); using builtin", e);
            MaterialCatalog::builtin()
        }
    };

    let hotbar_cfg = {
        let path = assets::hotbar_path(&root);
        if path.is_file() {
            HotbarConfig::from_path(&path).unwrap_or_else(|e| {
                log::warn!("{}; using default hotbar", e);
                HotbarConfig::default()
            })
        } else {
            HotbarConfig::default()
        }
    };
    let hotbar = hotbar_cfg.resolve(&catalog).unwrap_or_else(|e| {
        log::warn!("{}; placement disabled", e);
        Vec::new()
    });

    let mut gen_cfg = {
        let path = assets::worldgen_path(&root);
        if path.is_file() {
            worldgen::load_config_from_path(&path).unwrap_or_else(|e| {
                log::warn!("{}; using worldgen defaults", e);
                WorldGenConfig::default()
            })
        } else {
            WorldGenConfig::default()
        }
    };
    if let Some(seed) = args.seed {
        gen_cfg.seed = seed;
    }
    match args.mode.as_deref() {
        None => {}
        Some("classic") => gen_cfg.mode = Mode::Classic,
        Some("rolling") => gen_cfg.mode = Mode::Rolling,
        Some(other) => log::warn!("unknown mode '{}', keeping {:?}", other, gen_cfg.mode),
    }

    let mut store = WorldStore::new(Arc::new(catalog));
    let started = Instant::now();
    match worldgen::generate(&mut store, &gen_cfg) {
        Ok(added) => log::info!(
            "generated {} blocks in {:.1?} ({:?}, seed {})",
            added,
            started.elapsed(),
            gen_cfg.mode,
            gen_cfg.seed
        ),
        Err(e) => {
            log::error!("worldgen failed: {}", e);
            std::process::exit(1);
        }
    }

    let mut app = App::new(store, hotbar, Vec3::ZERO);
    app.drain_budget = args.budget.max(1);

    let dt = 1.0 / app::TICKS_PER_SEC as f32;
    for tick in 0..args.ticks {
        if !args.idle {
            for ev in scripted_input(tick) {
                app.queue.emit_now(ev);
            }
        }
        app.step(dt);
    }

    report(&app);
}

/// Canned input for the headless run: walk off spawn, hop, look down,
/// break and place a couple of blocks, then a short climb under flight.
fn scripted_input(tick: u64) -> Vec<Event> {
    match tick {
        5 => vec![Event::MoveStarted {
            dir: MoveDir::Forward,
        }],
        90 => vec![Event::JumpRequested],
        150 => vec![Event::MoveEnded {
            dir: MoveDir::Forward,
        }],
        160 => vec![Event::LookChanged { dx: 0.0, dy: -240.0 }],
        200 => vec![Event::BreakRequested],
        230 => vec![Event::PlaceRequested],
        260 => vec![Event::SlotSelected { index: 1 }],
        270 => vec![Event::PlaceRequested],
        300 => vec![
            Event::FlightToggled,
            Event::LookChanged { dx: 0.0, dy: 340.0 },
        ],
        310 => vec![Event::MoveStarted {
            dir: MoveDir::Forward,
        }],
        420 => vec![Event::MoveEnded {
            dir: MoveDir::Forward,
        }],
        430 => vec![Event::FlightToggled],
        _ => Vec::new(),
    }
}

fn report(app: &App) {
    let stats = app.gs.store.stats();
    let run = &app.stats;
    let p = &app.gs.player;
    println!("--- run report ---");
    println!("ticks            {}", run.ticks);
    println!("blocks           {}", stats.blocks);
    println!(
        "shown            {} ({} meshes, {} pending ops)",
        stats.shown, stats.meshes, stats.pending
    );
    println!(
        "sectors          {} occupied, {} changes",
        stats.sectors, run.sector_changes
    );
    println!("ops drained      {}", run.ops_drained);
    println!("events applied   {}", run.events_applied);
    println!(
        "edits            {} broken, {} placed",
        run.blocks_broken, run.blocks_placed
    );
    println!(
        "player           ({:.2}, {:.2}, {:.2}) yaw {:.1} pitch {:.1}{}",
        p.position.x,
        p.position.y,
        p.position.z,
        p.yaw,
        p.pitch,
        if p.flying { " (flying)" } else { "" }
    );
    match app.last_pick {
        Some(hit) => println!("crosshair        {:?}, place cell {:?}", hit.hit, hit.previous),
        None => println!("crosshair        nothing in reach"),
    }
}
