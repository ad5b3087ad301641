use macroquad::prelude::*;
use tracing::{Level, error, info, warn};

use gpu_automata::{
    MacroquadBackend, SimConfig, SimResult, Simulation, TexelGrid,
    domain::{default_rule, rule_by_name},
    graphics::GraphicsBackend,
    input, rendering,
};

fn window_conf() -> Conf {
    let config = SimConfig::from_env();
    Conf {
        window_title: "Cellular Automata".to_owned(),
        window_width: config.window_width,
        window_height: config.window_height,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    if let Err(err) = run().await {
        error!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> SimResult<()> {
    let config = SimConfig::from_env();
    config.validate()?;

    let rule = rule_by_name(&config.rule).unwrap_or_else(|| {
        warn!("unknown rule {:?}, using Conway", config.rule);
        default_rule()
    });

    let mut backend = MacroquadBackend::new()?;
    let program = backend.compile_rule(rule.as_ref())?;
    let mut sim = Simulation::new(&mut backend, &config, program)?;

    if config.seed_density > 0.0 {
        let (w, h) = config.grid_size();
        let seed = TexelGrid::random(w, h, config.seed_density, &mut ::rand::rng());
        sim.seed(&mut backend, &seed)?;
    }

    info!("LMB: paint, RMB: erase, Tab: overlay, Esc: quit");
    let mut show_overlay = config.show_overlay;

    loop {
        if input::quit_requested() {
            break;
        }
        if input::overlay_toggled() {
            show_overlay = !show_overlay;
        }

        input::queue_pointer_edits(&mut sim, backend.display_size());

        clear_background(BLACK);
        if let Err(err) = sim.frame(&mut backend) {
            if !err.is_recoverable() {
                return Err(err);
            }
            error!("{err}");
        }

        if show_overlay {
            rendering::draw_overlay(&sim.stats(), rule.name(), sim.clock().rate());
        }

        next_frame().await;
    }

    info!("stopped after {} generations", sim.stats().generation);
    Ok(())
}
