//! Headless tick throughput of the software backend

use std::time::Instant;

use gpu_automata::{
    SimConfig, Simulation, SoftwareBackend, TexelGrid,
    domain::{ConwayRule, Rule},
};

const DENSITY: f64 = 0.3;

fn benchmark_ticks(size: usize, ticks: u32) -> f64 {
    let config = SimConfig {
        grid_width: size,
        grid_height: size,
        tick_interval: 0.0,
        ..SimConfig::default()
    };

    let mut backend = SoftwareBackend::new(600.0, 600.0);
    let program: Box<dyn Rule> = Box::new(ConwayRule);
    let mut sim = match Simulation::new(&mut backend, &config, program) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("{size}x{size}: {err}");
            return f64::NAN;
        }
    };
    let seed = TexelGrid::random(size, size, DENSITY, &mut rand::rng());
    if let Err(err) = sim.seed(&mut backend, &seed) {
        eprintln!("{size}x{size}: {err}");
        return f64::NAN;
    }

    let start = Instant::now();
    for _ in 0..ticks {
        backend.advance(0.001);
        if let Err(err) = sim.advance(&mut backend) {
            eprintln!("{size}x{size}: {err}");
            return f64::NAN;
        }
    }
    start.elapsed().as_secs_f64() * 1000.0 / ticks as f64
}

fn main() {
    println!("=== Software Backend Tick Benchmark ===\n");

    let sizes = [150, 256, 512, 1024, 2048];
    let ticks = 20;

    println!("{:>12} {:>12} {:>16}", "Size", "ms/tick", "Mcells/s");
    println!("{:-<42}", "");

    for size in sizes {
        let ms = benchmark_ticks(size, ticks);
        let cells = (size * size) as f64;
        println!(
            "{:>12} {:>12.2} {:>16.1}",
            format!("{}x{}", size, size),
            ms,
            cells / (ms / 1000.0) / 1_000_000.0
        );
    }
}
