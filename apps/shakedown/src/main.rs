use anyhow::{Context, Result};
use clap::Parser;
use shakedown_catalog::Catalog;
use shakedown_engine::{Engine, GenerationPlan, RunOptions};
use shakedown_prng::entropy_seed;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shakedown")]
#[command(about = "Generate randomized integration-test scenarios.", long_about = None)]
struct Cli {
    /// Generate exactly one scenario from this literal seed.
    #[arg(long, conflicts_with_all = ["seed", "number"])]
    scenario: Option<u32>,

    /// Master seed for batch mode. Drawn from OS entropy when omitted.
    #[arg(long)]
    seed: Option<u32>,

    /// Number of scenarios to generate in batch mode.
    #[arg(long)]
    number: Option<u32>,

    /// Scenario staging root.
    #[arg(long, default_value = ".tmp.scenarios")]
    out: PathBuf,

    /// Application template directory copied into every scenario.
    #[arg(long, default_value = "app")]
    app: PathBuf,

    /// Alternate axis catalog (YAML or JSON). Built-in axes when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Request-target lines rendered per scenario.
    #[arg(long, default_value_t = 2000)]
    targets: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let plan = if let Some(seed) = cli.scenario {
        GenerationPlan::Single { seed }
    } else {
        let Some(number) = cli.number else {
            eprintln!(
                "Error: --number option is required to set the number of scenarios to create."
            );
            std::process::exit(1);
        };
        let master_seed = cli.seed.unwrap_or_else(entropy_seed);
        println!("Using seed: {master_seed}");
        GenerationPlan::Batch {
            master_seed,
            count: number,
        }
    };

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };

    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("create scenario root {}", cli.out.display()))?;

    let engine = Engine::new(
        &catalog,
        RunOptions {
            scenarios_root: cli.out.clone(),
            app_template: cli.app.clone(),
            request_target_count: cli.targets,
        },
    );
    let outputs = engine.run(plan)?;

    println!("wrote:");
    println!("- {}", outputs.makefile.display());
    println!("- {}", outputs.compose_file.display());
    for scenario in &outputs.scenarios {
        println!("- {}", scenario.folder.display());
    }

    Ok(())
}
