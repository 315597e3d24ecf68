//! Scenario assembly and run orchestration.
//!
//! Wires the catalog, random source, staging, renderers, and manifest
//! emitters into the seed loop behind the CLI. Sampling is split from
//! materialization so the axis-selection logic is testable without touching
//! a filesystem.

use anyhow::{Context, Result};
use shakedown_catalog::Catalog;
use shakedown_layout::{ScenarioPaths, compose_path, makefile_path};
use shakedown_prng::SeededRng;
use shakedown_schema::{OverrideMap, ScenarioDescriptor, scenario_identifier};
use shakedown_stage::stage_scenario;
use std::path::PathBuf;

/// How one run selects its seeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationPlan {
    /// Exactly one scenario from a literal seed. No master seed involved.
    Single { seed: u32 },
    /// `count` scenarios, child seeds drawn from the master-seeded stream.
    Batch { master_seed: u32, count: u32 },
}

/// Filesystem inputs and knobs for a run.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Root under which scenario folders and the run manifests land.
    pub scenarios_root: PathBuf,
    /// Application template copied into every scenario.
    pub app_template: PathBuf,
    /// Request-target lines rendered per scenario.
    pub request_target_count: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            scenarios_root: PathBuf::from(".tmp.scenarios"),
            app_template: PathBuf::from("app"),
            request_target_count: 2000,
        }
    }
}

/// The resolved axis picks for one scenario, before any filesystem work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioSample {
    pub seed: u32,
    pub os: String,
    pub runtime_version: String,
    pub installation_method: String,
    pub env: OverrideMap,
    pub ini: OverrideMap,
    pub identifier: String,
}

/// Sample every axis for one scenario seed.
///
/// Reseeds the shared generator first, so the result depends only on the
/// seed and the catalog, never on what ran before. The draw order below is
/// the reproducibility contract: OS, runtime version, installation method,
/// env modification count, env draws, ini modification count, ini draws.
/// Reordering it changes every existing seed's output.
pub fn sample_scenario(
    rng: &mut SeededRng,
    seed: u32,
    catalog: &Catalog,
) -> Result<ScenarioSample> {
    rng.reseed(u64::from(seed));

    let os = rng
        .pick(&catalog.oses)
        .context("catalog has no operating systems")?;
    let runtime_version = rng
        .pick(&os.runtimes)
        .with_context(|| format!("no runtime versions for {}", os.name))?
        .clone();
    let installation_method = rng
        .pick(&catalog.installation_methods)
        .context("catalog has no installation methods")?
        .clone();

    let mut env = OverrideMap::from_defaults(&catalog.default_env);
    let env_modifications = rng.range(0, catalog.max_env_modifications);
    for _ in 0..env_modifications {
        let axis = rng
            .pick(&catalog.env)
            .context("catalog has no environment variables")?;
        let candidate = rng
            .pick(&axis.candidates)
            .with_context(|| format!("no candidates for {}", axis.name))?;
        env.apply(&axis.name, candidate);
    }

    let mut ini = OverrideMap::new();
    let ini_cap = catalog.max_ini_modifications.min(catalog.ini.len());
    let ini_modifications = rng.range(0, ini_cap);
    for _ in 0..ini_modifications {
        let axis = rng
            .pick(&catalog.ini)
            .context("catalog has no configurable settings")?;
        let value = rng
            .pick(&axis.candidates)
            .with_context(|| format!("no candidates for {}", axis.name))?;
        ini.set(&axis.name, value);
    }

    let identifier = scenario_identifier(seed, &os.name, &runtime_version);
    Ok(ScenarioSample {
        seed,
        os: os.name.clone(),
        runtime_version,
        installation_method,
        env,
        ini,
        identifier,
    })
}

/// Sample, stage, and render one scenario, returning its descriptor.
pub fn assemble_scenario(
    rng: &mut SeededRng,
    seed: u32,
    catalog: &Catalog,
    options: &RunOptions,
) -> Result<ScenarioDescriptor> {
    let sample = sample_scenario(rng, seed, catalog)?;
    materialize(&sample, catalog, options)
}

fn materialize(
    sample: &ScenarioSample,
    catalog: &Catalog,
    options: &RunOptions,
) -> Result<ScenarioDescriptor> {
    let paths = ScenarioPaths::new(&options.scenarios_root, &sample.identifier);
    stage_scenario(&options.app_template, &paths, &sample.runtime_version)?;

    shakedown_render::write_web_server_config(&paths.web_server_conf(), &sample.env, &sample.ini)?;
    shakedown_render::write_process_manager_config(
        &paths.process_manager_conf(),
        &sample.env,
        &sample.ini,
    )?;
    shakedown_render::write_request_targets(
        &paths.request_targets(),
        options.request_target_count,
    )?;
    shakedown_render::write_env_overlay(&paths.env_overlay(), &sample.env)?;

    Ok(ScenarioDescriptor {
        identifier: sample.identifier.clone(),
        folder: paths.folder(),
        image: catalog.image.reference(&sample.os, &sample.runtime_version),
        installation_method: sample.installation_method.clone(),
    })
}

/// Everything a finished run wrote.
pub struct RunOutputs {
    pub makefile: PathBuf,
    pub compose_file: PathBuf,
    pub scenarios: Vec<ScenarioDescriptor>,
}

/// Drives the seed loop and concludes with both manifest emitters.
pub struct Engine<'a> {
    catalog: &'a Catalog,
    options: RunOptions,
}

impl<'a> Engine<'a> {
    pub fn new(catalog: &'a Catalog, options: RunOptions) -> Self {
        Self { catalog, options }
    }

    /// Generate all scenarios for the plan, then emit both manifests over
    /// the accumulated set (a one-entry manifest in single mode).
    pub fn run(&self, plan: GenerationPlan) -> Result<RunOutputs> {
        // Seed value is irrelevant here: every assembly reseeds before
        // sampling, and batch mode reseeds with the master first.
        let mut rng = SeededRng::new(0);
        let mut scenarios: Vec<ScenarioDescriptor> = Vec::new();

        match plan {
            GenerationPlan::Single { seed } => {
                scenarios.push(assemble_scenario(&mut rng, seed, self.catalog, &self.options)?);
            }
            GenerationPlan::Batch { master_seed, count } => {
                rng.reseed(u64::from(master_seed));
                for _ in 0..count {
                    // Child seeds and per-scenario sampling share one
                    // stream: each assembly reseeds it, so the next child
                    // seed is drawn from the state the previous scenario
                    // left behind. Existing seeds depend on this order.
                    let child_seed = rng.draw_seed();
                    let descriptor =
                        assemble_scenario(&mut rng, child_seed, self.catalog, &self.options)?;
                    // Scenarios are keyed by identifier; a repeated child
                    // seed regenerates the identical folder.
                    if !scenarios.iter().any(|s| s.identifier == descriptor.identifier) {
                        scenarios.push(descriptor);
                    }
                }
            }
        }

        let makefile = makefile_path(&self.options.scenarios_root);
        let compose_file = compose_path(&self.options.scenarios_root);
        let identifiers: Vec<String> =
            scenarios.iter().map(|s| s.identifier.clone()).collect();
        shakedown_manifest::write_makefile(&makefile, &identifiers)?;
        shakedown_manifest::write_compose_file(&compose_file, &scenarios)?;

        Ok(RunOutputs {
            makefile,
            compose_file,
            scenarios,
        })
    }
}
