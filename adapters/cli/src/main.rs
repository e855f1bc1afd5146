#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that builds the Accurate Clocks resource packs.

mod config;

use std::path::PathBuf;

use accurate_clocks_core::{hour_label, NormalizedCurve, TICKS_PER_DAY};
use accurate_clocks_pack::{
    build_composite_pack, build_variant, discover_templates, resolve_template_dir,
    write_virtual_pack, CompositeSettings,
};
use accurate_clocks_system_time_curve::generate_curve_for;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value;

use crate::config::BuildConfig;

/// Command-line arguments accepted by the generator.
#[derive(Debug, Parser)]
#[command(author, version, about = "Generates accurate clock resource packs")]
struct CliArgs {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Directory holding the template packs (overrides config).
    #[arg(long, value_name = "DIR", global = true)]
    input_dir: Option<PathBuf>,

    /// Directory generated packs are written to (overrides config).
    #[arg(long, value_name = "DIR", global = true)]
    output_dir: Option<PathBuf>,

    /// Seed for the fallback shuffle (overrides config).
    #[arg(long, value_name = "SEED", global = true)]
    seed: Option<u64>,

    /// Enables debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

/// Actions the generator can perform.
#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Builds every template and the composite pack.
    Build,
    /// Builds and writes a single template pack.
    Variant {
        /// Directory name of the template below the input directory.
        name: String,
    },
    /// Prints the normalized time curve.
    Curve,
}

/// Entry point for the Accurate Clocks command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let config = resolve_config(&args)?;
    let curve = generate_curve_for(config.curve)
        .with_context(|| format!("failed to generate the {} time curve", config.curve))?;
    log::debug!("generated {} time curve", config.curve);

    match args.command.unwrap_or(CliCommand::Build) {
        CliCommand::Build => run_build(&config, &curve),
        CliCommand::Variant { name } => run_variant(&config, &curve, &name),
        CliCommand::Curve => {
            print_curve(&curve);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    if let Err(error) = env_logger::Builder::from_env(env).try_init() {
        eprintln!("logger already initialized: {error}");
    }
}

fn resolve_config(args: &CliArgs) -> Result<BuildConfig> {
    let mut config = BuildConfig::load(args.config.as_deref())?;
    if let Some(input_dir) = &args.input_dir {
        config.input_dir = input_dir.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }
    if args.seed.is_some() {
        config.shuffle_seed = args.seed;
    }
    Ok(config)
}

fn shuffle_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => {
            log::info!("shuffling fallback tables with seed {seed}");
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_entropy(),
    }
}

fn run_build(config: &BuildConfig, curve: &NormalizedCurve) -> Result<()> {
    let settings = CompositeSettings {
        input_dir: config.input_dir.clone(),
        output_dir: config.output_dir.clone(),
        composite_name: config.composite_name.clone(),
        icon_path: config.icon_path.clone(),
        description: Value::String(config.composite_description.clone()),
    };
    let mut rng = shuffle_rng(config.shuffle_seed);

    match build_composite_pack(&settings, curve, &mut rng)? {
        Some(dir) => log::info!("composite pack written to {}", dir.display()),
        None => log::warn!("nothing was generated"),
    }
    Ok(())
}

fn run_variant(config: &BuildConfig, curve: &NormalizedCurve, name: &str) -> Result<()> {
    let _ = resolve_template_dir(&config.input_dir, name)?;
    let templates = discover_templates(&config.input_dir)?;
    let Some(template) = templates.iter().find(|template| template.name == name) else {
        bail!("{name} has no meta_type in its pack.mcmeta");
    };

    let mut rng = shuffle_rng(config.shuffle_seed);
    let pack = build_variant(template, curve, &mut rng)?;
    let dir = write_virtual_pack(&pack, &config.output_dir)?;
    log::info!("{} written to {}", pack.name, dir.display());
    Ok(())
}

fn print_curve(curve: &NormalizedCurve) {
    for (index, value) in curve.values().iter().enumerate() {
        println!(
            "{:>8.1} {value:.7} {}",
            value * TICKS_PER_DAY,
            hour_label(index)
        );
    }
}
