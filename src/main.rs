//! Harvest Simulator
//!
//! Fires a batch of hits at one vehicle prefab through an in-memory host and
//! reports what the configured tables hand out.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use harvestable_vehicles::config::{HarvestConfig, USE_PERMISSION};
use harvestable_vehicles::core::error::Result;
use harvestable_vehicles::core::types::{PlayerId, SkinId};
use harvestable_vehicles::handler::{HarvestHandler, HarvestOutcome};
use harvestable_vehicles::host::{
    ActiveItem, DamageEvent, DamageTypes, EntityKind, EntitySnapshot, InMemoryHost,
    PlayerSnapshot,
};

/// Harvest Simulator - roll vehicle harvests against a config
#[derive(Parser, Debug)]
#[command(name = "harvest_sim")]
#[command(about = "Simulate harvesting hits against a vehicle prefab")]
struct Args {
    /// Config file (.toml or .json); stock config when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Short prefab name of the vehicle being hit
    #[arg(long, default_value = "kayak")]
    prefab: String,

    /// Tool short name the attacker holds
    #[arg(long, default_value = "hammer.salvaged")]
    tool: String,

    /// Skin id on the held tool
    #[arg(long, default_value_t = 0)]
    tool_skin: u64,

    /// Number of hits to simulate
    #[arg(long, default_value_t = 1000)]
    hits: u32,

    /// Damage dealt by each hit before scaling
    #[arg(long, default_value_t = 10.0)]
    damage: f32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Refuse to run when the config has error-level issues
    #[arg(long)]
    strict: bool,

    /// Print the stock config as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct SimulationReport {
    prefab: String,
    tool: String,
    seed: u64,
    hits: u32,
    /// Damage factor of the matched vehicle group; `None` when no group lists the prefab
    damage_factor: Option<f32>,
    harvested: u32,
    empty_rolls: u32,
    skipped: BTreeMap<String, u32>,
    totals: BTreeMap<String, u64>,
    damage_before: f32,
    damage_after: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.dump_config {
        print!("{}", HarvestConfig::default().to_toml_string()?);
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => HarvestConfig::load(path)?,
        None => HarvestConfig::default(),
    };
    let config = if args.strict { config.validated()? } else { config };

    let seed = args.seed.unwrap_or_else(rand::random);
    let report = simulate(&args, config, seed);

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&report),
    }

    Ok(())
}

fn simulate(args: &Args, config: HarvestConfig, seed: u64) -> SimulationReport {
    let kind = if args.prefab == "hotairballoon" {
        EntityKind::HotAirBalloon
    } else {
        EntityKind::Vehicle
    };
    let entity = EntitySnapshot::vehicle(args.prefab.clone(), 1000.0).with_kind(kind);

    let player_id = PlayerId(76_561_198_000_000_001);
    let player = PlayerSnapshot::new(player_id)
        .holding(ActiveItem::tool(args.tool.clone()).with_skin(SkinId(args.tool_skin)));

    let mut host = InMemoryHost::new();
    host.grant_permission(player_id, USE_PERMISSION);

    let mut handler = HarvestHandler::with_seed(config, seed);
    let damage_factor = handler
        .config()
        .vehicle_for_prefab(&args.prefab)
        .map(|vehicle| vehicle.damage_increase_factor);

    let mut report = SimulationReport {
        prefab: args.prefab.clone(),
        tool: args.tool.clone(),
        seed,
        hits: args.hits,
        damage_factor,
        harvested: 0,
        empty_rolls: 0,
        skipped: BTreeMap::new(),
        totals: BTreeMap::new(),
        damage_before: 0.0,
        damage_after: 0.0,
    };

    for _ in 0..args.hits {
        let mut damage = DamageTypes::new().with("blunt", args.damage);
        report.damage_before += damage.total();

        let outcome = handler.on_entity_take_damage(
            DamageEvent::new(&entity, Some(&player), &mut damage),
            &mut host,
        );
        report.damage_after += damage.total();

        match outcome {
            HarvestOutcome::Harvested { .. } => report.harvested += 1,
            HarvestOutcome::ScaledOnly { .. } => report.empty_rolls += 1,
            HarvestOutcome::Skipped(reason) => {
                *report.skipped.entry(format!("{:?}", reason)).or_insert(0) += 1;
            }
        }
    }

    report.totals = host.totals_for(player_id);
    report
}

fn print_text(report: &SimulationReport) {
    println!("Harvest Simulation");
    println!("==================");
    println!("Prefab: {}  Tool: {}  Seed: {}", report.prefab, report.tool, report.seed);
    match report.damage_factor {
        Some(factor) => println!("Vehicle group damage factor: {}", factor),
        None => println!("No vehicle group lists this prefab"),
    }
    println!("Hits: {}", report.hits);
    println!("  harvested:   {}", report.harvested);
    println!("  empty rolls: {}", report.empty_rolls);
    for (reason, count) in &report.skipped {
        println!("  skipped ({}): {}", reason, count);
    }

    println!("\n--- Granted ---");
    if report.totals.is_empty() {
        println!("(nothing)");
    }
    for (item, amount) in &report.totals {
        println!("{:<20} {}", item, amount);
    }

    println!("\n--- Damage ---");
    println!("Before scaling: {:.1}", report.damage_before);
    println!("After scaling:  {:.1}", report.damage_after);
}
