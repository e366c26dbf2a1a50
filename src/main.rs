//! Shield Query Demo
//!
//! Sets up a small skirmish, fires a volley through it and reports which
//! shields held.
//!
//! Usage: `shield-query [config.json]`

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use shield_query::{
    VERSION,
    BubbleShield, FactionId, FactionTable, GridCell, RegionId, RelationKind, Shield,
    ShieldId, ShieldRegistry, ShieldsConfig, Vec3,
    shields::{
        deployment::{deploy_shield, Carrier, CarrierId},
        fire_line::shootable_cells,
        projectile::{ProjectileFlight, ProjectileInterceptor, ProjectileOutcome},
    },
};

const COLONY: FactionId = FactionId(1);
const RAIDERS: FactionId = FactionId(2);
const TRADERS: FactionId = FactionId(3);
const MAP: RegionId = RegionId(0);

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Shield Query v{}", VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => ShieldsConfig::load(path)?,
        None => ShieldsConfig::default(),
    };
    info!("Config: {:?}", config);

    demo_skirmish(&config)
}

/// Bullet flying along the x axis.
struct Bullet {
    origin: Vec3,
    destination: Vec3,
    ticks_to_impact: u32,
    starting_ticks: u32,
    damage: f32,
}

impl ProjectileFlight for Bullet {
    fn def_name(&self) -> &str { "Bullet_Rifle" }
    fn origin(&self) -> Vec3 { self.origin }
    fn destination(&self) -> Vec3 { self.destination }
    fn ticks_to_impact(&self) -> u32 { self.ticks_to_impact }
    fn starting_ticks_to_impact(&self) -> u32 { self.starting_ticks }
    fn flies_overhead(&self) -> bool { false }
    fn damage_amount(&self) -> f32 { self.damage }
    fn altitude(&self) -> f32 { 1.0 }
}

/// Demo function to exercise the query pipeline.
fn demo_skirmish(config: &ShieldsConfig) -> Result<()> {
    info!("=== Setting Up Skirmish ===");

    let relations = FactionTable::new()
        .with_relation(COLONY, RAIDERS, RelationKind::Hostile)
        .with_relation(COLONY, TRADERS, RelationKind::Ally);

    let mut registry = ShieldRegistry::new();
    registry.add(MAP, BubbleShield::new(ShieldId(1), COLONY, Vec3::ground(0.0, 0.0), 6.0, 40.0))?;
    registry.add(MAP, BubbleShield::new(ShieldId(2), TRADERS, Vec3::ground(20.0, 5.0), 4.0, 15.0))?;
    registry.add(MAP, BubbleShield::new(ShieldId(3), RAIDERS, Vec3::ground(-30.0, 0.0), 5.0, 25.0))?;

    let mut raider = Carrier::new(CarrierId(1), MAP, 1.2);
    deploy_shield(
        &mut registry,
        &mut raider,
        BubbleShield::new(ShieldId(4), RAIDERS, Vec3::ground(-40.0, 8.0), 1.5, 8.0),
    )?;

    for shield in registry.shields(MAP) {
        info!("Shield {:?} ({:?}) at {} r={:.1} energy={:.1}",
              shield.id(), shield.faction(), shield.center(), shield.radius(), shield.energy());
    }

    let query = registry.query(MAP, &relations).is_active(true);
    let friendly: Vec<ShieldId> = query.friendly_to(COLONY, false).get().map(|s| s.id()).collect();
    let hostile: Vec<ShieldId> = query.hostile_to(COLONY, false).get().map(|s| s.id()).collect();
    info!("Friendly to colony: {:?}", friendly);
    info!("Hostile to colony: {:?}", hostile);

    info!("=== Raider Volley ===");
    let interceptor = ProjectileInterceptor::new(config);
    let defenders = query.friendly_to(RAIDERS, true);

    for volley in 0..6 {
        let mut bullet = Bullet {
            origin: Vec3::ground(-25.0, 0.0),
            destination: Vec3::ground(0.0, 0.0),
            ticks_to_impact: 25,
            starting_ticks: 25,
            damage: 9.0,
        };

        let outcome = loop {
            let outcome = interceptor.intercept(&bullet, &defenders);
            if outcome != ProjectileOutcome::Continue || bullet.ticks_to_impact == 0 {
                break outcome;
            }
            bullet.ticks_to_impact -= 1;
        };

        info!("Volley {}: {:?}", volley, outcome);
    }

    info!("=== Colony Shot Line ===");
    let origin = GridCell::new(0, 0);
    let line = (1..=40).map(|x| GridCell::new(-x, 0));
    let shootable: Vec<GridCell> =
        shootable_cells(config, origin, line, registry.query(MAP, &relations)).collect();
    info!("Colony can shoot {} cells west before hitting a shield", shootable.len());

    info!("=== Final Shield State ===");
    for shield in registry.shields(MAP) {
        info!("Shield {:?}: energy={:.1}", shield.id(), shield.energy());
    }

    Ok(())
}
