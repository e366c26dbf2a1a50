//! Projectile Interception
//!
//! Per-tick shield check for projectiles in flight. The host exposes only
//! the flight fields needed here through `ProjectileFlight`; the outcome is
//! returned for the host to apply.

use tracing::debug;

use crate::config::ShieldsConfig;
use crate::core::vec3::Vec3;
use crate::shields::query::ShieldQuery;
use crate::shields::shield::{Shield, ShieldId};

/// Flight state of a projectile, as exposed by the host.
pub trait ProjectileFlight {
    /// Projectile definition name (matched against the blacklist).
    fn def_name(&self) -> &str;
    /// Launch position.
    fn origin(&self) -> Vec3;
    /// Target position.
    fn destination(&self) -> Vec3;
    /// Ticks left until impact.
    fn ticks_to_impact(&self) -> u32;
    /// Total flight ticks.
    fn starting_ticks_to_impact(&self) -> u32;
    /// Arcing projectiles (mortars) only meet shields on the way down.
    fn flies_overhead(&self) -> bool;
    /// Damage carried.
    fn damage_amount(&self) -> f32;
    /// Drawing altitude, used for the redirected impact point.
    fn altitude(&self) -> f32;
}

/// What the host should do with the projectile this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectileOutcome {
    /// Keep flying.
    Continue,
    /// Destroy the projectile; a shield caught it from above.
    Destroyed {
        /// Blocking shield
        shield: ShieldId,
        /// Where it was caught
        position: Vec3,
    },
    /// Move the destination to `impact` and end the flight now.
    Redirected {
        /// Blocking shield
        shield: ShieldId,
        /// Impact point at the projectile's altitude
        impact: Vec3,
    },
}

/// Ground-plane position after the given number of remaining ticks.
///
/// Progress is clamped to `[0, 1]`, so a projectile never moves past its
/// destination.
pub fn flight_position(origin: Vec3, destination: Vec3, ticks_to_impact: u32, starting_ticks: u32) -> Vec3 {
    let progress = if starting_ticks == 0 {
        1.0
    } else {
        (1.0 - ticks_to_impact as f32 / starting_ticks as f32).clamp(0.0, 1.0)
    };
    origin.flatten().lerp(destination.flatten(), progress)
}

/// Runs the shield check for projectiles.
pub struct ProjectileInterceptor<'c> {
    config: &'c ShieldsConfig,
}

impl<'c> ProjectileInterceptor<'c> {
    /// Create an interceptor.
    pub fn new(config: &'c ShieldsConfig) -> Self {
        Self { config }
    }

    /// Check one projectile against the shields for one tick.
    pub fn intercept<'a, S, P>(&self, projectile: &P, shields: &ShieldQuery<'a, S>) -> ProjectileOutcome
    where
        S: Shield + ?Sized + 'a,
        P: ProjectileFlight + ?Sized,
    {
        if !self.config.intercepts(projectile.def_name()) {
            return ProjectileOutcome::Continue;
        }

        let ticks = projectile.ticks_to_impact();
        let starting = projectile.starting_ticks_to_impact();
        let origin = projectile.origin();
        let destination = projectile.destination();
        let damage = projectile.damage_amount();
        let position = flight_position(origin, destination, ticks, starting);

        let mut outcome = ProjectileOutcome::Continue;

        if projectile.flies_overhead() {
            if ticks <= 1 {
                shields
                    .is_active(true)
                    .intersects_point(position, false)
                    .block_with(damage, |shield, point| {
                        outcome = ProjectileOutcome::Destroyed { shield: shield.id(), position: point };
                    });
            }
        } else {
            // On the impact tick the next position is the destination itself,
            // so the segment is empty and the shot lands unchecked
            let next = flight_position(origin, destination, ticks.saturating_sub(1), starting);
            let altitude = projectile.altitude();
            shields
                .is_active(true)
                .intersects_segment(position, next, false)
                .block_with(damage, |shield, point| {
                    outcome = ProjectileOutcome::Redirected {
                        shield: shield.id(),
                        impact: point.with_height(altitude),
                    };
                });
        }

        if outcome != ProjectileOutcome::Continue {
            debug!("Projectile {} stopped by shield: {:?}", projectile.def_name(), outcome);
        }
        outcome
    }
}
