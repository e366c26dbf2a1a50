//! Line of Fire
//!
//! Truncates a shooter's candidate cells at the first one an active shield
//! stands in front of.

use tracing::debug;

use crate::config::ShieldsConfig;
use crate::core::vec3::GridCell;
use crate::shields::query::ShieldQuery;
use crate::shields::shield::Shield;

/// Whether an active shield crosses the ground-level line from `origin` to `cell`.
pub fn is_cell_shielded<'a, S>(shields: &ShieldQuery<'a, S>, origin: GridCell, cell: GridCell) -> bool
where
    S: Shield + ?Sized + 'a,
{
    shields
        .is_active(true)
        .intersects_segment(origin.to_vec3(0.0), cell.to_vec3(0.0), false)
        .get()
        .next()
        .is_some()
}

/// Yield `cells` in order, stopping before the first shielded one.
///
/// Cells are pulled lazily; nothing past the first shielded cell is read.
/// With the shot-line check disabled every cell passes through.
pub fn shootable_cells<'a, S, I>(
    config: &ShieldsConfig,
    origin: GridCell,
    cells: I,
    shields: ShieldQuery<'a, S>,
) -> Box<dyn Iterator<Item = GridCell> + 'a>
where
    S: Shield + ?Sized + 'a,
    I: IntoIterator<Item = GridCell>,
    I::IntoIter: 'a,
{
    let cells = cells.into_iter();
    if !config.enable_shot_line_check {
        return Box::new(cells);
    }

    Box::new(cells.take_while(move |cell| {
        let shielded = is_cell_shielded(&shields, origin, *cell);
        if shielded {
            debug!("Shot line from {:?} blocked at {:?}", origin, cell);
        }
        !shielded
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use crate::core::faction::{FactionId, FactionTable};
    use crate::core::vec3::Vec3;
    use crate::shields::shield::{BubbleShield, ShieldId};

    const ORIGIN: GridCell = GridCell::new(0, 0);

    fn line() -> Vec<GridCell> {
        (1..=10).map(|x| GridCell::new(x, 0)).collect()
    }

    fn wall() -> Vec<BubbleShield> {
        // Boundary crosses the line between x = 4 and x = 5
        vec![BubbleShield::new(ShieldId(1), FactionId(1), Vec3::ground(6.0, 0.0), 1.5, 10.0)]
    }

    fn xs(cells: impl Iterator<Item = GridCell>) -> Vec<i32> {
        cells.map(|c| c.x).collect()
    }

    #[test]
    fn test_truncated_before_first_shielded_cell() {
        let config = ShieldsConfig::default();
        let table = FactionTable::new();
        let shields = wall();

        let cells = shootable_cells(&config, ORIGIN, line(), ShieldQuery::new(&shields, &table));
        assert_eq!(xs(cells), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_check_disabled_passes_everything() {
        let config = ShieldsConfig { enable_shot_line_check: false, ..ShieldsConfig::default() };
        let table = FactionTable::new();
        let shields = wall();

        let cells = shootable_cells(&config, ORIGIN, line(), ShieldQuery::new(&shields, &table));
        assert_eq!(xs(cells).len(), 10);
    }

    #[test]
    fn test_inactive_shield_does_not_truncate() {
        let config = ShieldsConfig::default();
        let table = FactionTable::new();
        let shields = wall();
        shields[0].set_active(false);

        let cells = shootable_cells(&config, ORIGIN, line(), ShieldQuery::new(&shields, &table));
        assert_eq!(xs(cells).len(), 10);
    }

    #[test]
    fn test_cells_pulled_lazily() {
        let config = ShieldsConfig::default();
        let table = FactionTable::new();
        let shields = wall();
        let pulled = Cell::new(0);

        let source = line().into_iter().inspect(|_| pulled.set(pulled.get() + 1));
        let cells: Vec<GridCell> =
            shootable_cells(&config, ORIGIN, source, ShieldQuery::new(&shields, &table)).collect();

        assert_eq!(cells.len(), 4);
        // The shielded cell is read, nothing after it
        assert_eq!(pulled.get(), 5);
    }

    #[test]
    fn test_is_cell_shielded() {
        let table = FactionTable::new();
        let shields = wall();
        let query = ShieldQuery::new(&shields, &table);

        assert!(!is_cell_shielded(&query, ORIGIN, GridCell::new(4, 0)));
        assert!(is_cell_shielded(&query, ORIGIN, GridCell::new(5, 0)));
        assert!(!is_cell_shielded(&query, ORIGIN, GridCell::new(0, 5)));
    }
}
