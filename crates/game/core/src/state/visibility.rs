//! Incremental fog-of-war reveal.

use super::types::{Position, Tile};

/// Reveals every hidden tile within `radius` (Euclidean) of `center`.
///
/// Already revealed tiles are left untouched, so repeated calls with any
/// centers never re-fog a tile. Returns the number of tiles newly revealed.
pub fn reveal_around(tiles: &mut [Tile], center: Position, radius: f64) -> usize {
    if radius < 0.0 {
        return 0;
    }
    let radius_squared = radius * radius;

    tiles
        .iter_mut()
        .filter(|tile| !tile.is_revealed())
        .filter(|tile| tile.position.distance_squared(center) as f64 <= radius_squared)
        .map(|tile| tile.reveal())
        .filter(|newly| *newly)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::{TileKind, ZoneId};

    fn grid(width: i32, height: i32) -> Vec<Tile> {
        let zone = ZoneId::from("test");
        (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .map(|position| Tile::new(&zone, position, TileKind::Empty))
            .collect()
    }

    fn revealed(tiles: &[Tile]) -> Vec<Position> {
        tiles
            .iter()
            .filter(|t| t.is_revealed())
            .map(|t| t.position)
            .collect()
    }

    #[test]
    fn radius_two_and_a_half_covers_the_expected_disc() {
        let mut tiles = grid(9, 9);
        let newly = reveal_around(&mut tiles, Position::new(4, 4), 2.5);

        // dx² + dy² <= 6.25: centre, 4 orthogonal at 1, 4 diagonal, 4 orthogonal
        // at 2, 8 knight offsets = 21 cells. (±2, ±2) is out.
        assert_eq!(newly, 21);
        assert!(revealed(&tiles).contains(&Position::new(6, 3)));
        assert!(!revealed(&tiles).contains(&Position::new(6, 6)));
    }

    #[test]
    fn reveal_is_monotonic() {
        let mut tiles = grid(10, 10);
        reveal_around(&mut tiles, Position::new(1, 1), 2.5);
        let first = revealed(&tiles);

        reveal_around(&mut tiles, Position::new(8, 8), 2.5);
        let second = revealed(&tiles);

        assert!(first.iter().all(|p| second.contains(p)));
        assert!(second.len() > first.len());
    }

    #[test]
    fn repeat_at_same_center_reveals_nothing_new() {
        let mut tiles = grid(5, 5);
        reveal_around(&mut tiles, Position::new(2, 2), 2.5);
        assert_eq!(reveal_around(&mut tiles, Position::new(2, 2), 2.5), 0);
    }
}
