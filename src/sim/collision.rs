//! Footprint collision against arena bounds and walls
//!
//! Movement is blocked on a reduced "footprint" rectangle rather than the
//! full sprite box: the character's feet/shadow. This lets the upper body
//! overlap courtside furniture visually while the feet stay on open floor.

use crate::consts::*;

use super::arena::WALLS;

/// The footprint rectangle for a player box at `(x, y)` with edge `size`:
/// 0.6x wide, 0.3x tall, horizontally centered, bottom edge lifted
/// [`FOOTPRINT_LIFT`] pixels above the box's bottom edge.
pub fn footprint(x: f32, y: f32, size: f32) -> (f32, f32, f32, f32) {
    let w = size * FOOTPRINT_WIDTH_RATIO;
    let h = size * FOOTPRINT_HEIGHT_RATIO;
    let fx = x + (size - w) / 2.0;
    let fy = y + size - h - FOOTPRINT_LIFT;
    (fx, fy, w, h)
}

/// True if a player box at `(x, y)` may not stand there: the footprint
/// leaves the arena on any side or overlaps a wall rectangle.
///
/// Pure; the tick calls this once per axis so the free axis still slides
/// when the diagonal is blocked.
pub fn is_blocked(x: f32, y: f32, size: f32) -> bool {
    let (fx, fy, w, h) = footprint(x, y, size);
    if fx < 0.0 || fx + w > ARENA_WIDTH || fy < 0.0 || fy + h > ARENA_HEIGHT {
        return true;
    }
    WALLS.iter().any(|wall| wall.overlaps(fx, fy, w, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::arena::Wall;
    use proptest::prelude::*;

    /// Test-side check that a footprint rect clears every wall (closed-edge
    /// complement of the strict overlap used by the game).
    fn clear_of_walls(fx: f32, fy: f32, w: f32, h: f32) -> bool {
        WALLS.iter().all(|wall| {
            fx + w <= wall.x || wall.x + wall.w <= fx || fy + h <= wall.y || wall.y + wall.h <= fy
        })
    }

    #[test]
    fn test_open_floor_is_free() {
        assert!(!is_blocked(PLAYER_SPAWN_X, PLAYER_SPAWN_Y, PLAYER_SIZE));
        assert!(!is_blocked(50.0, 50.0, PLAYER_SIZE));
        assert!(!is_blocked(900.0, 600.0, PLAYER_SIZE));
    }

    #[test]
    fn test_out_of_bounds_is_blocked() {
        let s = PLAYER_SIZE;
        assert!(is_blocked(-s, 350.0, s));
        assert!(is_blocked(ARENA_WIDTH, 350.0, s));
        assert!(is_blocked(500.0, -s, s));
        assert!(is_blocked(500.0, ARENA_HEIGHT, s));
    }

    #[test]
    fn test_footprint_inside_each_wall_is_blocked() {
        for wall in WALLS {
            // Center the footprint on the wall's center
            let (_, _, w, h) = footprint(0.0, 0.0, PLAYER_SIZE);
            let fx = wall.x + wall.w / 2.0 - w / 2.0;
            let fy = wall.y + wall.h / 2.0 - h / 2.0;
            let x = fx - (PLAYER_SIZE - w) / 2.0;
            let y = fy - PLAYER_SIZE + h + FOOTPRINT_LIFT;
            assert!(is_blocked(x, y, PLAYER_SIZE));
        }
    }

    #[test]
    fn test_feet_bias_allows_head_overlap() {
        // Standing just below a wall: the sprite box overlaps it but the
        // footprint (feet) does not, so the spot is free.
        let wall = WALLS[0]; // (300, 120, 180, 40)
        let x = wall.x + wall.w / 2.0 - PLAYER_SIZE / 2.0;
        let y = wall.y + wall.h - PLAYER_SIZE / 2.0;
        let (_, fy, _, _) = footprint(x, y, PLAYER_SIZE);
        assert!(fy >= wall.y + wall.h, "footprint should start below the wall");
        assert!(!is_blocked(x, y, PLAYER_SIZE));
        // Full box still overlaps the wall rect
        assert!(Wall::new(wall.x, wall.y, wall.w, wall.h).overlaps(
            x,
            y,
            PLAYER_SIZE,
            PLAYER_SIZE
        ));
    }

    proptest! {
        /// In-bounds positions whose footprint clears every wall are free;
        /// positions whose footprint overlaps a wall are blocked.
        #[test]
        fn prop_blocked_iff_bounds_or_wall(
            x in -100.0f32..(ARENA_WIDTH + 100.0),
            y in -100.0f32..(ARENA_HEIGHT + 100.0),
        ) {
            let (fx, fy, w, h) = footprint(x, y, PLAYER_SIZE);
            let in_bounds =
                fx >= 0.0 && fx + w <= ARENA_WIDTH && fy >= 0.0 && fy + h <= ARENA_HEIGHT;
            let expect_blocked = !in_bounds || !clear_of_walls(fx, fy, w, h);
            prop_assert_eq!(is_blocked(x, y, PLAYER_SIZE), expect_blocked);
        }

        /// Every position outside the arena bounds is blocked.
        #[test]
        fn prop_outside_is_blocked(y in -200.0f32..(ARENA_HEIGHT + 200.0)) {
            prop_assert!(is_blocked(-PLAYER_SIZE, y, PLAYER_SIZE));
            prop_assert!(is_blocked(ARENA_WIDTH + 1.0, y, PLAYER_SIZE));
        }
    }
}
