//! # Room map
//!
//! Room bounds and obstacle rectangles drawn in the external mapping tool
//! and saved as a flat JSON file. The map is read once at startup and is
//! immutable for the life of the navigation loop.
//!
//! The containment predicates are exposed for future planning work; the
//! navigation cycle itself does not consult them.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// An axis-aligned rectangle in canvas coordinates, with the physical
/// dimensions entered at authoring time attached.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,

    /// Physical width entered in the authoring tool.
    ///
    /// Units: centimetres
    pub width_cm: f64,

    /// Physical height entered in the authoring tool.
    ///
    /// Units: centimetres
    pub height_cm: f64,
}

/// The room map: optional room bounds and a sequence of obstacle rectangles.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RoomMap {
    /// Room boundary, or `None` for an unbounded room.
    #[serde(default)]
    pub room_bounds: Option<Rect>,

    /// Obstacle rectangles. May be empty, and rectangles are not guaranteed
    /// to be disjoint.
    #[serde(default)]
    pub obstacles: Vec<Rect>,

    /// Pixels per centimetre used by the authoring canvas. Stored but not
    /// used by the control software.
    #[serde(default = "default_scale")]
    pub scale: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMERATIONS
// ------------------------------------------------------------------------------------------------

/// Possible errors when loading a map file.
#[derive(Debug, Error)]
pub enum MapLoadError {
    #[error("Cannot open the map file: {0}")]
    FileError(std::io::Error),

    #[error("Cannot parse the map file: {0}")]
    ParseError(serde_json::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// ------------------------------------------------------------------------------------------------

impl Rect {
    /// Normalise the corners so that `x1 <= x2` and `y1 <= y2`.
    fn normalise(&mut self) {
        if self.x1 > self.x2 {
            std::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            std::mem::swap(&mut self.y1, &mut self.y2);
        }
    }

    /// True if the point lies within this rectangle (inclusive).
    fn contains(&self, x: f64, y: f64) -> bool {
        self.x1 <= x && x <= self.x2 && self.y1 <= y && y <= self.y2
    }
}

impl RoomMap {
    /// Load a map from the JSON file produced by the mapping tool.
    ///
    /// Rectangle corners are normalised on load.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MapLoadError> {
        let file = File::open(path).map_err(MapLoadError::FileError)?;

        let mut map: RoomMap =
            serde_json::from_reader(BufReader::new(file)).map_err(MapLoadError::ParseError)?;

        if let Some(ref mut bounds) = map.room_bounds {
            bounds.normalise();
        }
        for obstacle in map.obstacles.iter_mut() {
            obstacle.normalise();
        }

        Ok(map)
    }

    /// True if the position is within the room bounds.
    ///
    /// A map with no bounds treats every position as valid.
    pub fn within_bounds(&self, x: f64, y: f64) -> bool {
        match self.room_bounds {
            Some(ref bounds) => bounds.contains(x, y),
            None => true,
        }
    }

    /// True if the position conflicts with any mapped obstacle.
    pub fn collides_with_obstacle(&self, x: f64, y: f64) -> bool {
        self.obstacles.iter().any(|o| o.contains(x, y))
    }

    /// Number of obstacle rectangles in the map.
    pub fn num_obstacles(&self) -> usize {
        self.obstacles.len()
    }
}

impl Default for RoomMap {
    fn default() -> Self {
        RoomMap {
            room_bounds: None,
            obstacles: Vec::new(),
            scale: default_scale(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn default_scale() -> f64 {
    1.0
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn rect(x1: f64, y1: f64, x2: f64, y2: f64) -> Rect {
        Rect {
            x1,
            y1,
            x2,
            y2,
            width_cm: (x2 - x1).abs(),
            height_cm: (y2 - y1).abs(),
        }
    }

    #[test]
    fn test_unbounded_map_accepts_everything() {
        let map = RoomMap::default();

        assert!(map.within_bounds(0.0, 0.0));
        assert!(map.within_bounds(-1000.0, 1000.0));
        assert!(!map.collides_with_obstacle(50.0, 50.0));
    }

    #[test]
    fn test_predicates() {
        let map = RoomMap {
            room_bounds: Some(rect(0.0, 0.0, 100.0, 100.0)),
            obstacles: vec![rect(10.0, 10.0, 20.0, 20.0), rect(40.0, 60.0, 45.0, 80.0)],
            scale: 1.0,
        };

        assert!(map.within_bounds(50.0, 50.0));
        assert!(map.within_bounds(0.0, 100.0));
        assert!(!map.within_bounds(150.0, 50.0));
        assert!(!map.within_bounds(50.0, -0.1));

        assert!(map.collides_with_obstacle(15.0, 15.0));
        assert!(map.collides_with_obstacle(42.0, 70.0));
        assert!(!map.collides_with_obstacle(50.0, 50.0));
    }

    #[test]
    fn test_round_trip() {
        let map = RoomMap {
            room_bounds: Some(rect(0.0, 0.0, 100.0, 100.0)),
            obstacles: vec![rect(10.0, 10.0, 20.0, 20.0)],
            scale: 1.0,
        };

        let mut path = std::env::temp_dir();
        path.push("veh_exec_room_map_round_trip.json");

        let file = File::create(&path).unwrap();
        serde_json::to_writer_pretty(file, &map).unwrap();

        let reloaded = RoomMap::load(&path).unwrap();

        assert!(reloaded.within_bounds(50.0, 50.0));
        assert!(!reloaded.within_bounds(150.0, 50.0));
        assert!(reloaded.collides_with_obstacle(15.0, 15.0));
        assert!(!reloaded.collides_with_obstacle(50.0, 50.0));
    }

    #[test]
    fn test_corners_normalised_on_load() {
        let mut path = std::env::temp_dir();
        path.push("veh_exec_room_map_normalise.json");

        // Bounds drawn bottom-right to top-left
        std::fs::write(
            &path,
            r#"{
                "room_bounds": {
                    "x1": 100.0, "y1": 100.0, "x2": 0.0, "y2": 0.0,
                    "width_cm": 100.0, "height_cm": 100.0
                },
                "obstacles": [],
                "scale": 1
            }"#,
        )
        .unwrap();

        let map = RoomMap::load(&path).unwrap();

        assert!(map.within_bounds(50.0, 50.0));
        assert!(!map.within_bounds(150.0, 50.0));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(RoomMap::load("no_such_map.json").is_err());
    }
}
