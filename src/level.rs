//! Level description: map rows, spawn point, wall texture and objects.

use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::camera::Camera;
use crate::error::{SetupError, SetupResult};
use crate::map::OccupancyMap;
use crate::sprites::WorldObject;
use crate::texture::Texture;
use crate::world::World;

#[derive(Debug, Deserialize)]
struct LevelFile {
    map: Vec<String>,
    spawn: SpawnDef,
    wall_texture: Option<PathBuf>,
    #[serde(default)]
    objects: Vec<ObjectDef>,
}

#[derive(Debug, Deserialize)]
struct SpawnDef {
    x: f32,
    y: f32,
    #[serde(default)]
    heading: f32,
}

#[derive(Debug, Deserialize)]
struct ObjectDef {
    x: f32,
    y: f32,
    sprite: PathBuf,
    #[serde(default = "default_alive")]
    alive: bool,
}

fn default_alive() -> bool {
    true
}

const DEFAULT_MAP: [&str; 20] = [
    "1111111111",
    "1000000001",
    "1000000001",
    "1000000001",
    "1000000001",
    "1000000001",
    "1000010101",
    "1000010101",
    "1000010101",
    "1000010101",
    "1000000001",
    "1000000001",
    "1000000001",
    "1000000001",
    "1000000001",
    "1000000001",
    "1000000001",
    "1000000001",
    "1000000001",
    "1111111111",
];

const DEFAULT_LAMPS: [[f32; 2]; 3] = [[3.0, 4.0], [4.0, 8.0], [3.0, 12.0]];

/// A loaded level: the world to render and where the camera starts.
pub struct Level {
    pub world: World,
    pub spawn: Camera,
}

impl Level {
    /// Loads a level TOML. Texture paths resolve relative to the file.
    pub fn load<P: AsRef<Path>>(path: P) -> SetupResult<Self> {
        let path = path.as_ref();
        log::info!("Loading level from {:?}", path);
        let contents = std::fs::read_to_string(path)?;
        let def: LevelFile = toml::from_str(&contents).map_err(|source| SetupError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_def(def, base)
    }

    fn from_def(def: LevelFile, base: &Path) -> SetupResult<Self> {
        let map = OccupancyMap::from_rows(&def.map)?;
        let spawn = Camera::new(def.spawn.x, def.spawn.y, def.spawn.heading);
        check_spawn(&map, &spawn)?;

        let wall_texture = match def.wall_texture {
            Some(rel) => Texture::from_file(base.join(rel))?,
            None => {
                log::warn!("Level has no wall_texture, using built-in bricks");
                Texture::bricks()
            }
        };

        let mut world = World::new(map, wall_texture);
        let mut loaded: HashMap<PathBuf, usize> = HashMap::new();
        for obj in def.objects {
            let full = base.join(&obj.sprite);
            let sprite = match loaded.get(&full) {
                Some(&id) => id,
                None => {
                    let id = world.add_sprite(Texture::from_file(&full)?);
                    loaded.insert(full, id);
                    id
                }
            };
            let mut object = WorldObject::new(obj.x, obj.y, sprite);
            object.alive = obj.alive;
            world.add_object(object);
        }

        log::debug!(
            "Level {}x{}, {} objects, {} sprite images",
            world.map.width(),
            world.map.height(),
            world.objects.len(),
            world.sprites.len()
        );
        Ok(Self { world, spawn })
    }

    /// The built-in level: a 10x20 room with two pillar rows and three lamps.
    pub fn default_level() -> SetupResult<Self> {
        let map = OccupancyMap::from_rows(&DEFAULT_MAP)?;
        let mut world = World::new(map, Texture::bricks());
        let lamp = world.add_sprite(Texture::lamp_post());
        for [x, y] in DEFAULT_LAMPS {
            world.add_object(WorldObject::new(x, y, lamp));
        }
        let spawn = Camera::new(3.0, 3.0, FRAC_PI_2);
        check_spawn(&world.map, &spawn)?;
        Ok(Self { world, spawn })
    }
}

fn check_spawn(map: &OccupancyMap, spawn: &Camera) -> SetupResult<()> {
    let [x, y] = spawn.pos;
    if !map.contains(x, y) {
        return Err(SetupError::InvalidLevel(format!(
            "spawn ({x}, {y}) is outside the {}x{} map",
            map.width(),
            map.height()
        )));
    }
    if map.is_wall_at(x, y) {
        return Err(SetupError::InvalidLevel(format!(
            "spawn ({x}, {y}) is inside a wall"
        )));
    }
    Ok(())
}
