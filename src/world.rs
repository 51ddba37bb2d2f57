use crate::map::OccupancyMap;
use crate::sprites::{SpriteId, WorldObject};
use crate::texture::Texture;

/// Everything the renderer reads during a frame. Gameplay may mutate it
/// only between frames.
pub struct World {
    pub map: OccupancyMap,
    pub wall_texture: Texture,
    pub sprites: Vec<Texture>, // indexed by SpriteId
    pub objects: Vec<WorldObject>,
}

impl World {
    pub fn new(map: OccupancyMap, wall_texture: Texture) -> Self {
        Self {
            map,
            wall_texture,
            sprites: Vec::new(),
            objects: Vec::new(),
        }
    }

    pub fn add_sprite(&mut self, image: Texture) -> SpriteId {
        self.sprites.push(image);
        self.sprites.len() - 1
    }

    /// Objects are drawn in insertion order.
    pub fn add_object(&mut self, object: WorldObject) {
        self.objects.push(object);
    }
}
