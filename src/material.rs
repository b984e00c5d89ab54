use log::debug;

use crate::error::ConfigError;

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // BGRA8 in little-endian memory
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
    // Alpha at 0
}

#[inline]
pub fn unpack_rgb(c: u32) -> (u8, u8, u8) {
    ((c >> 16) as u8, (c >> 8) as u8, c as u8)
}

/// Scale each channel of a packed colour by `k` in [0, 1].
#[inline]
pub fn shade(c: u32, k: f32) -> u32 {
    let k = k.clamp(0.0, 1.0);
    let (r, g, b) = unpack_rgb(c);
    pack_rgb(
        (r as f32 * k) as u8,
        (g as f32 * k) as u8,
        (b as f32 * k) as u8,
    )
}

/// Square texture, row-major packed pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    size: usize,
    texels: Vec<u32>,
}

impl Texture {
    pub fn from_pixels(width: usize, height: usize, texels: Vec<u32>) -> Result<Self, ConfigError> {
        if width == 0 || width != height {
            return Err(ConfigError::InvalidValue {
                field: "texture",
                reason: format!("{width}x{height} is not a non-empty square"),
            });
        }
        if texels.len() != width * height {
            return Err(ConfigError::InvalidValue {
                field: "texture",
                reason: format!("expected {} texels, got {}", width * height, texels.len()),
            });
        }
        Ok(Self {
            size: width,
            texels,
        })
    }

    /// Brick pattern tinted with `base`, used when no image assets are supplied.
    pub fn bricks(size: usize, base: u32) -> Self {
        let size = size.max(4);
        let brick_h = (size / 4).max(1);
        let brick_w = (size / 2).max(1);
        let mortar = (size / 32).max(1);
        let mortar_color = shade(base, 0.35);

        let mut texels = vec![0u32; size * size];
        for y in 0..size {
            let course = y / brick_h;
            let shift = if course % 2 == 0 { 0 } else { brick_w / 2 };
            for x in 0..size {
                let in_mortar = y % brick_h < mortar || (x + shift) % brick_w < mortar;
                texels[y * size + x] = if in_mortar {
                    mortar_color
                } else {
                    // cheap per-brick variation so the faces don't look flat
                    let brick = (x + shift) / brick_w + course * 7;
                    shade(base, 0.8 + 0.2 * ((brick * 37 % 11) as f32 / 10.0))
                };
            }
        }
        Self { size, texels }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn sample(&self, x: usize, y: usize) -> u32 {
        let x = x.min(self.size - 1);
        let y = y.min(self.size - 1);
        self.texels[y * self.size + x]
    }
}

/// How a wall type is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Constant colour, no distance attenuation.
    Solid(u32),
    /// Flat colour whose brightness falls off with a steep power of depth.
    Shaded(u32),
    Textured(Texture),
}

/// Materials indexed by tile identifier.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    slots: Vec<Option<Material>>,
    fallback: Option<Material>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The classic palette: 2..=7 named flat colours, everything else light blue.
    /// Textured builds replace 2..=7 with generated brick textures of `texture_size`
    /// and draw tile 1 as a depth-shaded white.
    pub fn classic(textured: bool, texture_size: usize) -> Self {
        let palette = [
            (2, pack_rgb(250, 235, 215)),
            (3, pack_rgb(127, 255, 212)),
            (4, pack_rgb(0, 127, 255)),
            (5, pack_rgb(245, 245, 220)),
            (6, pack_rgb(255, 228, 196)),
            (7, pack_rgb(255, 235, 205)),
        ];

        let mut table = Self::new();
        if textured {
            table.insert(1, Material::Shaded(pack_rgb(255, 255, 255)));
        }
        for (id, color) in palette {
            let material = if textured {
                Material::Textured(Texture::bricks(texture_size, color))
            } else {
                Material::Solid(color)
            };
            table.insert(id, material);
        }
        table.set_fallback(Material::Solid(pack_rgb(156, 214, 228)));

        debug!(
            "material table: {} entries, textured={}",
            table.len(),
            textured
        );
        table
    }

    pub fn insert(&mut self, tile_type: u8, material: Material) {
        let idx = tile_type as usize;
        if self.slots.len() <= idx {
            self.slots.resize(idx + 1, None);
        }
        self.slots[idx] = Some(material);
    }

    /// Used for identifiers with no entry of their own.
    pub fn set_fallback(&mut self, material: Material) {
        self.fallback = Some(material);
    }

    #[inline]
    pub fn get(&self, tile_type: u8) -> Option<&Material> {
        self.slots
            .get(tile_type as usize)
            .and_then(Option::as_ref)
            .or(self.fallback.as_ref())
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|m| m.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
