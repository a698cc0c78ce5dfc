//! Cell and hero materials.
//!
//! A material is a small status overlay: a colour for the cell it sits on and
//! a hook that fires when an enemy walks onto that cell. The set of kinds is
//! closed. Instances are shared through `Rc` by the library, any number of
//! cells, and the hero at the same time.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::{trace, warn};

use crate::render::Color;

/// Alpha applied to every visible material overlay.
pub const OVERLAY_ALPHA: u8 = 100;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    /// The no-op material: transparent, no collision effect.
    Default,
    Red,
    Blue,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 3] = [MaterialKind::Default, MaterialKind::Red, MaterialKind::Blue];

    pub fn color(self) -> ColorSelector {
        match self {
            MaterialKind::Default => ColorSelector::None,
            MaterialKind::Red => ColorSelector::Red,
            MaterialKind::Blue => ColorSelector::Blue,
        }
    }
}

/// The fixed palette materials choose their overlay from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorSelector {
    Red,
    Blue,
    None,
}

impl ColorSelector {
    /// Overlay tint. `None` is fully transparent whatever its hue.
    pub fn tint(self) -> Color {
        match self {
            ColorSelector::Red => Color::RED.with_alpha8(OVERLAY_ALPHA),
            ColorSelector::Blue => Color::BLUE.with_alpha8(OVERLAY_ALPHA),
            ColorSelector::None => Color::GREEN.with_alpha8(0),
        }
    }
}

/// Something a material can act on when it collides with it.
///
/// Enemy directors hand these out by index; the level never looks inside.
pub trait Collidable {
    fn on_material(&mut self, kind: MaterialKind);
}

#[derive(Debug, PartialEq, Eq)]
pub struct Material {
    kind: MaterialKind,
}

impl Material {
    pub fn new(kind: MaterialKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    pub fn color(&self) -> ColorSelector {
        self.kind.color()
    }

    pub fn tint(&self) -> Color {
        self.color().tint()
    }

    pub fn is_default(&self) -> bool {
        self.kind == MaterialKind::Default
    }

    /// Collision hook. The default material does nothing.
    pub fn on_collide(&self, target: &mut dyn Collidable) {
        if self.is_default() {
            return;
        }
        trace!(kind = ?self.kind, "material collision");
        target.on_material(self.kind);
    }
}

/// Shared material instances keyed by kind.
#[derive(Debug)]
pub struct MaterialLibrary {
    materials: HashMap<MaterialKind, Rc<Material>>,
    fallback: Rc<Material>,
}

impl MaterialLibrary {
    /// A library holding one instance of every kind.
    pub fn new() -> Self {
        Self::with_kinds(&MaterialKind::ALL)
    }

    /// A library holding only `kinds`; the default material is always present.
    pub fn with_kinds(kinds: &[MaterialKind]) -> Self {
        let fallback = Rc::new(Material::new(MaterialKind::Default));
        let mut materials: HashMap<MaterialKind, Rc<Material>> = kinds
            .iter()
            .filter(|&&k| k != MaterialKind::Default)
            .map(|&k| (k, Rc::new(Material::new(k))))
            .collect();
        materials.insert(MaterialKind::Default, Rc::clone(&fallback));
        Self { materials, fallback }
    }

    /// Shared instance for `kind`. A missing kind yields the default material.
    pub fn get(&self, kind: MaterialKind) -> Rc<Material> {
        match self.materials.get(&kind) {
            Some(material) => Rc::clone(material),
            None => {
                warn!(?kind, "material not in library; using default");
                Rc::clone(&self.fallback)
            }
        }
    }

    pub fn default_material(&self) -> Rc<Material> {
        Rc::clone(&self.fallback)
    }
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::new()
    }
}
