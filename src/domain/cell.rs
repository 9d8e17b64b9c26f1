//! Cell - the tagged value stored in every grid slot
//!
//! Cells carry no identity. Moving one means copying it into the destination and
//! resetting the source, so everything a behaviour needs must live in the value.

use serde::{Deserialize, Serialize};

use super::colour::Colour;

/// Seconds a freshly placed Fire cell burns before turning into Smoke.
pub const FIRE_LIFE_TIME: f32 = 1.0;
/// Seconds a Smoke cell lingers before vanishing.
pub const SMOKE_LIFE_TIME: f32 = 3.0;

#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    #[default]
    Empty = 0,
    Sand = 1,
    Stone = 2,
    Wood = 3,
    Water = 4,
    Fire = 5,
    Smoke = 6,
}

/// Movement family, used for behaviour dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    None,
    Solid,
    Powder,
    Liquid,
    Gas,
    Energy,
}

impl CellType {
    pub const ALL: [CellType; 7] = [
        CellType::Empty,
        CellType::Sand,
        CellType::Stone,
        CellType::Wood,
        CellType::Water,
        CellType::Fire,
        CellType::Smoke,
    ];

    /// Map a raw id from the JS side. Unknown ids are rejected.
    pub fn from_u8(id: u8) -> Option<CellType> {
        Self::ALL.get(id as usize).copied()
    }

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn category(self) -> Category {
        match self {
            CellType::Empty => Category::None,
            CellType::Stone | CellType::Wood => Category::Solid,
            CellType::Sand => Category::Powder,
            CellType::Water => Category::Liquid,
            CellType::Smoke => Category::Gas,
            CellType::Fire => Category::Energy,
        }
    }

    /// Relative weight for displacement. A mover may only swap into a lighter,
    /// non-solid occupant. Solids and Empty return `None`.
    #[inline]
    pub const fn density(self) -> Option<u8> {
        match self {
            CellType::Smoke => Some(1),
            CellType::Water => Some(10),
            CellType::Sand => Some(20),
            _ => None,
        }
    }

    /// Palette colour a freshly created cell of this type gets.
    pub const fn default_colour(self) -> Colour {
        match self {
            CellType::Empty => Colour::BLANK,
            CellType::Sand => Colour::YELLOW,
            CellType::Stone => Colour::DARK_GREY,
            CellType::Wood => Colour::BROWN,
            CellType::Water => Colour::SKY_BLUE,
            CellType::Fire => Colour::ORANGE,
            CellType::Smoke => Colour::LIGHT_GREY,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CellType::Empty => "empty",
            CellType::Sand => "sand",
            CellType::Stone => "stone",
            CellType::Wood => "wood",
            CellType::Water => "water",
            CellType::Fire => "fire",
            CellType::Smoke => "smoke",
        }
    }
}

/// Per-cell velocity in cells per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl Velocity {
    #[inline]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellType,
    pub colour: Colour,
    pub velocity: Option<Velocity>,
    /// Seconds left before the life-time pass transforms the cell.
    pub life_time: Option<f32>,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        kind: CellType::Empty,
        colour: Colour::BLANK,
        velocity: None,
        life_time: None,
    };

    /// Fresh cell of `kind` with its default colour and attributes.
    pub const fn of(kind: CellType) -> Cell {
        let (velocity, life_time) = match kind {
            CellType::Sand => (Some(Velocity::new(0.0, 1.0)), None),
            CellType::Fire => (None, Some(FIRE_LIFE_TIME)),
            CellType::Smoke => (None, Some(SMOKE_LIFE_TIME)),
            _ => (None, None),
        };
        Cell { kind, colour: kind.default_colour(), velocity, life_time }
    }

    pub const fn sand() -> Cell {
        Cell::of(CellType::Sand)
    }

    pub const fn stone() -> Cell {
        Cell::of(CellType::Stone)
    }

    pub const fn wood() -> Cell {
        Cell::of(CellType::Wood)
    }

    pub const fn water() -> Cell {
        Cell::of(CellType::Water)
    }

    pub const fn fire() -> Cell {
        Cell::of(CellType::Fire)
    }

    pub const fn smoke() -> Cell {
        Cell::of(CellType::Smoke)
    }

    #[inline]
    pub fn with_colour(mut self, colour: Colour) -> Cell {
        self.colour = colour;
        self
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self.kind, CellType::Empty)
    }
}
