use crate::color::Color;

/// A named set of quick-pick colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub name: &'static str,
    pub colors: [Color; 6],
}

pub const SWATCHES: [Swatch; 5] = [
    Swatch {
        name: "pixel",
        colors: [
            Color::rgb(139, 195, 74),
            Color::rgb(255, 193, 7),
            Color::rgb(3, 169, 244),
            Color::rgb(0, 150, 136),
            Color::rgb(233, 30, 99),
            Color::rgb(156, 39, 176),
        ],
    },
    Swatch {
        name: "nord",
        colors: [
            Color::rgb(191, 97, 106),
            Color::rgb(208, 135, 112),
            Color::rgb(235, 203, 139),
            Color::rgb(163, 190, 140),
            Color::rgb(180, 142, 173),
            Color::rgb(136, 192, 208),
        ],
    },
    Swatch {
        name: "pastel",
        colors: [
            Color::rgb(255, 192, 203),
            Color::rgb(255, 182, 193),
            Color::rgb(220, 255, 253),
            Color::rgb(240, 230, 255),
            Color::rgb(252, 177, 255),
            Color::rgb(164, 196, 255),
        ],
    },
    Swatch {
        name: "earth",
        colors: [
            Color::rgb(139, 94, 60),
            Color::rgb(180, 91, 4),
            Color::rgb(184, 134, 11),
            Color::rgb(189, 183, 107),
            Color::rgb(85, 107, 47),
            Color::rgb(139, 35, 35),
        ],
    },
    Swatch {
        name: "neon",
        colors: [
            Color::rgb(255, 255, 51),
            Color::rgb(0, 255, 255),
            Color::rgb(255, 0, 255),
            Color::rgb(0, 255, 0),
            Color::rgb(0, 0, 255),
            Color::rgb(255, 51, 153),
        ],
    },
];

/// Cursor over [`SWATCHES`] that wraps around in both directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwatchBook {
    index: usize,
}

impl SwatchBook {
    pub fn new(index: usize) -> Self {
        Self { index: index % SWATCHES.len() }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &'static Swatch {
        &SWATCHES[self.index]
    }

    pub fn next(&mut self) -> &'static Swatch {
        self.index = (self.index + 1) % SWATCHES.len();
        self.current()
    }

    pub fn previous(&mut self) -> &'static Swatch {
        self.index = self.index.checked_sub(1).unwrap_or(SWATCHES.len() - 1);
        self.current()
    }
}
