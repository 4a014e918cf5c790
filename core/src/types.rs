use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board extents, shell size and positions.
pub type Coord = u16;

/// Index of a shell inside a [`Layout`], stable for the whole round.
pub type ShellIndex = usize;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: Coord,
    pub y: Coord,
}

impl Position {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shell {
    pub x: Coord,
    pub y: Coord,
    pub has_ball: bool,
}

impl Shell {
    pub const fn new(x: Coord, y: Coord, has_ball: bool) -> Self {
        Self { x, y, has_ball }
    }

    pub const fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Same shell moved to `pos`, the ball stays with it.
    pub const fn moved_to(self, pos: Position) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            has_ball: self.has_ball,
        }
    }
}

/// Every shell on the table at one point of a round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    shells: Vec<Shell>,
}

impl Layout {
    pub fn new(shells: Vec<Shell>) -> Self {
        Self { shells }
    }

    pub fn len(&self) -> usize {
        self.shells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shells.is_empty()
    }

    pub fn shells(&self) -> &[Shell] {
        &self.shells
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Shell> {
        self.shells.iter()
    }

    pub fn get(&self, index: ShellIndex) -> Option<&Shell> {
        self.shells.get(index)
    }

    pub fn ball_index(&self) -> Option<ShellIndex> {
        self.shells.iter().position(|shell| shell.has_ball)
    }

    pub fn has_ball(&self) -> bool {
        self.ball_index().is_some()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.shells.iter().map(Shell::position)
    }

    /// Copy of this layout with the ball placed under `index` only.
    pub fn with_ball_at(&self, index: ShellIndex) -> Self {
        let shells = self
            .shells
            .iter()
            .enumerate()
            .map(|(i, shell)| Shell::new(shell.x, shell.y, i == index))
            .collect();
        Self { shells }
    }
}

impl Index<ShellIndex> for Layout {
    type Output = Shell;

    fn index(&self, index: ShellIndex) -> &Self::Output {
        &self.shells[index]
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a Shell;
    type IntoIter = core::slice::Iter<'a, Shell>;

    fn into_iter(self) -> Self::IntoIter {
        self.shells.iter()
    }
}

impl FromIterator<Shell> for Layout {
    fn from_iter<I: IntoIterator<Item = Shell>>(iter: I) -> Self {
        Self {
            shells: iter.into_iter().collect(),
        }
    }
}

/// Round generation, bumped every time a round starts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Epoch(u32);

impl Epoch {
    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}
