use std::collections::HashSet;
use std::fmt;
use std::fmt::Display;

pub type Color = usize;

/// A color for every vertex of a graph; `None` marks an unassigned vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Coloring {
    colors: Vec<Option<Color>>,
}

impl Coloring {
    pub fn unassigned(len: usize) -> Self {
        Self {
            colors: vec![None; len],
        }
    }

    /// Every vertex gets its own index as color.
    pub fn identity(len: usize) -> Self {
        Self {
            colors: (0..len).map(Some).collect(),
        }
    }

    #[inline]
    pub fn get(&self, v: usize) -> Option<Color> {
        self.colors[v]
    }

    #[inline]
    pub fn set(&mut self, v: usize, color: Color) {
        self.colors[v] = Some(color);
    }

    #[inline]
    pub fn unset(&mut self, v: usize) {
        self.colors[v] = None;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors_used(&self) -> usize {
        self.colors
            .iter()
            .filter_map(|it| *it)
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn as_slice(&self) -> &[Option<Color>] {
        &self.colors
    }
}

impl From<Vec<Color>> for Coloring {
    fn from(colors: Vec<Color>) -> Self {
        Self {
            colors: colors.into_iter().map(Some).collect(),
        }
    }
}

impl From<&[Color]> for Coloring {
    fn from(colors: &[Color]) -> Self {
        Self {
            colors: colors.iter().copied().map(Some).collect(),
        }
    }
}

impl Display for Coloring {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for (i, color) in self.colors.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match color {
                Some(color) => write!(f, "{}", color)?,
                None => write!(f, "-")?,
            }
        }
        Ok(())
    }
}
