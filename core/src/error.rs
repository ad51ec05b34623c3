use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ColoringError {
    #[error("at least one color is required")]
    NoColors,

    #[error("graph has no vertices")]
    EmptyGraph,

    #[error("population needs at least two phenotypes, got {size}")]
    PopulationTooSmall { size: usize },

    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
}

pub(crate) fn check_request(vertices: usize, k: usize) -> Result<(), ColoringError> {
    if k == 0 {
        return Err(ColoringError::NoColors);
    }
    if vertices == 0 {
        return Err(ColoringError::EmptyGraph);
    }
    Ok(())
}
