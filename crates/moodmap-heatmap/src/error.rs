use thiserror::Error;

/// Why a neighborhood geometry could not be used as a center point.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("geometry is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("geometry type is {0}, expected Point")]
    NotPoint(String),

    #[error("point geometry has fewer than two coordinates")]
    MissingCoordinates,

    #[error("point coordinate is not a finite number")]
    InvalidCoordinate,
}

#[derive(Debug, Error)]
pub enum HeatmapError {
    #[error("no neighborhood produced a hotspot for emotion '{0}'")]
    Empty(String),

    #[error("storage error during {stage}: {source}")]
    Storage {
        stage: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl HeatmapError {
    pub(crate) fn storage<E>(stage: &'static str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            stage,
            source: Box::new(source),
        }
    }
}
