use thiserror::Error;

#[derive(Debug, Error)]
pub enum TkaError {
    #[error("invalid motion: {0}")]
    InvalidMotion(String),

    #[error("invalid turns '{0}': must be a non-negative multiple of 0.5")]
    InvalidTurns(String),

    #[error("invalid orientation: {0}")]
    InvalidOrientation(String),

    #[error("invalid location: {0}")]
    InvalidLocation(String),

    #[error("invalid position '{0}': expected '<blue>_<red>' or a grid name like 'alpha1'")]
    InvalidPosition(String),

    #[error("sequence is empty and has no start position")]
    EmptySequence,

    #[error("beat {index}: {source}")]
    AtBeat {
        index: usize,
        #[source]
        source: Box<TkaError>,
    },

    #[error("option {index}: {source}")]
    AtOption {
        index: usize,
        #[source]
        source: Box<TkaError>,
    },

    #[error("malformed sequence document: {0}")]
    Document(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TkaError {
    pub fn at_beat(index: usize, source: TkaError) -> Self {
        TkaError::AtBeat {
            index,
            source: Box::new(source),
        }
    }

    pub fn at_option(index: usize, source: TkaError) -> Self {
        TkaError::AtOption {
            index,
            source: Box::new(source),
        }
    }

    /// The innermost error, with beat/option annotations peeled off.
    pub fn root_cause(&self) -> &TkaError {
        match self {
            TkaError::AtBeat { source, .. } | TkaError::AtOption { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, TkaError>;
