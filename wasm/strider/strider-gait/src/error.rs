use thiserror::Error;

/// Setup-time failures. The per-tick path never returns an error.
#[derive(Debug, Error)]
pub enum GaitError {
    #[error("walker needs at least two legs")]
    NoLegs,

    #[error("leg count must be even so every leg has an opposite, got {0}")]
    OddLegCount(usize),

    #[error("skeleton root {root} has {bones} leg bones but the walker has {legs} legs")]
    BoneCountMismatch { root: usize, bones: usize, legs: usize },

    #[error("legs are bound to the children of bone {bound}; rebuild the walker to use root {requested}")]
    RootChanged { bound: usize, requested: usize },

    #[error("invalid value for `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("could not parse gait config: {0}")]
    Config(#[from] serde_json::Error),
}
