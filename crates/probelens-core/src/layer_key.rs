use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// Intervention point within a transformer layer. The wire names match the
/// key suffixes stored in residual variables.
#[derive(
    Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    AttnOut,
    AttnBlockOut,
    MlpOut,
    MlpBlockOut,
}

impl OpKind {
    pub const COUNT: usize = 4;

    /// Fixed grid column for each kind.
    pub fn column(&self) -> usize {
        match self {
            Self::AttnOut => 0,
            Self::AttnBlockOut => 1,
            Self::MlpOut => 2,
            Self::MlpBlockOut => 3,
        }
    }
}

/// Parsed layer key, e.g. `model.layers.0.mlp_block_out`. The module prefix
/// may itself contain dots, so parsing works from the right: the last
/// segment is the kind, the one before it the layer index, and everything
/// left of that is the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerKey {
    pub prefix: String,
    pub layer: usize,
    pub kind: OpKind,
}

impl LayerKey {
    /// Parse a raw catalog key. Malformed keys yield `None`, never an error.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.rsplitn(3, '.');
        let kind = OpKind::from_str(parts.next()?).ok()?;
        let layer = parts.next()?.parse::<usize>().ok()?;
        let prefix = parts.next()?;
        if prefix.is_empty() {
            return None;
        }

        Some(Self {
            prefix: prefix.to_string(),
            layer,
            kind,
        })
    }
}

impl fmt::Display for LayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.prefix, self.layer, self.kind)
    }
}
