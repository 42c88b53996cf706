use serde::{Deserialize, Serialize};

use crate::model::FieldPath;

/// Field projection applied to query results. The document identity is
/// intrinsic and always survives projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Projection {
    /// Keep only the named paths
    Include { include: Vec<FieldPath> },
    /// Drop the named paths, keep everything else
    Exclude { exclude: Vec<FieldPath> },
}

impl Projection {
    pub fn include<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<FieldPath>,
    {
        Projection::Include {
            include: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn exclude<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<FieldPath>,
    {
        Projection::Exclude {
            exclude: paths.into_iter().map(Into::into).collect(),
        }
    }
}
