use thiserror::Error;

/// A statement of the layout text could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("malformed layout header: {reason}")]
    MalformedHeader { reason: String },

    #[error("malformed node record `{record}`: {reason}")]
    MalformedNodeRecord { record: String, reason: String },

    #[error("malformed edge record `{record}`: {reason}")]
    MalformedEdgeRecord { record: String, reason: String },

    #[error("edge `{edge}` references unknown node `{id}`")]
    UnknownNodeReference { edge: String, id: String },
}

/// Curve or decoration geometry for a single edge could not be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("need at least 4 control points after reordering, got {count}")]
    InsufficientControlPoints { count: usize },

    #[error("decoration direction vector has zero length")]
    DegenerateDirectionVector,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("edge `{source_id} -> {target_id}`: {source}")]
    Edge {
        source_id: String,
        target_id: String,
        #[source]
        source: GeometryError,
    },
}
