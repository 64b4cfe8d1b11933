#![deny(missing_docs)]

use crate::error::ImportErrors;
use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};

/// Messages for communicating between the importer and another process
#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum Message {
    /// Message to share the imported mesh
    Mesh(Mesh),

    /// Message to share the current state of the importer
    StateUpdate(String),

    /// Message to share any errors encountered
    Error(ImportErrors),
}
