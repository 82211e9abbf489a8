//! Log labels for entities.

use bevy::prelude::*;

/// Human-readable label for log lines.
pub fn display_name(entity: Entity, name: Option<&Name>) -> String {
    match name {
        Some(name) => name.as_str().to_string(),
        None => format!("{entity}"),
    }
}
