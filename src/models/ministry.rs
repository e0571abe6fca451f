// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ministry (named group/department) model.

use super::{Messages, Record, Resource};
use crate::cache::QueryKey;
use serde::{Deserialize, Serialize};
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Ministry record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Ministry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Name of the person leading the ministry
    #[serde(default)]
    pub leader: String,
}

impl Record for Ministry {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MinistryDraft {
    pub name: String,
    pub description: String,
    pub leader: String,
}

impl From<&Ministry> for MinistryDraft {
    fn from(ministry: &Ministry) -> Self {
        Self {
            name: ministry.name.clone(),
            description: ministry.description.clone(),
            leader: ministry.leader.clone(),
        }
    }
}

/// Marker for the `/api/ministries` resource.
pub struct Ministries;

impl Resource for Ministries {
    type Record = Ministry;
    type Draft = MinistryDraft;

    const KEY: QueryKey = QueryKey::Ministries;
    const PATH: &'static str = "ministries";
    const MESSAGES: &'static Messages = &Messages {
        list_failed: "Error al obtener los ministerios",
        create_failed: "Error al crear el ministerio",
        update_failed: "Error al actualizar el ministerio",
        delete_failed: "Error al eliminar el ministerio",
        load_failed_toast: "No se pudieron cargar los ministerios",
        created_toast: "Ministerio creado exitosamente",
        create_failed_toast: "No se pudo crear el ministerio",
        updated_toast: "Ministerio actualizado exitosamente",
        update_failed_toast: "No se pudo actualizar el ministerio",
        create_title: "Nuevo Ministerio",
        edit_title: "Editar Ministerio",
        total_label: "Total de Ministerios",
    };
}
