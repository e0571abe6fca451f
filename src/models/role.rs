// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role (named permission set) model.

use super::{Messages, Record, Resource};
use crate::cache::QueryKey;
use serde::{Deserialize, Serialize};
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Role record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Record for Role {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoleDraft {
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
}

impl RoleDraft {
    /// Permissions as edited in the form: comma separated.
    pub fn permissions_text(&self) -> String {
        self.permissions.join(", ")
    }

    pub fn set_permissions_text(&mut self, text: &str) {
        self.permissions = parse_permissions(text);
    }
}

/// Split a comma-separated permission list, trimming and dropping empties.
pub fn parse_permissions(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

impl From<&Role> for RoleDraft {
    fn from(role: &Role) -> Self {
        Self {
            name: role.name.clone(),
            description: role.description.clone(),
            permissions: role.permissions.clone(),
        }
    }
}

/// Marker for the `/api/roles` resource.
pub struct Roles;

impl Resource for Roles {
    type Record = Role;
    type Draft = RoleDraft;

    const KEY: QueryKey = QueryKey::Roles;
    const PATH: &'static str = "roles";
    const MESSAGES: &'static Messages = &Messages {
        list_failed: "Error al obtener los roles",
        create_failed: "Error al crear el rol",
        update_failed: "Error al actualizar el rol",
        delete_failed: "Error al eliminar el rol",
        load_failed_toast: "No se pudieron cargar los roles",
        created_toast: "Rol creado exitosamente",
        create_failed_toast: "No se pudo crear el rol",
        updated_toast: "Rol actualizado exitosamente",
        update_failed_toast: "No se pudo actualizar el rol",
        create_title: "Nuevo Rol",
        edit_title: "Editar Rol",
        total_label: "Total de Roles",
    };
}
