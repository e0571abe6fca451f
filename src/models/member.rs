// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Church member model, its draft and the role/group enumerations.

use super::{lenient_option, ClosedEnum, Messages, Record, Resource, UnknownValue};
use crate::cache::QueryKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Avatar shown when a member has no image.
pub const DEFAULT_AVATAR_URL: &str = "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158";

/// Label shown for a member without a role.
pub const NO_ROLE_LABEL: &str = "Amigo";

/// Label shown for a member without a group.
pub const NO_GROUP_LABEL: &str = "Amigos";

/// Role of a member within the congregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum MemberRole {
    Pastor,
    Leader,
    Elder,
    Deacon,
    #[default]
    Member,
    Visitor,
}

impl ClosedEnum for MemberRole {
    const ALL: &'static [Self] = &[
        Self::Pastor,
        Self::Leader,
        Self::Elder,
        Self::Deacon,
        Self::Member,
        Self::Visitor,
    ];

    fn wire(self) -> &'static str {
        match self {
            Self::Pastor => "Pastor",
            Self::Leader => "Lider",
            Self::Elder => "Anciano",
            Self::Deacon => "Diacono",
            Self::Member => "Miembro",
            Self::Visitor => "Visitante",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Pastor => "Pastor",
            Self::Leader => "Líder",
            Self::Elder => "Anciano",
            Self::Deacon => "Diácono",
            Self::Member => "Miembro",
            Self::Visitor => "Visitante",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Pastor => &[],
            Self::Leader => &["Leader"],
            Self::Elder => &["Elder"],
            Self::Deacon => &["Deacon"],
            Self::Member => &["Member"],
            Self::Visitor => &["Visitor"],
        }
    }
}

/// Ministry group a member belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Group {
    #[default]
    Youth,
    Worship,
    Children,
    Teens,
    Gentlemen,
    Ladies,
    Adults,
    Seniors,
}

impl ClosedEnum for Group {
    const ALL: &'static [Self] = &[
        Self::Youth,
        Self::Worship,
        Self::Children,
        Self::Teens,
        Self::Gentlemen,
        Self::Ladies,
        Self::Adults,
        Self::Seniors,
    ];

    fn wire(self) -> &'static str {
        match self {
            Self::Youth => "Jovenes",
            Self::Worship => "Adoración",
            Self::Children => "Niños",
            Self::Teens => "Adolescentes",
            Self::Gentlemen => "Caballeros",
            Self::Ladies => "Damas",
            Self::Adults => "Adultos",
            Self::Seniors => "Adultos Mayores",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Youth => "Jóvenes",
            Self::Worship => "Adoración",
            Self::Children => "Niños",
            Self::Teens => "Adolescentes",
            Self::Gentlemen => "Caballeros",
            Self::Ladies => "Damas",
            Self::Adults => "Adultos",
            Self::Seniors => "Adultos Mayores",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Youth => &["Youth"],
            Self::Worship => &["Worship", "Alabanza"],
            Self::Children => &["Children"],
            Self::Adults => &["Adults"],
            Self::Seniors => &["Seniors"],
            Self::Teens | Self::Gentlemen | Self::Ladies => &[],
        }
    }
}

macro_rules! string_conversions {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as ClosedEnum>::parse(s).ok_or_else(|| UnknownValue {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }

        impl TryFrom<String> for $ty {
            type Error = UnknownValue;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$ty> for &'static str {
            fn from(value: $ty) -> Self {
                value.wire()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

string_conversions!(MemberRole, "role");
string_conversions!(Group, "group");

/// Member record as returned by the API.
///
/// Older API revisions used `name`, `group` and `isBaptized`; those are
/// accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    #[serde(alias = "name")]
    pub names: String,
    #[serde(default)]
    pub last_names: String,
    #[serde(default, deserialize_with = "lenient_option")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub role: Option<MemberRole>,
    #[serde(default, alias = "group", deserialize_with = "lenient_option")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub minister: Option<Group>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, alias = "isBaptized")]
    pub baptized: bool,
}

impl Member {
    pub fn role_label(&self) -> &'static str {
        self.role.map_or(NO_ROLE_LABEL, MemberRole::label)
    }

    pub fn group_label(&self) -> &'static str {
        self.minister.map_or(NO_GROUP_LABEL, Group::label)
    }

    /// Image URL, or the shared placeholder when none is set.
    pub fn avatar_url(&self) -> &str {
        match self.image.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_AVATAR_URL,
        }
    }

    /// Avatar fallback: first two characters of the given names.
    pub fn initials(&self) -> String {
        self.names.chars().take(2).collect()
    }
}

impl Record for Member {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> String {
        if self.last_names.is_empty() {
            self.names.clone()
        } else {
            format!("{} {}", self.names, self.last_names)
        }
    }
}

/// Editable copy of a member held by the form.
///
/// `role` and `minister` stay `None` when the edited record has no value
/// (or one outside the enumeration) and are then left out of the body, so
/// saving other fields does not overwrite them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MemberDraft {
    #[validate(length(min = 1))]
    pub names: String,
    pub last_names: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minister: Option<Group>,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1), email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone: String,
    pub image: String,
    pub baptized: bool,
}

impl Default for MemberDraft {
    fn default() -> Self {
        Self {
            names: String::new(),
            last_names: String::new(),
            role: Some(MemberRole::Member),
            minister: Some(Group::Youth),
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            image: String::new(),
            baptized: false,
        }
    }
}

impl From<&Member> for MemberDraft {
    fn from(member: &Member) -> Self {
        Self {
            names: member.names.clone(),
            last_names: member.last_names.clone(),
            role: member.role,
            minister: member.minister,
            address: member.address.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            image: member.image.clone().unwrap_or_default(),
            baptized: member.baptized,
        }
    }
}

/// Marker for the `/api/members` resource.
pub struct Members;

impl Resource for Members {
    type Record = Member;
    type Draft = MemberDraft;

    const KEY: QueryKey = QueryKey::Members;
    const PATH: &'static str = "members";
    const MESSAGES: &'static Messages = &Messages {
        list_failed: "Error al obtener los miembros",
        create_failed: "Error al crear el miembro",
        update_failed: "Error al actualizar el miembro",
        delete_failed: "Error al eliminar el miembro",
        load_failed_toast: "No se pudieron cargar los miembros",
        created_toast: "Miembro agregado exitosamente",
        create_failed_toast: "No se pudo agregar el miembro",
        updated_toast: "Miembro actualizado exitosamente",
        update_failed_toast: "No se pudo actualizar el miembro",
        create_title: "Agregar Nuevo Miembro",
        edit_title: "Editar Miembro",
        total_label: "Total de Miembros",
    };
}

/// Failure message for `GET /api/members/count`.
pub const COUNT_FAILED: &str = "Error al obtener el conteo de miembros";
