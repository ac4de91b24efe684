// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User, role and permission models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Role granted to an account.
///
/// Only these two roles can be reached through login. The profile screen
/// also knows a read-only "viewer" label, which is intentionally not
/// modelled here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "geomaticien", alias = "geospatial-operator")]
    GeospatialOperator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::GeospatialOperator => "geomaticien",
        }
    }

    /// Parse a role from its wire name. Unknown names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "admin" => Some(Role::Admin),
            "geomaticien" | "geospatial-operator" => Some(Role::GeospatialOperator),
            _ => None,
        }
    }

    /// Whether this role grants the given permission.
    pub fn can(&self, permission: Permission) -> bool {
        match self {
            Role::Admin => true,
            Role::GeospatialOperator => !matches!(
                permission,
                Permission::ManageUsers | Permission::ManageSettings
            ),
        }
    }

    /// Every permission with its grant state, in display order.
    pub fn permissions(&self) -> Vec<PermissionGrant> {
        Permission::ALL
            .iter()
            .map(|&permission| PermissionGrant {
                permission,
                granted: self.can(permission),
            })
            .collect()
    }
}

/// Capabilities shown on the profile permissions tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Permission {
    ViewMap,
    ViewData,
    EditGeodata,
    ExportMaps,
    ImportData,
    ManageUsers,
    ManageSettings,
}

impl Permission {
    pub const ALL: [Permission; 7] = [
        Permission::ViewMap,
        Permission::ViewData,
        Permission::EditGeodata,
        Permission::ExportMaps,
        Permission::ImportData,
        Permission::ManageUsers,
        Permission::ManageSettings,
    ];
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PermissionGrant {
    pub permission: Permission,
    pub granted: bool,
}

/// Public view of an account, as held by an authenticated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Account row stored in the `users` collection.
///
/// Carries the salted password hash, so it must never be returned from the
/// API directly; convert with [`StoredIdentity::user`] first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredIdentity {
    #[serde(flatten)]
    pub user: User,
    pub password_hash: String,
    #[serde(default)]
    pub created_at: String,
}

impl StoredIdentity {
    pub fn user(&self) -> User {
        self.user.clone()
    }
}
