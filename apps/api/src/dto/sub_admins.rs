use eventdesk_application::SubAdminForm;
use eventdesk_core::AppResult;
use eventdesk_domain::{PERMISSION_TAXONOMY, SubAdminAccount, SubAdminRole};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::permissions::PermissionGroupResponse;

/// Incoming payload for adding a sub-admin.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-sub-admin-request.ts"
)]
pub struct CreateSubAdminRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Incoming payload for editing a sub-admin.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/update-sub-admin-request.ts"
)]
pub struct UpdateSubAdminRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Query flags for deleting a sub-admin.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/delete-sub-admin-query.ts"
)]
pub struct DeleteSubAdminQuery {
    pub confirm: Option<bool>,
}

/// API representation of a sub-admin account. The password hash is never
/// exposed.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/sub-admin-response.ts"
)]
pub struct SubAdminResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub created_at: String,
    pub created_by: String,
    pub updated_at: String,
}

/// Read-only account view with permissions grouped by category.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/sub-admin-detail-response.ts"
)]
pub struct SubAdminDetailResponse {
    pub account: SubAdminResponse,
    pub permission_groups: Vec<PermissionGroupResponse>,
}

fn parse_role(role: Option<&str>) -> AppResult<Option<SubAdminRole>> {
    role.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::parse::<SubAdminRole>)
        .transpose()
}

impl CreateSubAdminRequest {
    /// Copies the payload onto an editor form.
    pub fn apply_to(&self, form: &mut SubAdminForm) -> AppResult<()> {
        form.name.clone_from(&self.name);
        form.email.clone_from(&self.email);
        form.password.clone_from(&self.password);
        form.phone = self.phone.clone().unwrap_or_default();
        form.role = parse_role(self.role.as_deref())?.unwrap_or_default();
        Ok(())
    }
}

impl UpdateSubAdminRequest {
    /// Copies the payload onto an editor form pre-filled from the stored
    /// account. Absent phone, role and active flag keep the stored values;
    /// an empty phone clears it.
    pub fn apply_to(&self, form: &mut SubAdminForm) -> AppResult<()> {
        form.name.clone_from(&self.name);
        form.email.clone_from(&self.email);
        if let Some(phone) = &self.phone {
            form.phone.clone_from(phone);
        }
        if let Some(role) = parse_role(self.role.as_deref())? {
            form.role = role;
        }
        if let Some(is_active) = self.is_active {
            form.is_active = is_active;
        }
        form.password = self.password.clone().unwrap_or_default();
        form.confirm_password = self.confirm_password.clone().unwrap_or_default();
        Ok(())
    }
}

impl From<SubAdminAccount> for SubAdminResponse {
    fn from(value: SubAdminAccount) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            email: value.email,
            phone: value.phone,
            role: value.role.as_str().to_owned(),
            permissions: value.permissions.into_iter().collect(),
            is_active: value.is_active,
            created_at: value.created_at.to_rfc3339(),
            created_by: value.created_by,
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

impl From<SubAdminAccount> for SubAdminDetailResponse {
    fn from(value: SubAdminAccount) -> Self {
        let permission_groups = PERMISSION_TAXONOMY
            .group_leaf_ids(value.permissions.iter().map(String::as_str))
            .into_iter()
            .map(PermissionGroupResponse::from)
            .collect();

        Self {
            account: SubAdminResponse::from(value),
            permission_groups,
        }
    }
}
