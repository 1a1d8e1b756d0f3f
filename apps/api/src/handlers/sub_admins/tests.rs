use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use eventdesk_application::SessionContext;
use eventdesk_core::{ActorIdentity, ActorRole};

use super::{
    create_sub_admin_handler, delete_sub_admin_handler, get_sub_admin_handler,
    list_sub_admins_handler, update_sub_admin_handler,
};
use crate::dto::{
    CreateSubAdminRequest, DeleteSubAdminQuery, SubAdminResponse, UpdateSubAdminRequest,
};
use crate::error::ApiResult;
use crate::handlers::test_support::{signed_in_context, sub_admin, super_admin, test_state};
use crate::state::AppState;

fn create_request(email: &str, permissions: &[&str]) -> CreateSubAdminRequest {
    CreateSubAdminRequest {
        name: "Ann".to_owned(),
        email: email.to_owned(),
        password: "secret1".to_owned(),
        phone: None,
        role: None,
        permissions: permissions.iter().map(|value| (*value).to_owned()).collect(),
    }
}

async fn create(
    state: &AppState,
    actor: ActorIdentity,
    request: CreateSubAdminRequest,
) -> ApiResult<SubAdminResponse> {
    let context = signed_in_context().await;
    create_sub_admin_handler(
        State(state.clone()),
        Extension(actor),
        Extension(context),
        Json(request),
    )
    .await
    .map(|(_, Json(body))| body)
}

#[tokio::test]
async fn created_account_is_listed_and_grouped_by_category() {
    let state = test_state(super_admin());
    let created = create(
        &state,
        super_admin(),
        create_request("Ann@X.com", &["events-all", "venues-create", "events-create"]),
    )
    .await
    .unwrap_or_else(|_| unreachable!());

    assert_eq!(created.email, "ann@x.com");
    assert_eq!(created.role, "SUB_ADMIN");
    assert!(created.is_active);

    let context = signed_in_context().await;
    let Ok(Json(listed)) = list_sub_admins_handler(
        State(state.clone()),
        Extension(super_admin()),
        Extension(context.clone()),
    )
    .await
    else {
        panic!("super admin may list sub-admins");
    };
    assert_eq!(listed.len(), 1);

    let Ok(Json(detail)) = get_sub_admin_handler(
        State(state),
        Extension(super_admin()),
        Extension(context),
        Path(created.id.clone()),
    )
    .await
    else {
        panic!("created account should be readable");
    };
    let groups: Vec<(&str, usize)> = detail
        .permission_groups
        .iter()
        .map(|group| (group.category_id.as_str(), group.leaves.len()))
        .collect();
    assert_eq!(groups, vec![("events", 2), ("venues", 1)]);
}

#[tokio::test]
async fn empty_permissions_are_rejected_before_storage() {
    let state = test_state(super_admin());

    let result = create(&state, super_admin(), create_request("ann@x.com", &[])).await;

    assert!(matches!(result, Err(error) if error.status() == StatusCode::BAD_REQUEST));
    let listed = state
        .sub_admin_service
        .list(&super_admin())
        .await
        .unwrap_or_else(|_| unreachable!());
    assert!(listed.is_empty());
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let state = test_state(super_admin());
    assert!(
        create(&state, super_admin(), create_request("ann@x.com", &["events-all"]))
            .await
            .is_ok()
    );

    let second = create(
        &state,
        super_admin(),
        create_request("ANN@x.com", &["events-all"]),
    )
    .await;

    assert!(matches!(second, Err(error) if error.status() == StatusCode::CONFLICT));
}

#[tokio::test]
async fn missing_leaf_is_forbidden_without_signing_out() {
    let state = test_state(super_admin());
    let context = signed_in_context().await;

    let result = create_sub_admin_handler(
        State(state),
        Extension(sub_admin(&["subadmins-all"])),
        Extension(context.clone()),
        Json(create_request("ann@x.com", &["events-all"])),
    )
    .await;

    assert!(matches!(result, Err(error) if error.status() == StatusCode::FORBIDDEN));
    assert!(!context.is_redirected());
}

#[tokio::test]
async fn authentication_failure_signs_the_session_out() {
    let state = test_state(super_admin());
    let context = signed_in_context().await;
    let inactive = inactive_actor();

    let result = list_sub_admins_handler(
        State(state),
        Extension(inactive),
        Extension(context.clone()),
    )
    .await;

    assert!(matches!(result, Err(error) if error.status() == StatusCode::UNAUTHORIZED));
    assert!(context.is_redirected());
    assert_eq!(context.token().await.ok().flatten(), None);
}

fn inactive_actor() -> ActorIdentity {
    ActorIdentity::new(
        "ops-2",
        "Former",
        None,
        ActorRole::SubAdmin,
        vec!["subadmins-all".to_owned()],
        false,
    )
}

fn rename_request(phone: Option<&str>) -> UpdateSubAdminRequest {
    UpdateSubAdminRequest {
        name: "Ann Smith".to_owned(),
        email: "ann@x.com".to_owned(),
        phone: phone.map(str::to_owned),
        role: None,
        is_active: None,
        password: None,
        confirm_password: None,
        permissions: vec!["events-all".to_owned()],
    }
}

#[tokio::test]
async fn update_by_inactive_actor_signs_the_session_out_once() {
    let state = test_state(super_admin());
    let created = create(
        &state,
        super_admin(),
        create_request("ann@x.com", &["events-all"]),
    )
    .await
    .unwrap_or_else(|_| unreachable!());
    let context = signed_in_context().await;

    let result = update_sub_admin_handler(
        State(state),
        Extension(inactive_actor()),
        Extension(context.clone()),
        Path(created.id),
        Json(rename_request(None)),
    )
    .await;

    assert!(matches!(result, Err(error) if error.status() == StatusCode::UNAUTHORIZED));
    assert!(context.is_redirected());
    assert_eq!(context.redirect_count(), 1);
    assert_eq!(context.token().await.ok().flatten(), None);
}

#[tokio::test]
async fn delete_by_inactive_actor_signs_the_session_out_once() {
    let state = test_state(super_admin());
    let created = create(
        &state,
        super_admin(),
        create_request("ann@x.com", &["events-all"]),
    )
    .await
    .unwrap_or_else(|_| unreachable!());
    let context = signed_in_context().await;

    let result = delete_sub_admin_handler(
        State(state.clone()),
        Extension(inactive_actor()),
        Extension(context.clone()),
        Path(created.id.clone()),
        Query(DeleteSubAdminQuery {
            confirm: Some(true),
        }),
    )
    .await;

    assert!(matches!(result, Err(error) if error.status() == StatusCode::UNAUTHORIZED));
    assert!(context.is_redirected());
    assert_eq!(context.redirect_count(), 1);
    assert_eq!(context.token().await.ok().flatten(), None);

    let still_there = get_sub_admin_handler(
        State(state),
        Extension(super_admin()),
        Extension(signed_in_context().await),
        Path(created.id),
    )
    .await;
    assert!(still_there.is_ok());
}

#[tokio::test]
async fn update_without_phone_keeps_the_stored_phone() {
    let state = test_state(super_admin());
    let mut request = create_request("ann@x.com", &["events-all"]);
    request.phone = Some("555-0100".to_owned());
    let created = create(&state, super_admin(), request)
        .await
        .unwrap_or_else(|_| unreachable!());

    let result = update_sub_admin_handler(
        State(state.clone()),
        Extension(super_admin()),
        Extension(signed_in_context().await),
        Path(created.id.clone()),
        Json(rename_request(None)),
    )
    .await;
    let Ok(Json(updated)) = result else {
        panic!("update should succeed");
    };
    assert_eq!(updated.name, "Ann Smith");
    assert_eq!(updated.phone.as_deref(), Some("555-0100"));

    let cleared = update_sub_admin_handler(
        State(state),
        Extension(super_admin()),
        Extension(signed_in_context().await),
        Path(created.id),
        Json(rename_request(Some(""))),
    )
    .await;
    let Ok(Json(cleared)) = cleared else {
        panic!("update should succeed");
    };
    assert_eq!(cleared.phone, None);
}

#[tokio::test]
async fn update_keeps_unsent_fields_and_replaces_permissions() {
    let state = test_state(super_admin());
    let created = create(
        &state,
        super_admin(),
        create_request("ann@x.com", &["events-all"]),
    )
    .await
    .unwrap_or_else(|_| unreachable!());

    let context = signed_in_context().await;
    let result = update_sub_admin_handler(
        State(state),
        Extension(super_admin()),
        Extension(context),
        Path(created.id.clone()),
        Json(UpdateSubAdminRequest {
            name: "Ann Smith".to_owned(),
            email: "ann@x.com".to_owned(),
            phone: Some("555-0100".to_owned()),
            role: None,
            is_active: None,
            password: None,
            confirm_password: None,
            permissions: vec!["speakers-all".to_owned(), "speakers-create".to_owned()],
        }),
    )
    .await;

    let Ok(Json(updated)) = result else {
        panic!("update should succeed");
    };
    assert_eq!(updated.name, "Ann Smith");
    assert_eq!(updated.phone.as_deref(), Some("555-0100"));
    assert_eq!(updated.role, created.role);
    assert!(updated.is_active);
    assert_eq!(
        updated.permissions,
        vec!["speakers-all".to_owned(), "speakers-create".to_owned()]
    );
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let state = test_state(super_admin());
    let created = create(
        &state,
        super_admin(),
        create_request("ann@x.com", &["events-all"]),
    )
    .await
    .unwrap_or_else(|_| unreachable!());
    let context = signed_in_context().await;

    let unconfirmed = delete_sub_admin_handler(
        State(state.clone()),
        Extension(super_admin()),
        Extension(context.clone()),
        Path(created.id.clone()),
        Query(DeleteSubAdminQuery::default()),
    )
    .await;
    assert!(matches!(unconfirmed, Err(error) if error.status() == StatusCode::BAD_REQUEST));

    let confirmed = delete_sub_admin_handler(
        State(state.clone()),
        Extension(super_admin()),
        Extension(context.clone()),
        Path(created.id.clone()),
        Query(DeleteSubAdminQuery {
            confirm: Some(true),
        }),
    )
    .await;
    assert!(matches!(confirmed, Ok(StatusCode::NO_CONTENT)));

    let gone = get_sub_admin_handler(
        State(state),
        Extension(super_admin()),
        Extension(context),
        Path(created.id),
    )
    .await;
    assert!(matches!(gone, Err(error) if error.status() == StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn malformed_id_is_a_validation_error() {
    let state = test_state(super_admin());
    let context = signed_in_context().await;

    let result = get_sub_admin_handler(
        State(state),
        Extension(super_admin()),
        Extension(context),
        Path("not-a-uuid".to_owned()),
    )
    .await;

    assert!(matches!(result, Err(error) if error.status() == StatusCode::BAD_REQUEST));
}
