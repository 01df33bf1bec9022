//! UserService handlers and their registration entries.

use std::sync::Arc;

use application::context::GenericRequest;
use application::ports::inbound::IdentityService;
use domain::auth::password::Password;
use domain::identity::email::EmailAddress;
use domain::identity::id::UserId;
use domain::identity::role::Role;

use super::envelope::*;
use super::registry::{Registry, RpcEndpoint, RpcError};

const SERVICE: &str = "UserService";

/// Install every UserService method into the registration table.
///
/// The allow-lists are the whole role policy apart from the
/// owner-or-admin rule inside UpdateUser; keeping them in this one
/// table keeps the policy auditable.
pub fn register_user_service(
    registry: &mut Registry,
    service: Arc<dyn IdentityService>,
) {
    let svc = service.clone();
    registry.register(
        SERVICE,
        "CreateUser",
        RpcEndpoint {
            roles: &[Role::Admin],
            handler: Box::new(move |request, payload| {
                Box::pin(create_user(svc.clone(), request, payload))
            }),
        },
    );

    let svc = service.clone();
    registry.register(
        SERVICE,
        "UpdateUser",
        RpcEndpoint {
            roles: &[Role::Admin, Role::User],
            handler: Box::new(move |request, payload| {
                Box::pin(update_user(svc.clone(), request, payload))
            }),
        },
    );

    let svc = service.clone();
    registry.register(
        SERVICE,
        "DeleteUser",
        RpcEndpoint {
            roles: &[Role::Admin],
            handler: Box::new(move |request, payload| {
                Box::pin(delete_user(svc.clone(), request, payload))
            }),
        },
    );

    let svc = service.clone();
    registry.register(
        SERVICE,
        "QueryUser",
        RpcEndpoint {
            roles: &[Role::Admin],
            handler: Box::new(move |request, payload| {
                Box::pin(query_user(svc.clone(), request, payload))
            }),
        },
    );

    let svc = service.clone();
    registry.register(
        SERVICE,
        "QueryUserByID",
        RpcEndpoint {
            roles: &[Role::Admin],
            handler: Box::new(move |request, payload| {
                Box::pin(query_user_by_id(svc.clone(), request, payload))
            }),
        },
    );

    let svc = service.clone();
    registry.register(
        SERVICE,
        "QueryUserByEmail",
        RpcEndpoint {
            roles: &[Role::Admin],
            handler: Box::new(move |request, payload| {
                Box::pin(query_user_by_email(svc.clone(), request, payload))
            }),
        },
    );

    let svc = service;
    registry.register(
        SERVICE,
        "Authenticate",
        RpcEndpoint {
            roles: &[],
            handler: Box::new(move |request, payload| {
                Box::pin(authenticate(svc.clone(), request, payload))
            }),
        },
    );
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, RpcError> {
    Ok(serde_json::to_vec(value)?)
}

async fn create_user(
    svc: Arc<dyn IdentityService>,
    request: GenericRequest,
    payload: Vec<u8>,
) -> Result<Vec<u8>, RpcError> {
    let req: CreateUserRequest = serde_json::from_slice(&payload)?;

    let response = match req.new_user.try_into_dto() {
        Ok(new_user) => match svc.create_user(new_user, request).await {
            Ok(user) => CreateUserResponse {
                user: Some(user.into()),
                ..Default::default()
            },
            Err(err) => CreateUserResponse {
                error: Some(err.to_string()),
                ..Default::default()
            },
        },
        Err(err) => CreateUserResponse {
            error: Some(err.to_string()),
            ..Default::default()
        },
    };

    encode(&response)
}

async fn update_user(
    svc: Arc<dyn IdentityService>,
    request: GenericRequest,
    payload: Vec<u8>,
) -> Result<Vec<u8>, RpcError> {
    let req: UpdateUserRequest = serde_json::from_slice(&payload)?;

    let parsed = UserId::parse(&req.id)
        .and_then(|id| Ok((id, req.update.try_into_dto()?)));

    let response = match parsed {
        Ok((id, update)) => {
            match svc.update_user(id, update, request).await {
                Ok(user) => UpdateUserResponse {
                    user: Some(user.into()),
                    ..Default::default()
                },
                Err(err) => UpdateUserResponse {
                    error: Some(err.to_string()),
                    ..Default::default()
                },
            }
        },
        Err(err) => UpdateUserResponse {
            error: Some(err.to_string()),
            ..Default::default()
        },
    };

    encode(&response)
}

async fn delete_user(
    svc: Arc<dyn IdentityService>,
    request: GenericRequest,
    payload: Vec<u8>,
) -> Result<Vec<u8>, RpcError> {
    let req: DeleteUserRequest = serde_json::from_slice(&payload)?;

    let response = match UserId::parse(&req.id) {
        Ok(id) => match svc.delete_user(id, request).await {
            Ok(user) => DeleteUserResponse {
                user: Some(user.into()),
                ..Default::default()
            },
            Err(err) => DeleteUserResponse {
                error: Some(err.to_string()),
                ..Default::default()
            },
        },
        Err(err) => DeleteUserResponse {
            error: Some(err.to_string()),
            ..Default::default()
        },
    };

    encode(&response)
}

async fn query_user(
    svc: Arc<dyn IdentityService>,
    request: GenericRequest,
    payload: Vec<u8>,
) -> Result<Vec<u8>, RpcError> {
    let req: QueryUserRequest = serde_json::from_slice(&payload)?;

    let response = match svc
        .query_user(req.filter.into(), req.page.into(), request)
        .await
    {
        Ok(users) => QueryUserResponse {
            users: users.into_iter().map(Into::into).collect(),
            ..Default::default()
        },
        Err(err) => QueryUserResponse {
            error: Some(err.to_string()),
            ..Default::default()
        },
    };

    encode(&response)
}

async fn query_user_by_id(
    svc: Arc<dyn IdentityService>,
    request: GenericRequest,
    payload: Vec<u8>,
) -> Result<Vec<u8>, RpcError> {
    let req: QueryUserByIdRequest = serde_json::from_slice(&payload)?;

    let response = match UserId::parse(&req.id) {
        Ok(id) => match svc.query_user_by_id(id, request).await {
            Ok(user) => QueryUserByIdResponse {
                user: Some(user.into()),
                ..Default::default()
            },
            Err(err) => QueryUserByIdResponse {
                error: Some(err.to_string()),
                ..Default::default()
            },
        },
        Err(err) => QueryUserByIdResponse {
            error: Some(err.to_string()),
            ..Default::default()
        },
    };

    encode(&response)
}

async fn query_user_by_email(
    svc: Arc<dyn IdentityService>,
    request: GenericRequest,
    payload: Vec<u8>,
) -> Result<Vec<u8>, RpcError> {
    let req: QueryUserByEmailRequest = serde_json::from_slice(&payload)?;

    let response = match EmailAddress::parse(req.email) {
        Ok(email) => match svc.query_user_by_email(email, request).await {
            Ok(user) => QueryUserByEmailResponse {
                user: Some(user.into()),
                ..Default::default()
            },
            Err(err) => QueryUserByEmailResponse {
                error: Some(err.to_string()),
                ..Default::default()
            },
        },
        Err(err) => QueryUserByEmailResponse {
            error: Some(err.to_string()),
            ..Default::default()
        },
    };

    encode(&response)
}

async fn authenticate(
    svc: Arc<dyn IdentityService>,
    request: GenericRequest,
    payload: Vec<u8>,
) -> Result<Vec<u8>, RpcError> {
    let req: AuthenticateRequest = serde_json::from_slice(&payload)?;

    let credentials = EmailAddress::parse(req.email)
        .and_then(|email| Ok((email, Password::new(req.password)?)));

    let response = match credentials {
        Ok((email, password)) => {
            match svc.authenticate(email, password, request).await {
                Ok(identity) => AuthenticateResponse {
                    identity: Some(AuthenticatedIdentity {
                        id: identity.id.as_str().to_string(),
                        roles: identity.roles,
                    }),
                    ..Default::default()
                },
                Err(err) => AuthenticateResponse {
                    error: Some(err.to_string()),
                    ..Default::default()
                },
            }
        },
        Err(err) => AuthenticateResponse {
            error: Some(err.to_string()),
            ..Default::default()
        },
    };

    encode(&response)
}
