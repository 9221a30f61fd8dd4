//! Users API handlers.
//!
//! ```text
//! GET    /user/
//! GET    /user/{user_id}
//! POST   /user/create        {"username":"jane_doe","firstname":"Jane","lastname":"Doe","age":30}
//! PUT    /user/update?user_id=1   {"age":31}
//! DELETE /user/delete?user_id=1
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, Scope, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{FieldUpdate, NewUser, User, UserChanges, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{json_config, path_config, query_config};

/// Path prefix shared by every user endpoint.
pub const USER_SCOPE: &str = "/user";

/// Request body for `POST /user/create`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    /// Unique login name.
    #[schema(example = "jane_doe")]
    pub username: String,
    /// Given name.
    #[schema(example = "Jane")]
    pub firstname: String,
    /// Family name.
    #[schema(example = "Doe")]
    pub lastname: String,
    /// Age in years.
    #[schema(example = 30)]
    pub age: i32,
}

impl From<CreateUserRequest> for NewUser {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            username: value.username,
            firstname: value.firstname,
            lastname: value.lastname,
            age: value.age,
        }
    }
}

/// Request body for `PUT /user/update`.
///
/// Omitted fields are left untouched; `null` is rejected.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    /// New login name.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "jane_d")]
    pub username: FieldUpdate<String>,
    /// New given name.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub firstname: FieldUpdate<String>,
    /// New family name.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub lastname: FieldUpdate<String>,
    /// New age.
    #[serde(default)]
    #[schema(value_type = Option<i32>, example = 31)]
    pub age: FieldUpdate<i32>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(value: UpdateUserRequest) -> Self {
        Self {
            username: value.username,
            firstname: value.firstname,
            lastname: value.lastname,
            age: value.age,
        }
    }
}

/// Query string selecting the target of an update or delete.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserIdQuery {
    /// Identifier of the user to modify.
    pub user_id: i32,
}

/// Acknowledgement body returned by update and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionAck {
    /// HTTP status mirrored into the body.
    #[schema(example = 200)]
    pub status_code: u16,
    /// Human-readable outcome.
    #[schema(example = "User update is successful!")]
    pub transaction: String,
}

impl TransactionAck {
    fn ok(transaction: &str) -> Self {
        Self {
            status_code: 200,
            transaction: transaction.to_owned(),
        }
    }
}

/// List every user in insertion order.
#[utoipa::path(
    get,
    path = "/user/",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users))
}

/// Fetch a single user by identifier.
#[utoipa::path(
    get,
    path = "/user/{user_id}",
    params(("user_id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 422, description = "Malformed identifier", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/{user_id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    user_id: web::Path<i32>,
) -> ApiResult<web::Json<User>> {
    let user = state
        .users_query
        .get_user(UserId::new(user_id.into_inner()))
        .await?;
    Ok(web::Json(user))
}

/// Register a new user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_service::inbound::http::users::create_user;
///
/// let app = App::new().service(create_user);
/// ```
#[utoipa::path(
    post,
    path = "/user/create",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserSchema,
            headers(("Location" = String, description = "URL of the new user"))),
        (status = 400, description = "Username already taken", body = ErrorSchema),
        (status = 422, description = "Malformed body", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/create")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users_command
        .create_user(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("{USER_SCOPE}/{}", user.id())))
        .json(user))
}

/// Apply a partial update to an existing user.
#[utoipa::path(
    put,
    path = "/user/update",
    params(UserIdQuery),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = TransactionAck),
        (status = 400, description = "Username already taken", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 422, description = "Malformed body or identifier", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/update")]
pub async fn update_user(
    state: web::Data<HttpState>,
    query: web::Query<UserIdQuery>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<TransactionAck>> {
    state
        .users_command
        .update_user(UserId::new(query.user_id), payload.into_inner().into())
        .await?;
    Ok(web::Json(TransactionAck::ok("User update is successful!")))
}

/// Hard-delete a user.
#[utoipa::path(
    delete,
    path = "/user/delete",
    params(UserIdQuery),
    responses(
        (status = 200, description = "User deleted", body = TransactionAck),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 422, description = "Malformed identifier", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/delete")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    query: web::Query<UserIdQuery>,
) -> ApiResult<web::Json<TransactionAck>> {
    state
        .users_command
        .delete_user(UserId::new(query.user_id))
        .await?;
    Ok(web::Json(TransactionAck::ok("User deletion is successful!")))
}

/// Build the `/user` scope with every handler and the extractor error
/// handlers that turn malformed input into 422 responses.
pub fn user_scope() -> Scope {
    web::scope(USER_SCOPE)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(list_users)
        .service(create_user)
        .service(update_user)
        .service(delete_user)
        .service(get_user)
}
