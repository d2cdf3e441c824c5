use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{event::CreateUser, User},
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1))]
    pub password: String,
    #[garde(skip)]
    #[serde(default)]
    pub is_admin: bool,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(value: CreateUserRequest) -> Self {
        let CreateUserRequest {
            name,
            email,
            password,
            is_admin,
        } = value;
        CreateUser {
            user_name: name,
            email,
            password,
            role: if is_admin { Role::Admin } else { Role::User },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let is_admin = value.is_admin();
        let User {
            user_id,
            user_name,
            email,
            role: _,
            created_at,
        } = value;
        Self {
            user_id,
            name: user_name,
            email,
            is_admin,
            created_at,
        }
    }
}
