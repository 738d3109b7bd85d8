use anyhow::anyhow;
use chrono::Utc;
use contracts::shared::api::LookupItem;
use contracts::system::users::{CreateUserDto, UpdateUserDto, User};

use super::repository;
use crate::shared::error::{AppError, AppResult};
use crate::system::auth::password;

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Create a new user
pub async fn create(dto: CreateUserDto, created_by: Option<String>) -> AppResult<String> {
    dto.validate()?;

    let username = dto.username.trim().to_string();
    if repository::get_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Username '{}' already exists",
            username
        )));
    }

    let password_hash = password::hash_password(&dto.password)?;

    let user_id = uuid::Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();

    let user = User {
        id: user_id.clone(),
        username,
        email: clean(dto.email),
        full_name: clean(dto.full_name),
        is_active: true,
        is_admin: dto.is_admin,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
        created_by,
    };

    repository::create_with_password(&user, &password_hash).await?;
    tracing::info!("User {} created", user.username);

    Ok(user_id)
}

pub async fn update(id: &str, dto: UpdateUserDto) -> AppResult<()> {
    dto.validate()?;

    let mut user = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;

    user.email = clean(dto.email);
    user.full_name = clean(dto.full_name);
    user.is_active = dto.is_active;
    user.is_admin = dto.is_admin;
    user.updated_at = Utc::now().to_rfc3339();

    repository::update(&user).await?;

    Ok(())
}

/// Delete a user; nobody can delete their own account
pub async fn delete(id: &str, requester_id: &str) -> AppResult<()> {
    if id == requester_id {
        return Err(AppError::Validation(
            "You cannot delete your own account".into(),
        ));
    }
    if repository::delete(id).await? {
        Ok(())
    } else {
        Err(AppError::not_found("User"))
    }
}

pub async fn get_by_id(id: &str) -> anyhow::Result<Option<User>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<User>> {
    repository::list_all().await
}

/// Active users as select options
pub async fn lookup() -> anyhow::Result<Vec<LookupItem>> {
    let users = repository::list_all().await?;
    Ok(users
        .into_iter()
        .filter(|u| u.is_active)
        .map(|u| LookupItem {
            label: match u.full_name.as_deref() {
                Some(name) => format!("{} ({})", name, u.username),
                None => u.username.clone(),
            },
            id: u.id,
        })
        .collect())
}

/// Verify user credentials (for login)
pub async fn verify_credentials(username: &str, password: &str) -> anyhow::Result<Option<User>> {
    let user = match repository::get_by_username(username.trim()).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    if !user.is_active {
        return Ok(None);
    }

    let password_hash = repository::get_password_hash(&user.id)
        .await?
        .ok_or_else(|| anyhow!("Password hash not found"))?;

    if !password::verify_password(password, &password_hash)? {
        return Ok(None);
    }

    if let Err(e) = repository::update_last_login(&user.id).await {
        tracing::warn!("Failed to update last login of {}: {}", user.username, e);
    }

    Ok(Some(user))
}
