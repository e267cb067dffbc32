use crate::{
    auth::Principal,
    errors::{AppError, AppResult},
    models::domain::user::UserRole,
};

pub fn require_role(principal: &Principal, allowed: &[UserRole], message: &str) -> AppResult<()> {
    if !allowed.contains(&principal.role) {
        return Err(AppError::Forbidden(message.to_string()));
    }
    Ok(())
}

pub fn require_admin(principal: &Principal) -> AppResult<()> {
    require_role(
        principal,
        &[UserRole::Admin],
        "Only admins can perform this action",
    )
}

pub fn require_staff(principal: &Principal, message: &str) -> AppResult<()> {
    require_role(principal, &[UserRole::Teacher, UserRole::Admin], message)
}

pub fn require_student(principal: &Principal, message: &str) -> AppResult<()> {
    require_role(principal, &[UserRole::Student], message)
}

pub fn require_owner_or_admin(
    principal: &Principal,
    resource_owner: &str,
    message: &str,
) -> AppResult<()> {
    if !principal.is_admin() && principal.user_id != resource_owner {
        return Err(AppError::Forbidden(message.to_string()));
    }
    Ok(())
}
