use std::sync::Arc;

use chrono::Utc;

use crate::{
    auth::{require_admin, IdentityProvider, Principal},
    errors::{AppError, AppResult},
    models::{
        domain::{User, UserRole, UserUpdate},
        dto::{
            request::{LoginRequest, RegisterRequest, SetRoleRequest, UpdateProfileRequest},
            response::{LoginResponse, RegisterResponse, SetRoleResponse},
        },
    },
    repositories::UserRepository,
};

pub struct UserService {
    users: Arc<dyn UserRepository>,
    identity: Arc<dyn IdentityProvider>,
    allow_admin_signup: bool,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        identity: Arc<dyn IdentityProvider>,
        allow_admin_signup: bool,
    ) -> Self {
        Self {
            users,
            identity,
            allow_admin_signup,
        }
    }

    /// Creates the identity account first, then the profile. A failed profile
    /// write removes the account again.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        if request.role == UserRole::Admin && !self.allow_admin_signup {
            return Err(AppError::Forbidden(
                "Admin accounts cannot be self-registered".to_string(),
            ));
        }

        let email = request.email.trim().to_lowercase();
        let uid = self
            .identity
            .create_account(&email, &request.password, request.role)
            .await?;

        let mut user = User::new(&uid, &email, request.display_name.trim(), request.role);
        user.metadata.department = request.department;
        user.metadata.roll_number = request.roll_number;
        user.metadata.employee_id = request.employee_id;

        if let Err(err) = self.users.create(user).await {
            log::error!("Profile creation failed for {}: {}. Rolling back account", uid, err);
            if let Err(rollback_err) = self.identity.delete_account(&uid).await {
                log::error!("Failed to roll back account {}: {}", uid, rollback_err);
            }
            return Err(err);
        }

        log::info!("Registered {} user {}", request.role, uid);
        Ok(RegisterResponse {
            uid,
            email,
            role: request.role,
        })
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let session = self
            .identity
            .sign_in(&request.email, &request.password)
            .await?;
        let user = self.find_profile(&session.uid).await?;

        if !user.is_active {
            return Err(AppError::Forbidden("This account is disabled".to_string()));
        }
        self.touch_last_login(&session.uid).await;

        Ok(LoginResponse {
            token: session.token,
            user,
        })
    }

    pub async fn profile(&self, principal: &Principal) -> AppResult<User> {
        let user = self.find_profile(&principal.user_id).await?;
        self.touch_last_login(&principal.user_id).await;
        Ok(user)
    }

    pub async fn update_profile(
        &self,
        principal: &Principal,
        request: UpdateProfileRequest,
    ) -> AppResult<User> {
        let update = UserUpdate::from(request);
        if update.is_empty() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }
        self.users.update_profile(&principal.user_id, update).await
    }

    pub async fn set_role(
        &self,
        principal: &Principal,
        request: SetRoleRequest,
    ) -> AppResult<SetRoleResponse> {
        require_admin(principal)?;

        self.find_profile(&request.uid).await?;
        self.identity.set_role(&request.uid, request.role).await?;
        self.users.set_role(&request.uid, request.role).await?;

        log::info!(
            "Admin {} set role of {} to {}",
            principal.user_id,
            request.uid,
            request.role
        );
        Ok(SetRoleResponse {
            uid: request.uid,
            role: request.role,
        })
    }

    async fn find_profile(&self, uid: &str) -> AppResult<User> {
        self.users
            .find_by_id(uid)
            .await?
            .ok_or_else(|| AppError::NotFound("User profile not found".to_string()))
    }

    async fn touch_last_login(&self, uid: &str) {
        if let Err(err) = self.users.touch_last_login(uid, Utc::now()).await {
            log::warn!("Failed to update last login for {}: {}", uid, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::identity::MockIdentityProvider;
    use crate::auth::Session;
    use crate::repositories::user_repository::MockUserRepository;

    fn register_request(role: UserRole) -> RegisterRequest {
        RegisterRequest {
            email: "Ada@Example.com".to_string(),
            password: "secret123".to_string(),
            display_name: "Ada".to_string(),
            role,
            department: Some("Maths".to_string()),
            roll_number: None,
            employee_id: None,
        }
    }

    #[tokio::test]
    async fn test_register_creates_account_then_profile() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_create_account()
            .withf(|email, _, role| email == "ada@example.com" && *role == UserRole::Student)
            .times(1)
            .returning(|_, _, _| Ok("uid-1".to_string()));
        identity.expect_delete_account().never();

        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .withf(|user| user.uid == "uid-1" && user.metadata.department.as_deref() == Some("Maths"))
            .times(1)
            .returning(|user| Ok(user));

        let service = UserService::new(Arc::new(users), Arc::new(identity), false);
        let response = service.register(register_request(UserRole::Student)).await.unwrap();

        assert_eq!(response.uid, "uid-1");
        assert_eq!(response.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_register_rolls_back_account_when_profile_fails() {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_create_account()
            .returning(|_, _, _| Ok("uid-1".to_string()));
        identity
            .expect_delete_account()
            .withf(|uid| uid == "uid-1")
            .times(1)
            .returning(|_| Ok(()));

        let mut users = MockUserRepository::new();
        users
            .expect_create()
            .returning(|_| Err(AppError::DatabaseError("write failed".to_string())));

        let service = UserService::new(Arc::new(users), Arc::new(identity), false);
        let result = service.register(register_request(UserRole::Teacher)).await;

        assert_eq!(
            result.unwrap_err(),
            AppError::DatabaseError("write failed".to_string())
        );
    }

    #[tokio::test]
    async fn test_admin_signup_requires_flag() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_create_account().never();

        let service = UserService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(identity),
            false,
        );
        let result = service.register(register_request(UserRole::Admin)).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_login_survives_last_login_failure() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_sign_in().returning(|_, _| {
            Ok(Session {
                uid: "uid-1".to_string(),
                token: "token".to_string(),
            })
        });

        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|uid| {
            Ok(Some(User::new(uid, "ada@example.com", "Ada", UserRole::Student)))
        });
        users
            .expect_touch_last_login()
            .returning(|_, _| Err(AppError::DatabaseError("timeout".to_string())));

        let service = UserService::new(Arc::new(users), Arc::new(identity), false);
        let response = service
            .login(LoginRequest {
                email: "ada@example.com".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.token, "token");
        assert_eq!(response.user.uid, "uid-1");
    }

    #[tokio::test]
    async fn test_set_role_is_admin_only() {
        let service = UserService::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockIdentityProvider::new()),
            false,
        );
        let teacher = Principal::new("t1", "t1@example.com", UserRole::Teacher);

        let result = service
            .set_role(
                &teacher,
                SetRoleRequest {
                    uid: "s1".to_string(),
                    role: UserRole::Admin,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
