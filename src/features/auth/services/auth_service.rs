use std::sync::Arc;
use std::time::Duration;

use axum_extra::extract::cookie::Cookie;

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginRequestDto, RegisterRequestDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::password::{hash_password, verify_password};
use crate::features::auth::session::{session_cookie, Session, SessionStore};
use crate::features::users::dtos::UserResponseDto;
use crate::features::users::models::UserRole;
use crate::features::users::services::UserService;

/// Service for authentication operations (login, logout, register)
pub struct AuthService {
    users: Arc<UserService>,
    sessions: Arc<dyn SessionStore>,
    session_ttl: Duration,
    cookie_secure: bool,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        users: Arc<UserService>,
        sessions: Arc<dyn SessionStore>,
        config: &SessionConfig,
    ) -> Self {
        Self {
            users,
            sessions,
            session_ttl: config.ttl,
            cookie_secure: config.cookie_secure,
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    /// Cookie carrying a freshly created session
    pub fn cookie_for(&self, session: &Session) -> Cookie<'static> {
        session_cookie(session.id.clone(), self.session_ttl, self.cookie_secure)
    }

    /// Verify credentials and open a session
    pub async fn login(&self, dto: LoginRequestDto) -> Result<(Session, UserResponseDto)> {
        // Same message for unknown user and wrong password
        let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

        let user = self
            .users
            .find_by_username(dto.username.trim())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(dto.password, user.password_hash.clone()).await? {
            tracing::warn!("Failed login attempt for user {}", user.username);
            return Err(invalid());
        }

        let session = self.sessions.create(user.id).await;
        tracing::info!("User {} logged in", user.username);

        Ok((session, user.into()))
    }

    pub async fn logout(&self, session_id: &str) {
        self.sessions.destroy(session_id).await;
    }

    /// Resolve a session id to the current state of its user.
    ///
    /// The user row is re-read on every request so deletions and role changes
    /// apply immediately.
    pub async fn authenticate(&self, session_id: &str) -> Result<AuthenticatedUser> {
        let session = self
            .sessions
            .touch(session_id)
            .await
            .ok_or_else(|| AppError::Unauthorized("Session expired or invalid".to_string()))?;

        match self.users.find_by_id(session.user_id).await? {
            Some(user) => Ok(AuthenticatedUser::from_user(user, session.id)),
            None => {
                self.sessions.destroy(&session.id).await;
                Err(AppError::Unauthorized(
                    "Session user no longer exists".to_string(),
                ))
            }
        }
    }

    /// Create a new account (caller must be admin)
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<UserResponseDto> {
        let hash = hash_password(dto.password, self.bcrypt_cost).await?;
        self.users.create(dto.username.trim(), &hash, dto.role).await
    }

    /// Delete an account and end its sessions (caller must be admin)
    pub async fn delete_user(&self, actor: &AuthenticatedUser, user_id: i32) -> Result<()> {
        if actor.id == user_id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        self.users.delete(user_id).await?;
        let ended = self.sessions.destroy_for_user(user_id).await;
        if ended > 0 {
            tracing::info!("Ended {} sessions of deleted user {}", ended, user_id);
        }
        Ok(())
    }

    /// Create the configured admin account when no users exist yet
    pub async fn ensure_bootstrap_admin(&self, username: &str, password: &str) -> Result<()> {
        if self.users.count().await? > 0 {
            return Ok(());
        }

        let hash = hash_password(password.to_string(), self.bcrypt_cost).await?;
        self.users.create(username, &hash, UserRole::Admin).await?;
        tracing::info!("Bootstrap admin '{}' created", username);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::session::MemorySessionStore;
    use crate::shared::test_helpers::{create_admin_user, lazy_pool, test_session_config};
    use sqlx::PgPool;

    fn service(pool: PgPool) -> (AuthService, Arc<dyn SessionStore>) {
        let config = test_session_config();
        let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new(config.ttl));
        let users = Arc::new(UserService::new(pool));
        (
            AuthService::new(users, Arc::clone(&sessions), &config),
            sessions,
        )
    }

    #[tokio::test]
    async fn test_cookie_for_uses_session_id_and_ttl() {
        let (service, sessions) = service(lazy_pool());
        let session = sessions.create(7).await;

        let cookie = service.cookie_for(&session);
        assert_eq!(cookie.value(), session.id);
        assert_eq!(
            cookie.max_age(),
            Some(cookie::time::Duration::seconds(3600))
        );
    }

    #[tokio::test]
    async fn test_delete_self_is_rejected_before_touching_db() {
        let (service, _) = service(lazy_pool());
        let admin = create_admin_user();

        let err = service.delete_user(&admin, admin.id).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_unknown_session_is_unauthorized() {
        let (service, _) = service(lazy_pool());

        let err = service.authenticate("missing").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_session_of_vanished_user_is_destroyed(pool: PgPool) {
        let (service, sessions) = service(pool.clone());
        service
            .ensure_bootstrap_admin("admin", "admin-password")
            .await
            .unwrap();
        let (session, user) = service
            .login(LoginRequestDto {
                username: "admin".to_string(),
                password: "admin-password".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(service.authenticate(&session.id).await.unwrap().id, user.id);

        // Row removed behind the service's back
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user.id)
            .execute(&pool)
            .await
            .unwrap();

        let err = service.authenticate(&session.id).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert!(sessions.touch(&session.id).await.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_delete_user_ends_their_sessions(pool: PgPool) {
        let (service, sessions) = service(pool);
        service
            .ensure_bootstrap_admin("admin", "admin-password")
            .await
            .unwrap();
        let analyst = service
            .register(RegisterRequestDto {
                username: "analyst".to_string(),
                password: "analyst-password".to_string(),
                role: UserRole::User,
            })
            .await
            .unwrap();
        let first = sessions.create(analyst.id).await;
        let second = sessions.create(analyst.id).await;

        service
            .delete_user(&create_admin_user(), analyst.id)
            .await
            .unwrap();

        assert!(sessions.touch(&first.id).await.is_none());
        assert!(sessions.touch(&second.id).await.is_none());
        assert!(service.authenticate(&second.id).await.is_err());
    }
}
