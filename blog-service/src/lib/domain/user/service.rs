use std::sync::Arc;

use async_trait::async_trait;
use auth::ensure_owner;
use auth::Authenticator;
use auth::Mutation;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and verification
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn find_existing(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(*id))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.authenticator.hash_password(&command.password)?;

        let user = self
            .repository
            .create(NewUser {
                name: command.name,
                surname: command.surname,
                email: command.email,
                password_hash,
                is_admin: command.is_admin,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.find_existing(id).await
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, UserError> {
        let user = self.repository.find_by_email(email).await?;

        let stored_hash = user.as_ref().map(|u| u.password_hash.as_str());
        if self.authenticator.verify_credentials(password, stored_hash) {
            Ok(user)
        } else {
            Ok(None)
        }
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
        acting: &UserId,
    ) -> Result<User, UserError> {
        let mut user = self.find_existing(id).await?;
        ensure_owner(&user, acting, Mutation::Update)?;

        if let Some(name) = command.name {
            user.name = Some(name);
        }

        if let Some(surname) = command.surname {
            user.surname = Some(surname);
        }

        if let Some(email) = command.email {
            user.email = email;
        }

        if let Some(is_admin) = command.is_admin {
            user.is_admin = is_admin;
        }

        if let Some(password) = command.password {
            user.password_hash = self.authenticator.hash_password(&password)?;
        }

        user.updated_at = Utc::now();

        self.repository.update(user).await
    }

    async fn delete_user(&self, id: &UserId, acting: &UserId) -> Result<(), UserError> {
        let user = self.find_existing(id).await?;
        ensure_owner(&user, acting, Mutation::Delete)?;

        self.repository.delete(&user.id).await?;

        tracing::info!(user_id = %user.id, "User deleted");

        Ok(())
    }
}
