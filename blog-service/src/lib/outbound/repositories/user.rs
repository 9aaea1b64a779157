use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PersonName;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USER_COLUMNS: &str = "id, name, surname, email, password_hash, is_admin, created_at, updated_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: Option<String>,
    surname: Option<String>,
    email: String,
    password_hash: String,
    is_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            name: row.name.map(PersonName::new).transpose()?,
            surname: row.surname.map(PersonName::new).transpose()?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            is_admin: row.is_admin,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn map_write_error(e: sqlx::Error, email: &EmailAddress) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
            return UserError::EmailAlreadyExists(email.as_str().to_string());
        }
    }
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let query = format!(
            r#"
            INSERT INTO users (name, surname, email, password_hash, is_admin)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user.name.as_ref().map(|n| n.as_str()))
            .bind(user.surname.as_ref().map(|n| n.as_str()))
            .bind(user.email.as_str())
            .bind(&user.password_hash)
            .bind(user.is_admin)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &user.email))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");

        let rows = sqlx::query_as::<_, UserRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let query = format!(
            r#"
            UPDATE users
            SET name = $2, surname = $3, email = $4, password_hash = $5, is_admin = $6, updated_at = $7
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user.id.0)
            .bind(user.name.as_ref().map(|n| n.as_str()))
            .bind(user.surname.as_ref().map(|n| n.as_str()))
            .bind(user.email.as_str())
            .bind(&user.password_hash)
            .bind(user.is_admin)
            .bind(user.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, &user.email))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(UserError::NotFound(user.id)),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        // Owned articles go with the account through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(*id));
        }

        Ok(())
    }
}
