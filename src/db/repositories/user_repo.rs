//! User repository

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{CodeSubmission, Role, StoredFile, User, USER_COLUMNS},
};

/// Profile fields accepted by `PUT /profile`
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate<'a> {
    pub college: Option<&'a str>,
    pub degree: Option<&'a str>,
    pub graduation_year: Option<i32>,
    pub skills: Option<&'a [String]>,
    pub bio: Option<&'a str>,
    pub phone_number: Option<&'a str>,
    pub linked_in: Option<&'a str>,
    pub github: Option<&'a str>,
}

/// Which user file slot to operate on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFile {
    Photo,
    Resume,
}

impl UserFile {
    fn column_prefix(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Resume => "resume",
        }
    }
}

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> AppResult<User> {
        let sql = format!(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(name)
            .bind(email)
            .bind(password_hash)
            .bind(role)
            .fetch_one(executor)
            .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> AppResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Check whether an email is already registered
    pub async fn email_exists<'e, E: PgExecutor<'e>>(executor: E, email: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)"#)
                .bind(email)
                .fetch_one(executor)
                .await?;

        Ok(exists)
    }

    /// Update profile fields; absent fields are left unchanged
    pub async fn update_profile(
        pool: &PgPool,
        id: &Uuid,
        update: &ProfileUpdate<'_>,
    ) -> AppResult<User> {
        let sql = format!(
            r#"
            UPDATE users
            SET
                college = COALESCE($2, college),
                degree = COALESCE($3, degree),
                graduation_year = COALESCE($4, graduation_year),
                skills = COALESCE($5, skills),
                bio = COALESCE($6, bio),
                phone_number = COALESCE($7, phone_number),
                linked_in = COALESCE($8, linked_in),
                github = COALESCE($9, github),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(update.college)
            .bind(update.degree)
            .bind(update.graduation_year)
            .bind(update.skills)
            .bind(update.bio)
            .bind(update.phone_number)
            .bind(update.linked_in)
            .bind(update.github)
            .fetch_one(pool)
            .await?;

        Ok(user)
    }

    /// Store (or replace) a photo or resume
    pub async fn set_file(
        pool: &PgPool,
        id: &Uuid,
        slot: UserFile,
        file: &StoredFile,
    ) -> AppResult<User> {
        let p = slot.column_prefix();
        let sql = format!(
            r#"
            UPDATE users
            SET {p}_data = $2, {p}_content_type = $3, {p}_filename = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(&file.data)
            .bind(&file.content_type)
            .bind(&file.filename)
            .fetch_one(pool)
            .await?;

        Ok(user)
    }

    /// Remove a photo or resume
    pub async fn clear_file(pool: &PgPool, id: &Uuid, slot: UserFile) -> AppResult<User> {
        let p = slot.column_prefix();
        let sql = format!(
            r#"
            UPDATE users
            SET {p}_data = NULL, {p}_content_type = NULL, {p}_filename = NULL, updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_one(pool)
            .await?;

        Ok(user)
    }

    /// Load a stored photo or resume
    pub async fn find_file(pool: &PgPool, id: &Uuid, slot: UserFile) -> AppResult<Option<StoredFile>> {
        let p = slot.column_prefix();
        let sql = format!(
            r#"
            SELECT
                {p}_data AS data,
                COALESCE({p}_content_type, 'application/octet-stream') AS content_type,
                COALESCE({p}_filename, '{p}') AS filename
            FROM users
            WHERE id = $1 AND {p}_data IS NOT NULL
            "#
        );
        let file = sqlx::query_as::<_, StoredFile>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(file)
    }

    /// Add a problem to the solved set; a no-op if it is already there
    pub async fn add_solved_problem<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        problem_id: &Uuid,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET solved_problems = array_append(solved_problems, $2), updated_at = NOW()
            WHERE id = $1 AND NOT ($2 = ANY(solved_problems))
            "#,
        )
        .bind(id)
        .bind(problem_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Record accepted code for a problem
    pub async fn add_code_submission<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: &Uuid,
        problem_id: &Uuid,
        code: &str,
        language: &str,
    ) -> AppResult<CodeSubmission> {
        let submission = sqlx::query_as::<_, CodeSubmission>(
            r#"
            INSERT INTO code_submissions (user_id, problem_id, code, language)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(problem_id)
        .bind(code)
        .bind(language)
        .fetch_one(executor)
        .await?;

        Ok(submission)
    }
}
