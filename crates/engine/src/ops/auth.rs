//! Registration and login.
//!
//! Both lean on the external credential service for hashing and token
//! minting; neither touches category or transaction invariants. Login
//! failures never reveal whether the email or the password was wrong.

use sea_orm::{DatabaseTransaction, QueryFilter, SqlErr, prelude::*};

use crate::{
    AuthOutcome, EngineError, FieldErrors, LoginUserCmd, RegisterUserCmd, ResultEngine, User,
    users::{self, normalize_email},
};

use super::{Engine, Operation, rules};

const BAD_CREDENTIALS: &str = "invalid email or password";

impl Engine {
    /// Register a new account and mint a token for it.
    pub async fn register_user(&self, cmd: RegisterUserCmd) -> ResultEngine<AuthOutcome> {
        self.dispatch(cmd).await
    }

    /// Verify credentials and mint a token.
    pub async fn login_user(&self, cmd: LoginUserCmd) -> ResultEngine<AuthOutcome> {
        self.dispatch(cmd).await
    }
}

async fn find_by_email(
    db_tx: &DatabaseTransaction,
    email: &str,
) -> ResultEngine<Option<users::Model>> {
    users::Entity::find()
        .filter(users::Column::EmailNorm.eq(normalize_email(email)))
        .one(db_tx)
        .await
        .map_err(Into::into)
}

impl Operation for RegisterUserCmd {
    type Output = AuthOutcome;

    fn validate_shape(&self, errors: &mut FieldErrors) {
        rules::check_email(&self.email, errors);
        rules::check_password(&self.password, errors);
        rules::check_optional_name(self.first_name.as_deref(), "first_name", "First name", errors);
        rules::check_optional_name(self.last_name.as_deref(), "last_name", "Last name", errors);
    }

    async fn validate_state(
        &self,
        _engine: &Engine,
        db_tx: &DatabaseTransaction,
        errors: &mut FieldErrors,
    ) -> ResultEngine<()> {
        if self.email.trim().is_empty() {
            return Ok(());
        }
        if find_by_email(db_tx, &self.email).await?.is_some() {
            errors.push("email", "Email already exists.");
        }
        Ok(())
    }

    async fn execute(self, engine: &Engine, db_tx: &DatabaseTransaction) -> ResultEngine<AuthOutcome> {
        let password_hash = engine.credentials.hash_password(&self.password)?;
        let user = User::new(
            self.email,
            password_hash,
            rules::normalize_optional_text(self.first_name),
            rules::normalize_optional_text(self.last_name),
        )?;

        // The unique index on email_norm is the backstop for two
        // registrations racing past the pre-check.
        if let Err(err) = users::ActiveModel::from(&user).insert(db_tx).await {
            if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                return Err(EngineError::Conflict("email already registered".to_string()));
            }
            return Err(err.into());
        }

        let token = engine.credentials.issue_token(user.id, &user.email)?;
        Ok(AuthOutcome {
            user_id: user.id,
            token,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        })
    }
}

impl Operation for LoginUserCmd {
    type Output = AuthOutcome;

    fn validate_shape(&self, errors: &mut FieldErrors) {
        if self.email.trim().is_empty() {
            errors.push("email", "Email is required.");
        }
        if self.password.is_empty() {
            errors.push("password", "Password is required.");
        }
    }

    async fn execute(self, engine: &Engine, db_tx: &DatabaseTransaction) -> ResultEngine<AuthOutcome> {
        let Some(model) = find_by_email(db_tx, &self.email).await? else {
            return Err(EngineError::Unauthenticated(BAD_CREDENTIALS.to_string()));
        };
        if !engine
            .credentials
            .verify_password(&self.password, &model.password_hash)
        {
            return Err(EngineError::Unauthenticated(BAD_CREDENTIALS.to_string()));
        }

        let user = User::from(model);
        let token = engine.credentials.issue_token(user.id, &user.email)?;
        Ok(AuthOutcome {
            user_id: user.id,
            token,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        })
    }
}
