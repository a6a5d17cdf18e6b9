use chrono::Utc;
use sea_orm::{ActiveValue, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, User,
    password::{hash_password, verify_password},
    users,
    util::{normalize_optional_text, require_text},
};

use super::{Engine, with_tx};

impl Engine {
    /// Create a back-office user. Usernames are unique.
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> ResultEngine<User> {
        require_text(username, "username")?;
        let username = username.trim().to_string();
        let password_hash = hash_password(password)?;
        with_tx!(self, "create_user", |db_tx| {
            let exists = users::Entity::find()
                .filter(users::Column::Username.eq(username.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(username));
            }

            let model = users::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                username: ActiveValue::Set(username.clone()),
                password_hash: ActiveValue::Set(password_hash),
                display_name: ActiveValue::Set(normalize_optional_text(display_name)),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await
            .map_err(|err| EngineError::from_write(err, username.clone()))?;
            tracing::info!(username = %model.username, "user created");
            Ok(User::from(model))
        })
    }

    pub async fn user_by_username(&self, username: &str) -> ResultEngine<Option<User>> {
        self.run_op("user_by_username", async {
            let model = users::Entity::find()
                .filter(users::Column::Username.eq(username))
                .one(&self.database)
                .await?;
            Ok(model.map(User::from))
        })
        .await
    }

    /// Check Basic credentials. Unknown users and wrong passwords both yield
    /// `None`.
    ///
    /// The hash check runs on the blocking pool.
    pub async fn authenticate(&self, username: &str, password: &str) -> ResultEngine<Option<User>> {
        self.run_op("authenticate", async {
            let Some(model) = users::Entity::find()
                .filter(users::Column::Username.eq(username))
                .one(&self.database)
                .await?
            else {
                return Ok(None);
            };
            let password = password.to_string();
            let hash = model.password_hash.clone();
            let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
                .await
                .map_err(|err| {
                    EngineError::Configuration(format!("password verification aborted: {err}"))
                })?;
            Ok(verified.then(|| User::from(model)))
        })
        .await
    }
}
