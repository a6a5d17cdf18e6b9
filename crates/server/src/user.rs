//! Current user endpoint

use api_types::user::Me;
use axum::{Extension, Json};

/// Return the user the request authenticated as
pub async fn me(Extension(user): Extension<engine::User>) -> Json<Me> {
    Json(Me {
        id: user.id,
        username: user.username,
        display_name: user.display_name,
    })
}
