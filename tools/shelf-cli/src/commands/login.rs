//! Log in and show who the session belongs to.

use anyhow::{Context as _, Result};
use chrono::Local;
use serde::Serialize;
use shelf_auth::{SessionContext, User};
use shelf_data::StoreApi;

use super::LoginArgs;
use crate::context::Context;

#[derive(Debug, Serialize)]
struct Whoami {
    user: User,
    session_expires_at: chrono::DateTime<chrono::Utc>,
}

/// Run the login command.
pub async fn run(args: LoginArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api();
    let mut session = ctx.sign_in(&api, &args.credentials).await?;
    let whoami = whoami(&api, &session).await;
    session.end();
    let whoami = whoami?;

    if ctx.output.is_json() {
        ctx.output.json(&whoami);
        return Ok(());
    }

    ctx.output.success(&format!("Welcome, {}!", whoami.user.display_name()));
    ctx.output.kv("Name", &whoami.user.full_name());
    ctx.output.kv("Username", &whoami.user.username);
    if !whoami.user.email.is_empty() {
        ctx.output.kv("Email", &whoami.user.email);
    }
    ctx.output.kv(
        "Session expires",
        &whoami
            .session_expires_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
    );
    ctx.output.info("Logged out.");
    Ok(())
}

/// Confirm the session with the API.
async fn whoami<A>(api: &A, session: &SessionContext) -> Result<Whoami>
where
    A: StoreApi + ?Sized,
{
    let active = session.guard()?;
    let user = api
        .current_user(&active.token)
        .await
        .context("Failed to verify session")?;
    Ok(Whoami {
        user,
        session_expires_at: active.token.expires_at,
    })
}
