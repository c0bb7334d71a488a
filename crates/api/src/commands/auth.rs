//! Account commands

use convene_domain::Result;
use convene_infra::api::RegisterRequest;

use crate::cli::{LoginArgs, RegisterArgs};
use crate::context::AppContext;
use crate::output::Outcome;

pub(super) async fn login(ctx: &AppContext, args: LoginArgs) -> Result<Outcome> {
    let user = ctx.auth.login(&args.email, &args.password).await?;
    Ok(Outcome::User(user))
}

pub(super) async fn register(ctx: &AppContext, args: RegisterArgs) -> Result<Outcome> {
    let request = RegisterRequest {
        name: args.name,
        email: args.email,
        password: args.password,
        role: args.role.into(),
    };
    let user = ctx.auth.register(&request).await?;
    Ok(Outcome::User(user))
}

pub(super) async fn logout(ctx: &AppContext) -> Result<Outcome> {
    ctx.auth.logout().await?;
    Ok(Outcome::done("Signed out."))
}

pub(super) async fn whoami(ctx: &AppContext) -> Result<Outcome> {
    Ok(Outcome::User(ctx.current_user().await?))
}
