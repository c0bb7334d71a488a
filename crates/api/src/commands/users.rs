//! User directory commands

use convene_domain::Result;

use crate::cli::UsersCommand;
use crate::context::AppContext;
use crate::output::Outcome;

pub(super) async fn run(ctx: &AppContext, command: UsersCommand) -> Result<Outcome> {
    let users = match command {
        UsersCommand::List { participants: true } => ctx.users.participants().await?,
        UsersCommand::List { participants: false } => ctx.users.list_users().await?,
    };
    Ok(Outcome::Users(users))
}
