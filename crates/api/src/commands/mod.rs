//! CLI commands - argument handling over the application context

mod auth;
mod meetings;
mod users;

use convene_domain::Result;

use crate::cli::Commands;
use crate::context::AppContext;
use crate::output::Outcome;
use crate::utils::command_helpers::execute_logged;

/// Run one parsed command against the context.
///
/// # Errors
/// Propagates the command's domain error unchanged.
pub async fn execute(ctx: &AppContext, command: Commands) -> Result<Outcome> {
    let name = command.name();
    execute_logged(name, || dispatch(ctx, command)).await
}

async fn dispatch(ctx: &AppContext, command: Commands) -> Result<Outcome> {
    match command {
        Commands::Login(args) => auth::login(ctx, args).await,
        Commands::Register(args) => auth::register(ctx, args).await,
        Commands::Logout => auth::logout(ctx).await,
        Commands::Whoami => auth::whoami(ctx).await,
        Commands::Meetings(command) => meetings::run(ctx, command).await,
        Commands::Users(command) => users::run(ctx, command).await,
    }
}
