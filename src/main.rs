use config::Settings;
use database::DbError;
use databases::Databases;
use modules::debates::{debate, debate_session, debates, leaderboard};
use poise::serenity_prelude::{self as serenity, CreateAllowedMentions};
use poise::CreateReply;
use std::sync::Arc;
use tracing::{error, info, trace, warn};

mod config;
mod database;
mod databases;
mod modules;
mod utils;

#[derive(Clone, Debug)]
pub struct Data {
    pub dbs: Arc<Databases>,
    pub settings: Arc<Settings>,
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

#[poise::command(slash_command, guild_only, required_permissions = "MANAGE_GUILD")]
async fn register(ctx: Context<'_>) -> Result<(), Error> {
    poise::builtins::register_application_commands_buttons(ctx).await?;
    Ok(())
}

fn location(ctx: &Context<'_>) -> String {
    ctx.guild_id()
        .map_or_else(|| "DM".to_string(), |id| id.to_string())
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(
                "Command {} failed for {} in {}: {:?}",
                ctx.command().qualified_name,
                ctx.author().tag(),
                location(&ctx),
                error
            );

            let message = match error.downcast_ref::<DbError>() {
                Some(db_error) => db_error.user_message(),
                None => "❌ Something went wrong while running that command.".to_string(),
            };
            let reply = CreateReply::default().content(message).ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                warn!("Failed to report command error: {}", e);
            }
        }
        err => {
            error!("Other framework error: {:?}", err);
            if let Err(e) = poise::builtins::on_error(err).await {
                warn!("Error while handling framework error: {}", e);
            }
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    info!("starting debate bot");

    let token = std::env::var("DISCORD_TOKEN").expect("missing DISCORD_TOKEN");
    let settings = Arc::new(Settings::from_env().expect("invalid configuration"));
    let intents = serenity::GatewayIntents::non_privileged();

    let dbs = Arc::new(Databases::new(&settings.data_dir));
    let setup_dbs = dbs.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions::<Data, Error> {
            allowed_mentions: Some(CreateAllowedMentions::new().empty_roles().empty_users()),
            commands: vec![
                register(),
                leaderboard(),
                debates(),
                debate(),
                debate_session(),
            ],
            pre_command: |ctx| {
                Box::pin(async move {
                    trace!(
                        "Command {} used by {} in {}",
                        ctx.command().qualified_name,
                        ctx.author().tag(),
                        location(&ctx)
                    );
                })
            },
            post_command: |ctx| {
                Box::pin(async move {
                    info!(
                        "Command {} completed for {} in {}",
                        ctx.command().qualified_name,
                        ctx.author().tag(),
                        location(&ctx)
                    );
                })
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                // commands are only dispatched once setup returns, so the store is ready first
                setup_dbs.connect_all().await?;

                info!("registering commands");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                Ok(Data {
                    dbs: setup_dbs,
                    settings,
                })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .expect("failed to build client");

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutting down");
            shard_manager.shutdown_all().await;
        }
    });

    if let Err(e) = client.start().await {
        error!("Client error: {:?}", e);
    }

    dbs.close_all().await;
}
