use super::database::NewDebate;
use super::display::{self, GuildDirectory, EMPTY_LOG};
use super::ranking::rank_records;
use super::session;
use crate::{Context, Error};
use poise::command;
use poise::serenity_prelude::{
    builder::CreateChannel, ChannelId, ChannelType, Colour, CreateEmbed, CreateEmbedFooter,
    CreateMessage, Member, RoleId, Timestamp,
};
use poise::CreateReply;
use tracing::info;

/// 🏆 Ranks the best debaters
#[command(slash_command, guild_only)]
pub async fn leaderboard(ctx: Context<'_>) -> Result<(), Error> {
    let records = ctx.data().dbs.debates.find_all().await?;
    let rankings = rank_records(&records);

    let embed = CreateEmbed::new()
        .title("Debate Leaderboard")
        .colour(Colour::DARK_TEAL)
        .timestamp(Timestamp::now())
        .footer(CreateEmbedFooter::new("\u{200b}").icon_url(ctx.author().face()))
        .description(display::leaderboard_description(&rankings));

    ctx.send(CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// 📜 Lists all logged debates
#[command(slash_command, guild_only)]
pub async fn debates(ctx: Context<'_>) -> Result<(), Error> {
    send_listing(ctx).await
}

/// 📜 Lists all logged debates
#[command(slash_command, guild_only)]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    send_listing(ctx).await
}

async fn send_listing(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;
    let records = ctx.data().dbs.debates.find_all().await?;

    let directory = GuildDirectory::new(ctx.serenity_context(), guild_id);
    let fields = display::build_listing(&records, &directory).await;
    let embeds = display::split_into_embeds(fields);

    if embeds.is_empty() {
        let embed = CreateEmbed::new()
            .title("Debate Logs")
            .colour(Colour::BLUE)
            .description(EMPTY_LOG);
        ctx.send(CreateReply::default().embed(embed)).await?;
        return Ok(());
    }

    // parts after the first go out as follow-ups
    let total = embeds.len();
    for (i, fields) in embeds.into_iter().enumerate() {
        let mut embed = CreateEmbed::new()
            .title("Debate Logs")
            .colour(Colour::BLUE);
        for field in fields {
            embed = embed.field(field.name, field.value, true);
        }
        if total > 1 {
            embed = embed.footer(CreateEmbedFooter::new(display::part_footer(i + 1, total)));
        }
        ctx.send(CreateReply::default().embed(embed)).await?;
    }
    Ok(())
}

/// Adds a debate to the records
#[command(slash_command, guild_only)]
pub async fn add(
    ctx: Context<'_>,
    #[description = "First debater"] debater1: Member,
    #[description = "Second debater"] debater2: Member,
    #[description = "What the debate was about"] topic: String,
    #[description = "Who won"] winner: Member,
) -> Result<(), Error> {
    let record = ctx
        .data()
        .dbs
        .debates
        .create(NewDebate {
            user_id_1: debater1.user.id.get(),
            user_id_2: debater2.user.id.get(),
            topic,
            winner_id: winner.user.id.get(),
        })
        .await?;

    info!("Logged debate {} won by {}", record.id, record.winner_id);
    ctx.say("Debate result logged!").await?;
    Ok(())
}

/// Removes a debate from the records
#[command(slash_command, guild_only)]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "ID shown in /debates"] debate_id: String,
) -> Result<(), Error> {
    ctx.data().dbs.debates.delete_by_id(&debate_id).await?;

    info!("Removed debate {}", debate_id.trim());
    ctx.say("Record removed!").await?;
    Ok(())
}

/// 🎤 Makes a channel for a debate
#[command(slash_command, guild_only, rename = "debate-session")]
pub async fn debate_session(
    ctx: Context<'_>,
    #[description = "First debater"] debater1: Member,
    #[description = "Second debater"] debater2: Member,
    #[description = "What the debate is about"] topic: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;
    let settings = &ctx.data().settings;

    let overwrites = session::overwrites(
        guild_id.everyone_role(),
        RoleId::new(settings.session_role_id),
        debater1.user.id,
        debater2.user.id,
    );

    let channel = guild_id
        .create_channel(
            &ctx.serenity_context(),
            CreateChannel::new(session::channel_name(&topic))
                .kind(ChannelType::Text)
                .category(ChannelId::new(settings.session_category_id))
                .permissions(overwrites),
        )
        .await?;

    let info_embed = CreateEmbed::new()
        .title("Debate Info")
        .description(session::info_description(
            &topic,
            debater1.user.id,
            debater2.user.id,
        ))
        .colour(Colour::TEAL);
    channel
        .id
        .send_message(&ctx.serenity_context(), CreateMessage::new().embed(info_embed))
        .await?;

    info!("Opened debate session channel {} in {}", channel.id, guild_id);
    ctx.say(session::navigate_message(
        channel.id.get(),
        debater1.user.id,
        debater2.user.id,
    ))
    .await?;
    Ok(())
}
