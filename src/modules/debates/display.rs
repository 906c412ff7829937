//! Rendering debate records into the text Discord shows.

use async_trait::async_trait;
use futures::future::join_all;
use poise::serenity_prelude::{self as serenity, GuildId, UserId};
use std::collections::HashMap;
use tracing::warn;

use super::database::DebateRecord;

/// Discord embed limits, counted in characters.
pub const MAX_EMBED_FIELDS: usize = 25;
pub const MAX_FIELD_NAME_LEN: usize = 256;
pub const MAX_FIELD_VALUE_LEN: usize = 1024;
pub const MAX_DESCRIPTION_LEN: usize = 4096;
pub const MAX_EMBED_LEN: usize = 6000;
/// Room kept in every embed for the title and the part footer.
const EMBED_CHROME_LEN: usize = 64;
pub const EMPTY_LOG: &str = "No debates logged yet.";

/// Looks up the name a member currently shows in the guild.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn display_name(&self, user_id: u64) -> Option<String>;
}

pub struct GuildDirectory<'a> {
    ctx: &'a serenity::Context,
    guild_id: GuildId,
}

impl<'a> GuildDirectory<'a> {
    pub fn new(ctx: &'a serenity::Context, guild_id: GuildId) -> Self {
        Self { ctx, guild_id }
    }
}

#[async_trait]
impl MemberDirectory for GuildDirectory<'_> {
    async fn display_name(&self, user_id: u64) -> Option<String> {
        if user_id == 0 {
            return None;
        }
        self.guild_id
            .member(self.ctx, UserId::new(user_id))
            .await
            .ok()
            .map(|member| member.display_name().to_string())
    }
}

pub fn unknown_member(user_id: u64) -> String {
    format!("Unknown ({})", user_id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingField {
    pub name: String,
    pub value: String,
}

impl ListingField {
    fn len(&self) -> usize {
        self.name.chars().count() + self.value.chars().count()
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn listing_field(record: &DebateRecord, names: &HashMap<u64, String>) -> ListingField {
    let name = format!("{} vs {}", names[&record.user_id_1], names[&record.user_id_2]);
    let tail = format!("\nWinner: {}\nID: {}", names[&record.winner_id], record.id);

    // the ID line has to survive so the record can still be removed
    let topic_room = MAX_FIELD_VALUE_LEN.saturating_sub("Topic: ".len() + tail.chars().count());
    let value = format!("Topic: {}{}", truncate(&record.topic, topic_room), tail);

    ListingField {
        name: truncate(&name, MAX_FIELD_NAME_LEN),
        value: truncate(&value, MAX_FIELD_VALUE_LEN),
    }
}

/// Resolves every participant once and builds one field per record, in store order.
/// Ids that no longer resolve are rendered with a placeholder.
pub async fn build_listing(
    records: &[DebateRecord],
    directory: &dyn MemberDirectory,
) -> Vec<ListingField> {
    let mut ids: Vec<u64> = records
        .iter()
        .flat_map(|r| [r.user_id_1, r.user_id_2, r.winner_id])
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let names = join_all(ids.iter().map(|&id| directory.display_name(id))).await;
    let names: HashMap<u64, String> = ids
        .into_iter()
        .zip(names)
        .map(|(id, name)| {
            let name = name.unwrap_or_else(|| {
                warn!("Could not resolve member {} for the debate log", id);
                unknown_member(id)
            });
            (id, name)
        })
        .collect();

    records
        .iter()
        .map(|record| listing_field(record, &names))
        .collect()
}

/// Groups fields into embeds that each stay within Discord's field count and total size.
pub fn split_into_embeds(fields: Vec<ListingField>) -> Vec<Vec<ListingField>> {
    let budget = MAX_EMBED_LEN - EMBED_CHROME_LEN;
    let mut embeds: Vec<Vec<ListingField>> = Vec::new();
    let mut current: Vec<ListingField> = Vec::new();
    let mut current_len = 0;

    for field in fields {
        let len = field.len();
        if !current.is_empty() && (current.len() == MAX_EMBED_FIELDS || current_len + len > budget)
        {
            embeds.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current_len += len;
        current.push(field);
    }
    if !current.is_empty() {
        embeds.push(current);
    }
    embeds
}

pub fn part_footer(part: usize, total: usize) -> String {
    format!("Part {} of {}", part, total)
}

pub fn leaderboard_line(rank: usize, winner_id: u64, count: usize) -> String {
    format!("{}. <@{}> **• {}** debate(s) won.", rank, winner_id, count)
}

pub fn leaderboard_description(rankings: &[(u64, usize)]) -> String {
    if rankings.is_empty() {
        return EMPTY_LOG.to_string();
    }

    let mut description = String::new();
    for (i, (winner_id, count)) in rankings.iter().enumerate() {
        let line = leaderboard_line(i + 1, *winner_id, *count);
        if description.chars().count() + line.chars().count() + 1 > MAX_DESCRIPTION_LEN {
            break;
        }
        description.push_str(&line);
        description.push('\n');
    }
    description
}
