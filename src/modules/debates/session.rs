use poise::serenity_prelude::{
    PermissionOverwrite, PermissionOverwriteType, Permissions, RoleId, UserId,
};

/// Discord's channel name limit.
const MAX_CHANNEL_NAME_LEN: usize = 100;

/// Discord rewrites text channel names itself; this only trims and bounds the length.
pub fn channel_name(topic: &str) -> String {
    let name: String = topic.trim().chars().take(MAX_CHANNEL_NAME_LEN).collect();
    if name.is_empty() {
        "debate".to_string()
    } else {
        name
    }
}

/// Only the two debaters and the moderator role may talk; `@everyone` (whose role id is the
/// guild id) is muted.
pub fn overwrites(
    everyone: RoleId,
    moderators: RoleId,
    debater1: UserId,
    debater2: UserId,
) -> Vec<PermissionOverwrite> {
    let allow = |kind| PermissionOverwrite {
        allow: Permissions::SEND_MESSAGES,
        deny: Permissions::empty(),
        kind,
    };

    vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::SEND_MESSAGES,
            kind: PermissionOverwriteType::Role(everyone),
        },
        allow(PermissionOverwriteType::Member(debater1)),
        allow(PermissionOverwriteType::Member(debater2)),
        allow(PermissionOverwriteType::Role(moderators)),
    ]
}

pub fn info_description(topic: &str, debater1: UserId, debater2: UserId) -> String {
    format!(
        "Topic: {}\nDebater 1: <@{}>\nDebater 2: <@{}>",
        topic, debater1, debater2
    )
}

pub fn navigate_message(channel_id: u64, debater1: UserId, debater2: UserId) -> String {
    format!(
        "*Navigate to* <#{}>: <@{}> **vs** <@{}>",
        channel_id, debater1, debater2
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_name() {
        assert_eq!(channel_name("  Cats vs dogs "), "Cats vs dogs");
        assert_eq!(channel_name("   "), "debate");
        assert_eq!(channel_name(&"x".repeat(150)).len(), MAX_CHANNEL_NAME_LEN);
    }

    #[test]
    fn test_overwrites_mute_everyone_but_participants() {
        let everyone = RoleId::new(100);
        let moderators = RoleId::new(200);
        let overwrites = overwrites(everyone, moderators, UserId::new(1), UserId::new(2));

        assert_eq!(overwrites.len(), 4);
        assert_eq!(overwrites[0].kind, PermissionOverwriteType::Role(everyone));
        assert_eq!(overwrites[0].deny, Permissions::SEND_MESSAGES);
        assert!(overwrites[0].allow.is_empty());

        for overwrite in &overwrites[1..] {
            assert_eq!(overwrite.allow, Permissions::SEND_MESSAGES);
            assert!(overwrite.deny.is_empty());
        }
        assert_eq!(
            overwrites[1].kind,
            PermissionOverwriteType::Member(UserId::new(1))
        );
        assert_eq!(
            overwrites[2].kind,
            PermissionOverwriteType::Member(UserId::new(2))
        );
        assert_eq!(overwrites[3].kind, PermissionOverwriteType::Role(moderators));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            info_description("Free will", UserId::new(1), UserId::new(2)),
            "Topic: Free will\nDebater 1: <@1>\nDebater 2: <@2>"
        );
        assert_eq!(
            navigate_message(55, UserId::new(1), UserId::new(2)),
            "*Navigate to* <#55>: <@1> **vs** <@2>"
        );
    }
}
