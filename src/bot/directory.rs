use std::sync::Arc;

use serenity::all::{GuildId, RoleId, UserId};
use serenity::http::Http;

use crate::{error::AppError, service::leaderboard::MemberDirectory};

/// Maximum members Discord returns per guild member page.
const MEMBERS_PER_REQUEST: u64 = 1000;

/// Member lookups and role edits over the Discord REST API.
#[derive(Clone)]
pub struct DiscordDirectory {
    http: Arc<Http>,
}

impl DiscordDirectory {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    pub async fn grant_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        reason: &str,
    ) -> Result<(), AppError> {
        self.http
            .add_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                Some(reason),
            )
            .await?;
        Ok(())
    }
}

#[serenity::async_trait]
impl MemberDirectory for DiscordDirectory {
    async fn display_name(&self, guild_id: u64, user_id: u64) -> Result<String, AppError> {
        let member = self
            .http
            .get_member(GuildId::new(guild_id), UserId::new(user_id))
            .await?;

        Ok(member.display_name().to_string())
    }

    async fn role_holders(&self, guild_id: u64, role_id: u64) -> Result<Vec<u64>, AppError> {
        let role_id = RoleId::new(role_id);
        let mut holders = Vec::new();
        let mut after: Option<u64> = None;

        loop {
            let members = self
                .http
                .get_guild_members(GuildId::new(guild_id), Some(MEMBERS_PER_REQUEST), after)
                .await?;

            let fetched = members.len();
            after = members.last().map(|m| m.user.id.get());
            holders.extend(
                members
                    .iter()
                    .filter(|m| m.roles.contains(&role_id))
                    .map(|m| m.user.id.get()),
            );

            if fetched < MEMBERS_PER_REQUEST as usize {
                break;
            }
        }

        tracing::debug!(
            "Found {} holders of role {} in guild {}",
            holders.len(),
            role_id,
            guild_id
        );

        Ok(holders)
    }

    async fn revoke_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), AppError> {
        self.http
            .remove_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                Some("Weekly milestone reset"),
            )
            .await?;
        Ok(())
    }
}
