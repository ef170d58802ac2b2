use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::{error::AppError, model::message::InboundMessage, service::leaderboard::MemberDirectory};

mod economy;
mod leaderboard;

const GAME_BOT: u64 = 555955826880413696;
const GUILD: u64 = 7;
const CHANNEL: u64 = 70;

fn inbound(author_id: u64, author_name: &str, content: &str) -> InboundMessage {
    InboundMessage {
        id: 1,
        guild_id: Some(GUILD),
        channel_id: CHANNEL,
        author_id,
        author_name: author_name.to_string(),
        author_is_bot: author_id == GAME_BOT,
        content: content.to_string(),
        embed_count: 0,
        author_role_ids: Vec::new(),
    }
}

/// In-memory member directory with configurable failures.
#[derive(Default)]
struct FakeDirectory {
    names: HashMap<u64, String>,
    holders: HashMap<u64, Vec<u64>>,
    failing_revocations: HashSet<u64>,
    revoked: Mutex<Vec<(u64, u64)>>,
}

impl FakeDirectory {
    fn revoked(&self) -> Vec<(u64, u64)> {
        self.revoked.lock().unwrap().clone()
    }
}

#[serenity::async_trait]
impl MemberDirectory for FakeDirectory {
    async fn display_name(&self, _guild_id: u64, user_id: u64) -> Result<String, AppError> {
        self.names
            .get(&user_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("member {}", user_id)))
    }

    async fn role_holders(&self, _guild_id: u64, role_id: u64) -> Result<Vec<u64>, AppError> {
        Ok(self.holders.get(&role_id).cloned().unwrap_or_default())
    }

    async fn revoke_role(
        &self,
        _guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), AppError> {
        if self.failing_revocations.contains(&user_id) {
            return Err(AppError::Forbidden("missing permissions".to_string()));
        }
        self.revoked.lock().unwrap().push((user_id, role_id));
        Ok(())
    }
}
