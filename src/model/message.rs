//! Gateway-independent view of an inbound chat message.

/// The parts of a Discord message the tracker and confirmation waits look at.
///
/// Built from `serenity::all::Message` in the bot layer so that correlation and
/// classification can be exercised without a gateway connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub id: u64,
    pub guild_id: Option<u64>,
    pub channel_id: u64,
    pub author_id: u64,
    pub author_name: String,
    pub author_is_bot: bool,
    pub content: String,
    pub embed_count: usize,
    /// Role IDs of the author within the guild, when known.
    pub author_role_ids: Vec<u64>,
}

impl InboundMessage {
    pub fn content_lower(&self) -> String {
        self.content.to_lowercase()
    }

    pub fn has_embeds(&self) -> bool {
        self.embed_count > 0
    }
}
