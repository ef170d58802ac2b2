//! Recognises tracked game commands and waits for the game bot to confirm them.
//!
//! A message only becomes a [`ConfirmedEvent`] when all of the following hold:
//! - it was sent in an allow-listed guild by an opted-in, non-bot user
//! - its text is a known phrase after the game's `rpg` prefix
//! - the game bot replies in the same channel within the confirmation timeout
//!
//! Timeouts are expected and frequent; they produce no event and no error.

use std::time::Duration;

use chrono::Utc;

use crate::{
    model::{
        action::{ActionClass, TrackedAction},
        activity::{ConfirmedEvent, Subject},
        message::InboundMessage,
    },
    service::{
        correlator::ConfirmationRegistry,
        registry::{GuildAllowList, OptInRegistry},
    },
};

/// Prefix the game bot responds to.
const GAME_PREFIX: &str = "rpg";
/// Keyword in front of epic item names, e.g. `rpg use ultra bait`.
const EPIC_KEYWORD: &str = "use";

/// Game bot side messages that mention the player but do not confirm a hunt.
const FALSE_POSITIVES: &[&str] = &["lost the challenge", "found a pet", "your mount"];

/// Classifies a raw message text as a tracked action.
///
/// Matching is case-insensitive and tolerant of repeated whitespace. Hunt phrases are
/// tried first, then `use <epic item>`.
pub fn classify(content: &str) -> Option<TrackedAction> {
    let lowered = content.to_lowercase();
    let mut words = lowered.split_whitespace();

    if words.next()? != GAME_PREFIX {
        return None;
    }

    let rest: Vec<&str> = words.collect();
    let phrase = rest.join(" ");

    if let Some(action) = TrackedAction::from_hunt_phrase(&phrase) {
        return Some(action);
    }

    match rest.split_first() {
        Some((&first, item)) if first == EPIC_KEYWORD => {
            TrackedAction::from_epic_phrase(&item.join(" "))
        }
        _ => None,
    }
}

/// Whether `candidate` is the game bot confirming `action` triggered by `trigger`.
pub fn confirms(
    action: TrackedAction,
    game_bot_id: u64,
    trigger: &InboundMessage,
    candidate: &InboundMessage,
) -> bool {
    if candidate.author_id != game_bot_id
        || candidate.channel_id != trigger.channel_id
        || candidate.has_embeds()
    {
        return false;
    }

    let text = candidate.content_lower();

    match action.epic_confirmation() {
        Some(expected) => text.trim() == expected,
        None => {
            text.contains(&trigger.author_name.to_lowercase())
                && !FALSE_POSITIVES.iter().any(|phrase| text.contains(phrase))
        }
    }
}

#[derive(Clone)]
pub struct Tracker {
    confirmations: ConfirmationRegistry,
    opt_in: OptInRegistry,
    guilds: GuildAllowList,
    game_bot_id: u64,
    timeout: Duration,
}

impl Tracker {
    pub fn new(
        confirmations: ConfirmationRegistry,
        opt_in: OptInRegistry,
        guilds: GuildAllowList,
        game_bot_id: u64,
        timeout: Duration,
    ) -> Self {
        Self {
            confirmations,
            opt_in,
            guilds,
            game_bot_id,
            timeout,
        }
    }

    /// Turns an inbound message into a confirmed event, waiting for the game bot if
    /// the message is a tracked command.
    ///
    /// # Returns
    /// - `Some(ConfirmedEvent)` - The game bot confirmed the action in time
    /// - `None` - Not tracked, not eligible, or no confirmation before the deadline
    pub async fn on_inbound_message(&self, message: &InboundMessage) -> Option<ConfirmedEvent> {
        if message.author_is_bot {
            return None;
        }
        let guild_id = message.guild_id?;

        if !self.guilds.contains(guild_id).await || !self.opt_in.contains(message.author_id).await
        {
            return None;
        }

        let action = classify(&message.content)?;

        let game_bot_id = self.game_bot_id;
        let trigger = message.clone();
        let confirmation = self
            .confirmations
            .wait_for(message.channel_id, self.timeout, move |candidate| {
                confirms(action, game_bot_id, &trigger, candidate)
            })
            .await;

        let Some(confirmation) = confirmation else {
            tracing::debug!(
                "No confirmation for '{}' (message {}) from user {} in channel {}",
                action.label(),
                message.id,
                message.author_id,
                message.channel_id
            );
            return None;
        };

        // Opt-out may have happened while we were waiting.
        if !self.opt_in.contains(message.author_id).await {
            tracing::debug!(
                "Dropping confirmed '{}' (message {}): user {} opted out while pending",
                action.label(),
                message.id,
                message.author_id
            );
            return None;
        }

        tracing::debug!(
            "Confirmed {} action '{}' (message {}) for user {}",
            match action.class() {
                ActionClass::Epic => "epic",
                _ => "hunt",
            },
            action.label(),
            message.id,
            message.author_id
        );

        Some(ConfirmedEvent {
            action,
            subject: Subject::new(guild_id, message.author_id),
            at: Utc::now(),
            confirmation_text: confirmation.content,
        })
    }
}
