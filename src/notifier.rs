use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::{debug, error};

use crate::config::ChatTarget;

/// Delivers text to the configured chat.
///
/// Implementations never propagate transport failures: they log them and
/// return `false`.
pub trait Notifier {
    async fn send(&self, text: &str) -> bool;
}

pub struct TelegramNotifier {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramNotifier {
    pub fn new(token: &str, chat: &ChatTarget) -> Self {
        Self {
            bot: Bot::new(token),
            recipient: recipient_for(chat),
        }
    }
}

fn recipient_for(chat: &ChatTarget) -> Recipient {
    match chat {
        ChatTarget::Id(id) => Recipient::Id(ChatId(*id)),
        ChatTarget::Channel(name) => Recipient::ChannelUsername(name.clone()),
    }
}

impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> bool {
        match self.bot.send_message(self.recipient.clone(), text).await {
            Ok(_) => {
                debug!(text, "message sent to Telegram");
                true
            }
            Err(e) => {
                error!(error = %e, text, "failed to send Telegram message");
                false
            }
        }
    }
}
