use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::{debug, error};

use crate::error::DeliveryError;

/// Telegram's hard limit on message text length.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// A single-operation messaging channel.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError>;
}

pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

/// Numeric ids address a chat directly; anything else is a channel username.
pub fn recipient(chat_id: &str) -> Recipient {
    let chat_id = chat_id.trim();
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.to_string()),
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        let len = text.chars().count();
        if len > TELEGRAM_MESSAGE_LIMIT {
            return Err(DeliveryError::TooLong {
                len,
                limit: TELEGRAM_MESSAGE_LIMIT,
            });
        }
        self.bot.send_message(recipient(chat_id), text).await?;
        Ok(())
    }
}

/// Try to deliver `message`; failures are logged and reported as `false`.
pub async fn send_message(messenger: &dyn Messenger, chat_id: &str, message: &str) -> bool {
    match messenger.send_text(chat_id, message).await {
        Ok(()) => {
            debug!("Message sent: {}", message);
            true
        }
        Err(e) => {
            error!("Message not sent: {}", e);
            false
        }
    }
}
