use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::debug;

use crate::platform::ChatTransport;

/// Bot API caps message text at 4096 characters.
const TELEGRAM_TEXT_LIMIT: usize = 4000;

/// Break `text` into pieces of at most `limit` bytes, cutting after the last
/// newline (or else space) inside each window.
fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = text;

    while rest.len() > limit {
        let mut cut = limit;
        while cut > 0 && !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        if cut == 0 {
            cut = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }

        let window = &rest[..cut];
        if let Some(pos) = window.rfind('\n').or_else(|| window.rfind(' ')) {
            cut = pos + 1;
        }

        let (head, tail) = rest.split_at(cut);
        chunks.push(head.to_string());
        rest = tail;
    }

    chunks.push(rest.to_string());
    chunks
}

/// Numeric ids address chats directly; anything else is a channel username.
fn recipient(chat_id: &str) -> Recipient {
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.to_string()),
    }
}

/// Sends messages through the Telegram Bot API.
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(token: &str) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send(&self, chat_id: &str, text: &str) -> Result<()> {
        let chunks = split_message(text, TELEGRAM_TEXT_LIMIT);
        debug!("Sending {} chunk(s) to Telegram chat {}", chunks.len(), chat_id);
        for chunk in chunks {
            self.bot.send_message(recipient(chat_id), chunk).await?;
        }
        Ok(())
    }
}
