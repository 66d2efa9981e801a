// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

pub const DEFAULT_MODE: &str = "chat";
pub const DEFAULT_STANDARD: &str = "nfpa";

/// Reply language. Anything other than `ar` is answered in English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Ar,
    En,
}

impl Lang {
    pub fn from_code(code: &str) -> Self {
        if code == "ar" { Lang::Ar } else { Lang::En }
    }

    pub fn code(self) -> &'static str {
        match self {
            Lang::Ar => "ar",
            Lang::En => "en",
        }
    }

    /// Used when the upstream call succeeds but carries no usable text.
    pub fn empty_reply_fallback(self) -> &'static str {
        match self {
            Lang::Ar => "تم إنشاء الرد ولكن لم يتم العثور على نص مناسب.",
            Lang::En => "A reply was generated but no text was found.",
        }
    }
}

/// Raw body of a chat call. Fields stay loosely typed so a wrong type becomes a
/// default (or a 400) instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub system: Option<Value>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub lang: Option<Value>,
    #[serde(default)]
    pub mode: Option<Value>,
    #[serde(default)]
    pub standard: Option<Value>,
}

/// A validated chat call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatInput {
    pub lang: Lang,
    pub user_text: String,
    pub mode: String,
    pub standard: String,
    pub ui_system: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
    pub port: u16,
}

fn as_text(value: &Option<Value>) -> Option<&str> {
    value.as_ref().and_then(Value::as_str)
}

impl ChatRequest {
    /// Language the caller asked for, even if the rest of the body is unusable.
    pub fn lang(&self) -> Lang {
        as_text(&self.lang).map(Lang::from_code).unwrap_or_default()
    }

    pub fn normalize(self) -> Result<ChatInput, AppError> {
        let lang = self.lang();

        // `user` wins over `message` when both are present. JSON null arrives as None.
        let raw_user = if self.user.is_some() {
            as_text(&self.user)
        } else {
            as_text(&self.message)
        };
        // Blank text is rejected, but accepted text is forwarded untouched.
        let user_text = raw_user
            .filter(|text| !text.trim().is_empty())
            .ok_or(AppError::InvalidRequest(lang))?
            .to_string();

        Ok(ChatInput {
            lang,
            user_text,
            mode: as_text(&self.mode).unwrap_or(DEFAULT_MODE).to_string(),
            standard: as_text(&self.standard)
                .unwrap_or(DEFAULT_STANDARD)
                .to_string(),
            ui_system: as_text(&self.system)
                .filter(|text| !text.is_empty())
                .map(str::to_string),
        })
    }
}
