// src/messages.rs

pub const INVALID_EMAIL: &str = "Please enter a valid email";
pub const MISSING_DISCORD: &str = "Please enter a Discord username";
pub const DISCORD_TOO_SHORT: &str = "Discord username too short";
pub const REQUEST_TOO_SHORT: &str = "Please describe your training needs (at least 10 characters)";

pub fn request_too_long(max: usize) -> String {
    format!("Please keep your request under {} characters", max)
}

/// Short-lived notification shown after a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub success: bool,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        if self.success {
            "Success!"
        } else {
            "Error"
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.success {
            "✓"
        } else {
            "✕"
        }
    }
}

pub fn submitted() -> Notice {
    Notice::success("Request Submitted Successfully!")
}

pub fn fix_errors() -> Notice {
    Notice::error("Please fix the errors before submitting")
}

pub fn deleted() -> Notice {
    Notice::success("Request deleted successfully")
}

pub fn refreshed() -> Notice {
    Notice::success("Requests refreshed")
}

pub fn save_failed(reason: &str) -> Notice {
    Notice::error(format!("Could not save your request: {}", reason))
}
