//! Rules for title uniqueness and amount sign, loaded from the environment.

use core_config::{ConfigError, FromEnv, env_flag};

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, NewItem};

/// Item creation rules that vary per deployment.
///
/// Defaults: titles are compared case-sensitively and amounts must be
/// non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPolicy {
    /// When false, "Lamp" and "lamp" collide
    pub case_sensitive_titles: bool,
    pub allow_negative_amount: bool,
}

impl Default for ItemPolicy {
    fn default() -> Self {
        Self {
            case_sensitive_titles: true,
            allow_negative_amount: false,
        }
    }
}

impl ItemPolicy {
    /// Normalized form of `title` that uniqueness is enforced on.
    pub fn title_key(&self, title: &str) -> String {
        if self.case_sensitive_titles {
            title.to_string()
        } else {
            title.to_lowercase()
        }
    }

    pub fn check_amount(&self, amount: i32) -> ItemResult<()> {
        if amount < 0 && !self.allow_negative_amount {
            return Err(ItemError::Validation(format!(
                "amount must be non-negative, got {amount}"
            )));
        }
        Ok(())
    }

    /// Apply the policy to a validated payload.
    pub fn prepare(&self, input: CreateItem) -> ItemResult<NewItem> {
        self.check_amount(input.amount)?;

        Ok(NewItem {
            title_key: self.title_key(&input.title),
            title: input.title,
            url: input.url,
            description: input.description,
            amount: input.amount,
        })
    }
}

/// - `ITEMS_TITLE_CASE_SENSITIVE` (default: true)
/// - `ITEMS_ALLOW_NEGATIVE_AMOUNT` (default: false)
impl FromEnv for ItemPolicy {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            case_sensitive_titles: env_flag(
                "ITEMS_TITLE_CASE_SENSITIVE",
                defaults.case_sensitive_titles,
            )?,
            allow_negative_amount: env_flag(
                "ITEMS_ALLOW_NEGATIVE_AMOUNT",
                defaults.allow_negative_amount,
            )?,
        })
    }
}
