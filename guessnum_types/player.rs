use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// A player of the game.
///
/// `revision` starts at 0 and is bumped by the store on every successful
/// versioned write; nothing else should touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub username: String,
    /// Fewest attempts needed to guess the number, `None` until the first game.
    pub best_score: Option<u32>,
    pub revision: u32,
}

impl Player {
    pub fn new(id: Uuid, username: String, best_score: Option<u32>) -> Self {
        Self {
            id,
            username,
            best_score,
            revision: 0,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        validate_username(&self.username)?;
        validate_best_score(self.best_score)
    }
}

/// A requested change to a player record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerChange {
    /// Overwrites both fields unconditionally.
    Replace { username: String, best_score: u32 },
    /// Overwrites only the fields that are present.
    Patch {
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        best_score: Option<u32>,
    },
}

impl PlayerChange {
    pub fn patch_best_score(best_score: u32) -> Self {
        PlayerChange::Patch {
            username: None,
            best_score: Some(best_score),
        }
    }

    pub fn patch_username(username: impl Into<String>) -> Self {
        PlayerChange::Patch {
            username: Some(username.into()),
            best_score: None,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        match self {
            PlayerChange::Replace {
                username,
                best_score,
            } => {
                validate_username(username)?;
                validate_best_score(Some(*best_score))
            }
            PlayerChange::Patch {
                username,
                best_score,
            } => {
                if let Some(username) = username {
                    validate_username(username)?;
                }
                validate_best_score(*best_score)
            }
        }
    }

    /// Produces the candidate state of `player` after this change.
    /// The revision is carried over as-is.
    pub fn apply(&self, player: &Player) -> Player {
        match self {
            PlayerChange::Replace {
                username,
                best_score,
            } => Player {
                username: username.clone(),
                best_score: Some(*best_score),
                ..player.clone()
            },
            PlayerChange::Patch {
                username,
                best_score,
            } => Player {
                username: username.clone().unwrap_or_else(|| player.username.clone()),
                best_score: best_score.or(player.best_score),
                ..player.clone()
            },
        }
    }
}

fn validate_username(username: &str) -> Result<(), AppError> {
    if username.trim().is_empty() {
        return Err(AppError::InvalidUsername);
    }
    Ok(())
}

/// Highest storable score; the column is a signed 32-bit integer.
pub const MAX_BEST_SCORE: u32 = i32::MAX as u32;

fn validate_best_score(best_score: Option<u32>) -> Result<(), AppError> {
    match best_score {
        Some(score) if score == 0 || score > MAX_BEST_SCORE => {
            Err(AppError::InvalidBestScore(score))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ivan() -> Player {
        Player {
            id: Uuid::new_v4(),
            username: "ivan".to_string(),
            best_score: Some(8),
            revision: 3,
        }
    }

    #[test]
    fn test_patch_best_score_keeps_username() {
        let player = ivan();
        let updated = PlayerChange::patch_best_score(5).apply(&player);

        assert_eq!(updated.id, player.id);
        assert_eq!(updated.username, "ivan");
        assert_eq!(updated.best_score, Some(5));
        assert_eq!(updated.revision, 3);
    }

    #[test]
    fn test_patch_username_keeps_best_score() {
        let player = ivan();
        let updated = PlayerChange::patch_username("pyotr").apply(&player);

        assert_eq!(updated.username, "pyotr");
        assert_eq!(updated.best_score, Some(8));
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let player = ivan();
        let change = PlayerChange::Patch {
            username: None,
            best_score: None,
        };

        assert_eq!(change.apply(&player), player);
    }

    #[test]
    fn test_replace_overwrites_both_fields() {
        let player = ivan();
        let change = PlayerChange::Replace {
            username: "pyotr".to_string(),
            best_score: 2,
        };
        let updated = change.apply(&player);

        assert_eq!(updated.username, "pyotr");
        assert_eq!(updated.best_score, Some(2));
        assert_eq!(updated.revision, player.revision);
    }

    #[test]
    fn test_validate_rejects_blank_username_and_zero_score() {
        assert!(matches!(
            PlayerChange::patch_username("  ").validate(),
            Err(AppError::InvalidUsername)
        ));
        assert!(matches!(
            PlayerChange::patch_best_score(0).validate(),
            Err(AppError::InvalidBestScore(0))
        ));
        assert!(matches!(
            PlayerChange::Replace {
                username: String::new(),
                best_score: 3
            }
            .validate(),
            Err(AppError::InvalidUsername)
        ));
        assert!(PlayerChange::patch_best_score(1).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_scores_beyond_storage_range() {
        assert!(matches!(
            PlayerChange::patch_best_score(u32::MAX).validate(),
            Err(AppError::InvalidBestScore(u32::MAX))
        ));
        assert!(matches!(
            PlayerChange::patch_best_score(MAX_BEST_SCORE + 1).validate(),
            Err(AppError::InvalidBestScore(_))
        ));
        assert!(PlayerChange::patch_best_score(MAX_BEST_SCORE).validate().is_ok());

        let player = Player::new(Uuid::new_v4(), "ivan".to_string(), Some(u32::MAX));
        assert!(matches!(
            player.validate(),
            Err(AppError::InvalidBestScore(u32::MAX))
        ));
    }

    #[test]
    fn test_new_player_starts_at_revision_zero() {
        let player = Player::new(Uuid::new_v4(), "ivan".to_string(), None);
        assert_eq!(player.revision, 0);
        assert!(player.validate().is_ok());
    }

    #[test]
    fn test_patch_deserializes_with_missing_fields() {
        let change: PlayerChange =
            serde_json::from_str(r#"{"kind":"patch","best_score":4}"#).unwrap();
        assert_eq!(change, PlayerChange::patch_best_score(4));
    }
}
