use guessnum_types::{
    actor::{Actor, Role},
    errors::AppError,
    player::Player,
};

/// Decides whether `actor` may modify `player`.
///
/// Admins may modify anyone; authenticated users only the player carrying
/// their own username. `player` must be the record loaded in the current
/// attempt, never the requested change.
pub fn authorize(actor: &Actor, player: &Player) -> Result<(), AppError> {
    if !actor.is_authenticated() {
        return Err(AppError::Unauthenticated);
    }

    if actor.has_role(Role::Admin) || actor.is(&player.username) {
        return Ok(());
    }

    Err(AppError::Forbidden {
        identity: actor.identity.clone().unwrap_or_default(),
        player_id: player.id,
    })
}

#[cfg(test)]
mod tests {
    use guessnum_types::test_utils::{PlayerFactoryOptions, player_factory};

    use super::*;

    fn ivan() -> Player {
        player_factory(PlayerFactoryOptions {
            username: Some("ivan"),
            best_score: Some(8),
            revision: Some(3),
            ..Default::default()
        })
    }

    #[test]
    fn test_admin_is_allowed_on_any_player() {
        assert!(authorize(&Actor::admin("root"), &ivan()).is_ok());
    }

    #[test]
    fn test_owner_is_allowed() {
        assert!(authorize(&Actor::user("ivan"), &ivan()).is_ok());
    }

    #[test]
    fn test_owner_without_roles_is_allowed() {
        let actor = Actor::new("ivan", []);
        assert!(authorize(&actor, &ivan()).is_ok());
    }

    #[test]
    fn test_other_user_is_forbidden() {
        let player = ivan();
        match authorize(&Actor::user("pyotr"), &player) {
            Err(AppError::Forbidden {
                identity,
                player_id,
            }) => {
                assert_eq!(identity, "pyotr");
                assert_eq!(player_id, player.id);
            }
            other => panic!("Expected Forbidden, got: {:?}", other),
        }
    }

    #[test]
    fn test_anonymous_is_unauthenticated_even_with_admin_role() {
        let actor = Actor {
            identity: None,
            roles: [Role::Admin].into_iter().collect(),
        };
        assert!(matches!(
            authorize(&actor, &ivan()),
            Err(AppError::Unauthenticated)
        ));
        assert!(matches!(
            authorize(&Actor::anonymous(), &ivan()),
            Err(AppError::Unauthenticated)
        ));
    }

    #[test]
    fn test_username_match_is_exact() {
        assert!(authorize(&Actor::user("Ivan"), &ivan()).is_err());
    }
}
