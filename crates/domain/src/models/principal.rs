//! Authenticated principal and data-access scope.
//!
//! The principal is normalized once at the authentication boundary: the
//! JWT claims are resolved into a single `role_level` integer, so no
//! downstream code ever inspects raw token shapes.

use uuid::Uuid;

/// Role level at or above which a principal sees every report row.
pub const FULL_ACCESS_ROLE_LEVEL: i16 = 10;

/// Normalized authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    /// Role level 1-10.
    pub role_level: i16,
}

/// Row-visibility scope derived from a principal.
///
/// `restrict_to` is bound into every aggregation query as
/// `($n::uuid IS NULL OR r.created_by = $n)`, so full-access principals
/// and owner-scoped principals share the same parameterized SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessScope {
    pub restrict_to: Option<Uuid>,
}

impl AccessScope {
    /// Resolves the scope for a principal: level 10 sees everything,
    /// everyone else sees only rows they created.
    pub fn for_principal(principal: &Principal) -> Self {
        if principal.role_level >= FULL_ACCESS_ROLE_LEVEL {
            Self { restrict_to: None }
        } else {
            Self {
                restrict_to: Some(principal.user_id),
            }
        }
    }

    /// Human-readable scope label for the health endpoint.
    pub fn label(&self) -> &'static str {
        if self.restrict_to.is_none() {
            "all"
        } else {
            "owned"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ten_sees_all() {
        let principal = Principal {
            user_id: Uuid::new_v4(),
            role_level: 10,
        };
        let scope = AccessScope::for_principal(&principal);
        assert_eq!(scope.restrict_to, None);
        assert_eq!(scope.label(), "all");
    }

    #[test]
    fn test_lower_levels_see_owned_rows() {
        for level in 1..10 {
            let principal = Principal {
                user_id: Uuid::new_v4(),
                role_level: level,
            };
            let scope = AccessScope::for_principal(&principal);
            assert_eq!(scope.restrict_to, Some(principal.user_id));
            assert_eq!(scope.label(), "owned");
        }
    }

    #[test]
    fn test_level_above_ten_sees_all() {
        let principal = Principal {
            user_id: Uuid::new_v4(),
            role_level: 12,
        };
        assert_eq!(
            AccessScope::for_principal(&principal).restrict_to,
            None
        );
    }
}
