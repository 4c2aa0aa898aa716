//! Typed representation of access-token scope strings.
//!
//! The wire format is a single space-delimited, case-sensitive sequence of
//! permission tokens (e.g. `"superuser admin:42 regular:7"`). Scope strings
//! are parsed once at the store boundary into [`Scope`] and serialized back
//! to the identical format, so external token-introspection consumers see
//! the same representation the original data carried.

use std::fmt;

use crate::types::DbId;

/// The permission token granting unrestricted access.
pub const SUPERUSER: &str = "superuser";

/// Prefix of per-list admin permission tokens (`admin:<listId>`).
pub const ADMIN_PREFIX: &str = "admin";

/// Prefix of per-list regular permission tokens (`regular:<listId>`).
pub const REGULAR_PREFIX: &str = "regular";

/// A single permission token within a scope string.
///
/// Tokens that are not recognized as `superuser`, `admin:<id>`, or
/// `regular:<id>` (including list entries whose id is not numeric)
/// round-trip byte-for-byte through [`Permission::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permission {
    Superuser,
    ListAdmin(DbId),
    ListRegular(DbId),
    Other(String),
}

impl Permission {
    /// Parse a single permission token. Never fails; unrecognized input
    /// becomes [`Permission::Other`].
    pub fn parse(raw: &str) -> Self {
        if raw == SUPERUSER {
            return Self::Superuser;
        }
        if let Some((prefix, id)) = raw.split_once(':') {
            if let Ok(list_id) = id.parse::<DbId>() {
                match prefix {
                    ADMIN_PREFIX => return Self::ListAdmin(list_id),
                    REGULAR_PREFIX => return Self::ListRegular(list_id),
                    _ => {}
                }
            }
        }
        Self::Other(raw.to_string())
    }

    /// The permission a membership row translates to.
    pub fn for_list(list_id: DbId, admin: bool) -> Self {
        if admin {
            Self::ListAdmin(list_id)
        } else {
            Self::ListRegular(list_id)
        }
    }

    /// The list id this permission refers to, if it is a per-list grant.
    pub fn list_id(&self) -> Option<DbId> {
        match self {
            Self::ListAdmin(id) | Self::ListRegular(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Superuser => f.write_str(SUPERUSER),
            Self::ListAdmin(id) => write!(f, "{ADMIN_PREFIX}:{id}"),
            Self::ListRegular(id) => write!(f, "{REGULAR_PREFIX}:{id}"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// An ordered collection of [`Permission`]s.
///
/// Order is preserved and duplicates are representable: this type mirrors
/// whatever the stored scope string contains rather than normalizing it.
/// New grants are appended at the end, so serializing after a grant keeps
/// the original entries in their original positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope(Vec<Permission>);

impl Scope {
    /// Parse a whitespace-delimited scope string. Never fails.
    pub fn parse(raw: &str) -> Self {
        Self(raw.split_whitespace().map(Permission::parse).collect())
    }

    /// Exact set-membership check (no tier fallback, no superuser implication).
    pub fn contains(&self, perm: &Permission) -> bool {
        self.0.contains(perm)
    }

    /// Whether this scope authorizes the `required` permission.
    ///
    /// - A `superuser` entry satisfies any requirement.
    /// - A `regular:<id>` requirement is also satisfied by `admin:<id>`
    ///   (admin implies regular). The authorization layer depends on this
    ///   fallback; see [`Scope::grant`] on why both tiers can coexist.
    /// - Everything else requires an exact entry.
    pub fn satisfies(&self, required: &Permission) -> bool {
        if self.0.contains(&Permission::Superuser) {
            return true;
        }
        if self.0.contains(required) {
            return true;
        }
        match required {
            Permission::ListRegular(id) => self.0.contains(&Permission::ListAdmin(*id)),
            _ => false,
        }
    }

    /// Append a permission unless an identical entry is already present.
    ///
    /// Returns `true` when the scope changed. Note that `admin:<id>` and
    /// `regular:<id>` are distinct entries: granting one does not remove or
    /// block the other, so a token can end up carrying both tiers for the
    /// same list. That is intentional, long-standing behavior.
    pub fn grant(&mut self, perm: Permission) -> bool {
        if self.0.contains(&perm) {
            return false;
        }
        self.0.push(perm);
        true
    }

    /// Remove every per-list entry (either tier) for `list_id`.
    ///
    /// Returns `true` when at least one entry was removed. Entries that are
    /// not recognized per-list grants are never touched.
    pub fn revoke_list(&mut self, list_id: DbId) -> bool {
        let before = self.0.len();
        self.0.retain(|perm| perm.list_id() != Some(list_id));
        self.0.len() != before
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, perm) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{perm}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tokens() {
        assert_eq!(Permission::parse("superuser"), Permission::Superuser);
        assert_eq!(Permission::parse("admin:42"), Permission::ListAdmin(42));
        assert_eq!(Permission::parse("regular:7"), Permission::ListRegular(7));
    }

    #[test]
    fn test_parse_unrecognized_tokens() {
        // Non-numeric ids and unknown prefixes are preserved verbatim.
        assert_eq!(
            Permission::parse("admin:abc"),
            Permission::Other("admin:abc".into())
        );
        assert_eq!(
            Permission::parse("first:regular"),
            Permission::Other("first:regular".into())
        );
        assert_eq!(
            Permission::parse("custom:42"),
            Permission::Other("custom:42".into())
        );
    }

    #[test]
    fn test_noncanonical_numeric_ids_normalize() {
        // "admin:042" is a recognized per-list grant, so it parses to the
        // typed form and re-serializes canonically rather than byte-for-byte.
        assert_eq!(Permission::parse("admin:042"), Permission::ListAdmin(42));
        assert_eq!(Scope::parse("admin:042 regular:007").to_string(), "admin:42 regular:7");
    }

    #[test]
    fn test_wire_format_round_trip() {
        let raw = "first:regular superuser admin:42 regular:7";
        assert_eq!(Scope::parse(raw).to_string(), raw);
    }

    #[test]
    fn test_parse_collapses_extra_whitespace() {
        let scope = Scope::parse("  admin:1   regular:2 ");
        assert_eq!(scope.to_string(), "admin:1 regular:2");
    }

    #[test]
    fn test_satisfies_exact_match() {
        let scope = Scope::parse("regular:10 admin:20");
        assert!(scope.satisfies(&Permission::ListRegular(10)));
        assert!(scope.satisfies(&Permission::ListAdmin(20)));
        assert!(!scope.satisfies(&Permission::ListAdmin(10)));
        assert!(!scope.satisfies(&Permission::ListRegular(99)));
    }

    #[test]
    fn test_admin_implies_regular() {
        let scope = Scope::parse("admin:5");
        assert!(scope.satisfies(&Permission::ListRegular(5)));
    }

    #[test]
    fn test_superuser_satisfies_everything() {
        let scope = Scope::parse("superuser");
        assert!(scope.satisfies(&Permission::ListAdmin(1)));
        assert!(scope.satisfies(&Permission::ListRegular(2)));
        assert!(scope.satisfies(&Permission::Other("anything".into())));
    }

    #[test]
    fn test_grant_is_idempotent() {
        let mut scope = Scope::parse("regular:1");
        assert!(scope.grant(Permission::ListAdmin(2)));
        assert!(!scope.grant(Permission::ListAdmin(2)));
        assert_eq!(scope.to_string(), "regular:1 admin:2");
    }

    #[test]
    fn test_grant_appends_at_end() {
        let mut scope = Scope::parse("first:regular");
        scope.grant(Permission::ListAdmin(42));
        assert_eq!(scope.to_string(), "first:regular admin:42");
    }

    #[test]
    fn test_both_tiers_can_coexist() {
        let mut scope = Scope::default();
        scope.grant(Permission::ListAdmin(3));
        scope.grant(Permission::ListRegular(3));
        assert_eq!(scope.to_string(), "admin:3 regular:3");
    }

    #[test]
    fn test_revoke_list_removes_both_tiers() {
        let mut scope = Scope::parse("admin:3 regular:3 regular:4");
        assert!(scope.revoke_list(3));
        assert_eq!(scope.to_string(), "regular:4");
    }

    #[test]
    fn test_revoke_list_without_match_is_noop() {
        let mut scope = Scope::parse("regular:10");
        assert!(!scope.revoke_list(99));
        assert_eq!(scope.to_string(), "regular:10");
    }

    #[test]
    fn test_revoke_list_leaves_other_entries() {
        // "custom:42" is not a recognized per-list grant and must survive.
        let mut scope = Scope::parse("custom:42 admin:42");
        assert!(scope.revoke_list(42));
        assert_eq!(scope.to_string(), "custom:42");
    }
}
