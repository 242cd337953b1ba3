//! Permission gate for /announce
//!
//! Member data arrives in different shapes depending on the interaction. It is
//! normalized into [`MemberAccess`] before any decision is made.

use serenity::model::guild::Member;
use serenity::model::id::RoleId;
use serenity::model::permissions::Permissions;
use std::collections::HashSet;

/// Normalized view of what the invoking member is allowed to do
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberAccess {
    pub administrator: bool,
    pub manage_guild: bool,
    pub roles: HashSet<RoleId>,
}

impl MemberAccess {
    pub fn new(permissions: Option<Permissions>, roles: impl IntoIterator<Item = RoleId>) -> Self {
        let permissions = permissions.unwrap_or_else(Permissions::empty);
        MemberAccess {
            administrator: permissions.administrator(),
            manage_guild: permissions.manage_guild(),
            roles: roles.into_iter().collect(),
        }
    }

    /// Build from the member attached to an interaction. Missing data means no access.
    pub fn from_member(member: Option<&Member>) -> Self {
        match member {
            Some(member) => Self::new(member.permissions, member.roles.iter().copied()),
            None => Self::default(),
        }
    }

    /// Administrator, Manage Server, or membership in the configured role.
    ///
    /// Without a configured role only the two permission flags count.
    pub fn permits(&self, allowed_role: Option<RoleId>) -> bool {
        let has_allowed_role = allowed_role
            .map(|role| self.roles.contains(&role))
            .unwrap_or(false);
        self.administrator || self.manage_guild || has_allowed_role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALLOWED: RoleId = RoleId(500);

    #[test]
    fn test_gate_truth_table() {
        for administrator in [false, true] {
            for manage_guild in [false, true] {
                for has_role in [false, true] {
                    for configured in [false, true] {
                        let access = MemberAccess {
                            administrator,
                            manage_guild,
                            roles: if has_role {
                                HashSet::from([ALLOWED])
                            } else {
                                HashSet::new()
                            },
                        };
                        let allowed_role = configured.then_some(ALLOWED);
                        let expected = administrator || manage_guild || (has_role && configured);
                        assert_eq!(
                            access.permits(allowed_role),
                            expected,
                            "admin={administrator} manage={manage_guild} role={has_role} configured={configured}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_unconfigured_role_never_allows_all() {
        let access = MemberAccess::new(None, [RoleId(1), RoleId(2)]);
        assert!(!access.permits(None));
    }

    #[test]
    fn test_other_roles_do_not_pass() {
        let access = MemberAccess::new(Some(Permissions::SEND_MESSAGES), [RoleId(1)]);
        assert!(!access.permits(Some(ALLOWED)));
    }

    #[test]
    fn test_permission_flags_are_extracted() {
        let access = MemberAccess::new(Some(Permissions::ADMINISTRATOR), []);
        assert!(access.administrator);
        assert!(!access.manage_guild);

        let access = MemberAccess::new(Some(Permissions::MANAGE_GUILD | Permissions::SEND_MESSAGES), []);
        assert!(access.manage_guild);
        assert!(access.permits(None));
    }

    #[test]
    fn test_missing_member_fails_closed() {
        let access = MemberAccess::from_member(None);
        assert_eq!(access, MemberAccess::default());
        assert!(!access.permits(Some(ALLOWED)));
    }
}
