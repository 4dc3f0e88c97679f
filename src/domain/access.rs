use super::identity::Identity;
use crate::error::{EscrowError, Result};
use std::collections::HashSet;

/// Owner, admin set and global pause flag.
///
/// Every mutating method checks the pause flag before anything else, with the
/// exception of [`AccessControl::unpause`], which would otherwise be
/// unreachable.
#[derive(Debug, Clone)]
pub struct AccessControl {
    owner: Identity,
    admins: HashSet<Identity>,
    paused: bool,
}

impl AccessControl {
    pub fn new(owner: Identity) -> Self {
        Self {
            owner,
            admins: HashSet::new(),
            paused: false,
        }
    }

    pub fn owner(&self) -> &Identity {
        &self.owner
    }

    pub fn is_admin(&self, identity: &Identity) -> bool {
        self.admins.contains(identity)
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Owner or listed admin. Gates dispute resolution.
    pub fn is_privileged(&self, identity: &Identity) -> bool {
        identity == &self.owner || self.is_admin(identity)
    }

    pub fn ensure_not_paused(&self) -> Result<()> {
        if self.paused {
            Err(EscrowError::ContractPaused)
        } else {
            Ok(())
        }
    }

    pub fn ensure_owner(&self, caller: &Identity) -> Result<()> {
        if caller == &self.owner {
            Ok(())
        } else {
            Err(EscrowError::Unauthorized(caller.clone()))
        }
    }

    pub fn ensure_privileged(&self, caller: &Identity) -> Result<()> {
        if self.is_privileged(caller) {
            Ok(())
        } else {
            Err(EscrowError::Unauthorized(caller.clone()))
        }
    }

    pub fn add_admin(&mut self, caller: &Identity, identity: &Identity) -> Result<()> {
        self.ensure_not_paused()?;
        self.ensure_owner(caller)?;
        if self.is_admin(identity) {
            return Err(EscrowError::AlreadyAdmin(identity.clone()));
        }
        self.admins.insert(identity.clone());
        Ok(())
    }

    pub fn delete_admin(&mut self, caller: &Identity, identity: &Identity) -> Result<()> {
        self.ensure_not_paused()?;
        self.ensure_owner(caller)?;
        if !self.admins.remove(identity) {
            return Err(EscrowError::NotAnAdmin(identity.clone()));
        }
        Ok(())
    }

    /// A second `pause` is rejected by the pause guard itself.
    pub fn pause(&mut self, caller: &Identity) -> Result<()> {
        self.ensure_not_paused()?;
        self.ensure_owner(caller)?;
        self.paused = true;
        Ok(())
    }

    pub fn unpause(&mut self, caller: &Identity) -> Result<()> {
        self.ensure_owner(caller)?;
        if !self.paused {
            return Err(EscrowError::NotPaused);
        }
        self.paused = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (AccessControl, Identity, Identity) {
        let owner = Identity::new("owner");
        (AccessControl::new(owner.clone()), owner, Identity::new("acc1"))
    }

    #[test]
    fn test_owner_is_privileged() {
        let (access, owner, acc1) = setup();
        assert_eq!(access.owner(), &owner);
        assert!(access.is_privileged(&owner));
        assert!(!access.is_privileged(&acc1));
        assert!(!access.paused());
    }

    #[test]
    fn test_add_and_delete_admin() {
        let (mut access, owner, acc1) = setup();

        access.add_admin(&owner, &acc1).unwrap();
        assert!(access.is_admin(&acc1));
        assert!(access.is_privileged(&acc1));

        access.delete_admin(&owner, &acc1).unwrap();
        assert!(!access.is_admin(&acc1));
        assert!(!access.is_privileged(&acc1));
    }

    #[test]
    fn test_only_owner_manages_admins() {
        let (mut access, owner, acc1) = setup();
        let acc2 = Identity::new("acc2");

        assert!(matches!(
            access.add_admin(&acc1, &acc2),
            Err(EscrowError::Unauthorized(caller)) if caller == acc1
        ));

        // Admins cannot appoint other admins either.
        access.add_admin(&owner, &acc1).unwrap();
        assert!(matches!(
            access.add_admin(&acc1, &acc2),
            Err(EscrowError::Unauthorized(_))
        ));
        assert!(matches!(
            access.delete_admin(&acc1, &acc1),
            Err(EscrowError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_admin_membership_is_strict() {
        let (mut access, owner, acc1) = setup();

        assert!(matches!(
            access.delete_admin(&owner, &acc1),
            Err(EscrowError::NotAnAdmin(_))
        ));
        access.add_admin(&owner, &acc1).unwrap();
        assert!(matches!(
            access.add_admin(&owner, &acc1),
            Err(EscrowError::AlreadyAdmin(_))
        ));
    }

    #[test]
    fn test_pause_is_outermost_guard() {
        let (mut access, owner, acc1) = setup();
        access.pause(&owner).unwrap();
        assert!(access.paused());

        // Even an unauthorized caller sees the pause first.
        assert!(matches!(
            access.add_admin(&acc1, &acc1),
            Err(EscrowError::ContractPaused)
        ));
        assert!(matches!(
            access.delete_admin(&owner, &acc1),
            Err(EscrowError::ContractPaused)
        ));
        assert!(matches!(access.pause(&owner), Err(EscrowError::ContractPaused)));
        assert!(matches!(access.pause(&acc1), Err(EscrowError::ContractPaused)));
    }

    #[test]
    fn test_unpause() {
        let (mut access, owner, acc1) = setup();

        assert!(matches!(access.unpause(&owner), Err(EscrowError::NotPaused)));
        assert!(matches!(access.pause(&acc1), Err(EscrowError::Unauthorized(_))));

        access.pause(&owner).unwrap();
        assert!(matches!(
            access.unpause(&acc1),
            Err(EscrowError::Unauthorized(_))
        ));
        access.unpause(&owner).unwrap();
        assert!(!access.paused());
    }
}
