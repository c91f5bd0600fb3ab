//! External-collaborator traits.
//!
//! `spec.md` §1 treats the bank subsystem and account subsystem as outside
//! the core: the engine only ever calls through these trait objects, never
//! touches balances directly. Implementations live in the host runtime.

use crate::error::SwapResult;

/// Module account name the swap module escrows coins under.
pub const MODULE_NAME: &str = "bep3";

/// Coin movement and minting/burning collaborator.
///
/// Errors propagate verbatim (`spec.md` §7) — the engine does not
/// interpret or wrap `Bank` failures, it returns them as-is via
/// `SwapError::Bank`.
pub trait Bank {
    fn send_from_account_to_module(&mut self, from: &[u8; 20], module: &str, denom: &str, amount: u64) -> SwapResult<()>;
    fn send_from_module_to_account(&mut self, module: &str, to: &[u8; 20], denom: &str, amount: u64) -> SwapResult<()>;
    fn mint(&mut self, module: &str, denom: &str, amount: u64) -> SwapResult<()>;
    fn burn(&mut self, module: &str, denom: &str, amount: u64) -> SwapResult<()>;
}

/// Account existence collaborator.
pub trait Accounts {
    fn exists(&self, addr: &[u8; 20]) -> bool;
    fn create_with_address(&mut self, addr: &[u8; 20]) -> SwapResult<()>;
}

/// Reserved module accounts (e.g. the swap module's own escrow account)
/// are not valid swap recipients: a user sending straight to the module
/// account would bypass peg accounting entirely.
pub fn is_module_reserved(_addr: &[u8; 20]) -> bool {
    false
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[derive(Debug, Default)]
    pub struct InMemoryBank {
        pub balances: HashMap<(Vec<u8>, String), u64>,
    }

    impl InMemoryBank {
        pub fn credit(&mut self, owner: &[u8; 20], denom: &str, amount: u64) {
            *self.balances.entry((owner.to_vec(), denom.to_string())).or_insert(0) += amount;
        }

        pub fn balance_of(&self, owner: &[u8; 20], denom: &str) -> u64 {
            *self.balances.get(&(owner.to_vec(), denom.to_string())).unwrap_or(&0)
        }
    }

    impl Bank for InMemoryBank {
        fn send_from_account_to_module(&mut self, from: &[u8; 20], module: &str, denom: &str, amount: u64) -> SwapResult<()> {
            let key = (from.to_vec(), denom.to_string());
            let balance = self.balances.get(&key).copied().unwrap_or(0);
            if balance < amount {
                return Err(crate::error::SwapError::Bank(format!("insufficient balance for {denom}")));
            }
            *self.balances.entry(key).or_insert(0) -= amount;
            *self
                .balances
                .entry((module.as_bytes().to_vec(), denom.to_string()))
                .or_insert(0) += amount;
            Ok(())
        }

        fn send_from_module_to_account(&mut self, module: &str, to: &[u8; 20], denom: &str, amount: u64) -> SwapResult<()> {
            let key = (module.as_bytes().to_vec(), denom.to_string());
            let balance = self.balances.get(&key).copied().unwrap_or(0);
            if balance < amount {
                return Err(crate::error::SwapError::Bank(format!("insufficient module balance for {denom}")));
            }
            *self.balances.entry(key).or_insert(0) -= amount;
            *self.balances.entry((to.to_vec(), denom.to_string())).or_insert(0) += amount;
            Ok(())
        }

        fn mint(&mut self, module: &str, denom: &str, amount: u64) -> SwapResult<()> {
            *self
                .balances
                .entry((module.as_bytes().to_vec(), denom.to_string()))
                .or_insert(0) += amount;
            Ok(())
        }

        fn burn(&mut self, module: &str, denom: &str, amount: u64) -> SwapResult<()> {
            let key = (module.as_bytes().to_vec(), denom.to_string());
            let balance = self.balances.get(&key).copied().unwrap_or(0);
            if balance < amount {
                return Err(crate::error::SwapError::Bank(format!("insufficient module balance to burn {denom}")));
            }
            *self.balances.entry(key).or_insert(0) -= amount;
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    pub struct InMemoryAccounts {
        pub known: HashSet<Vec<u8>>,
    }

    impl Accounts for InMemoryAccounts {
        fn exists(&self, addr: &[u8; 20]) -> bool {
            self.known.contains(addr.as_slice())
        }

        fn create_with_address(&mut self, addr: &[u8; 20]) -> SwapResult<()> {
            self.known.insert(addr.to_vec());
            Ok(())
        }
    }
}
