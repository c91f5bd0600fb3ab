//! Indexed swap storage: primary record store plus two secondary indexes.
//!
//! Backed by `sled`, following the teacher's embedded-store convention
//! (`node/src/storage/database.rs` keeps separate named trees per logical
//! key space rather than prefixing a single tree by hand). Key prefixes
//! `0x00`-`0x04` from `spec.md` §6 are approximated by giving each key
//! space its own `sled::Tree`; this is semantically identical since `sled`
//! trees are already disjoint keyspaces, and avoids needing to parse a
//! leading tag byte back out on every read.
//!
//! Secondary-index keys place an 8-byte big-endian timestamp/height first
//! so lexicographic order equals numeric order, letting `IterateByExpiryUpTo`
//! and `IterateGCUpTo` be plain `Tree::range` scans.

use sled::{Db, Tree};

use crate::error::SwapResult;
use crate::swap::AtomicSwap;

const PRIMARY_TREE: &str = "swaps_primary";
const BY_EXPIRY_TREE: &str = "swaps_by_expiry";
const GC_TREE: &str = "swaps_gc";

fn index_key(prefix_be: u64, swap_id: &[u8; 32]) -> Vec<u8> {
    let mut key = Vec::with_capacity(8 + 32);
    key.extend_from_slice(&prefix_be.to_be_bytes());
    key.extend_from_slice(swap_id);
    key
}

/// Primary store + by-expiry and GC secondary indexes over `AtomicSwap`.
pub struct SwapStore {
    primary: Tree,
    by_expiry: Tree,
    gc: Tree,
}

impl SwapStore {
    pub fn open(db: &Db) -> SwapResult<Self> {
        Ok(Self {
            primary: db.open_tree(PRIMARY_TREE)?,
            by_expiry: db.open_tree(BY_EXPIRY_TREE)?,
            gc: db.open_tree(GC_TREE)?,
        })
    }

    pub fn put(&self, swap: &AtomicSwap) -> SwapResult<()> {
        let id = swap.swap_id();
        let bytes = bincode::serialize(swap)?;
        self.primary.insert(id, bytes)?;
        Ok(())
    }

    pub fn get(&self, swap_id: &[u8; 32]) -> SwapResult<Option<AtomicSwap>> {
        match self.primary.get(swap_id)? {
            Some(bytes) => Ok(Some(bincode::deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn delete(&self, swap_id: &[u8; 32]) -> SwapResult<()> {
        self.primary.remove(swap_id)?;
        Ok(())
    }

    pub fn insert_by_expiry(&self, expire_timestamp: u64, swap_id: &[u8; 32]) -> SwapResult<()> {
        self.by_expiry.insert(index_key(expire_timestamp, swap_id), swap_id.to_vec())?;
        Ok(())
    }

    pub fn remove_by_expiry(&self, expire_timestamp: u64, swap_id: &[u8; 32]) -> SwapResult<()> {
        self.by_expiry.remove(index_key(expire_timestamp, swap_id))?;
        Ok(())
    }

    /// Visits every swap ID whose `expire_timestamp <= upper_bound`, in
    /// ascending key order. The bound is inclusive.
    pub fn iterate_by_expiry_up_to(&self, upper_bound: u64) -> SwapResult<Vec<[u8; 32]>> {
        let mut end = upper_bound.to_be_bytes().to_vec();
        end.extend_from_slice(&[0xff; 32]);
        let mut out = Vec::new();
        for item in self.by_expiry.range(..=end) {
            let (_, value) = item?;
            out.push(bytes_to_id(&value));
        }
        Ok(out)
    }

    pub fn insert_gc(&self, gc_key: u64, swap_id: &[u8; 32]) -> SwapResult<()> {
        self.gc.insert(index_key(gc_key, swap_id), swap_id.to_vec())?;
        Ok(())
    }

    pub fn remove_gc(&self, gc_key: u64, swap_id: &[u8; 32]) -> SwapResult<()> {
        self.gc.remove(index_key(gc_key, swap_id))?;
        Ok(())
    }

    /// Visits every swap ID whose GC key (`closedBlock + retention`) is
    /// `<= upper_bound`, in ascending key order. The bound is inclusive.
    pub fn iterate_gc_up_to(&self, upper_bound: u64) -> SwapResult<Vec<[u8; 32]>> {
        let mut end = upper_bound.to_be_bytes().to_vec();
        end.extend_from_slice(&[0xff; 32]);
        let mut out = Vec::new();
        for item in self.gc.range(..=end) {
            let (_, value) = item?;
            out.push(bytes_to_id(&value));
        }
        Ok(out)
    }
}

fn bytes_to_id(bytes: &[u8]) -> [u8; 32] {
    let mut id = [0u8; 32];
    id.copy_from_slice(bytes);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swap::{Direction, SwapStatus};

    fn sample(timestamp_suffix: u8, expire: u64) -> AtomicSwap {
        AtomicSwap {
            denom: "bnb".into(),
            amount: 1,
            random_number_hash: [timestamp_suffix; 32],
            expire_timestamp: expire,
            timestamp: 0,
            sender: [timestamp_suffix; 20],
            recipient: [0x02; 20],
            sender_other_chain: "other".into(),
            recipient_other_chain: "other2".into(),
            closed_block: 0,
            status: SwapStatus::Open,
            cross_chain: true,
            direction: Direction::Incoming,
        }
    }

    fn temp_store() -> (sled::Db, SwapStore) {
        let db = sled::Config::new().temporary(true).open().unwrap();
        let store = SwapStore::open(&db).unwrap();
        (db, store)
    }

    #[test]
    fn put_get_delete_roundtrip() {
        let (_db, store) = temp_store();
        let swap = sample(1, 1000);
        let id = swap.swap_id();
        store.put(&swap).unwrap();
        assert_eq!(store.get(&id).unwrap(), Some(swap.clone()));
        store.delete(&id).unwrap();
        assert_eq!(store.get(&id).unwrap(), None);
    }

    #[test]
    fn by_expiry_range_is_inclusive_ascending() {
        let (_db, store) = temp_store();
        let a = sample(1, 100);
        let b = sample(2, 200);
        let c = sample(3, 300);
        for swap in [&a, &b, &c] {
            store.insert_by_expiry(swap.expire_timestamp, &swap.swap_id()).unwrap();
        }
        let due = store.iterate_by_expiry_up_to(200).unwrap();
        assert_eq!(due, vec![a.swap_id(), b.swap_id()]);
    }

    #[test]
    fn gc_range_is_inclusive_ascending() {
        let (_db, store) = temp_store();
        let a = sample(1, 0);
        let b = sample(2, 0);
        store.insert_gc(604_800, &a.swap_id()).unwrap();
        store.insert_gc(604_900, &b.swap_id()).unwrap();
        let due = store.iterate_gc_up_to(604_800).unwrap();
        assert_eq!(due, vec![a.swap_id()]);
    }

    #[test]
    fn remove_by_expiry_drops_entry() {
        let (_db, store) = temp_store();
        let a = sample(1, 100);
        store.insert_by_expiry(a.expire_timestamp, &a.swap_id()).unwrap();
        store.remove_by_expiry(a.expire_timestamp, &a.swap_id()).unwrap();
        assert!(store.iterate_by_expiry_up_to(1000).unwrap().is_empty());
    }
}
