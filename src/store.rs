//! Durable local storage. Collections are serialized JSON blobs keyed by
//! entity kind; the port abstraction keeps the rest of the app unaware of
//! where blobs actually live. Absent or unreadable keys fall back to the
//! seed datasets; there is no schema versioning.

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::seed;
use crate::types::{AirdropRecord, NodeRecord, Preferences, RecordKind, WalletRecord};

pub const NODES_KEY: &str = "nv_nodes";
pub const WALLETS_KEY: &str = "nv_wallets";
pub const AIRDROPS_KEY: &str = "nv_airdrops";
pub const PREFS_KEY: &str = "nv_preferences";

pub trait StoragePort {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, blob: &str);
    fn remove(&self, key: &str);
}

/// One JSON file per key under the data directory (default `~/.nodepilot`).
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    pub fn default_dir() -> PathBuf {
        let home = env::var("USERPROFILE").or_else(|_| env::var("HOME")).unwrap_or_default();
        PathBuf::from(home).join(".nodepilot")
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StoragePort for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path(key)).ok()
    }

    fn save(&self, key: &str, blob: &str) {
        if let Err(e) = fs::write(self.path(key), blob) {
            warn!("failed to persist {}: {}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        let _ = fs::remove_file(self.path(key));
    }
}

fn load_or_seed<T: DeserializeOwned>(port: &dyn StoragePort, key: &str, fallback: fn() -> Vec<T>) -> Vec<T> {
    match port.load(key) {
        Some(blob) => match serde_json::from_str(&blob) {
            Ok(v) => v,
            Err(e) => {
                warn!("unreadable {}, using seed data: {}", key, e);
                fallback()
            }
        },
        None => fallback(),
    }
}

fn persist<T: Serialize>(port: &dyn StoragePort, key: &str, records: &[T]) {
    match serde_json::to_string(records) {
        Ok(blob) => port.save(key, &blob),
        Err(e) => warn!("failed to serialize {}: {}", key, e),
    }
}

/// In-memory collections plus the port they persist through. Every mutation
/// writes the whole collection back, mirroring replace-by-id semantics.
pub struct RecordStore {
    port: Box<dyn StoragePort>,
    pub nodes: Vec<NodeRecord>,
    pub wallets: Vec<WalletRecord>,
    pub airdrops: Vec<AirdropRecord>,
}

impl RecordStore {
    pub fn open(port: Box<dyn StoragePort>) -> Self {
        let nodes = load_or_seed(&*port, NODES_KEY, seed::nodes);
        let wallets = load_or_seed(&*port, WALLETS_KEY, seed::wallets);
        let airdrops = load_or_seed(&*port, AIRDROPS_KEY, seed::airdrops);
        debug!(nodes = nodes.len(), wallets = wallets.len(), airdrops = airdrops.len(), "store opened");
        RecordStore { port, nodes, wallets, airdrops }
    }

    pub fn persist(&self, kind: RecordKind) {
        match kind {
            RecordKind::Nodes => persist(&*self.port, NODES_KEY, &self.nodes),
            RecordKind::Wallets => persist(&*self.port, WALLETS_KEY, &self.wallets),
            RecordKind::Airdrops => persist(&*self.port, AIRDROPS_KEY, &self.airdrops),
        }
    }

    pub fn upsert_node(&mut self, rec: NodeRecord) {
        match self.nodes.iter_mut().find(|n| n.id == rec.id) {
            Some(slot) => *slot = rec,
            None => self.nodes.push(rec),
        }
        self.persist(RecordKind::Nodes);
    }

    pub fn upsert_wallet(&mut self, rec: WalletRecord) {
        match self.wallets.iter_mut().find(|w| w.id == rec.id) {
            Some(slot) => *slot = rec,
            None => self.wallets.push(rec),
        }
        self.persist(RecordKind::Wallets);
    }

    pub fn upsert_airdrop(&mut self, rec: AirdropRecord) {
        match self.airdrops.iter_mut().find(|a| a.id == rec.id) {
            Some(slot) => *slot = rec,
            None => self.airdrops.push(rec),
        }
        self.persist(RecordKind::Airdrops);
    }

    pub fn delete(&mut self, kind: RecordKind, id: &str) {
        match kind {
            RecordKind::Nodes => self.nodes.retain(|n| n.id != id),
            RecordKind::Wallets => self.wallets.retain(|w| w.id != id),
            RecordKind::Airdrops => self.airdrops.retain(|a| a.id != id),
        }
        self.persist(kind);
    }

    /// Stamp every node's last-sync time. The silent auto-sync path and the
    /// visible sync-all action both come through here.
    pub fn touch_all_nodes(&mut self, stamp: &str) {
        for n in self.nodes.iter_mut() {
            n.last_sync = stamp.to_string();
        }
        self.persist(RecordKind::Nodes);
    }

    pub fn touch_node(&mut self, id: &str, stamp: &str) {
        if let Some(n) = self.nodes.iter_mut().find(|n| n.id == id) {
            n.last_sync = stamp.to_string();
        }
        self.persist(RecordKind::Nodes);
    }

    /// The destructive reset: collections go back to the seed datasets and
    /// the persisted keys are removed, as if the app had never run.
    pub fn reset_all(&mut self) {
        self.nodes = seed::nodes();
        self.wallets = seed::wallets();
        self.airdrops = seed::airdrops();
        self.port.remove(NODES_KEY);
        self.port.remove(WALLETS_KEY);
        self.port.remove(AIRDROPS_KEY);
        debug!("record store reset to seed data");
    }

    pub fn save_preferences(&self, prefs: &Preferences) {
        match serde_json::to_string(prefs) {
            Ok(blob) => self.port.save(PREFS_KEY, &blob),
            Err(e) => warn!("failed to serialize preferences: {}", e),
        }
    }
}

pub fn load_preferences(port: &dyn StoragePort) -> Preferences {
    match port.load(PREFS_KEY) {
        Some(blob) => serde_json::from_str(&blob).unwrap_or_else(|e| {
            warn!("unreadable preferences, using defaults: {}", e);
            Preferences::default()
        }),
        None => Preferences::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    use crate::types::NodeStatus;

    struct MemStore {
        map: RefCell<HashMap<String, String>>,
    }

    impl MemStore {
        fn new() -> Self {
            MemStore { map: RefCell::new(HashMap::new()) }
        }
    }

    impl StoragePort for MemStore {
        fn load(&self, key: &str) -> Option<String> {
            self.map.borrow().get(key).cloned()
        }
        fn save(&self, key: &str, blob: &str) {
            self.map.borrow_mut().insert(key.to_string(), blob.to_string());
        }
        fn remove(&self, key: &str) {
            self.map.borrow_mut().remove(key);
        }
    }

    #[test]
    fn missing_keys_fall_back_to_seed() {
        let store = RecordStore::open(Box::new(MemStore::new()));
        assert_eq!(store.nodes.len(), 2);
        assert_eq!(store.wallets.len(), 2);
        assert_eq!(store.airdrops.len(), 2);
        assert_eq!(store.nodes[0].name, "ETH Validator 01");
    }

    #[test]
    fn corrupt_blob_falls_back_to_seed() {
        let port = MemStore::new();
        port.save(NODES_KEY, "{not json");
        let store = RecordStore::open(Box::new(port));
        assert_eq!(store.nodes.len(), 2);
    }

    #[test]
    fn upsert_replaces_by_id_and_persists() {
        let mut store = RecordStore::open(Box::new(MemStore::new()));
        let mut edited = store.nodes[0].clone();
        edited.name = "Renamed".to_string();
        store.upsert_node(edited);
        assert_eq!(store.nodes.len(), 2);
        assert_eq!(store.nodes[0].name, "Renamed");

        let mut fresh = store.nodes[0].clone();
        fresh.id = "xyz123abc".to_string();
        store.upsert_node(fresh);
        assert_eq!(store.nodes.len(), 3);
    }

    #[test]
    fn delete_removes_by_id() {
        let mut store = RecordStore::open(Box::new(MemStore::new()));
        store.delete(RecordKind::Wallets, "1");
        assert_eq!(store.wallets.len(), 1);
        assert_eq!(store.wallets[0].id, "2");
    }

    #[test]
    fn touch_all_nodes_stamps_every_record() {
        let mut store = RecordStore::open(Box::new(MemStore::new()));
        store.touch_all_nodes("2026-01-01 00:00");
        assert!(store.nodes.iter().all(|n| n.last_sync == "2026-01-01 00:00"));
    }

    #[test]
    fn reset_restores_seed_and_removes_keys() {
        let mut store = RecordStore::open(Box::new(MemStore::new()));
        store.delete(RecordKind::Nodes, "1");
        store.delete(RecordKind::Nodes, "2");
        store.reset_all();
        assert_eq!(store.nodes.len(), 2);
        assert!(store.nodes.iter().any(|n| n.status == NodeStatus::Active));
    }

    #[test]
    fn file_store_round_trips_records() {
        let dir = tempfile::tempdir().unwrap();
        {
            let port = FileStore::new(dir.path().to_path_buf()).unwrap();
            let mut store = RecordStore::open(Box::new(port));
            let mut n = store.nodes[0].clone();
            n.id = "roundtrip1".to_string();
            n.name = "Persisted Node".to_string();
            store.upsert_node(n);
        }
        let port = FileStore::new(dir.path().to_path_buf()).unwrap();
        let store = RecordStore::open(Box::new(port));
        assert!(store.nodes.iter().any(|n| n.id == "roundtrip1" && n.name == "Persisted Node"));
    }

    #[test]
    fn preferences_round_trip_keeps_password() {
        let port = MemStore::new();
        let mut prefs = Preferences::default();
        prefs.password = Some("hunter22".to_string());
        match serde_json::to_string(&prefs) {
            Ok(blob) => port.save(PREFS_KEY, &blob),
            Err(e) => panic!("serialize failed: {}", e),
        }
        let loaded = load_preferences(&port);
        assert_eq!(loaded.password.as_deref(), Some("hunter22"));
        assert_eq!(loaded.currency, "USD");
    }
}
