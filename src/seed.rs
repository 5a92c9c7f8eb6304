//! Fallback datasets used when a storage key is absent or unreadable, and
//! restored by the clear-all-data action.

use crate::types::{AirdropRecord, AirdropStatus, NodeRecord, NodeStatus, WalletKind, WalletRecord};

pub fn nodes() -> Vec<NodeRecord> {
    vec![
        NodeRecord {
            id: "1".into(),
            name: "ETH Validator 01".into(),
            address: "192.168.1.10".into(),
            network: "Ethereum Mainnet".into(),
            port: "30303".into(),
            vps_user: "root".into(),
            ssh_port: "22".into(),
            status: NodeStatus::Active,
            last_sync: "2023-10-27 10:00".into(),
            uptime: "99.9%".into(),
            notes: "Primary validator".into(),
        },
        NodeRecord {
            id: "2".into(),
            name: "SOL RPC Node".into(),
            address: "192.168.1.15".into(),
            network: "Solana".into(),
            port: "8899".into(),
            vps_user: "ubuntu".into(),
            ssh_port: "2222".into(),
            status: NodeStatus::Syncing,
            last_sync: "2023-10-27 09:45".into(),
            uptime: "95.0%".into(),
            notes: "Catching up after restart".into(),
        },
    ]
}

pub fn wallets() -> Vec<WalletRecord> {
    vec![
        WalletRecord {
            id: "1".into(),
            label: "Main Metamask".into(),
            address: "0x742d35Cc6634C0532925a3b844Bc454e4438f44e".into(),
            network: "Ethereum".into(),
            kind: WalletKind::Hot,
            balance: "4.2 ETH".into(),
            private_key: "encrypted_key_123".into(),
            created_at: "2022-01-01".into(),
            notes: "DeFi Degen wallet".into(),
        },
        WalletRecord {
            id: "2".into(),
            label: "Ledger Vault".into(),
            address: "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh".into(),
            network: "Bitcoin".into(),
            kind: WalletKind::Hardware,
            balance: "0.5 BTC".into(),
            private_key: "N/A".into(),
            created_at: "2021-05-15".into(),
            notes: "Long term hold".into(),
        },
    ]
}

pub fn airdrops() -> Vec<AirdropRecord> {
    vec![
        AirdropRecord {
            id: "1".into(),
            project: "ZkSync Era".into(),
            network: "ZkSync".into(),
            drop_type: "Retroactive".into(),
            status: AirdropStatus::Pending,
            value: "Unknown".into(),
            wallet_used: "Main Metamask".into(),
            tasks: "Bridge, Swap, NFT".into(),
            deadline: "2024-03-01".into(),
            notes: "Keep activity weekly".into(),
        },
        AirdropRecord {
            id: "2".into(),
            project: "Celestia".into(),
            network: "Cosmos".into(),
            drop_type: "Holder".into(),
            status: AirdropStatus::Claimed,
            value: "$500".into(),
            wallet_used: "Keplr Main".into(),
            tasks: "Staking ATOM".into(),
            deadline: "2023-10-15".into(),
            notes: "Sold half".into(),
        },
    ]
}
