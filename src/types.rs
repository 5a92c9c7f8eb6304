use std::time::Instant;

use chrono::Utc;
use serde::{Serialize, Deserialize};

use crate::console::ConsoleSession;
use crate::form::FormState;
use crate::security::{PendingAction, SecurityGate};
use crate::store::RecordStore;
use crate::sync::{AutoSync, SyncFlash};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum NodeStatus { Active, Inactive, Syncing }

impl NodeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            NodeStatus::Active => "Active",
            NodeStatus::Inactive => "Inactive",
            NodeStatus::Syncing => "Syncing",
        }
    }
    /// Next value in form-cycling order (matches the form's option order).
    pub fn next(&self) -> NodeStatus {
        match self {
            NodeStatus::Active => NodeStatus::Syncing,
            NodeStatus::Syncing => NodeStatus::Inactive,
            NodeStatus::Inactive => NodeStatus::Active,
        }
    }
    pub fn parse(s: &str) -> NodeStatus {
        match s {
            "Syncing" => NodeStatus::Syncing,
            "Inactive" => NodeStatus::Inactive,
            _ => NodeStatus::Active,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum WalletKind { Hot, Cold, Hardware }

impl WalletKind {
    pub fn label(&self) -> &'static str {
        match self {
            WalletKind::Hot => "Hot",
            WalletKind::Cold => "Cold",
            WalletKind::Hardware => "Hardware",
        }
    }
    pub fn next(&self) -> WalletKind {
        match self {
            WalletKind::Hot => WalletKind::Cold,
            WalletKind::Cold => WalletKind::Hardware,
            WalletKind::Hardware => WalletKind::Hot,
        }
    }
    pub fn parse(s: &str) -> WalletKind {
        match s {
            "Cold" => WalletKind::Cold,
            "Hardware" => WalletKind::Hardware,
            _ => WalletKind::Hot,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum AirdropStatus { Active, Pending, Claimed, Missed }

impl AirdropStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AirdropStatus::Active => "Active",
            AirdropStatus::Pending => "Pending",
            AirdropStatus::Claimed => "Claimed",
            AirdropStatus::Missed => "Missed",
        }
    }
    pub fn next(&self) -> AirdropStatus {
        match self {
            AirdropStatus::Pending => AirdropStatus::Active,
            AirdropStatus::Active => AirdropStatus::Claimed,
            AirdropStatus::Claimed => AirdropStatus::Missed,
            AirdropStatus::Missed => AirdropStatus::Pending,
        }
    }
    pub fn parse(s: &str) -> AirdropStatus {
        match s {
            "Active" => AirdropStatus::Active,
            "Claimed" => AirdropStatus::Claimed,
            "Missed" => AirdropStatus::Missed,
            _ => AirdropStatus::Pending,
        }
    }
}

// Stored JSON keeps the original camelCase key names so existing data files
// (and CSV headers, see export.rs) stay byte-compatible.

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub network: String,
    pub port: String,
    pub vps_user: String,
    pub ssh_port: String,
    pub status: NodeStatus,
    pub last_sync: String,
    pub uptime: String,
    pub notes: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    pub id: String,
    pub label: String,
    pub address: String,
    pub network: String,
    #[serde(rename = "type")]
    pub kind: WalletKind,
    pub balance: String,
    pub private_key: String,
    pub created_at: String,
    pub notes: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirdropRecord {
    pub id: String,
    pub project: String,
    pub network: String,
    #[serde(rename = "type")]
    pub drop_type: String,
    pub status: AirdropStatus,
    pub value: String,
    pub wallet_used: String,
    pub tasks: String,
    pub deadline: String,
    pub notes: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RecordKind { Nodes, Wallets, Airdrops }

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language { En, Fr, De, Ar }

impl Language {
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fr => "Français",
            Language::De => "Deutsch",
            Language::Ar => "العربية",
        }
    }
    pub fn next(&self) -> Language {
        match self {
            Language::En => Language::Fr,
            Language::Fr => Language::De,
            Language::De => Language::Ar,
            Language::Ar => Language::En,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme { Dark, Light }

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Preferences {
    pub language: Language,
    pub theme: Theme,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            language: Language::En,
            theme: Theme::Dark,
            currency: "USD".to_string(),
            password: None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum View { Dashboard, Nodes, Wallets, Airdrops, Settings }

impl View {
    pub const ALL: [View; 5] = [View::Dashboard, View::Nodes, View::Wallets, View::Airdrops, View::Settings];

    pub fn record_kind(&self) -> Option<RecordKind> {
        match self {
            View::Nodes => Some(RecordKind::Nodes),
            View::Wallets => Some(RecordKind::Wallets),
            View::Airdrops => Some(RecordKind::Airdrops),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PasswordPurpose { Set, Change, Verify }

/// Overlay state for the password dialog. Field slots: current / new /
/// confirm; only the slots relevant to the purpose are shown and focusable.
pub struct PasswordPrompt {
    pub purpose: PasswordPurpose,
    pub current: String,
    pub new: String,
    pub confirm: String,
    pub focus: usize,
    pub error: Option<&'static str>,
}

impl PasswordPrompt {
    pub fn new(purpose: PasswordPurpose) -> Self {
        PasswordPrompt {
            purpose,
            current: String::new(),
            new: String::new(),
            confirm: String::new(),
            // Verify/Change start on the current-password slot, Set on the new slot
            focus: match purpose { PasswordPurpose::Set => 1, _ => 0 },
            error: None,
        }
    }
}

/// What a plain y/N confirmation commits to.
#[derive(Clone, Debug)]
pub enum ConfirmTarget {
    Delete { kind: RecordKind, id: String },
    Reset,
}

pub enum Mode {
    Normal,
    /// Search box has focus; keystrokes edit the filter live.
    Search,
    Form(FormState),
    Confirm { target: ConfirmTarget },
    Password(PasswordPrompt),
}

pub struct AppState {
    pub store: RecordStore,
    pub prefs: Preferences,
    pub gate: SecurityGate,
    pub view: View,
    pub mode: Mode,
    pub search: String,
    pub selected: usize,
    /// At most one console session open at a time; dropping it cancels any
    /// handshake steps still pending.
    pub session: Option<ConsoleSession>,
    pub autosync: AutoSync,
    pub flash: SyncFlash,
    /// At most one deferred protected action awaiting verification.
    pub pending: Option<PendingAction>,
    pub notice: Option<(String, Instant)>,
    pub quit: bool,
}

impl AppState {
    pub fn new(store: RecordStore, prefs: Preferences) -> Self {
        let gate = SecurityGate::from_stored(prefs.password.clone());
        AppState {
            store,
            prefs,
            gate,
            view: View::Dashboard,
            mode: Mode::Normal,
            search: String::new(),
            selected: 0,
            session: None,
            autosync: AutoSync::new(),
            flash: SyncFlash::new(),
            pending: None,
            notice: None,
            quit: false,
        }
    }

    pub fn set_notice(&mut self, msg: impl Into<String>) {
        self.notice = Some((msg.into(), Instant::now()));
    }

    /// True while the nodes view is shown, the auto-sync guard condition.
    pub fn sync_guard(&self) -> bool {
        self.view == View::Nodes
    }

    pub fn filtered_nodes(&self) -> Vec<&NodeRecord> {
        let term = self.search.to_lowercase();
        self.store.nodes.iter()
            .filter(|n| term.is_empty()
                || n.name.to_lowercase().contains(&term)
                || n.network.to_lowercase().contains(&term))
            .collect()
    }

    pub fn filtered_wallets(&self) -> Vec<&WalletRecord> {
        let term = self.search.to_lowercase();
        self.store.wallets.iter()
            .filter(|w| term.is_empty()
                || w.label.to_lowercase().contains(&term)
                || w.address.to_lowercase().contains(&term))
            .collect()
    }

    pub fn filtered_airdrops(&self) -> Vec<&AirdropRecord> {
        let term = self.search.to_lowercase();
        self.store.airdrops.iter()
            .filter(|a| term.is_empty()
                || a.project.to_lowercase().contains(&term)
                || a.network.to_lowercase().contains(&term))
            .collect()
    }

    /// Row count of the table shown by the active view.
    pub fn visible_len(&self) -> usize {
        match self.view {
            View::Nodes => self.filtered_nodes().len(),
            View::Wallets => self.filtered_wallets().len(),
            View::Airdrops => self.filtered_airdrops().len(),
            _ => 0,
        }
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Id of the record under the cursor in the active view's filtered table.
    pub fn selected_id(&self) -> Option<String> {
        match self.view {
            View::Nodes => self.filtered_nodes().get(self.selected).map(|n| n.id.clone()),
            View::Wallets => self.filtered_wallets().get(self.selected).map(|w| w.id.clone()),
            View::Airdrops => self.filtered_airdrops().get(self.selected).map(|a| a.id.clone()),
            _ => None,
        }
    }
}

/// Current time in the record-stamp format used for `lastSync` fields.
pub fn now_stamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M").to_string()
}
