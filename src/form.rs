// Add/edit form state. A form is a flat list of labeled text fields;
// fields with a fixed option set (status, wallet type) cycle instead of
// taking keystrokes. Fields not on the form (uptime, notes, ...) carry over
// unchanged from the record being edited.

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::types::{
    AirdropRecord, AirdropStatus, NodeRecord, NodeStatus, RecordKind, WalletKind, WalletRecord,
    now_stamp,
};

pub struct Field {
    pub label: &'static str,
    pub value: String,
    pub choices: Option<&'static [&'static str]>,
}

impl Field {
    fn text(label: &'static str, value: String) -> Self {
        Field { label, value, choices: None }
    }

    fn choice(label: &'static str, value: String, choices: &'static [&'static str]) -> Self {
        Field { label, value, choices: Some(choices) }
    }
}

const NODE_STATUS_CHOICES: &[&str] = &["Active", "Syncing", "Inactive"];
const WALLET_KIND_CHOICES: &[&str] = &["Hot", "Cold", "Hardware"];
const AIRDROP_STATUS_CHOICES: &[&str] = &["Pending", "Active", "Claimed", "Missed"];

pub struct FormState {
    pub kind: RecordKind,
    /// Id of the record being edited; None when adding.
    pub editing: Option<String>,
    pub fields: Vec<Field>,
    pub focus: usize,
}

impl FormState {
    pub fn node(existing: Option<&NodeRecord>) -> Self {
        let e = existing;
        FormState {
            kind: RecordKind::Nodes,
            editing: e.map(|n| n.id.clone()),
            fields: vec![
                Field::text("Name", e.map(|n| n.name.clone()).unwrap_or_default()),
                Field::text("Network", e.map(|n| n.network.clone()).unwrap_or_default()),
                Field::text("IP Address", e.map(|n| n.address.clone()).unwrap_or_default()),
                Field::text("Port", e.map(|n| n.port.clone()).unwrap_or_default()),
                Field::text("SSH Port", e.map(|n| n.ssh_port.clone()).unwrap_or_default()),
                Field::text("VPS User", e.map(|n| n.vps_user.clone()).unwrap_or_default()),
                Field::choice(
                    "Status",
                    e.map(|n| n.status.label().to_string()).unwrap_or_else(|| "Active".to_string()),
                    NODE_STATUS_CHOICES,
                ),
            ],
            focus: 0,
        }
    }

    pub fn wallet(existing: Option<&WalletRecord>) -> Self {
        let e = existing;
        FormState {
            kind: RecordKind::Wallets,
            editing: e.map(|w| w.id.clone()),
            fields: vec![
                Field::text("Label", e.map(|w| w.label.clone()).unwrap_or_default()),
                Field::text("Address", e.map(|w| w.address.clone()).unwrap_or_default()),
                Field::text("Network", e.map(|w| w.network.clone()).unwrap_or_default()),
                Field::choice(
                    "Type",
                    e.map(|w| w.kind.label().to_string()).unwrap_or_else(|| "Hot".to_string()),
                    WALLET_KIND_CHOICES,
                ),
                Field::text("Balance", e.map(|w| w.balance.clone()).unwrap_or_default()),
            ],
            focus: 0,
        }
    }

    pub fn airdrop(existing: Option<&AirdropRecord>) -> Self {
        let e = existing;
        FormState {
            kind: RecordKind::Airdrops,
            editing: e.map(|a| a.id.clone()),
            fields: vec![
                Field::text("Project", e.map(|a| a.project.clone()).unwrap_or_default()),
                Field::text("Network", e.map(|a| a.network.clone()).unwrap_or_default()),
                Field::text("Tasks", e.map(|a| a.tasks.clone()).unwrap_or_default()),
                Field::choice(
                    "Status",
                    e.map(|a| a.status.label().to_string()).unwrap_or_else(|| "Pending".to_string()),
                    AIRDROP_STATUS_CHOICES,
                ),
                Field::text("Deadline", e.map(|a| a.deadline.clone()).unwrap_or_default()),
            ],
            focus: 0,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Step a choice field forward or back; no-op on free-text fields.
    pub fn cycle_choice(&mut self, forward: bool) {
        let field = &mut self.fields[self.focus];
        let Some(choices) = field.choices else { return };
        let idx = choices.iter().position(|c| *c == field.value).unwrap_or(0);
        let next = if forward {
            (idx + 1) % choices.len()
        } else {
            (idx + choices.len() - 1) % choices.len()
        };
        field.value = choices[next].to_string();
    }

    // Field order in the builders above is load-bearing for the index
    // accesses below.

    pub fn to_node(&self, existing: Option<&NodeRecord>) -> NodeRecord {
        let mut rec = existing.cloned().unwrap_or_else(|| NodeRecord {
            id: new_id(),
            name: String::new(),
            address: String::new(),
            network: String::new(),
            port: String::new(),
            vps_user: String::new(),
            ssh_port: String::new(),
            status: NodeStatus::Active,
            // New nodes get an initial sync stamp.
            last_sync: now_stamp(),
            uptime: String::new(),
            notes: String::new(),
        });
        rec.name = self.fields[0].value.clone();
        rec.network = self.fields[1].value.clone();
        rec.address = self.fields[2].value.clone();
        rec.port = self.fields[3].value.clone();
        rec.ssh_port = self.fields[4].value.clone();
        rec.vps_user = self.fields[5].value.clone();
        rec.status = NodeStatus::parse(&self.fields[6].value);
        rec
    }

    pub fn to_wallet(&self, existing: Option<&WalletRecord>) -> WalletRecord {
        let mut rec = existing.cloned().unwrap_or_else(|| WalletRecord {
            id: new_id(),
            label: String::new(),
            address: String::new(),
            network: String::new(),
            kind: WalletKind::Hot,
            balance: String::new(),
            private_key: String::new(),
            created_at: now_stamp(),
            notes: String::new(),
        });
        rec.label = self.fields[0].value.clone();
        rec.address = self.fields[1].value.clone();
        rec.network = self.fields[2].value.clone();
        rec.kind = WalletKind::parse(&self.fields[3].value);
        rec.balance = self.fields[4].value.clone();
        rec
    }

    pub fn to_airdrop(&self, existing: Option<&AirdropRecord>) -> AirdropRecord {
        let mut rec = existing.cloned().unwrap_or_else(|| AirdropRecord {
            id: new_id(),
            project: String::new(),
            network: String::new(),
            drop_type: String::new(),
            status: AirdropStatus::Pending,
            value: String::new(),
            wallet_used: String::new(),
            tasks: String::new(),
            deadline: String::new(),
            notes: String::new(),
        });
        rec.project = self.fields[0].value.clone();
        rec.network = self.fields[1].value.clone();
        rec.tasks = self.fields[2].value.clone();
        rec.status = AirdropStatus::parse(&self.fields[3].value);
        rec.deadline = self.fields[4].value.clone();
        rec
    }
}

/// 9-char lowercase alphanumeric record id.
pub fn new_id() -> String {
    let mut rng = rand::thread_rng();
    (0..9)
        .map(|_| rng.sample(Alphanumeric) as char)
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn new_node_gets_id_and_sync_stamp() {
        let mut form = FormState::node(None);
        form.fields[0].value = "Test Node".to_string();
        form.fields[2].value = "10.0.0.1".to_string();
        let rec = form.to_node(None);
        assert_eq!(rec.id.len(), 9);
        assert!(rec.id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_eq!(rec.name, "Test Node");
        assert!(!rec.last_sync.is_empty());
        assert_eq!(rec.status, NodeStatus::Active);
    }

    #[test]
    fn editing_preserves_untouched_fields() {
        let nodes = seed::nodes();
        let mut form = FormState::node(Some(&nodes[0]));
        form.fields[0].value = "Renamed".to_string();
        let rec = form.to_node(Some(&nodes[0]));
        assert_eq!(rec.id, nodes[0].id);
        assert_eq!(rec.name, "Renamed");
        assert_eq!(rec.uptime, nodes[0].uptime);
        assert_eq!(rec.notes, nodes[0].notes);
        assert_eq!(rec.last_sync, nodes[0].last_sync);
    }

    #[test]
    fn status_field_cycles_through_choices() {
        let mut form = FormState::node(None);
        form.focus = 6;
        assert_eq!(form.fields[6].value, "Active");
        form.cycle_choice(true);
        assert_eq!(form.fields[6].value, "Syncing");
        form.cycle_choice(true);
        assert_eq!(form.fields[6].value, "Inactive");
        form.cycle_choice(false);
        assert_eq!(form.fields[6].value, "Syncing");
    }

    #[test]
    fn cycle_on_text_field_is_a_noop() {
        let mut form = FormState::wallet(None);
        form.fields[0].value = "My Wallet".to_string();
        form.focus = 0;
        form.cycle_choice(true);
        assert_eq!(form.fields[0].value, "My Wallet");
    }

    #[test]
    fn wallet_form_maps_kind() {
        let mut form = FormState::wallet(None);
        form.focus = 3;
        form.cycle_choice(true);
        let rec = form.to_wallet(None);
        assert_eq!(rec.kind, WalletKind::Cold);
    }

    #[test]
    fn airdrop_form_defaults_to_pending() {
        let form = FormState::airdrop(None);
        let rec = form.to_airdrop(None);
        assert_eq!(rec.status, AirdropStatus::Pending);
    }
}
