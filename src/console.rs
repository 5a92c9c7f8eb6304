//! Simulated remote-shell session against a tracked node. The connection is
//! entirely in-process: a scripted handshake plays out on fixed delays, then
//! a small command vocabulary produces canned output. Handshake steps are
//! owned by the session and drained by the event loop's tick; closing the
//! session drops them all, so a disposed session can never gain lines.

use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use chrono::Utc;
use rand::Rng;
use tracing::debug;

use crate::types::{NodeRecord, NodeStatus};

// Observed output ranges; illustrative, not load-bearing.
pub const PEER_RANGE: RangeInclusive<u32> = 10..=59;
pub const PID_RANGE: RangeInclusive<u32> = 1000..=9999;

// SGR fragments carried inside transcript lines; rendering maps them to
// terminal colors.
pub const SGR_GREEN: &str = "\x1b[32m";
pub const SGR_RESET: &str = "\x1b[0m";

/// Snapshot of the target node taken when the session opens, so later edits
/// to the record do not leak into a live transcript.
#[derive(Clone)]
pub struct Target {
    pub name: String,
    pub host: String,
    pub user: String,
    pub ssh_port: String,
    pub status: NodeStatus,
    pub uptime: String,
}

impl Target {
    pub fn from_node(n: &NodeRecord) -> Self {
        Target {
            name: n.name.clone(),
            host: n.address.clone(),
            user: if n.vps_user.is_empty() { "root".to_string() } else { n.vps_user.clone() },
            ssh_port: if n.ssh_port.is_empty() { "22".to_string() } else { n.ssh_port.clone() },
            status: n.status,
            uptime: n.uptime.clone(),
        }
    }

    pub fn prompt(&self) -> String {
        format!("{}@{}:~#", self.user, self.host)
    }
}

enum StepOutput {
    Lines(Vec<String>),
    /// Built at fire time so the login banner carries the append instant.
    Banner,
}

struct ScheduledStep {
    due: Instant,
    output: StepOutput,
}

pub struct ConsoleSession {
    pub target: Target,
    pub transcript: Vec<String>,
    /// Line currently being typed at the prompt.
    pub input: String,
    ready: bool,
    closed: bool,
    steps: Vec<ScheduledStep>,
}

impl ConsoleSession {
    /// Open a session and schedule the handshake relative to `now`.
    pub fn open(target: Target, now: Instant) -> Self {
        debug!(host = %target.host, "console session opened");
        let transcript = vec![format!("Initializing secure connection to {}...", target.name)];
        let steps = vec![
            ScheduledStep {
                due: now + Duration::from_millis(600),
                output: StepOutput::Lines(vec![format!("Resolving host {}...", target.host)]),
            },
            ScheduledStep {
                due: now + Duration::from_millis(1200),
                output: StepOutput::Lines(vec![format!(
                    "Connecting to {} on port {}...", target.host, target.ssh_port
                )]),
            },
            ScheduledStep {
                due: now + Duration::from_millis(2000),
                output: StepOutput::Lines(vec!["Connection established. Verifying keys...".to_string()]),
            },
            ScheduledStep {
                due: now + Duration::from_millis(2800),
                output: StepOutput::Banner,
            },
        ];
        ConsoleSession {
            target,
            transcript,
            input: String::new(),
            ready: false,
            closed: false,
            steps,
        }
    }

    pub fn ready(&self) -> bool {
        self.ready
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    /// Drain handshake steps that have come due, in order. The session
    /// becomes ready when the banner lands.
    pub fn tick(&mut self, now: Instant) {
        while self.steps.first().map_or(false, |s| s.due <= now) {
            let step = self.steps.remove(0);
            match step.output {
                StepOutput::Lines(lines) => self.transcript.extend(lines),
                StepOutput::Banner => {
                    self.transcript.extend(access_banner(&self.target.host));
                    self.ready = true;
                }
            }
        }
    }

    /// Idempotent. Cancels every pending handshake step; after this the
    /// transcript can never change again.
    pub fn close(&mut self) {
        if !self.closed {
            debug!(host = %self.target.host, "console session closed");
        }
        self.closed = true;
        self.steps.clear();
    }

    /// Feed one submitted input line. Returns true when the session asked to
    /// close (the `exit` command). Input is only accepted while ready.
    pub fn handle_input(&mut self, raw: &str) -> bool {
        if self.closed || !self.ready {
            return false;
        }
        if raw.trim().is_empty() {
            return false;
        }
        match ConsoleCommand::parse(raw) {
            ConsoleCommand::Clear => {
                self.transcript.clear();
                false
            }
            ConsoleCommand::Exit => {
                self.close();
                true
            }
            cmd => {
                // Echo first, then the branch output, as one append.
                let mut lines = vec![format!("{} {}", self.target.prompt(), raw)];
                lines.extend(cmd.run(&self.target));
                self.transcript.extend(lines);
                false
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    Help,
    Clear,
    Exit,
    Ls,
    Status,
    Start,
    Stop,
    Logs,
    Ping,
    Unknown(String),
}

impl ConsoleCommand {
    /// First whitespace token, lower-cased; everything else is ignored.
    pub fn parse(raw: &str) -> ConsoleCommand {
        let name = raw.split_whitespace().next().unwrap_or("").to_lowercase();
        match name.as_str() {
            "help" => ConsoleCommand::Help,
            "clear" => ConsoleCommand::Clear,
            "exit" => ConsoleCommand::Exit,
            "ls" => ConsoleCommand::Ls,
            "status" => ConsoleCommand::Status,
            "start" => ConsoleCommand::Start,
            "stop" => ConsoleCommand::Stop,
            "logs" => ConsoleCommand::Logs,
            "ping" => ConsoleCommand::Ping,
            _ => ConsoleCommand::Unknown(name),
        }
    }

    /// Output lines for every echoing branch. Random values and timestamps
    /// are drawn here, at dispatch, so a redisplayed transcript is stable.
    /// `Clear` and `Exit` never reach this point.
    fn run(&self, target: &Target) -> Vec<String> {
        match self {
            ConsoleCommand::Help => vec![
                "Available commands:".to_string(),
                "  status    Check node status".to_string(),
                "  start     Start the node service".to_string(),
                "  stop      Stop the node service".to_string(),
                "  logs      View recent node logs".to_string(),
                "  clear     Clear terminal screen".to_string(),
                "  exit      Close connection".to_string(),
                "  ls        List files (simulated)".to_string(),
                "  ping      Ping host".to_string(),
            ],
            ConsoleCommand::Ls => vec![
                "config.toml  data/  keystore.json  node-service.log  start.sh".to_string(),
            ],
            ConsoleCommand::Status => {
                let peers = rand::thread_rng().gen_range(PEER_RANGE);
                let status = if target.status == NodeStatus::Active {
                    format!("{}Active{}", SGR_GREEN, SGR_RESET)
                } else {
                    "Inactive".to_string()
                };
                vec![
                    format!("Node: {}", target.name),
                    format!("Status: {}", status),
                    format!("Uptime: {}", target.uptime),
                    format!("Peers: {}", peers),
                ]
            }
            ConsoleCommand::Start => {
                let pid = rand::thread_rng().gen_range(PID_RANGE);
                vec![
                    "Starting node service...".to_string(),
                    format!("Service started successfully (PID: {})", pid),
                ]
            }
            ConsoleCommand::Stop => vec![
                "Stopping node service...".to_string(),
                "Service stopped.".to_string(),
            ],
            ConsoleCommand::Logs => {
                let stamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
                vec![
                    format!("[INFO] {} Peer connected 192.168.1.45", stamp),
                    format!("[INFO] {} Imported new block header", stamp),
                    format!("[INFO] {} Syncing... (99.9%)", stamp),
                ]
            }
            ConsoleCommand::Ping => vec![
                "PING google.com (142.250.180.206) 56(84) bytes of data.".to_string(),
                "64 bytes from 142.250.180.206: icmp_seq=1 ttl=116 time=12.4 ms".to_string(),
                "64 bytes from 142.250.180.206: icmp_seq=2 ttl=116 time=13.1 ms".to_string(),
                "64 bytes from 142.250.180.206: icmp_seq=3 ttl=116 time=11.9 ms".to_string(),
            ],
            ConsoleCommand::Unknown(token) => vec![
                format!("{}: command not found. Type 'help' for available commands.", token),
            ],
            ConsoleCommand::Clear | ConsoleCommand::Exit => Vec::new(),
        }
    }
}

fn access_banner(host: &str) -> Vec<String> {
    vec![
        "Access granted.".to_string(),
        "Welcome to Ubuntu 22.04.3 LTS (GNU/Linux 5.15.0-91-generic x86_64)".to_string(),
        " ".to_string(),
        " System load:   0.02               Processes: 103".to_string(),
        " Usage of /:    12.4% of 38.58GB   Users logged in: 0".to_string(),
        format!(" Memory usage:  24%                IPv4 address for eth0: {}", host),
        " ".to_string(),
        format!("Last login: {} from 127.0.0.1", Utc::now().format("%a, %d %b %Y %H:%M:%S GMT")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn target() -> Target {
        Target {
            name: "ETH Validator 01".to_string(),
            host: "192.168.1.10".to_string(),
            user: "root".to_string(),
            ssh_port: "22".to_string(),
            status: NodeStatus::Active,
            uptime: "99.9%".to_string(),
        }
    }

    fn ready_session() -> ConsoleSession {
        let t0 = Instant::now();
        let mut s = ConsoleSession::open(target(), t0);
        s.tick(t0 + Duration::from_millis(2800));
        assert!(s.ready());
        s
    }

    #[test]
    fn handshake_lines_land_in_order_at_their_deadlines() {
        let t0 = Instant::now();
        let mut s = ConsoleSession::open(target(), t0);
        assert_eq!(s.transcript, vec!["Initializing secure connection to ETH Validator 01...".to_string()]);

        s.tick(t0 + Duration::from_millis(599));
        assert_eq!(s.transcript.len(), 1);

        s.tick(t0 + Duration::from_millis(600));
        assert_eq!(s.transcript[1], "Resolving host 192.168.1.10...");
        assert!(!s.ready());

        s.tick(t0 + Duration::from_millis(1200));
        assert_eq!(s.transcript[2], "Connecting to 192.168.1.10 on port 22...");

        s.tick(t0 + Duration::from_millis(2000));
        assert_eq!(s.transcript[3], "Connection established. Verifying keys...");
        assert!(!s.ready());

        s.tick(t0 + Duration::from_millis(2800));
        assert_eq!(s.transcript[4], "Access granted.");
        assert!(s.transcript.last().unwrap().starts_with("Last login: "));
        assert!(s.ready());
    }

    #[test]
    fn one_late_tick_drains_all_due_steps_in_order() {
        let t0 = Instant::now();
        let mut s = ConsoleSession::open(target(), t0);
        s.tick(t0 + Duration::from_secs(10));
        assert!(s.ready());
        assert_eq!(s.transcript[1], "Resolving host 192.168.1.10...");
        assert_eq!(s.transcript[2], "Connecting to 192.168.1.10 on port 22...");
        assert_eq!(s.transcript[3], "Connection established. Verifying keys...");
        assert_eq!(s.transcript[4], "Access granted.");
    }

    #[test]
    fn close_cancels_pending_steps() {
        let t0 = Instant::now();
        let mut s = ConsoleSession::open(target(), t0);
        s.tick(t0 + Duration::from_millis(600));
        let len = s.transcript.len();
        s.close();
        s.tick(t0 + Duration::from_secs(10));
        assert_eq!(s.transcript.len(), len);
        assert!(!s.ready());
        // Closing again is a no-op.
        s.close();
    }

    #[test]
    fn input_rejected_before_ready() {
        let t0 = Instant::now();
        let mut s = ConsoleSession::open(target(), t0);
        assert!(!s.handle_input("status"));
        assert_eq!(s.transcript.len(), 1);
    }

    #[test]
    fn whitespace_input_is_ignored() {
        let mut s = ready_session();
        let len = s.transcript.len();
        assert!(!s.handle_input("   "));
        assert_eq!(s.transcript.len(), len);
    }

    #[test]
    fn echo_precedes_branch_output() {
        let mut s = ready_session();
        let len = s.transcript.len();
        s.handle_input("ls");
        assert_eq!(s.transcript[len], "root@192.168.1.10:~# ls");
        assert_eq!(s.transcript[len + 1], "config.toml  data/  keystore.json  node-service.log  start.sh");
    }

    #[test]
    fn clear_empties_transcript_without_echo() {
        let mut s = ready_session();
        s.handle_input("help");
        s.handle_input("clear");
        assert!(s.transcript.is_empty());
    }

    #[test]
    fn exit_closes_and_further_input_is_dropped() {
        let mut s = ready_session();
        let len = s.transcript.len();
        assert!(s.handle_input("exit"));
        assert!(s.closed());
        // No echo, no output from exit itself.
        assert_eq!(s.transcript.len(), len);
        assert!(!s.handle_input("status"));
        assert_eq!(s.transcript.len(), len);
    }

    #[test]
    fn status_reports_green_active_and_peer_count_in_range() {
        let mut s = ready_session();
        for _ in 0..20 {
            let len = s.transcript.len();
            s.handle_input("status");
            assert_eq!(s.transcript[len + 1], "Node: ETH Validator 01");
            assert_eq!(s.transcript[len + 2], format!("Status: {}Active{}", SGR_GREEN, SGR_RESET));
            assert_eq!(s.transcript[len + 3], "Uptime: 99.9%");
            let peers: u32 = s.transcript[len + 4]
                .strip_prefix("Peers: ")
                .and_then(|p| p.parse().ok())
                .expect("peer line should carry a number");
            assert!(PEER_RANGE.contains(&peers));
        }
    }

    #[test]
    fn status_of_non_active_node_reads_inactive() {
        let t0 = Instant::now();
        let mut t = target();
        t.status = NodeStatus::Syncing;
        let mut s = ConsoleSession::open(t, t0);
        s.tick(t0 + Duration::from_millis(2800));
        let len = s.transcript.len();
        s.handle_input("status");
        assert_eq!(s.transcript[len + 2], "Status: Inactive");
    }

    #[test]
    fn start_reports_pid_in_range() {
        let mut s = ready_session();
        for _ in 0..20 {
            let len = s.transcript.len();
            s.handle_input("start");
            assert_eq!(s.transcript[len + 1], "Starting node service...");
            let line = &s.transcript[len + 2];
            let pid: u32 = line
                .strip_prefix("Service started successfully (PID: ")
                .and_then(|r| r.strip_suffix(')'))
                .and_then(|p| p.parse().ok())
                .expect("start line should carry a pid");
            assert!(PID_RANGE.contains(&pid));
        }
    }

    #[test]
    fn unknown_command_gets_the_default_branch() {
        let mut s = ready_session();
        let len = s.transcript.len();
        s.handle_input("reboot now");
        assert_eq!(s.transcript[len], "root@192.168.1.10:~# reboot now");
        assert_eq!(s.transcript[len + 1], "reboot: command not found. Type 'help' for available commands.");
    }

    #[test]
    fn command_name_is_case_insensitive_first_token() {
        assert_eq!(ConsoleCommand::parse("STATUS"), ConsoleCommand::Status);
        assert_eq!(ConsoleCommand::parse("  Ping  host"), ConsoleCommand::Ping);
        assert_eq!(ConsoleCommand::parse("frobnicate"), ConsoleCommand::Unknown("frobnicate".to_string()));
    }

    #[test]
    fn target_defaults_user_and_port() {
        let mut n = crate::seed::nodes().remove(0);
        n.vps_user = String::new();
        n.ssh_port = String::new();
        let t = Target::from_node(&n);
        assert_eq!(t.user, "root");
        assert_eq!(t.ssh_port, "22");
    }
}
