//! All drawing. One entry point (`draw`) renders the tab bar, the active
//! view, the status line, and whichever overlay is up. Transcript lines may
//! carry SGR color escapes; `ansi_spans` maps them onto ratatui styles.

use ratatui::prelude::*;
use ratatui::widgets::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::console::ConsoleSession;
use crate::lang::tr;
use crate::types::{
    AirdropStatus, AppState, ConfirmTarget, Language, Mode, NodeStatus, PasswordPrompt,
    PasswordPurpose, Theme, View, VERSION,
};

pub struct Palette {
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub select_bg: Color,
    pub good: Color,
    pub warn: Color,
    pub bad: Color,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            fg: Color::White,
            dim: Color::DarkGray,
            accent: Color::Blue,
            select_bg: Color::DarkGray,
            good: Color::Green,
            warn: Color::Yellow,
            bad: Color::Red,
        },
        Theme::Light => Palette {
            fg: Color::Black,
            dim: Color::Gray,
            accent: Color::Blue,
            select_bg: Color::Gray,
            good: Color::Green,
            warn: Color::Yellow,
            bad: Color::Red,
        },
    }
}

pub fn draw(f: &mut Frame, app: &mut AppState) {
    let area = f.size();
    let pal = palette(app.prefs.theme);
    let lang = app.prefs.language;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    draw_tabs(f, app, &pal, chunks[0]);

    match app.view {
        View::Dashboard => draw_dashboard(f, app, &pal, chunks[1]),
        View::Nodes | View::Wallets | View::Airdrops => draw_records(f, app, &pal, chunks[1]),
        View::Settings => draw_settings(f, app, &pal, chunks[1]),
    }

    draw_status_line(f, app, &pal, chunks[2]);

    // Overlays stack above the view; the console sits on top of everything.
    match &app.mode {
        Mode::Form(_) => draw_form(f, app, &pal, area, form_title(app, lang)),
        Mode::Confirm { target } => draw_confirm(f, app, &pal, area, target),
        Mode::Password(prompt) => draw_password(f, app, &pal, area, prompt),
        _ => {}
    }
    if let Some(session) = &app.session {
        draw_console(f, session, area);
    }
}

fn form_title(app: &AppState, lang: Language) -> String {
    if let Mode::Form(form) = &app.mode {
        let action = if form.editing.is_some() { "Edit" } else { tr(lang, "addNew") };
        let kind = match form.kind {
            crate::types::RecordKind::Nodes => tr(lang, "nodes"),
            crate::types::RecordKind::Wallets => tr(lang, "wallets"),
            crate::types::RecordKind::Airdrops => tr(lang, "airdrops"),
        };
        format!("{}: {}", action, kind)
    } else {
        String::new()
    }
}

fn draw_tabs(f: &mut Frame, app: &AppState, pal: &Palette, area: Rect) {
    let lang = app.prefs.language;
    let labels = [
        tr(lang, "dashboard"),
        tr(lang, "nodes"),
        tr(lang, "wallets"),
        tr(lang, "airdrops"),
        tr(lang, "settings"),
    ];
    let mut spans: Vec<Span<'static>> = vec![Span::styled(
        " NodePilot ",
        Style::default().fg(pal.accent).add_modifier(Modifier::BOLD),
    )];
    for (i, (view, label)) in View::ALL.iter().zip(labels.iter()).enumerate() {
        let style = if *view == app.view {
            Style::default().fg(pal.fg).bg(pal.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(pal.dim)
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, label), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(format!("v{}", VERSION), Style::default().fg(pal.dim)));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_dashboard(f: &mut Frame, app: &AppState, pal: &Palette, area: Rect) {
    let lang = app.prefs.language;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(area);

    let active = app.store.nodes.iter().filter(|n| n.status == NodeStatus::Active).count();
    let pending = app.store.airdrops.iter().filter(|a| a.status == AirdropStatus::Pending).count();

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[0]);
    stat_card(f, cards[0], pal, tr(lang, "activeNodes"), format!("{}/{}", active, app.store.nodes.len()));
    stat_card(f, cards[1], pal, tr(lang, "totalWallets"), app.store.wallets.len().to_string());
    stat_card(f, cards[2], pal, tr(lang, "pendingAirdrops"), pending.to_string());

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let mut node_lines: Vec<Line> = Vec::new();
    for n in app.store.nodes.iter().take(5) {
        let dot = match n.status {
            NodeStatus::Active => Span::styled("● ", Style::default().fg(pal.good)),
            NodeStatus::Syncing => Span::styled("● ", Style::default().fg(pal.warn)),
            NodeStatus::Inactive => Span::styled("● ", Style::default().fg(pal.bad)),
        };
        node_lines.push(Line::from(vec![
            dot,
            Span::styled(fit(&n.name, 24), Style::default().fg(pal.fg)),
            Span::styled(format!("  {}", fit(&n.network, 18)), Style::default().fg(pal.dim)),
            Span::styled(format!("  {}  sync {}", n.uptime, n.last_sync), Style::default().fg(pal.dim)),
        ]));
    }
    if node_lines.is_empty() {
        node_lines.push(Line::from(Span::styled("No nodes tracked", Style::default().fg(pal.dim))));
    }
    f.render_widget(
        Paragraph::new(Text::from(node_lines))
            .block(Block::default().borders(Borders::ALL).title(tr(lang, "recentStatus"))),
        cols[0],
    );

    let mut drop_lines: Vec<Line> = Vec::new();
    for a in app.store.airdrops.iter().filter(|a| a.status != AirdropStatus::Claimed).take(5) {
        let badge_color = match a.status {
            AirdropStatus::Pending => pal.warn,
            AirdropStatus::Missed => pal.bad,
            _ => pal.accent,
        };
        drop_lines.push(Line::from(vec![
            Span::styled(a.project.clone(), Style::default().fg(pal.fg)),
            Span::styled(format!("  [{}]", a.status.label()), Style::default().fg(badge_color)),
            Span::styled(format!("  {}  {}", a.deadline, a.tasks), Style::default().fg(pal.dim)),
        ]));
    }
    if drop_lines.is_empty() {
        drop_lines.push(Line::from(Span::styled("No airdrops tracked", Style::default().fg(pal.dim))));
    }
    f.render_widget(
        Paragraph::new(Text::from(drop_lines))
            .block(Block::default().borders(Borders::ALL).title(tr(lang, "upcomingDeadlines"))),
        cols[1],
    );
}

fn stat_card(f: &mut Frame, area: Rect, pal: &Palette, title: &str, value: String) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(Span::styled(value, Style::default().fg(pal.fg).add_modifier(Modifier::BOLD))),
        inner,
    );
}

fn draw_records(f: &mut Frame, app: &AppState, pal: &Palette, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);
    draw_filter_bar(f, app, pal, rows[0]);
    match app.view {
        View::Nodes => draw_node_table(f, app, pal, rows[1]),
        View::Wallets => draw_wallet_table(f, app, pal, rows[1]),
        View::Airdrops => draw_airdrop_table(f, app, pal, rows[1]),
        _ => {}
    }
}

fn draw_filter_bar(f: &mut Frame, app: &AppState, pal: &Palette, area: Rect) {
    let lang = app.prefs.language;
    let mut spans: Vec<Span<'static>> = Vec::new();
    let searching = matches!(app.mode, Mode::Search);
    let search_style = if searching {
        Style::default().fg(pal.fg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(pal.dim)
    };
    let term = if app.search.is_empty() && !searching {
        tr(lang, "search").to_string()
    } else if searching {
        format!("{}_", app.search)
    } else {
        app.search.clone()
    };
    spans.push(Span::styled(format!(" / {}", term), search_style));

    if app.view == View::Nodes {
        let state = if app.autosync.enabled {
            format!("on ({}s)", app.autosync.interval_ms() / 1000)
        } else {
            "off".to_string()
        };
        let style = if app.autosync.enabled {
            Style::default().fg(pal.good)
        } else {
            Style::default().fg(pal.dim)
        };
        spans.push(Span::styled(format!("   {}: {}", tr(lang, "autoSync"), state), style));
        if app.flash.active() {
            spans.push(Span::styled("   Syncing...".to_string(), Style::default().fg(pal.warn)));
        }
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn status_cell(pal: &Palette, status: NodeStatus) -> Cell<'static> {
    let color = match status {
        NodeStatus::Active => pal.good,
        NodeStatus::Syncing => pal.warn,
        NodeStatus::Inactive => pal.bad,
    };
    Cell::from(Span::styled(status.label(), Style::default().fg(color)))
}

fn draw_node_table(f: &mut Frame, app: &AppState, pal: &Palette, area: Rect) {
    let nodes = app.filtered_nodes();
    let rows: Vec<Row> = nodes.iter()
        .map(|n| Row::new(vec![
            Cell::from(n.name.clone()),
            Cell::from(n.network.clone()),
            Cell::from(n.address.clone()),
            status_cell(pal, n.status),
            Cell::from(n.uptime.clone()),
            Cell::from(n.last_sync.clone()),
        ]))
        .collect();
    let widths = [
        Constraint::Percentage(22),
        Constraint::Percentage(20),
        Constraint::Percentage(18),
        Constraint::Percentage(10),
        Constraint::Percentage(10),
        Constraint::Percentage(20),
    ];
    render_table(
        f, app, pal, area, rows, &widths,
        &["Name", "Network", "Address", "Status", "Uptime", "Last Sync"],
        nodes.len(),
        "No nodes found",
    );
}

fn draw_wallet_table(f: &mut Frame, app: &AppState, pal: &Palette, area: Rect) {
    let wallets = app.filtered_wallets();
    let rows: Vec<Row> = wallets.iter()
        .map(|w| Row::new(vec![
            Cell::from(w.label.clone()),
            Cell::from(short_address(&w.address)),
            Cell::from(w.network.clone()),
            Cell::from(Span::styled(w.kind.label(), Style::default().fg(pal.accent))),
            Cell::from(w.balance.clone()),
        ]))
        .collect();
    let widths = [
        Constraint::Percentage(25),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
        Constraint::Percentage(15),
        Constraint::Percentage(20),
    ];
    render_table(
        f, app, pal, area, rows, &widths,
        &["Label", "Address", "Network", "Type", "Balance"],
        wallets.len(),
        "No wallets found",
    );
}

fn draw_airdrop_table(f: &mut Frame, app: &AppState, pal: &Palette, area: Rect) {
    let drops = app.filtered_airdrops();
    let rows: Vec<Row> = drops.iter()
        .map(|a| {
            let color = match a.status {
                AirdropStatus::Claimed => pal.good,
                AirdropStatus::Pending => pal.warn,
                AirdropStatus::Missed => pal.bad,
                AirdropStatus::Active => pal.accent,
            };
            Row::new(vec![
                Cell::from(a.project.clone()),
                Cell::from(a.network.clone()),
                Cell::from(a.drop_type.clone()),
                Cell::from(Span::styled(a.status.label(), Style::default().fg(color))),
                Cell::from(a.deadline.clone()),
            ])
        })
        .collect();
    let widths = [
        Constraint::Percentage(25),
        Constraint::Percentage(20),
        Constraint::Percentage(18),
        Constraint::Percentage(12),
        Constraint::Percentage(25),
    ];
    render_table(
        f, app, pal, area, rows, &widths,
        &["Project", "Network", "Type", "Status", "Deadline"],
        drops.len(),
        "No airdrops found",
    );
}

#[allow(clippy::too_many_arguments)]
fn render_table(
    f: &mut Frame,
    app: &AppState,
    pal: &Palette,
    area: Rect,
    rows: Vec<Row>,
    widths: &[Constraint],
    headers: &[&'static str],
    len: usize,
    empty_msg: &'static str,
) {
    if len == 0 {
        f.render_widget(
            Paragraph::new(Span::styled(empty_msg, Style::default().fg(pal.dim)))
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
        return;
    }
    let header = Row::new(headers.iter().map(|h| Cell::from(*h)).collect::<Vec<_>>())
        .style(Style::default().fg(pal.dim).add_modifier(Modifier::BOLD));
    let table = Table::new(rows, widths.iter().copied())
        .header(header)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().bg(pal.select_bg).add_modifier(Modifier::BOLD));
    let mut state = TableState::default();
    state.select(Some(app.selected.min(len.saturating_sub(1))));
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_settings(f: &mut Frame, app: &AppState, pal: &Palette, area: Rect) {
    let lang = app.prefs.language;
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    let lang_line = Line::from(vec![
        Span::styled(app.prefs.language.label(), Style::default().fg(pal.fg)),
        Span::styled("   (l)", Style::default().fg(pal.dim)),
    ]);
    f.render_widget(
        Paragraph::new(lang_line)
            .block(Block::default().borders(Borders::ALL).title(tr(lang, "language"))),
        sections[0],
    );

    let theme_label = match app.prefs.theme { Theme::Dark => "Dark Mode", Theme::Light => "Light Mode" };
    let theme_line = Line::from(vec![
        Span::styled(theme_label, Style::default().fg(pal.fg)),
        Span::styled("   (m)", Style::default().fg(pal.dim)),
    ]);
    f.render_widget(
        Paragraph::new(theme_line)
            .block(Block::default().borders(Borders::ALL).title(tr(lang, "theme"))),
        sections[1],
    );

    let (sec_text, sec_color) = if app.gate.is_configured() {
        (format!("{}   (p)", tr(lang, "changePass")), pal.good)
    } else {
        (format!("{}   (p)", tr(lang, "setPass")), pal.dim)
    };
    f.render_widget(
        Paragraph::new(Span::styled(sec_text, Style::default().fg(sec_color)))
            .block(Block::default().borders(Borders::ALL).title(tr(lang, "security"))),
        sections[2],
    );

    let data_lines = vec![
        Line::from(Span::styled(format!("{}   (R)", tr(lang, "clearData")), Style::default().fg(pal.bad))),
        Line::from(Span::styled(tr(lang, "clearDataConfirm"), Style::default().fg(pal.dim))),
    ];
    f.render_widget(
        Paragraph::new(Text::from(data_lines))
            .block(Block::default().borders(Borders::ALL).title(tr(lang, "data"))),
        sections[3],
    );
}

fn draw_status_line(f: &mut Frame, app: &AppState, pal: &Palette, area: Rect) {
    let text = if let Some((msg, _)) = &app.notice {
        Span::styled(format!(" {}", msg), Style::default().fg(pal.accent))
    } else {
        let hints = match (&app.mode, app.view) {
            (Mode::Search, _) => " Enter/Esc done",
            (Mode::Form(_), _) => " Tab next field  ←/→ cycle option  Enter save  Esc cancel",
            (Mode::Confirm { .. }, _) => " y confirm  n/Esc cancel",
            (Mode::Password(_), _) => " Tab next field  Enter submit  Esc cancel",
            (_, View::Nodes) => " a add  e edit  d delete  c connect  s sync  S sync-all  t auto-sync  i interval  / search  x export  q quit",
            (_, View::Wallets) | (_, View::Airdrops) => " a add  e edit  d delete  / search  x export  q quit",
            (_, View::Settings) => " l language  m theme  p password  R clear data  q quit",
            _ => " 1-5 switch view  Tab next view  q quit",
        };
        Span::styled(hints, Style::default().fg(pal.dim))
    };
    f.render_widget(Paragraph::new(Line::from(text)), area);
}

// ── Overlays ────────────────────────────────────────────────────────────────

pub fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Length(height),
            Constraint::Percentage(50),
        ])
        .split(r);
    let middle = popup_layout[1];
    let width = (middle.width * percent_x) / 100;
    let x = middle.x + (middle.width - width) / 2;
    Rect { x, y: middle.y, width, height }
}

fn draw_form(f: &mut Frame, app: &AppState, pal: &Palette, area: Rect, title: String) {
    let Mode::Form(form) = &app.mode else { return };
    let height = form.fields.len() as u16 + 2;
    let overlay = centered_rect(60, height, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(pal.accent))
        .title(title);
    let mut lines: Vec<Line> = Vec::new();
    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focus;
        let marker = if focused { ">" } else { " " };
        let value = if field.choices.is_some() {
            format!("◂ {} ▸", field.value)
        } else if focused {
            format!("{}_", field.value)
        } else {
            field.value.clone()
        };
        let style = if focused {
            Style::default().fg(pal.fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(pal.dim)
        };
        lines.push(Line::from(Span::styled(
            format!("{} {:<12} {}", marker, field.label, value),
            style,
        )));
    }
    f.render_widget(Clear, overlay);
    f.render_widget(Paragraph::new(Text::from(lines)).block(block), overlay);
}

fn draw_confirm(f: &mut Frame, app: &AppState, pal: &Palette, area: Rect, target: &ConfirmTarget) {
    let lang = app.prefs.language;
    let message = match target {
        ConfirmTarget::Delete { .. } => "Are you sure you want to delete this item?".to_string(),
        ConfirmTarget::Reset => tr(lang, "clearDataConfirm").to_string(),
    };
    let width = (message.width() as u16 + 10).max(40).min(area.width.saturating_sub(4).max(20));
    let overlay = centered_rect((width * 100 / area.width.max(1)).max(40), 3, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(pal.bad))
        .title("Confirm");
    f.render_widget(Clear, overlay);
    f.render_widget(
        Paragraph::new(format!("{} [y/N]", message)).block(block).wrap(Wrap { trim: true }),
        overlay,
    );
}

fn draw_password(f: &mut Frame, app: &AppState, pal: &Palette, area: Rect, prompt: &PasswordPrompt) {
    let lang = app.prefs.language;
    let title = match prompt.purpose {
        PasswordPurpose::Set => tr(lang, "setPass"),
        PasswordPurpose::Change => tr(lang, "changePass"),
        PasswordPurpose::Verify => tr(lang, "security"),
    };
    let mut lines: Vec<Line> = Vec::new();
    let masked = |s: &str| "*".repeat(s.chars().count());
    let field_line = |label: &'static str, value: &str, focused: bool| {
        let marker = if focused { ">" } else { " " };
        let style = if focused {
            Style::default().fg(pal.fg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(pal.dim)
        };
        Line::from(Span::styled(
            format!("{} {:<22} {}", marker, label, if focused { format!("{}_", masked(value)) } else { masked(value) }),
            style,
        ))
    };
    match prompt.purpose {
        PasswordPurpose::Verify => {
            lines.push(field_line(tr(lang, "enterPassToConfirm"), &prompt.current, true));
        }
        PasswordPurpose::Set => {
            lines.push(field_line(tr(lang, "newPass"), &prompt.new, prompt.focus == 1));
            lines.push(field_line(tr(lang, "confirmPass"), &prompt.confirm, prompt.focus == 2));
        }
        PasswordPurpose::Change => {
            lines.push(field_line(tr(lang, "currentPass"), &prompt.current, prompt.focus == 0));
            lines.push(field_line(tr(lang, "newPass"), &prompt.new, prompt.focus == 1));
            lines.push(field_line(tr(lang, "confirmPass"), &prompt.confirm, prompt.focus == 2));
        }
    }
    if let Some(err) = prompt.error {
        lines.push(Line::from(Span::styled(tr(lang, err), Style::default().fg(pal.bad))));
    }
    let overlay = centered_rect(50, lines.len() as u16 + 2, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(pal.accent))
        .title(title);
    f.render_widget(Clear, overlay);
    f.render_widget(Paragraph::new(Text::from(lines)).block(block), overlay);
}

fn draw_console(f: &mut Frame, session: &ConsoleSession, area: Rect) {
    // The console is always dark, whatever the app theme.
    let w = (area.width * 9 / 10).max(40).min(area.width);
    let h = (area.height * 4 / 5).max(10).min(area.height);
    let overlay = Rect {
        x: (area.width.saturating_sub(w)) / 2,
        y: (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    };
    let title = format!(
        " {}@{} - SSH Session (Simulated) ",
        session.target.user, session.target.host
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .style(Style::default().bg(Color::Black).fg(Color::Gray))
        .title(title);
    let inner = block.inner(overlay);

    let mut lines: Vec<Line> = session.transcript.iter().map(|l| ansi_spans(l)).collect();
    if session.ready() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", session.target.prompt()),
                Style::default().fg(Color::Green),
            ),
            Span::styled(session.input.clone(), Style::default().fg(Color::White)),
            Span::styled("█", Style::default().fg(Color::White)),
        ]));
    }
    // Keep the tail in view.
    let visible = inner.height as usize;
    let skip = lines.len().saturating_sub(visible);
    let lines: Vec<Line> = lines.into_iter().skip(skip).collect();

    f.render_widget(Clear, overlay);
    f.render_widget(block, overlay);
    f.render_widget(Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }), inner);
}

/// Map the small SGR subset used in transcript lines (reset, bold, basic
/// foreground colors) onto ratatui spans. Unknown codes are dropped.
pub fn ansi_spans(line: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current = String::new();
    let mut style = Style::default();
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            let mut code = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_ascii_digit() || d == ';' {
                    code.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            if chars.peek() == Some(&'m') {
                chars.next();
                if !current.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut current), style));
                }
                style = apply_sgr(style, &code);
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        spans.push(Span::styled(current, style));
    }
    Line::from(spans)
}

fn apply_sgr(style: Style, code: &str) -> Style {
    let mut s = style;
    for part in code.split(';') {
        match part {
            "" | "0" => s = Style::default(),
            "1" => s = s.add_modifier(Modifier::BOLD),
            "30" => s = s.fg(Color::Black),
            "31" => s = s.fg(Color::Red),
            "32" => s = s.fg(Color::Green),
            "33" => s = s.fg(Color::Yellow),
            "34" => s = s.fg(Color::Blue),
            "35" => s = s.fg(Color::Magenta),
            "36" => s = s.fg(Color::Cyan),
            "37" => s = s.fg(Color::White),
            _ => {}
        }
    }
    s
}

/// Abbreviated wallet address: first 6 and last 4 characters.
pub fn short_address(addr: &str) -> String {
    let n = addr.chars().count();
    if n <= 10 {
        return addr.to_string();
    }
    let head: String = addr.chars().take(6).collect();
    let tail: String = addr.chars().skip(n - 4).collect();
    format!("{}...{}", head, tail)
}

/// Truncate to a display width, appending an ellipsis when cut.
pub fn fit(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut w = 0;
    for ch in s.chars() {
        let cw = ch.width().unwrap_or(0);
        if w + cw > max.saturating_sub(1) {
            break;
        }
        out.push(ch);
        w += cw;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_spans_colors_the_wrapped_fragment() {
        let line = ansi_spans("Status: \x1b[32mActive\x1b[0m");
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content, "Status: ");
        assert_eq!(line.spans[1].content, "Active");
        assert_eq!(line.spans[1].style.fg, Some(Color::Green));
    }

    #[test]
    fn ansi_spans_passes_plain_text_through() {
        let line = ansi_spans("Peers: 42");
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "Peers: 42");
        assert_eq!(line.spans[0].style, Style::default());
    }

    #[test]
    fn short_address_keeps_head_and_tail() {
        assert_eq!(
            short_address("0x742d35Cc6634C0532925a3b844Bc454e4438f44e"),
            "0x742d...f44e"
        );
        assert_eq!(short_address("short"), "short");
    }

    #[test]
    fn fit_truncates_on_display_width() {
        assert_eq!(fit("abcdef", 10), "abcdef");
        assert_eq!(fit("abcdefghij", 5), "abcd…");
    }
}
