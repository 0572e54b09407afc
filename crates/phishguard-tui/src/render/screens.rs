//! Per-view body rendering

use phishguard_app::state::{AppState, AuthField, ProfileField};
use phishguard_core::{AuthMode, Tone};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::theme::{icons::IconSet, palette, styles};
use crate::widgets::{self, modal_overlay::centered_rect, TextInput};

/// Horizontally centered column of at most `width` cells
fn column(area: Rect, width: u16) -> Rect {
    let w = width.min(area.width);
    Rect::new(area.x + (area.width - w) / 2, area.y, w, area.height)
}

fn hero(title: &str, subtitle: &str) -> Vec<Line<'static>> {
    vec![
        Line::styled(title.to_string(), styles::accent_bold()),
        Line::styled(subtitle.to_string(), styles::text_muted()),
    ]
}

pub fn auth(frame: &mut Frame, area: Rect, state: &AppState, icons: IconSet) {
    let auth = &state.auth;
    let card = centered_rect(56, 14, area);
    let block = styles::glass_block(true);
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let chunks = Layout::vertical([
        Constraint::Length(2), // Title
        Constraint::Length(1),
        Constraint::Length(3), // Email
        Constraint::Length(3), // Password
        Constraint::Length(1),
        Constraint::Length(1), // Submit / toggle
        Constraint::Min(0),
    ])
    .horizontal_margin(1)
    .split(inner);

    let mut title = hero("PhishGuard", "AI-Powered Protection");
    title[0] = Line::from(vec![
        Span::styled(icons.shield(), styles::accent()),
        Span::raw(" "),
        Span::styled("PhishGuard", styles::accent_bold()),
    ]);
    frame.render_widget(
        Paragraph::new(title).alignment(Alignment::Center),
        chunks[0],
    );

    frame.render_widget(
        TextInput::new("Email", &auth.email)
            .placeholder("Email")
            .focused(auth.focus == AuthField::Email),
        chunks[2],
    );
    frame.render_widget(
        TextInput::new("Password", &auth.password)
            .placeholder("Password")
            .masked('•')
            .focused(auth.focus == AuthField::Password),
        chunks[3],
    );

    let toggle = match auth.mode {
        AuthMode::Login => "Don't have an account? Sign Up",
        AuthMode::Register => "Already have an account? Login",
    };
    let action = Line::from(vec![
        Span::styled(format!(" {} ", auth.mode.label()), styles::focused_selected()),
        Span::raw("   "),
        Span::styled("Ctrl+T ", styles::keybinding()),
        Span::styled(toggle, styles::text_muted()),
    ]);
    frame.render_widget(
        Paragraph::new(action).alignment(Alignment::Center),
        chunks[5],
    );
}

pub fn home(frame: &mut Frame, area: Rect, state: &AppState, icons: IconSet) {
    let col = column(area, 72);
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2), // Hero
        Constraint::Length(1),
        Constraint::Length(1), // Label
        Constraint::Length(3), // Input
        Constraint::Length(1),
        Constraint::Min(0), // Tips
    ])
    .split(col);

    frame.render_widget(
        Paragraph::new(hero("PhishGuard", "AI-Powered Protection")).alignment(Alignment::Center),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(icons.link(), styles::accent()),
            Span::raw(" "),
            Span::styled("Enter Website URL:", styles::text_secondary()),
        ])),
        chunks[3],
    );
    frame.render_widget(
        TextInput::new("URL", &state.home.url)
            .placeholder("https://example.com")
            .focused(state.home.result.is_none()),
        chunks[4],
    );

    let tips = vec![
        Line::styled(
            "Links are checked by the PhishGuard server and saved to your history.",
            styles::text_muted(),
        ),
        Line::styled(
            "Copy a link anywhere and come back: it is scanned automatically.",
            styles::text_muted(),
        ),
    ];
    frame.render_widget(
        Paragraph::new(tips).wrap(Wrap { trim: true }),
        chunks[6],
    );
}

pub fn sms(frame: &mut Frame, area: Rect, state: &AppState, _icons: IconSet) {
    let col = column(area, 72);
    let chunks = Layout::vertical([
        Constraint::Length(2), // Hero
        Constraint::Length(1),
        Constraint::Length(1), // Steps
        Constraint::Length(1),
        Constraint::Min(5), // Text area
    ])
    .split(col);

    frame.render_widget(
        Paragraph::new(hero("SMS Guard", "Scan links from messages")).alignment(Alignment::Center),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Line::styled(
            "1. Open Messages.  2. Copy the text.  3. Return here.",
            styles::text_secondary(),
        ))
        .alignment(Alignment::Center),
        chunks[2],
    );
    frame.render_widget(
        TextInput::new("Message", &state.sms.text)
            .placeholder("Waiting for copied text...")
            .multiline()
            .focused(true),
        chunks[4],
    );
}

pub fn qr(frame: &mut Frame, area: Rect, state: &AppState, icons: IconSet) {
    let qr = &state.qr;
    let col = column(area, 72);
    let chunks = Layout::vertical([
        Constraint::Length(2), // Hero
        Constraint::Length(1),
        Constraint::Length(3), // Path input
        Constraint::Length(1),
        Constraint::Length(1), // Scanner status
        Constraint::Min(0),
    ])
    .split(col);

    frame.render_widget(
        Paragraph::new(hero(
            "QR Scanner",
            "Point at an image file containing a QR code",
        ))
        .alignment(Alignment::Center),
        chunks[0],
    );
    frame.render_widget(
        TextInput::new("Image Path", &qr.path)
            .placeholder("/path/to/qr.png")
            .focused(qr.result.is_none()),
        chunks[2],
    );

    let status = if qr.in_flight.is_some() {
        Line::styled("Code captured, checking link...", styles::accent())
    } else if qr.scanned {
        Line::styled("Code captured", styles::text_secondary())
    } else {
        Line::from(vec![
            Span::styled(icons.dot(), Style::default().fg(palette::SAFE)),
            Span::styled(" Ready to scan", styles::text_secondary()),
        ])
    };
    frame.render_widget(
        Paragraph::new(status).alignment(Alignment::Center),
        chunks[4],
    );
}

pub fn history(frame: &mut Frame, area: Rect, state: &AppState, icons: IconSet) {
    let h = &state.history;
    let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);

    if h.loading && h.entries.is_empty() {
        frame.render_widget(
            Paragraph::new("Loading history...")
                .style(styles::text_muted())
                .alignment(Alignment::Center)
                .block(styles::glass_block(true)),
            chunks[0],
        );
    } else {
        frame.render_widget(
            widgets::HistoryList::new(&h.entries, h.selected, icons),
            chunks[0],
        );
    }

    if let Some(error) = &h.error {
        frame.render_widget(
            Paragraph::new(Line::styled(
                format!(" {} {}", icons.warning(), error),
                Style::default().fg(palette::DANGER),
            )),
            chunks[1],
        );
    }
}

pub fn profile(frame: &mut Frame, area: Rect, state: &AppState, icons: IconSet) {
    let p = &state.profile;
    let col = column(area, 64);

    let Some(session) = p.session.as_ref().filter(|_| p.loaded) else {
        let text = if p.loaded {
            "No active session"
        } else {
            "Loading profile..."
        };
        frame.render_widget(
            Paragraph::new(text)
                .style(styles::text_muted())
                .alignment(Alignment::Center),
            col,
        );
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(5), // Identity card
        Constraint::Length(3), // Stats
        Constraint::Min(0),    // Settings or edit form
    ])
    .split(col);

    let identity = vec![
        Line::from(vec![
            Span::styled(icons.user(), styles::accent()),
            Span::raw(" "),
            Span::styled(session.display_name().to_string(), styles::accent_bold()),
        ]),
        Line::styled(session.email.clone(), styles::text_secondary()),
        Line::from(vec![
            Span::styled(icons.shield(), styles::tone(Tone::Safe)),
            Span::styled(" PRO MEMBER", styles::tone_bold(Tone::Safe)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(identity)
            .alignment(Alignment::Center)
            .block(styles::glass_block(false)),
        chunks[0],
    );

    let stats = p.stats.unwrap_or_default();
    let stat_line = Line::from(vec![
        Span::styled("Scans ", styles::text_muted()),
        Span::styled(stats.total.to_string(), styles::accent_bold()),
        Span::raw("     "),
        Span::styled("Threats ", styles::text_muted()),
        Span::styled(
            stats.threats.to_string(),
            styles::tone_bold(Tone::Danger),
        ),
        Span::raw("     "),
        Span::styled("Protected ", styles::text_muted()),
        Span::styled("100%", styles::tone_bold(Tone::Safe)),
    ]);
    frame.render_widget(
        Paragraph::new(stat_line)
            .alignment(Alignment::Center)
            .block(styles::glass_block(false)),
        chunks[1],
    );

    if p.editing {
        profile_form(frame, chunks[2], state);
    } else {
        profile_settings(frame, chunks[2], state, session.avatar());
    }
}

fn profile_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let p = &state.profile;
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);

    frame.render_widget(
        TextInput::new("Name", &p.name)
            .placeholder("Enter Name")
            .focused(p.focus == ProfileField::Name),
        rows[0],
    );
    frame.render_widget(
        TextInput::new("Photo", &p.photo)
            .placeholder("Image URL or file path")
            .focused(p.focus == ProfileField::Photo),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Save Changes ", styles::focused_selected()),
            Span::styled("  Enter to save, Esc to cancel", styles::text_muted()),
        ]))
        .alignment(Alignment::Center),
        rows[2],
    );
}

fn profile_settings(frame: &mut Frame, area: Rect, state: &AppState, avatar: &str) {
    let notifications = state.settings.behavior.notifications;
    let toggle = if notifications {
        Span::styled("[on] ", styles::tone_bold(Tone::Safe))
    } else {
        Span::styled("[off]", styles::text_muted())
    };

    let row = |key: &'static str, label: &'static str| {
        vec![
            Span::styled(format!(" {} ", key), styles::keybinding()),
            Span::styled(label, styles::text_primary()),
        ]
    };

    let mut notif = row("n", "Notifications ");
    notif.push(toggle);
    let lines = vec![
        Line::styled("SETTINGS", styles::text_muted()),
        Line::from(row("e", "Edit Profile")),
        Line::from(notif),
        Line::from(row("c", "Clear Scan History")),
        Line::from(row("l", "Log Out")),
        Line::raw(""),
        Line::styled(
            widgets::truncate(&format!("Photo: {}", avatar), usize::from(area.width)),
            styles::text_muted(),
        ),
        Line::styled(
            format!("Version {}", env!("CARGO_PKG_VERSION")),
            styles::text_muted(),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
