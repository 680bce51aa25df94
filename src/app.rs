use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::io;
use std::time::Instant;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::debug;

use crate::config::{Config, SavedStation};
use crate::error::Result;
use crate::report::{self, Report};
use crate::severity::Tone;
use crate::weather::{or_missing, Observation, MISSING};

use chrono::{DateTime, Local};

/// Source of observations; the network client outside of tests.
pub type Fetch = fn(&Config) -> Result<Observation>;

/// Outcome of one refresh.
pub struct Snapshot {
    pub fetched_at: DateTime<Local>,
    pub outcome: std::result::Result<(Observation, Report), String>,
}

impl Snapshot {
    pub fn take(config: &Config, fetch: Fetch) -> Self {
        let outcome = fetch(config)
            .map(|obs| {
                let report = Report::from_observation(&obs);
                (obs, report)
            })
            .map_err(|err| err.to_string());
        Self {
            fetched_at: Local::now(),
            outcome,
        }
    }

    /// Remember the station once a fetch has succeeded; returns whether it did.
    pub fn remember_station(&self, config: &Config, saved: &SavedStation) -> bool {
        if self.outcome.is_ok() {
            saved.remember(&config.station_id);
            true
        } else {
            false
        }
    }
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
    fetch: Fetch,
    saved: &SavedStation,
) -> io::Result<()> {
    let mut snapshot = Snapshot::take(config, fetch);
    let mut last_tick = Instant::now();
    let mut remembered = false;
    loop {
        if !remembered {
            remembered = snapshot.remember_station(config, saved);
        }
        terminal.draw(|f| ui(f, config, &snapshot))?;

        let timeout = config.refresh.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('r') => {
                            debug!("manual refresh");
                            last_tick = Instant::now();
                            snapshot = Snapshot::take(config, fetch);
                        }
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= config.refresh {
            debug!("scheduled refresh");
            last_tick = Instant::now();
            snapshot = Snapshot::take(config, fetch);
        }
    }
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::White => Color::White,
        Tone::Cyan => Color::Cyan,
        Tone::LightBlue => Color::LightBlue,
        Tone::Green => Color::Green,
        Tone::Yellow => Color::Yellow,
        Tone::Magenta => Color::Magenta,
        Tone::Red => Color::Red,
    }
}

/// Report lines as dashboard text; the title and rule move to the border.
fn report_lines(report: &Report) -> Vec<Line<'static>> {
    let mut lines = vec![];
    for line in &report.lines {
        match line {
            report::Line::Blank => lines.push(Line::from("")),
            report::Line::Title(_) | report::Line::Rule => {}
            report::Line::Field { label, parts } => {
                let mut spans = vec![Span::raw(format!(" {}", report::Line::padded_label(label)))];
                for part in parts {
                    let span = match part.tier {
                        Some(tier) => Span::styled(part.text.clone(), Style::default().fg(tone_color(tier.tone))),
                        None => Span::raw(part.text.clone()),
                    };
                    spans.push(span);
                }
                lines.push(Line::from(spans));
            }
        }
    }
    lines
}

fn display_headline<'a>(config: &'a Config, snapshot: &'a Snapshot) -> Paragraph<'a> {
    let place = match &snapshot.outcome {
        Ok((obs, _)) => or_missing(obs.neighborhood.as_ref()),
        Err(_) => MISSING.to_string(),
    };
    Paragraph::new(vec![
        Line::from(vec![
            Span::raw(" "),
            Span::styled(config.station_id.clone(), Style::default().fg(Color::Blue)),
            Span::raw(" : "),
            Span::styled(place, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(format!(
            " updated {}   (r) refresh  (q) quit",
            snapshot.fetched_at.format("%d-%m-%Y %H:%M")
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .border_type(BorderType::Rounded),
    )
}

fn ui(f: &mut Frame, config: &Config, snapshot: &Snapshot) {
    let vert_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(f.area());

    let title_widget = display_headline(config, snapshot);
    f.render_widget(title_widget, vert_layout[0]);

    let body = match &snapshot.outcome {
        Ok((_, report)) => report_lines(report),
        Err(message) => vec![
            Line::from(""),
            Line::from(Span::styled(format!(" {message}"), Style::default().fg(Color::Red))),
        ],
    };

    let current_block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", report::TITLE),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(BorderType::Rounded);

    let current = Paragraph::new(body).block(current_block).wrap(Wrap { trim: false });
    f.render_widget(current, vert_layout[1]);
}
