use super::narration::{vignette_prompt, NarrationLog, Tone};
use super::stats_panel::{draw_hero_panel, draw_monster_panel};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use upside_down::build_info;
use upside_down::core::constants::BOSS_TURN_THRESHOLD;
use upside_down::core::{Campaign, Decision, RandomSource};

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Info => Style::default(),
        Tone::Good => Style::default().fg(Color::Green),
        Tone::Bad => Style::default().fg(Color::Red),
        Tone::Story => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::ITALIC),
    }
}

/// Draws the running campaign: status bar, panels, log and the prompt for
/// whatever the campaign is waiting on.
pub fn draw_play_scene<D: RandomSource>(
    frame: &mut Frame,
    area: Rect,
    campaign: &Campaign<D>,
    log: &NarrationLog,
    selected_action: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title bar
            Constraint::Length(10), // Hero + monster
            Constraint::Min(5),     // Narration
            Constraint::Length(4),  // Actions
        ])
        .split(area);

    draw_title_bar(frame, chunks[0], campaign);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    draw_hero_panel(frame, panels[0], campaign.hero());
    draw_monster_panel(frame, panels[1], campaign.battle());

    draw_log(frame, chunks[2], log);
    draw_action_bar(frame, chunks[3], &campaign.pending(), selected_action);
}

fn draw_title_bar<D: RandomSource>(frame: &mut Frame, area: Rect, campaign: &Campaign<D>) {
    let boss = if campaign.boss_defeated() {
        Span::styled("Mind Flayer defeated", Style::default().fg(Color::Green))
    } else if campaign.turn() >= BOSS_TURN_THRESHOLD {
        Span::styled("The Mind Flayer hunts you", Style::default().fg(Color::Red))
    } else {
        Span::styled(
            format!("Boss in {} turns", BOSS_TURN_THRESHOLD - campaign.turn()),
            Style::default().fg(Color::DarkGray),
        )
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" Turn {} ", campaign.turn()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        boss,
        Span::raw("  "),
        Span::styled(
            build_info::version_line(),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_log(frame: &mut Frame, area: Rect, log: &NarrationLog) {
    let block = Block::default().borders(Borders::ALL).title(" Story ");
    let visible = block.inner(area).height as usize;
    let lines: Vec<Line> = log
        .tail(visible)
        .map(|entry| Line::from(Span::styled(entry.text.clone(), tone_style(entry.tone))))
        .collect();

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_action_bar(frame: &mut Frame, area: Rect, decision: &Decision, selected: usize) {
    let block = Block::default().borders(Borders::ALL).title(" Actions ");

    let lines = match decision {
        Decision::Advance => vec![Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::raw(" Venture deeper   "),
            Span::styled("[Q]", Style::default().fg(Color::Yellow)),
            Span::raw(" Quit"),
        ])],
        Decision::Battle { legal } => {
            let mut spans = Vec::new();
            for (i, action) in legal.iter().enumerate() {
                let label = format!("{}. {}", i + 1, action.label());
                if i == selected {
                    spans.push(Span::styled(
                        format!("[{}]", label),
                        Style::default()
                            .fg(Color::Black)
                            .bg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ));
                } else {
                    spans.push(Span::raw(format!(" {} ", label)));
                }
                spans.push(Span::raw(" "));
            }
            vec![
                Line::from(spans),
                Line::from(Span::styled(
                    "←/→ or 1-9 to choose, Enter to act",
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        }
        Decision::Vignette { vignette } => {
            let (question, accept, decline) = vignette_prompt(*vignette);
            vec![
                Line::from(Span::styled(question, tone_style(Tone::Story))),
                Line::from(vec![
                    Span::styled("[Y]", Style::default().fg(Color::Green)),
                    Span::raw(format!(" {}   ", accept)),
                    Span::styled("[N]", Style::default().fg(Color::Red)),
                    Span::raw(format!(" {}", decline)),
                ]),
            ]
        }
        Decision::Finished(_) => vec![Line::from("Press Enter to continue")],
    };

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left),
        area,
    );
}
