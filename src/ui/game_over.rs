use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use upside_down::core::CampaignResult;

/// Final screen for a finished campaign.
pub fn draw_game_over(frame: &mut Frame, area: Rect, result: CampaignResult, gold: i64) {
    let (headline, color, detail) = match result {
        CampaignResult::Victory { .. } => (
            "🏆 VICTORY",
            Color::Green,
            "The Mind Flayer is gone. Hawkins can sleep tonight.".to_string(),
        ),
        CampaignResult::Defeat { cause, .. } => (
            "💀 DEFEAT",
            Color::Red,
            format!("Slain by {}.", cause.name()),
        ),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(9),
            Constraint::Min(0),
        ])
        .split(area);

    let lines = vec![
        Line::from(Span::styled(
            headline,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(detail),
        Line::from(format!("Turns survived: {}", result.turns())),
        Line::from(format!("Gold: {}", gold)),
        Line::from(""),
        Line::from(vec![
            Span::styled("[R]", Style::default().fg(Color::Yellow)),
            Span::raw(" Play again   "),
            Span::styled("[Q]", Style::default().fg(Color::Yellow)),
            Span::raw(" Quit"),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            )
            .alignment(Alignment::Center),
        chunks[1],
    );
}
