use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use upside_down::character::HeroClass;
use upside_down::items::display_name;

pub struct HeroSelectScreen {
    pub selected_index: usize,
}

impl HeroSelectScreen {
    pub fn new() -> Self {
        Self { selected_index: 0 }
    }

    pub fn selected(&self) -> HeroClass {
        let roster = HeroClass::all();
        roster[self.selected_index.min(roster.len() - 1)]
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < HeroClass::all().len() {
            self.selected_index += 1;
        }
    }

    /// `banner` is the date line shown under the title.
    pub fn draw(&self, f: &mut Frame, area: Rect, banner: &str) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title + date
                Constraint::Min(0),    // Roster and details
                Constraint::Length(3), // Controls
            ])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "Into the Upside Down",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                banner.to_string(),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(chunks[1]);

        self.draw_roster(f, main_chunks[0]);
        self.draw_details(f, main_chunks[1]);

        let controls = Paragraph::new("[↑/↓] Choose   [Enter] Begin   [Q] Quit")
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(controls, chunks[2]);
    }

    fn draw_roster(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = HeroClass::all()
            .iter()
            .enumerate()
            .map(|(i, class)| {
                if i == self.selected_index {
                    Line::from(Span::styled(
                        format!("> {}", class.name()),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(format!("  {}", class.name()))
                }
            })
            .collect();

        let roster = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Heroes "));
        f.render_widget(roster, area);
    }

    fn draw_details(&self, f: &mut Frame, area: Rect) {
        let class = self.selected();
        let profile = class.profile();

        let label = Style::default().fg(Color::Cyan);
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} - {}", class.name(), class.role()),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("HP ", label),
                Span::raw(format!("{}   ", profile.max_hp)),
                Span::styled("ATK ", label),
                Span::raw(format!("{}   ", profile.attack)),
                Span::styled("DEF ", label),
                Span::raw(profile.defense.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Gold ", label),
                Span::raw(profile.starting_gold.to_string()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Special: ", label),
                Span::styled(
                    class.special_name(),
                    Style::default().fg(Color::Magenta),
                ),
            ]),
            Line::from(format!("  {}", class.special_description())),
            Line::from(""),
            Line::from(Span::styled("Starting pack:", label)),
        ];
        for item in &profile.starting_items {
            lines.push(Line::from(format!(
                "  • {} ({})",
                display_name(&item.name),
                item.magnitude
            )));
        }

        let details = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Details "));
        f.render_widget(details, area);
    }
}
