use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};
use upside_down::character::{Combatant, Hero};
use upside_down::combat::Battle;
use upside_down::core::constants::MAX_RAGE;
use upside_down::items::display_name;

fn hp_color(ratio: f64) -> Color {
    if ratio > 0.66 {
        Color::Green
    } else if ratio > 0.33 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn ratio(current: u32, max: u32) -> f64 {
    if max == 0 {
        0.0
    } else {
        (current as f64 / max as f64).clamp(0.0, 1.0)
    }
}

/// Draws the hero's HP/mana/rage gauges, gold and pack.
pub fn draw_hero_panel(frame: &mut Frame, area: Rect, hero: &Hero) {
    let title = format!(" {} ({}) ", hero.class().name(), hero.class().role());
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // HP
            Constraint::Length(1), // Mana
            Constraint::Length(1), // Rage
            Constraint::Length(1), // ATK/DEF/Gold
            Constraint::Min(0),    // Items
        ])
        .split(inner);

    let stats = hero.stats();
    let hp = ratio(stats.current_hp, stats.max_hp);
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(hp_color(hp)).add_modifier(Modifier::BOLD))
            .label(format!("HP {}/{}", stats.current_hp, stats.max_hp))
            .ratio(hp),
        chunks[0],
    );

    let mana = hero.mana();
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Blue))
            .label(format!("Mana {}/{}", mana.current, mana.max))
            .ratio(ratio(mana.current, mana.max)),
        chunks[1],
    );

    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .label(format!("Rage {}/{}", hero.rage(), MAX_RAGE))
            .ratio(ratio(hero.rage(), MAX_RAGE)),
        chunks[2],
    );

    let gold_color = if hero.gold() < 0 {
        Color::Red
    } else {
        Color::Yellow
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(format!("ATK {}  DEF {}  ", stats.attack, stats.defense)),
            Span::styled(
                format!("Gold {}", hero.gold()),
                Style::default().fg(gold_color),
            ),
        ])),
        chunks[3],
    );

    let inventory = hero.inventory();
    let items: Vec<Line> = if inventory.is_empty() {
        vec![Line::from(Span::styled(
            "Pack is empty",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        inventory
            .item_names()
            .iter()
            .map(|name| {
                Line::from(format!(
                    "• {} x{}",
                    display_name(name),
                    inventory.count(name)
                ))
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(items), chunks[4]);
}

/// Draws the current foe, or the idle state between fights.
pub fn draw_monster_panel(frame: &mut Frame, area: Rect, battle: Option<&Battle>) {
    let Some(battle) = battle else {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "No enemies in sight...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )))
        .block(Block::default().borders(Borders::ALL).title(" Enemy "));
        frame.render_widget(paragraph, area);
        return;
    };

    let monster = battle.monster();
    let title = if monster.is_boss {
        format!(" 👑 {} ", monster.stats.name)
    } else {
        format!(" {} ", monster.stats.name)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let hp = ratio(monster.stats.current_hp, monster.stats.max_hp);
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .label(format!(
                "HP {}/{}",
                monster.stats.current_hp, monster.stats.max_hp
            ))
            .ratio(hp),
        chunks[0],
    );

    let line = Line::from(format!(
        "ATK {}  DEF {}  Flee {}%",
        monster.stats.attack,
        monster.stats.defense,
        battle.flee_chance()
    ));
    frame.render_widget(Paragraph::new(line), chunks[1]);
}
