mod ui;

use chrono::Local;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand_chacha::ChaCha8Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ui::game_over::draw_game_over;
use ui::hero_select::HeroSelectScreen;
use ui::narration::{LogEntry, NarrationLog, Narrator, Tone};
use ui::play_scene::draw_play_scene;
use upside_down::character::HeroClass;
use upside_down::combat::PlayerAction;
use upside_down::core::constants::NARRATION_LOG_CAPACITY;
use upside_down::core::{Campaign, Choice, Decision, Dice};
use upside_down::encounters::VignetteChoice;

type GameCampaign = Campaign<Dice<ChaCha8Rng>>;

/// Into the Upside Down: a turn-based terminal adventure.
#[derive(Parser, Debug)]
#[command(name = "upside-down")]
#[command(version, about = "Survive twenty turns in the Upside Down", long_about = None)]
struct Args {
    /// Seed the dice for a reproducible campaign
    #[arg(long = "seed", env = "UPSIDE_DOWN_SEED")]
    seed: Option<u64>,

    /// Write tracing output to this file
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Skip hero selection and start with this class
    #[arg(long = "hero")]
    hero: Option<HeroClass>,
}

enum Screen {
    HeroSelect,
    Playing,
    GameOver,
}

struct App {
    screen: Screen,
    hero_select: HeroSelectScreen,
    campaign: Option<GameCampaign>,
    seed: Option<u64>,
    narrator: Narrator,
    log: NarrationLog,
    selected_action: usize,
    should_quit: bool,
}

impl App {
    fn new(seed: Option<u64>) -> Self {
        Self {
            screen: Screen::HeroSelect,
            hero_select: HeroSelectScreen::new(),
            campaign: None,
            seed,
            narrator: Narrator::new(),
            log: NarrationLog::new(NARRATION_LOG_CAPACITY),
            selected_action: 0,
            should_quit: false,
        }
    }

    /// Starts a campaign. A replay keeps the existing dice so a seeded
    /// session stays one reproducible stream.
    fn start(&mut self, class: HeroClass) {
        match self.campaign.as_mut() {
            Some(campaign) => campaign.restart(class),
            None => {
                let dice = match self.seed {
                    Some(seed) => Dice::seeded(seed),
                    None => Dice::from_entropy(),
                };
                self.campaign = Some(Campaign::new(class, dice));
            }
        }
        info!(hero = class.name(), seed = ?self.seed, "Campaign started");

        self.narrator = Narrator::new();
        self.log.clear();
        self.log.push(LogEntry::new(
            format!(
                "📖 Storyteller: {} steps through the gate into the Upside Down.",
                class.name()
            ),
            Tone::Story,
        ));
        self.selected_action = 0;
        self.screen = Screen::Playing;
    }

    fn submit(&mut self, choice: Choice) {
        let Some(campaign) = self.campaign.as_mut() else {
            return;
        };
        match campaign.decide(choice) {
            Ok(events) => {
                let entries = self.narrator.narrate_all(&events);
                self.log.extend(entries);
            }
            Err(e) => {
                warn!(error = %e, "Choice rejected");
                self.log.push(LogEntry::new(format!("⚠ {}", e), Tone::Bad));
            }
        }
        self.selected_action = 0;
    }

    fn handle_key(&mut self, code: KeyCode) {
        match self.screen {
            Screen::HeroSelect => match code {
                KeyCode::Up => self.hero_select.move_up(),
                KeyCode::Down => self.hero_select.move_down(),
                KeyCode::Enter => self.start(self.hero_select.selected()),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.should_quit = true
                }
                _ => {}
            },
            Screen::Playing => self.handle_play_key(code),
            Screen::GameOver => match code {
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    self.screen = Screen::HeroSelect;
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    self.should_quit = true
                }
                _ => {}
            },
        }
    }

    fn handle_play_key(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
            self.should_quit = true;
            return;
        }
        let Some(decision) = self.campaign.as_ref().map(|c| c.pending()) else {
            return;
        };

        match decision {
            Decision::Advance => {
                if code == KeyCode::Enter {
                    self.submit(Choice::Advance);
                }
            }
            Decision::Battle { legal } => match code {
                KeyCode::Left | KeyCode::Up => {
                    self.selected_action = self.selected_action.saturating_sub(1);
                }
                KeyCode::Right | KeyCode::Down => {
                    if self.selected_action + 1 < legal.len() {
                        self.selected_action += 1;
                    }
                }
                KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                    let index = c as usize - '1' as usize;
                    if index < legal.len() {
                        self.selected_action = index;
                        self.submit_action(&legal);
                    }
                }
                KeyCode::Enter => self.submit_action(&legal),
                _ => {}
            },
            Decision::Vignette { .. } => match code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.submit(Choice::Vignette(VignetteChoice::Accept))
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.submit(Choice::Vignette(VignetteChoice::Decline))
                }
                _ => {}
            },
            Decision::Finished(_) => {
                if code == KeyCode::Enter {
                    self.screen = Screen::GameOver;
                }
            }
        }
    }

    fn submit_action(&mut self, legal: &[PlayerAction]) {
        if let Some(action) = legal.get(self.selected_action) {
            self.submit(Choice::Battle(action.clone()));
        }
    }
}

fn init_logging(path: &PathBuf) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    // The terminal owns stdout, so tracing only goes to a file.
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let mut app = App::new(args.seed);
    if let Some(class) = args.hero {
        app.start(class);
    }
    let banner = Local::now().format("%A, %B %-d, %Y").to_string();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &banner);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    banner: &str,
) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|f| {
            let area = f.size();
            match app.screen {
                Screen::HeroSelect => app.hero_select.draw(f, area, banner),
                Screen::Playing => {
                    if let Some(campaign) = &app.campaign {
                        draw_play_scene(f, area, campaign, &app.log, app.selected_action);
                    }
                }
                Screen::GameOver => {
                    if let Some(campaign) = &app.campaign {
                        if let Some(result) = campaign.result() {
                            draw_game_over(f, area, result, campaign.hero().gold());
                        }
                    }
                }
            }
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }
    }
    Ok(())
}
