use std::{
    cell::Cell,
    io,
    rc::Rc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, style::Color};

use crate::{constants::TIME_SETTINGS, domain::CategoryType, pie::TaskPie};

mod chart;
mod event_handlers;
mod render_views;
mod simulation;

const NOT_STARTED: usize = 0;
const LATE: usize = 1;
const IN_PROGRESS: usize = 2;
const COMPLETED: usize = 3;

struct App {
    pie: TaskPie,
    render_needed: Rc<Cell<bool>>,
    count_changes: Rc<Cell<u64>>,
    selected_index: usize,
    paused: bool,
    started_at: Instant,
    last_not_started: Instant,
    last_in_progress: Instant,
    last_late: Instant,
}

impl App {
    fn new() -> Self {
        let mut pie = TaskPie::new();

        let render_needed = Rc::new(Cell::new(true));
        let dirty = Rc::clone(&render_needed);
        pie.on_refresh(move || dirty.set(true));

        let count_changes = Rc::new(Cell::new(0u64));
        let changes = Rc::clone(&count_changes);
        pie.on_count_changed(move |_category, _new_value, _old_value| {
            changes.set(changes.get() + 1);
        });

        pie.edit(|p| {
            p.add_category(
                "Not started",
                Color::Rgb(255, 201, 14),
                Some(CategoryType::NotStarted),
                Some(0.0),
            );
            p.add_category(
                "Late",
                Color::Rgb(213, 65, 48),
                Some(CategoryType::NotStarted),
                Some(0.0),
            );
            p.add_category(
                "In progress",
                Color::Rgb(76, 171, 225),
                Some(CategoryType::InProgress),
                Some(0.0),
            );
            p.add_category(
                "Completed",
                Color::Rgb(136, 190, 57),
                Some(CategoryType::Completed),
                Some(0.0),
            );
        });

        let now = Instant::now();
        let mut app = Self {
            pie,
            render_needed,
            count_changes,
            selected_index: 0,
            paused: false,
            started_at: now,
            last_not_started: now,
            last_in_progress: now,
            last_late: now,
        };

        app.reset_if_all_done();
        app
    }
}

pub fn run_ui() -> Result<(), io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    let render_rate = Duration::from_millis(1000 / TIME_SETTINGS.target_fps);
    let mut last_render = Instant::now();

    loop {
        app.tick_simulation();

        if last_render.elapsed() >= render_rate && app.render_needed.get() {
            terminal.draw(|f| {
                app.draw_frame(f);
            })?;
            app.render_needed.set(false);
            last_render = Instant::now();
        }

        if event::poll(Duration::from_millis(10))?
            && let Event::Key(key) = event::read()?
            && app.handle_key(key.code)
        {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
