//! Room Navigation: Drill-Down Trail
//!
//! Drives a `NavigationStack` from the keyboard and redraws the breadcrumb
//! only when the rendered trail changes. `Enter` opens a child screen,
//! `Esc`/`Backspace` go back, `Home` returns to the root, `q` quits.
//!
//! ```bash
//! cargo run --example nav_trail
//! ```

use std::io::{self, Write};
use std::sync::Arc;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};
use room_nav::{
    Breadcrumb, BreadcrumbListener, FileSink, LifecycleListener, LogLevel, Logger, NamedScreen,
    NavigationKeymap, NavigationStack, Result, StackConfig,
};

const CHILDREN: [&str; 4] = ["pods", "containers", "logs", "yaml"];

fn main() -> Result<()> {
    let mut config = StackConfig::default();
    let log_path = std::env::temp_dir().join("room_nav_trail.jsonl");
    let sink = FileSink::new(&log_path, 256 * 1024)?;
    config.logger = Some(Logger::new(sink).with_min_level(LogLevel::Debug));
    config.enable_metrics();

    let mut stack = NavigationStack::with_config(config);
    stack.add_listener(Arc::new(LifecycleListener::new()));
    stack.push(NamedScreen::shared("cluster"));
    let (width, _) = terminal::size()?;
    let trail = BreadcrumbListener::attach(&mut stack, Breadcrumb::with_max_width(width as usize));
    let keymap = NavigationKeymap::default();

    terminal::enable_raw_mode()?;
    let outcome = run(&mut stack, &trail, &keymap);
    terminal::disable_raw_mode()?;

    stack.dump();
    if let Some(snapshot) = stack.metrics_snapshot() {
        println!("\n{snapshot:?}");
    }
    println!("log written to {}", log_path.display());
    outcome
}

fn run(
    stack: &mut NavigationStack,
    trail: &BreadcrumbListener,
    keymap: &NavigationKeymap,
) -> Result<()> {
    let mut stdout = io::stdout();
    loop {
        if let Some(line) = trail.take_dirty() {
            queue!(
                stdout,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine)
            )?;
            write!(stdout, "{line}")?;
            stdout.flush()?;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        if keymap.handle(&key, stack).is_some() {
            continue;
        }
        match key.code {
            KeyCode::Enter => {
                let next = CHILDREN[stack.len().saturating_sub(1) % CHILDREN.len()];
                stack.push(NamedScreen::shared(next));
            }
            KeyCode::Char('q') => break,
            _ => {}
        }
    }
    execute!(stdout, cursor::MoveToNextLine(1))?;
    Ok(())
}
