//! Blockhop entry point
//!
//! Terminal setup, input handling and the fixed-tick game loop. All game
//! logic lives in `blockhop::sim`; this binary only feeds it input and hands
//! the resulting state to the renderer.

use std::collections::HashMap;
use std::io::{BufWriter, Write, stdout};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand, cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
};

use blockhop::consts::SIM_DT;
use blockhop::render;
use blockhop::sim::{GameState, TickInput, tick};

/// Wall-clock duration of one tick
const FRAME: Duration = Duration::from_micros((SIM_DT * 1_000_000.0) as u64);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many ticks. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate keeps refreshing the timestamp while the key is
/// down, and the window expires shortly after it is let go.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` ticks.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: KeyCode, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn main() -> std::io::Result<()> {
    env_logger::init();
    log::info!("blockhop starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the tick loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped, program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("blockhop exiting");
    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut state = GameState::new();
    let mut input = TickInput::default();

    // Maps each held key to the tick it was last seen (press or repeat)
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // Drain all pending input events (non-blocking)
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Esc => input.quit = true,
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            input.quit = true;
                        }
                        KeyCode::Enter => input.confirm = true,
                        KeyCode::Char('r') | KeyCode::Char('R') => input.restart = true,
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so the key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                // Release: drop the key immediately where supported
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        input.left = is_held(&key_frame, KeyCode::Left, frame)
            || is_held(&key_frame, KeyCode::Char('a'), frame)
            || is_held(&key_frame, KeyCode::Char('A'), frame);
        input.right = is_held(&key_frame, KeyCode::Right, frame)
            || is_held(&key_frame, KeyCode::Char('d'), frame)
            || is_held(&key_frame, KeyCode::Char('D'), frame);
        // Jump is held rather than one-shot: the body is only grounded on
        // the ticks where gravity actually pressed it into the floor, so a
        // single-tick intent would be dropped half the time.
        input.jump = is_held(&key_frame, KeyCode::Char('z'), frame)
            || is_held(&key_frame, KeyCode::Char('Z'), frame)
            || is_held(&key_frame, KeyCode::Char(' '), frame)
            || is_held(&key_frame, KeyCode::Up, frame);

        tick(&mut state, &input, SIM_DT);

        // Clear one-shot inputs after processing
        input.confirm = false;
        input.restart = false;
        input.quit = false;

        if state.exit_requested {
            return Ok(());
        }

        render::render(out, &state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}
