//! Terminal player
//!
//! Boots an [`App`] and drives it from stdin.

use crate::application::{App, TapOutcome};
use crate::cli::view_state::{ViewState, clear_screen, describe};
use crate::input::InputOutcome;
use std::io::{self, Write};

/// One line of player input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Activate the n-th region (1-based)
    Region(usize),
    /// Choose the n-th story slot (1-based)
    Choice(usize),
    /// Tap at a point in percent
    Tap(f32, f32),
    /// Navigate to a screen id or alias
    Go(String),
    Show,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let head = words.next().unwrap_or("");

        match head {
            "" | "l" => Self::Show,
            "q" => Self::Quit,
            "g" => match words.next() {
                Some(target) => Self::Go(target.to_string()),
                None => Self::Unknown(line.to_string()),
            },
            "t" => {
                let x = words.next().and_then(|w| w.parse().ok());
                let y = words.next().and_then(|w| w.parse().ok());
                match (x, y) {
                    (Some(x), Some(y)) => Self::Tap(x, y),
                    _ => Self::Unknown(line.to_string()),
                }
            }
            _ => {
                if let Some(n) = head.strip_prefix('c').and_then(|n| n.parse().ok()) {
                    Self::Choice(n)
                } else if let Ok(n) = head.parse() {
                    Self::Region(n)
                } else {
                    Self::Unknown(line.to_string())
                }
            }
        }
    }
}

/// Run the player loop against a booted app
pub async fn run_play(app: &App) -> anyhow::Result<()> {
    let mut view = ViewState::new();

    println!("=== versecraft ===");
    println!();
    println!("Controls:");
    println!("  <n>        activate region n");
    println!("  c<n>       choose story slot n");
    println!("  t <x> <y>  tap at a point (percent)");
    println!("  g <id>     go to a screen or alias");
    println!("  l          show the screen again");
    println!("  q          quit");
    println!();

    show(app, &mut view, true);

    loop {
        let Some(input) = get_input(">")? else {
            return Ok(());
        };
        match Command::parse(&input) {
            Command::Quit => {
                println!("Goodbye!");
                return Ok(());
            }
            Command::Show => show(app, &mut view, true),
            Command::Go(target) => {
                if app.go(&target).await.is_none() {
                    println!("[Cannot go to {}]", target);
                }
                show(app, &mut view, false);
            }
            Command::Choice(n) => {
                if n == 0 || app.choose(n - 1).await.is_none() {
                    println!("[Not a choice]");
                }
                show(app, &mut view, false);
            }
            Command::Region(n) => {
                let center = {
                    let stage = app.stage().borrow();
                    n.checked_sub(1).and_then(|i| {
                        stage
                            .active_surface()
                            .and_then(|s| s.regions.get(i))
                            .map(|r| r.rect.center())
                    })
                };
                match center {
                    Some((x, y)) => report(app.tap(x, y).await),
                    None => println!("[No region {}]", n),
                }
                show(app, &mut view, false);
            }
            Command::Tap(x, y) => {
                report(app.tap(x, y).await);
                show(app, &mut view, false);
            }
            Command::Unknown(line) => {
                println!("Invalid input: {}", line);
            }
        }
    }
}

fn report(outcome: TapOutcome) {
    match outcome {
        TapOutcome::Slot(None) => println!("[Not a choice]"),
        TapOutcome::Input(InputOutcome::Ignored) => println!("[Nothing there]"),
        TapOutcome::Input(InputOutcome::Navigated(None)) => println!("[Navigation refused]"),
        TapOutcome::Input(InputOutcome::Unhandled { action, .. }) => {
            println!("[Unhandled action {}]", action)
        }
        _ => {}
    }
}

fn show(app: &App, view: &mut ViewState, force: bool) {
    let stage = app.stage().borrow();
    let delta = view.observe(&stage);
    if delta.screen_changed {
        clear_screen();
    }
    if force || !delta.is_empty() {
        print!("{}", describe(&stage));
    }
}

/// `None` at end of input
fn get_input(prompt: &str) -> io::Result<Option<String>> {
    if !prompt.is_empty() {
        print!("{} ", prompt);
        io::stdout().flush()?;
    }

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_player_commands() {
        assert_eq!(Command::parse("3"), Command::Region(3));
        assert_eq!(Command::parse("c2"), Command::Choice(2));
        assert_eq!(Command::parse("g last_library"), Command::Go("last_library".to_string()));
        assert_eq!(Command::parse("t 10.5 70"), Command::Tap(10.5, 70.0));
        assert_eq!(Command::parse(""), Command::Show);
        assert_eq!(Command::parse("q"), Command::Quit);
        assert_eq!(Command::parse("g"), Command::Unknown("g".to_string()));
        assert_eq!(Command::parse("dance"), Command::Unknown("dance".to_string()));
    }
}
