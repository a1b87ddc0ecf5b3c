use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bloom_core::{Config, SurfaceStyle, WidgetView};
use bloom_ui::{ControllerHandle, DisplayController, DisplaySurface, HomeScreenSurface, Services};
use bloom_weather::{FixedPermission, NoLocationService, WeatherProvider};
use url::Url;

/// Prints display updates to the terminal
struct TerminalSurface;

impl DisplaySurface for TerminalSurface {
    fn set_clock(&mut self, text: &str) {
        tracing::trace!("clock: {}", text);
    }

    fn set_date(&mut self, text: &str) {
        println!("{text}");
    }

    fn set_affirmation(&mut self, text: &str) {
        println!("~ {text} ~");
    }

    fn set_weather(&mut self, text: &str) {
        println!("Weather: {text}");
    }

    fn set_city_entry_visible(&mut self, visible: bool) {
        if visible {
            println!("Type a city name to look up its weather.");
        }
    }

    fn set_style(&mut self, style: &SurfaceStyle) {
        println!("Theme background {}", style.root_background);
    }

    fn set_photo(&mut self, path: &Path) {
        println!("Photo: {}", path.display());
    }

    fn open_link(&mut self, url: &Url) {
        println!("Send feedback to {url}");
    }
}

struct TerminalHomeScreen;

impl HomeScreenSurface for TerminalHomeScreen {
    fn update(&mut self, view: &WidgetView) {
        tracing::info!("Home screen: {} | {} | {}", view.clock, view.date, view.affirmation);
    }
}

/// One line of terminal input
#[derive(Debug, PartialEq, Eq)]
enum UserCommand {
    Theme(String),
    Photo(PathBuf),
    Feedback,
    Quit,
    City(String),
}

/// `None` for blank lines and for `theme`/`photo` without an argument
fn parse_command(line: &str) -> Option<UserCommand> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match word {
        "" => None,
        "theme" | "photo" if rest.is_empty() => {
            println!("Usage: {word} <{}>", if word == "theme" { "id" } else { "path" });
            None
        }
        "theme" => Some(UserCommand::Theme(rest.to_string())),
        "photo" => Some(UserCommand::Photo(PathBuf::from(rest))),
        "feedback" if rest.is_empty() => Some(UserCommand::Feedback),
        "quit" if rest.is_empty() => Some(UserCommand::Quit),
        _ => Some(UserCommand::City(line.to_string())),
    }
}

/// Forward stdin commands to the controller until EOF or `quit`.
///
/// Runs on a plain thread: a blocking stdin read cannot be cancelled, and the
/// process must still exit when the controller stops on ctrl-c.
fn read_commands(handle: ControllerHandle) -> Result<()> {
    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        match parse_command(&line) {
            Some(UserCommand::Theme(id)) => handle.select_theme(id)?,
            Some(UserCommand::Photo(path)) => handle.select_photo(path)?,
            Some(UserCommand::Feedback) => handle.send_feedback()?,
            Some(UserCommand::Quit) => break,
            Some(UserCommand::City(city)) => handle.submit_city(city)?,
            None => {}
        }
    }

    handle.shutdown()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    bloom_core::init()?;

    let (config, _) = Config::default()
        .validated()
        .inspect_err(|e| eprintln!("{}", e.user_message()))?;
    let provider = WeatherProvider::new(&config.weather.base_url, &config.weather.api_key)
        .context("Failed to build weather client")?;

    // No location service on a terminal; the flow falls through to city entry
    let services = Services::new(FixedPermission::granted(), NoLocationService, provider);
    let controller = DisplayController::new(config, TerminalSurface, TerminalHomeScreen, services);

    println!("WidgetBloom - commands: theme <lavender|mint|babyblue|pink>, photo <path>, feedback, quit");

    let input = controller.handle();
    std::thread::spawn(move || {
        if let Err(e) = read_commands(input) {
            tracing::warn!("Stopped reading commands: {:#}", e);
        }
    });

    let ctrl_c = controller.handle();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = ctrl_c.shutdown();
        }
    });

    let state = controller.run().await;
    ctrl_c.abort();

    tracing::info!("WidgetBloom stopped ({:?})", state.flow);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_command("theme mint"),
            Some(UserCommand::Theme("mint".into()))
        );
        assert_eq!(
            parse_command("  photo /tmp/my garden.png "),
            Some(UserCommand::Photo(PathBuf::from("/tmp/my garden.png")))
        );
        assert_eq!(parse_command("feedback"), Some(UserCommand::Feedback));
        assert_eq!(parse_command("quit"), Some(UserCommand::Quit));
    }

    #[test]
    fn test_anything_else_is_a_city() {
        assert_eq!(
            parse_command(" Paris,FR "),
            Some(UserCommand::City("Paris,FR".into()))
        );
        assert_eq!(
            parse_command("New York"),
            Some(UserCommand::City("New York".into()))
        );
    }

    #[test]
    fn test_commands_without_argument_do_not_look_up_weather() {
        assert_eq!(parse_command("theme"), None);
        assert_eq!(parse_command("photo   "), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   "), None);
    }
}
