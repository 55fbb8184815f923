//! Terminal chat with The Chatty Python.
//!
//! Needs `HUGGING_TOKEN` and the two local indexes (see `Settings`).
//!
//! Commands: `/clear`, `/hiss`, `/style <neutral|analytic|enthusiastic>`,
//! `/temp <0..1>`, `/quit`.

use std::io::Write;

use chatty_python::{
    chain::ChattyPython,
    config::Settings,
    prompt::ResponseStyle,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let settings = Settings::from_env();
    let bot = ChattyPython::from_settings(&settings).await?;
    let mut session = bot.new_session();

    println!("The Chatty Python. Curious minds wanted!");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_once(' ').unwrap_or((line, "")) {
            ("/quit", _) => break,
            ("/clear", _) => {
                session.clear();
                println!("Chat history cleared.");
            }
            ("/hiss", _) => {
                session.hiss_mode = !session.hiss_mode;
                println!("Hiss mode {}.", if session.hiss_mode { "on" } else { "off" });
            }
            ("/style", name) => match name.parse::<ResponseStyle>() {
                Ok(style) => {
                    session.response_style = style;
                    println!("Response style: {}", style);
                }
                Err(e) => println!("{}", e),
            },
            ("/temp", value) => match value.trim().parse::<f32>() {
                Ok(t) if (0.0..=1.0).contains(&t) => {
                    session.temperature = t;
                    println!("Temperature: {}", t);
                }
                _ => println!("Temperature must be a number between 0 and 1."),
            },
            _ => {
                let turn = bot.respond(session, line).await?;
                println!("{}", turn.answer);
                session = turn.session;
            }
        }
    }

    Ok(())
}
