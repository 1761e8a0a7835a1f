use std::io::{self, BufRead, Write};

use chatdesk::client::ApiClient;
use chatdesk::config::{config_path, load_or_init};
use chatdesk::session::{ChatSession, SubmitError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let config = load_or_init(&config_path())?;
  let api = ApiClient::new(&config)?;
  let mut session = ChatSession::new();
  let mut thinking = false;

  println!("chatdesk (local AI chat)");
  print_status(api.health().await);
  println!("commands: /mode /history /clear /status /quit");

  let stdin = io::stdin();
  let mut lines = stdin.lock().lines();

  loop {
    let label = if thinking { "you (thinking)" } else { "you" };
    print!("{label}> ");
    io::stdout().flush()?;

    let Some(line) = lines.next() else { break };
    let line = line?;

    match line.trim() {
      "/quit" | "/exit" => break,
      "/mode" => {
        thinking = !thinking;
        println!("thinking mode {}", if thinking { "on" } else { "off" });
      }
      "/clear" => {
        session.clear();
        println!("history cleared");
      }
      "/status" => print_status(api.health().await),
      "/history" => render_history(&session),
      prompt => {
        let model = if thinking {
          config.thinking_model.clone()
        } else {
          config.default_model.clone()
        };
        match session.submit(prompt, Some(model.clone()), thinking) {
          Ok(idx) => {
            println!("waiting for {model}...");
            let prompt = session.entries()[idx].prompt.clone();
            match api.generate(&prompt, Some(&model), thinking).await {
              Ok(resp) => session.resolve(resp.response),
              Err(err) => session.fail(&err.to_string()),
            }
            if let Some(entry) = session.entries().last() {
              println!("assistant> {}", entry.response);
            }
          }
          Err(SubmitError::EmptyPrompt) => println!("please enter a message"),
          Err(SubmitError::RequestInFlight) => {
            println!("still waiting on the previous message")
          }
        }
      }
    }
  }

  Ok(())
}

fn print_status(connected: bool) {
  if connected {
    println!("backend connected");
  } else {
    println!("backend disconnected (start the chatdesk API server)");
  }
}

fn render_history(session: &ChatSession) {
  if session.entries().is_empty() {
    println!("no messages yet");
    return;
  }
  for entry in session.entries() {
    let ts = entry.timestamp.format("%Y-%m-%d %H:%M");
    println!("[{ts}] you> {}", entry.prompt);
    if entry.pending {
      println!("  ... waiting for the response");
    } else {
      let mode = if entry.thinking { "thinking" } else { "normal" };
      println!("[{ts}] assistant ({mode})> {}", entry.response);
    }
  }
}
