mod commands;
mod config;
mod sources;
mod states;

use std::fs::File;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use autocomplete_lib::{Autocomplete, ConfigError, EventResult, ResolveError, ResultItem};
use serde_json::Value;
use simplelog::WriteLogger;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::{Command, HELP};
use crate::config::CliConfig;
use crate::sources::Demo;

/// Upper bound on waiting for an asynchronous resolution to render.
const RENDER_WAIT: Duration = Duration::from_secs(15);

/// One widget at a time, driven from the terminal.
struct Session {
    demo: Demo,
    widget: Autocomplete,
}

impl Session {
    fn new(demo: Demo) -> Result<Self, ConfigError> {
        let config = demo.config(
            Arc::new(|value: &Value| println!("on_select: {value}")),
            Arc::new(|err: &ResolveError| println!("(no results: {err})")),
        )?;
        Ok(Self {
            demo,
            widget: Autocomplete::attach(config),
        })
    }

    fn switch(&mut self, demo: Demo) {
        match Session::new(demo) {
            Ok(next) => {
                self.widget.detach();
                *self = next;
                println!("now using {}", self.demo);
            }
            Err(e) => println!("cannot use {demo}: {e}"),
        }
    }

    /// Runs one command. Returns `false` on quit.
    async fn run(&mut self, command: Command) -> bool {
        match command {
            Command::Use(demo) => self.switch(demo),
            Command::Type(text) => {
                let mut rx = self.widget.subscribe();
                self.widget.on_query_input(text);
                if tokio::time::timeout(RENDER_WAIT, rx.changed()).await.is_err() {
                    println!("(still waiting for results)");
                }
                self.print_dropdown();
            }
            Command::Press(key) => {
                let committed = self.widget.selected();
                if self.widget.on_key(key) == EventResult::Ignored {
                    println!("(ignored)");
                }
                self.after_event(committed);
            }
            Command::Click(row) => {
                let committed = self.widget.selected();
                if !self.widget.on_click(row).is_handled() {
                    println!("(no row {row})");
                }
                self.after_event(committed);
            }
            Command::Blur => {
                self.widget.on_blur();
                self.print_state();
            }
            Command::Show => self.print_state(),
            Command::Help => println!("{HELP}"),
            Command::Quit => {
                self.widget.detach();
                return false;
            }
        }
        true
    }

    fn after_event(&self, before: Option<ResultItem>) {
        let after = self.widget.selected();
        if after != before
            && let Some(item) = after
        {
            match item.image_url {
                Some(url) => println!("selected: {} [{url}]", item.display_text),
                None => println!("selected: {}", item.display_text),
            }
        }
        self.print_state();
    }

    fn print_state(&self) {
        println!(
            "[{}] input={:?} query={:?}",
            self.demo,
            self.widget.input_text(),
            self.widget.current_query()
        );
        self.print_dropdown();
    }

    fn print_dropdown(&self) {
        let dropdown = self.widget.dropdown();
        println!("<ul class=\"results {}\">", dropdown.border.class_name());
        for (i, row) in dropdown.rows.iter().enumerate() {
            let marker = if row.active { '>' } else { ' ' };
            println!("{marker} {i:>2}  {}", row.text);
        }
        self.widget.clear_dirty();
    }
}

#[tokio::main]
async fn main() {
    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    match File::create(&config.log_file) {
        Ok(log_file) => {
            let _ = WriteLogger::init(config.log_level, simplelog::Config::default(), log_file);
        }
        Err(e) => eprintln!("Warning: cannot create {}: {}", config.log_file.display(), e),
    }

    let mut session = match Session::new(Demo::States) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    println!("autocomplete demo, using {} (type `help`)", session.demo);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        };

        match line.parse::<Command>() {
            Ok(command) => {
                if !session.run(command).await {
                    break;
                }
            }
            Err(e) => println!("{e}"),
        }
    }
}
