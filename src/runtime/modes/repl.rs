//! Interactive shell
//!
//! Runs the lifecycle service and the cleanup scheduler in-process and
//! reads commands from stdin. The current user id lives only in memory.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

use crate::errors::ShortlifeError;
use crate::runtime::lifetime;
use crate::services::{CreateLinkRequest, InMemoryNotifier, LinkLifecycleService};
use crate::utils::validate_target_url;

const HELP: &str = "\
Commands:
  create <url> [max_clicks] [ttl_seconds]  - create a new short link
  open <code>                              - resolve a short link (counts a click)
  list                                     - list your links
  delete <code>                            - delete your link
  notifications                            - list your notifications
  uid                                      - show current user id
  setuid <uuid|new>                        - switch user id ('new' generates one)
  exit                                     - quit";

/// Output of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplOutput {
    pub text: String,
    pub is_error: bool,
    pub exit: bool,
}

impl ReplOutput {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
            exit: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
            exit: false,
        }
    }
}

pub struct Repl {
    service: Arc<LinkLifecycleService>,
    notifier: Arc<InMemoryNotifier>,
    current_user: Option<Uuid>,
}

impl Repl {
    pub fn new(service: Arc<LinkLifecycleService>, notifier: Arc<InMemoryNotifier>) -> Self {
        Self {
            service,
            notifier,
            current_user: None,
        }
    }

    pub fn current_user(&self) -> Option<Uuid> {
        self.current_user
    }

    /// Execute one input line
    pub fn execute(&mut self, line: &str) -> ReplOutput {
        let line = line.trim();
        if line.is_empty() {
            return ReplOutput::ok("");
        }

        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd.to_lowercase().as_str() {
            "help" | "h" => ReplOutput::ok(HELP),
            "uid" => ReplOutput::ok(match self.current_user {
                Some(id) => format!("Current user id: {}", id),
                None => "Current user id: <not set>".to_string(),
            }),
            "setuid" => self.set_user(arg),
            "create" => self.create(arg),
            "open" => self.open(arg),
            "list" => self.list(),
            "delete" => self.delete(arg),
            "notifications" => self.notifications(),
            "exit" | "quit" => ReplOutput {
                text: "Bye".to_string(),
                is_error: false,
                exit: true,
            },
            _ => ReplOutput::error("Unknown command. Type 'help' for commands"),
        }
    }

    fn set_user(&mut self, arg: &str) -> ReplOutput {
        if arg.is_empty() {
            return ReplOutput::error("Usage: setuid <uuid|new>");
        }

        if arg.eq_ignore_ascii_case("new") {
            let id = Uuid::new_v4();
            self.current_user = Some(id);
            return ReplOutput::ok(format!("Generated new user id: {}", id));
        }

        match Uuid::parse_str(arg) {
            Ok(id) => {
                self.current_user = Some(id);
                ReplOutput::ok(format!("Switched to user id: {}", id))
            }
            Err(_) => ReplOutput::error("Invalid UUID format"),
        }
    }

    fn create(&mut self, arg: &str) -> ReplOutput {
        let mut parts = arg.split_whitespace();
        let Some(url) = parts.next() else {
            return ReplOutput::error("Usage: create <url> [max_clicks] [ttl_seconds]");
        };

        let target_url = match validate_target_url(url) {
            Ok(url) => url,
            Err(e) => return ReplOutput::error(e.format_simple()),
        };

        let max_clicks = match parts.next().map(str::parse::<u32>).transpose() {
            Ok(v) => v,
            Err(e) => return ReplOutput::error(format!("Invalid max_clicks: {}", e)),
        };
        let ttl_seconds = match parts.next().map(str::parse::<u64>).transpose() {
            Ok(v) => v,
            Err(e) => return ReplOutput::error(format!("Invalid ttl_seconds: {}", e)),
        };

        let request = CreateLinkRequest {
            target_url,
            owner_id: self.current_user,
            max_clicks,
            ttl_seconds,
        };

        match self.service.create(request) {
            Ok(link) => {
                let mut text = String::new();
                if self.current_user.is_none() {
                    self.current_user = Some(link.owner_id);
                    text.push_str(&format!(
                        "A new user id was generated: {}\n",
                        link.owner_id
                    ));
                }
                text.push_str(&format!(
                    "Created: {}\nShort URL: {}",
                    link.code,
                    self.service.short_url(&link)
                ));
                ReplOutput::ok(text)
            }
            Err(e) => ReplOutput::error(format!("Failed to create short link: {}", e)),
        }
    }

    fn open(&self, code: &str) -> ReplOutput {
        if code.is_empty() {
            return ReplOutput::error("Usage: open <code>");
        }

        match self.service.resolve(code) {
            Some(link) => ReplOutput::ok(format!("Target URL: {}", link.target_url)),
            None => ReplOutput::error(format!("Link not found / expired / inactive: {}", code)),
        }
    }

    fn list(&self) -> ReplOutput {
        let Some(owner_id) = self.current_user else {
            return ReplOutput::error("No user id set. Create a link first or use setuid");
        };

        let mut links = self.service.list_owned(owner_id);
        if links.is_empty() {
            return ReplOutput::ok("You have no links");
        }
        links.sort_by_key(|link| link.created_at);

        let now = Utc::now();
        let mut text = String::from("Your links:");
        for link in links {
            text.push_str(&format!(
                "\n  {} -> {} | clicks={}/{} | expires={} | active={}",
                link.code,
                link.target_url,
                link.click_count(),
                link.max_clicks,
                link.expires_at().to_rfc3339(),
                link.is_usable_at(now)
            ));
        }
        ReplOutput::ok(text)
    }

    fn delete(&self, code: &str) -> ReplOutput {
        if code.is_empty() {
            return ReplOutput::error("Usage: delete <code>");
        }
        let Some(owner_id) = self.current_user else {
            return ReplOutput::error("No user id set. Use setuid or create a link first");
        };

        match self.service.delete(code, owner_id) {
            Ok(true) => ReplOutput::ok(format!("Deleted: {}", code)),
            Ok(false) => ReplOutput::error(format!("Link not found: {}", code)),
            Err(e @ ShortlifeError::OwnershipViolation(_)) => {
                ReplOutput::error(format!("Forbidden: {}", e.message()))
            }
            Err(e) => ReplOutput::error(format!("Failed to delete: {}", e)),
        }
    }

    fn notifications(&self) -> ReplOutput {
        let Some(owner_id) = self.current_user else {
            return ReplOutput::error("No user id set. Use setuid or create a link first");
        };

        let messages = self.notifier.notifications(owner_id);
        if messages.is_empty() {
            return ReplOutput::ok("No notifications");
        }

        let mut text = String::from("Notifications:");
        for message in messages {
            text.push_str(&format!("\n  - {}", message));
        }
        ReplOutput::ok(text)
    }
}

/// Run the interactive shell until `exit` or end of input
pub async fn run_repl() -> Result<()> {
    let ctx = lifetime::startup::prepare_startup()?;
    let mut repl = Repl::new(ctx.service.clone(), ctx.notifier.clone());

    println!("URL shortener shell ready. Type 'help' for commands");
    println!("Note: links and user ids are kept in memory and lost on exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".cyan().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let output = repl.execute(&line);
        if output.is_error {
            println!("{}", output.text.red());
        } else if !output.text.is_empty() {
            println!("{}", output.text);
        }
        if output.exit {
            break;
        }
    }

    lifetime::shutdown::shutdown(ctx);
    Ok(())
}
